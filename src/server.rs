/// HTTP frontend
///
/// Routes:
/// - `GET /?habit=NAME[&frequency=daily|weekly]` logs a habit and returns its message
/// - `GET /all` returns one status line per habit
///
/// Anything else is answered with 400. The controller sits behind a single
/// mutex, so concurrent requests are handled one at a time.

use std::sync::{Arc, Mutex};

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use tracing::{error, info};

use crate::controller::Controller;
use crate::storage::BoxedStore;
use crate::{ErrorKind, TrackerError};

/// Controller shared by all request handlers
pub type SharedController = Arc<Mutex<Controller<BoxedStore>>>;

/// Body returned for requests that don't name a habit
pub const BAD_QUERY_MESSAGE: &str = "cannot parse querystring";

const DEFAULT_FREQUENCY: &str = "daily";

/// HTTP server wrapping a controller
pub struct HabitServer {
    address: String,
    controller: SharedController,
}

impl HabitServer {
    pub fn new(
        controller: Controller<BoxedStore>,
        address: impl Into<String>,
    ) -> Result<Self, TrackerError> {
        let address = address.into();
        if address.trim().is_empty() {
            return Err(TrackerError::Server("address cannot be empty".to_string()));
        }

        Ok(Self {
            address,
            controller: Arc::new(Mutex::new(controller)),
        })
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Router with all routes bound to this server's controller
    pub fn routes(&self) -> Router {
        router(Arc::clone(&self.controller))
    }

    /// Listen on the configured address until Ctrl-C
    pub async fn run(self) -> Result<(), TrackerError> {
        let listener = tokio::net::TcpListener::bind(&self.address).await?;
        info!("Serving habits on {}", self.address);

        axum::serve(listener, self.routes())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Habit server shut down");
        Ok(())
    }
}

/// Build the router for a shared controller
pub fn router(controller: SharedController) -> Router {
    Router::new()
        .route("/", get(handle_index))
        .route("/all", get(handle_all))
        .fallback(bad_query)
        .with_state(controller)
}

#[derive(Debug, Deserialize)]
struct IndexQuery {
    habit: Option<String>,
    frequency: Option<String>,
}

async fn handle_index(
    State(controller): State<SharedController>,
    Query(query): Query<IndexQuery>,
) -> Response {
    let Some(name) = query.habit.filter(|name| !name.is_empty()) else {
        return bad_query().await;
    };
    let frequency = query
        .frequency
        .filter(|f| !f.is_empty())
        .unwrap_or_else(|| DEFAULT_FREQUENCY.to_string());

    let result = match controller.lock() {
        Ok(mut controller) => controller.handle(&name, &frequency),
        Err(_) => Err(TrackerError::Server("controller lock poisoned".to_string())),
    };

    match result {
        Ok(habit) => (StatusCode::OK, habit.to_string()).into_response(),
        Err(e) => error_response(&e),
    }
}

async fn handle_all(State(controller): State<SharedController>) -> Response {
    let result = match controller.lock() {
        Ok(controller) => controller.summary(),
        Err(_) => Err(TrackerError::Server("controller lock poisoned".to_string())),
    };

    match result {
        Ok(summary) => (StatusCode::OK, summary).into_response(),
        Err(e) => error_response(&e),
    }
}

async fn bad_query() -> Response {
    (StatusCode::BAD_REQUEST, BAD_QUERY_MESSAGE).into_response()
}

fn error_response(e: &TrackerError) -> Response {
    let status = match e.kind() {
        ErrorKind::InvalidInput | ErrorKind::NilInput => StatusCode::BAD_REQUEST,
        ErrorKind::AlreadyExists | ErrorKind::NotFound => StatusCode::CONFLICT,
        ErrorKind::BackendFailure => {
            error!("Habit request failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, e.to_string()).into_response()
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
}
