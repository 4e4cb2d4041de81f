/// HTTP routing tests, driven through the router without a socket
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::{Duration, Local};
use habit_tracker::server::{HabitServer, BAD_QUERY_MESSAGE};
use habit_tracker::*;
use tower::ServiceExt;

fn server_with(habits: Vec<Habit>) -> HabitServer {
    let store: BoxedStore = Box::new(MemoryStore::with_habits(habits));
    HabitServer::new(Controller::new(store), "127.0.0.1:0").expect("valid address")
}

async fn get(router: Router, uri: &str) -> (StatusCode, String) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[test]
fn test_new_server_rejects_empty_address() {
    let store: BoxedStore = Box::new(MemoryStore::new());
    assert!(HabitServer::new(Controller::new(store), "").is_err());
}

#[test]
fn test_new_server_keeps_address() {
    let store: BoxedStore = Box::new(MemoryStore::new());
    let server = HabitServer::new(Controller::new(store), "http://test.net:8080").unwrap();
    assert_eq!(server.address(), "http://test.net:8080");
}

#[tokio::test]
async fn test_index_returns_habit() {
    let server = server_with(vec![Habit::from_existing("piano", 2, Local::now(), Frequency::Daily)]);
    let (status, body) = get(server.routes(), "/?habit=piano").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("piano"));
    assert!(body.contains("for 3 days in a row"));
}

#[tokio::test]
async fn test_index_creates_daily_habit_by_default() {
    let server = server_with(vec![]);
    let (status, body) = get(server.routes(), "/?habit=piano").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("do it again tomorrow"));
}

#[tokio::test]
async fn test_index_frequency_validation() {
    let server = server_with(vec![]);

    let (status, _) = get(server.routes(), "/?habit=piano&frequency=wrong").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = get(server.routes(), "/?habit=piano&frequency=weekly").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("in a week"));
}

#[tokio::test]
async fn test_all_returns_every_habit() {
    let server = server_with(vec![
        Habit::from_existing("piano", 1, Local::now(), Frequency::Daily),
        Habit::from_existing("reading", 4, Local::now() + Duration::days(1), Frequency::Daily),
    ]);
    let (status, body) = get(server.routes(), "/all").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("'piano'"));
    assert!(body.contains("4-day streak for 'reading'"));
}

#[tokio::test]
async fn test_all_on_empty_store() {
    let (status, body) = get(server_with(vec![]).routes(), "/all").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, NO_HABITS_MESSAGE);
}

#[tokio::test]
async fn test_routing() {
    let server = server_with(vec![
        Habit::from_existing("piano", 0, Local::now(), Frequency::Daily),
        Habit::from_existing("reading", 0, Local::now(), Frequency::Daily),
    ]);

    let cases = [
        ("/", StatusCode::BAD_REQUEST),
        ("/all", StatusCode::OK),
        ("/?habit=piano", StatusCode::OK),
        ("/piano", StatusCode::BAD_REQUEST),
        ("/piano?habit=piano", StatusCode::BAD_REQUEST),
        ("/?test=test", StatusCode::BAD_REQUEST),
        ("/test?test=test", StatusCode::BAD_REQUEST),
    ];

    for (path, want) in cases {
        let (status, body) = get(server.routes(), path).await;
        assert_eq!(status, want, "path {}", path);
        if want == StatusCode::BAD_REQUEST {
            assert_eq!(body, BAD_QUERY_MESSAGE, "path {}", path);
        }
    }
}
