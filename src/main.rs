/// Main entry point for the habit tracker
///
/// This file sets up logging, parses command line arguments, and either logs a
/// habit from the command line or starts the HTTP server.

use clap::Parser;
use tracing::info;

use habit_tracker::cli::{self, Cli};
use habit_tracker::server::HabitServer;
use habit_tracker::Controller;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(format!("habit_tracker={}", args.log_level()))
        .with_writer(std::io::stderr) // Send logs to stderr, not stdout
        .init();

    if let Some(address) = args.serve.clone() {
        let config = args.config();
        info!("Using {:?} store in {}", config.store, config.dir.display());

        let server = HabitServer::new(Controller::new(config.open_store()?), address)?;
        server.run().await?;
        return Ok(());
    }

    // cli::run has already shown the error to the user
    let mut stdout = std::io::stdout();
    if cli::run(&args, &mut stdout).is_err() {
        std::process::exit(1);
    }

    Ok(())
}
