//! # Use Case Desk
//!
//! HTTP front for the eTour and SMOS use cases.
//!
//! This is the application entry point that initializes:
//! - Configuration loading
//! - Tracing/logging subsystem
//! - In-memory repositories with demo data
//! - HTTP server

use anyhow::Result;
use tracing::info;

use usecase_desk::config::Settings;
use usecase_desk::presentation::http::handlers::health;
use usecase_desk::startup::Application;

#[tokio::main]
async fn main() -> Result<()> {
    // Configuration first: it selects the log format
    let settings = Settings::load()?;
    usecase_desk::telemetry::init_tracing(&settings.log_format);
    health::init_server_start();

    info!("Starting Use Case Desk...");
    info!(
        host = %settings.server.host,
        port = %settings.server.port,
        environment = %settings.environment,
        seed_demo_data = settings.seed_demo_data,
        "Configuration loaded"
    );

    let application = Application::build(settings).await?;

    info!("Server ready to accept connections");
    application.run_until_stopped().await?;

    Ok(())
}
