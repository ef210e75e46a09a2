//! AeroSense HTTP Server Binary
//!
//! This is the main entry point for the AeroSense REST API server.
//! It wires the provider clients into the service layer, sets up the HTTP
//! router, and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! OPENWEATHER_API_KEY=... GEMINI_API_KEY=... cargo run --bin aerosense-server
//! ```
//!
//! Missing API keys do not prevent startup; the affected providers degrade
//! to their deterministic fallbacks.
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `RUST_LOG`: Log level (default: info)
//! - Provider variables: see [`aerosense_backend::config::ProviderConfig`]

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use aerosense_backend::config::ProviderConfig;
use aerosense_backend::http::{create_router, AppState};
use aerosense_backend::providers::gemini::GeminiClient;
use aerosense_backend::providers::openaq::OpenAqClient;
use aerosense_backend::providers::openweather::OpenWeatherClient;
use aerosense_backend::providers::satellite::TempoClient;
use aerosense_backend::services::{AdvisoryResponder, SourceAggregator};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .init();

    info!("Starting AeroSense HTTP Server");

    // Build the provider clients once and share them across the app
    let config = ProviderConfig::from_env();
    let http = reqwest::Client::new();

    let ground = Arc::new(OpenAqClient::new(http.clone(), &config));
    let satellite = Arc::new(TempoClient::new(http.clone(), &config));
    let weather = Arc::new(OpenWeatherClient::new(http.clone(), &config));
    let backend = Arc::new(GeminiClient::new(http, &config));

    let aggregator = Arc::new(SourceAggregator::new(ground, satellite, weather.clone()));
    let responder = Arc::new(AdvisoryResponder::new(backend));
    info!("Provider clients initialized");

    // Create application state
    let state = AppState::new(aggregator, responder, weather);

    // Create router with all endpoints
    let app = create_router(state);

    // Determine bind address
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Server listening on http://{}", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
