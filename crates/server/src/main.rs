mod api;
mod dto;
mod settings;
mod state;

use std::{sync::Arc, time::Instant};

use axum::routing::get;
use thor_routing::engine::Engine;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::{settings::Settings, state::AppState};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting server...");
    let settings = match Settings::from_env(std::env::args().skip(1)) {
        Ok(settings) => settings,
        Err(err) => {
            error!("Invalid settings: {err}");
            std::process::exit(1);
        }
    };

    info!("Loading data...");
    let now = Instant::now();
    let engine = Engine::new(settings.config);
    if let Err(err) = engine.initialize() {
        error!("Failed to initialize the engine: {err}");
        std::process::exit(1);
    }
    info!("Loading data took {:?}", now.elapsed());
    let state = Arc::new(AppState::new(engine));

    let app = axum::Router::new()
        .route("/health", get(api::health))
        .route("/route", get(api::route))
        .route("/search", get(api::search))
        .with_state(state);

    let listener = match tokio::net::TcpListener::bind(("0.0.0.0", settings.port)).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("Failed to bind port {}: {err}", settings.port);
            std::process::exit(1);
        }
    };
    info!("Listening to port {}", settings.port);
    if let Err(err) = axum::serve(listener, app).await {
        error!("Server stopped: {err}");
    }
}
