//! `MediBot` server
//!
//! Serves the diagnosis API and forwards symptom submissions to the
//! prediction service.

use medibot::api::{create_router, ApiState};
use medibot::app_state::AppState;
use medibot::prediction::{HttpPredictionClient, LoggingTransport, PredictionConfig};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_PORT: u16 = 3000;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "medibot=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let port: u16 = std::env::var("MEDIBOT_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    let predict_config = PredictionConfig::from_env();
    tracing::info!(
        url = %predict_config.url,
        timeout_secs = predict_config.timeout.as_secs(),
        "Prediction service configured"
    );

    let client = HttpPredictionClient::new(&predict_config)?;
    let transport = Arc::new(LoggingTransport::new(Arc::new(client)));

    // Create application state
    let state = ApiState::new(Arc::new(AppState::new()), transport);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("MediBot server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
