//! Trivia host - LLM-driven trivia game server
//!
//! A stateless HTTP backend: the client sends its game state with every
//! turn, the model's tagged reply is parsed into the next state, and both go
//! back to the client.

mod api;
mod game;
mod llm;
mod session;
mod system_prompt;

use api::{create_router, AppState};
use llm::{build_service, LlmConfig};
use std::net::SocketAddr;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trivia_host=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let port: u16 = std::env::var("TRIVIA_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3001);

    let llm_config = LlmConfig::from_env();
    let llm = build_service(&llm_config)?;
    tracing::info!(
        provider = ?llm_config.provider,
        model = %llm.model_id(),
        timeout_secs = llm_config.retry.timeout.as_secs(),
        max_retries = llm_config.retry.max_retries,
        "LLM collaborator configured"
    );

    // Create router
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let compression = CompressionLayer::new().gzip(true).br(true);

    let app = create_router(AppState::new(llm))
        .layer(cors)
        .layer(compression)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Trivia host listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
