// src/main.rs

use std::sync::Arc;

use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

use miteru_backend::api::http::create_miteru_router;
use miteru_backend::config::CONFIG;
use miteru_backend::llm::OpenAiClient;
use miteru_backend::state::AppState;
use tower_http::cors::{Any, CorsLayer};

/// Graceful shutdown signal handler for SIGTERM and Ctrl+C
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, draining connections...");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting Miteru Backend");
    info!("Model: {}", CONFIG.openai.model);
    info!("Vision model: {}", CONFIG.openai.vision_model);
    if !CONFIG.openai.has_api_key() {
        // the server still boots; analyze routes answer 500 until it is set
        warn!("OPENAI_API_KEY is not set");
    }

    let model_client = Arc::new(OpenAiClient::new(CONFIG.openai.api_key.clone()));
    let state = Arc::new(AppState::new(CONFIG.clone(), model_client));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_miteru_router().layer(cors).with_state(state);

    let bind_address = CONFIG.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("Listening on {}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
