use std::sync::Arc;

use mentorhub_api_rust::config::AppConfig;
use mentorhub_api_rust::server::{self, AppState};
use mentorhub_api_rust::store;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up MONGO_CONNECTION_STRING, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = Arc::new(AppConfig::from_env());
    tracing::info!("Starting MentorHub API in {:?} mode", config.environment);

    let store = store::connect(&config.store)
        .await
        .unwrap_or_else(|e| panic!("failed to initialize document store: {}", e));

    let state = AppState::new(config.clone(), store);
    let app = server::app(state);

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("🚀 MentorHub API Rust server listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Received shutdown signal. Initiating shutdown...");
}
