#![recursion_limit = "256"]

mod backend;
mod config;
mod routes;
mod services;
mod state;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() {
    // A missing .env is normal in production.
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config::DEFAULT_LOG_FILTER)))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = config::ServerConfig::from_env().expect("invalid configuration");
    let backend = backend::HttpBackend::new(&config.backend).expect("backend client init failed");
    tracing::info!(backend = %config.backend.base_url, "backend client initialized");

    let state = state::AppState::new(
        Arc::new(backend),
        config.backend.functions.clone(),
        config.site_url.clone(),
        config.cookie_secure,
    );

    let app = routes::leptos_app(state).expect("leptos app init failed");
    let port = config.port;
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "lexdesk listening");
    axum::serve(listener, app).await.expect("server failed");
}
