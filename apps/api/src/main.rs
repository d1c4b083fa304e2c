mod config;
mod documents;
mod errors;
mod formatting;
mod generation;
mod llm_client;
mod models;
mod routes;
mod session;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::documents::DocxWriter;
use crate::formatting::SectionCatalog;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::session::SessionStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Quill API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize completion client
    let llm = LlmClient::new(config.llm_api_key.clone(), config.llm_api_url.clone());
    info!(
        "LLM client initialized (model: {}, endpoint: {})",
        config.llm_model, config.llm_api_url
    );

    // Section catalog: fixed keyword table plus the configured header guard
    let catalog = SectionCatalog::with_header_max_chars(config.header_max_chars);
    info!(
        "Section catalog: {} keywords, header limit {} chars",
        catalog.entries().len(),
        catalog.header_max_chars()
    );

    let sessions = SessionStore::from_secs(config.session_ttl_secs);
    info!("Session cache TTL: {}s", config.session_ttl_secs);

    // Build app state
    let state = AppState {
        llm: Arc::new(llm),
        documents: Arc::new(DocxWriter),
        sessions,
        catalog: Arc::new(catalog),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
