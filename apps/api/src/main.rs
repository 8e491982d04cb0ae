mod analysis;
mod config;
mod db;
mod errors;
mod extraction;
mod knowledge;
mod llm_client;
mod models;
mod routes;
mod state;
mod store;
#[cfg(test)]
mod testing;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::pipeline::Pipeline;
use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{KnowledgeStore, MemoryStore, PgStore, RecordStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume analyzer v{}", env!("CARGO_PKG_VERSION"));

    let (knowledge, records) = build_stores(&config).await?;

    let llm = LlmClient::new(config.llm.clone())?;
    info!("LLM client initialized (model: {})", llm.model());

    let state = AppState {
        pipeline: Pipeline::new(knowledge.clone(), Arc::new(llm)),
        knowledge,
        records,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// PostgreSQL when `DATABASE_URL` is set, otherwise a process-local store.
async fn build_stores(
    config: &Config,
) -> Result<(Arc<dyn KnowledgeStore>, Arc<dyn RecordStore>)> {
    match &config.database_url {
        Some(url) => {
            let store = Arc::new(PgStore::new(create_pool(url).await?));
            let knowledge: Arc<dyn KnowledgeStore> = store.clone();
            let records: Arc<dyn RecordStore> = store;
            Ok((knowledge, records))
        }
        None => {
            warn!("DATABASE_URL not set; using in-memory stores (data is lost on restart)");
            let store = Arc::new(MemoryStore::new());
            let knowledge: Arc<dyn KnowledgeStore> = store.clone();
            let records: Arc<dyn RecordStore> = store;
            Ok((knowledge, records))
        }
    }
}
