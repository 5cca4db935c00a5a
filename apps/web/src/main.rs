mod config;
mod errors;
mod filters;
mod jobs;
mod notify;
mod routes;
mod state;
mod storage;
mod view;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::{FileStore, KeyValueStore, MemoryStore};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting job board v{}", env!("CARGO_PKG_VERSION"));

    // Filters persist across restarts in a local key-value file; an empty
    // STORAGE_PATH keeps them in memory only.
    let store: Arc<dyn KeyValueStore> = if config.storage_path.as_os_str().is_empty() {
        info!("Filter storage in memory, filters reset on restart");
        Arc::new(MemoryStore::new())
    } else {
        let store = FileStore::new(&config.storage_path);
        info!("Filter storage at {}", store.path().display());
        Arc::new(store)
    };

    // Filters first, then jobs; the first jobs load starts here
    let state = AppState::new(config.clone(), store)?;

    let app = build_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}, page at {}", config.page_url);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
