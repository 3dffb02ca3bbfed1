//! # contactform-server
//!
//! Submission service for the contact form.
//!
//! This binary provides:
//! - **`POST /api/contact`** (axum), which validates a contact against the
//!   shared schema and stores it
//! - **SQLite persistence** through `contactform-store`, opened before the
//!   listener binds
//! - **Open CORS** so a form served from another origin can post to it

mod api;
mod config;
mod error;
mod store;

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::api::AppState;
use crate::config::ServerConfig;
use crate::store::ContactStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // -----------------------------------------------------------------------
    // 1. Initialize tracing (respects RUST_LOG env var)
    // -----------------------------------------------------------------------
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,contactform_server=debug")),
        )
        .init();

    info!("Starting contact form server v{}", env!("CARGO_PKG_VERSION"));

    // -----------------------------------------------------------------------
    // 2. Load configuration
    // -----------------------------------------------------------------------
    let config = ServerConfig::from_env();
    info!(?config, "Loaded configuration");

    // -----------------------------------------------------------------------
    // 3. Open the store before any route can be served
    // -----------------------------------------------------------------------
    let store = ContactStore::open(config.database_url.as_deref(), config.store_init_policy)?;
    if !store.is_ready() {
        tracing::warn!("Serving without a database; every submission will fail");
    }

    let app_state = AppState {
        store: Arc::new(store),
    };

    // -----------------------------------------------------------------------
    // 4. Run the HTTP server (blocks until shutdown)
    // -----------------------------------------------------------------------
    tokio::select! {
        result = api::serve(app_state, config.http_addr) => {
            if let Err(e) = result {
                tracing::error!(error = %e, "HTTP server failed");
                return Err(e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down");
        }
    }

    Ok(())
}
