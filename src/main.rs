//! Storefront Account API server
//!
//! Runs on PostgreSQL when `postgres_url` is configured, otherwise on the
//! in-memory store.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use storefront_account::config::AppConfig;
use storefront_account::db::Database;
use storefront_account::gateway::{self, state::AppState};
use storefront_account::logging::init_logging;
use storefront_account::store::MemoryStore;

#[derive(Parser)]
#[command(name = "storefront_account")]
#[command(about = "Storefront customer account API")]
struct Args {
    /// Loads `config/<ENV>.yaml`
    #[arg(short, long, default_value = "dev")]
    env: String,

    /// Listen on this port instead of `gateway.port`
    #[arg(long)]
    port: Option<u16>,
}

async fn build_state(config: &AppConfig) -> anyhow::Result<AppState> {
    match config.postgres_url.as_deref() {
        Some(url) => {
            let db = Database::connect(url)
                .await
                .context("Failed to connect to PostgreSQL")?;
            db.migrate().await.context("Failed to apply migrations")?;
            AppState::with_database(Arc::new(db), config)
        }
        None => {
            tracing::warn!("postgres_url not configured; using the in-memory store, data is lost on exit");
            AppState::with_memory_store(Arc::new(MemoryStore::new()), config)
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = AppConfig::load(&args.env)?;
    let _log_guard = init_logging(&config.logging)?;

    let port = args.port.unwrap_or(config.gateway.port);
    tracing::info!(
        env = %args.env,
        port,
        revision = env!("BUILD_REVISION"),
        "Starting Storefront Account API"
    );

    let rt = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
    rt.block_on(async {
        let state = Arc::new(build_state(&config).await?);
        gateway::run_server(&config.gateway.host, port, state).await
    })
}
