mod config;
mod errors;
mod generation;
mod history;
mod llm_client;
mod models;
mod profiles;
mod render;
mod routes;
mod settings;
mod state;
mod storage;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::history::HistoryStore;
use crate::llm_client::{ApiKeyHandle, LlmClient};
use crate::profiles::ProfileStore;
use crate::routes::build_router;
use crate::settings::SettingsStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume-tailor v{}", env!("CARGO_PKG_VERSION"));

    tokio::fs::create_dir_all(&config.data_dir)
        .await
        .with_context(|| format!("creating data dir {}", config.data_dir.display()))?;

    // Environment key wins over the stored one
    let settings = SettingsStore::new(config.settings_path());
    let stored_key = match settings.api_key().await {
        Ok(key) => key,
        Err(e) => {
            warn!("Could not read stored settings: {e}");
            None
        }
    };
    let api_key = ApiKeyHandle::new(config.anthropic_api_key.clone().or(stored_key));
    if api_key.get().is_none() {
        warn!("No API key configured; generation requests will be rejected until one is set");
    }

    let llm = LlmClient::new(api_key.clone(), config.llm_timeout, config.llm_max_attempts)
        .context("building HTTP client")?;
    info!(
        "LLM client initialized (model: {}, timeout: {}s, attempts: {})",
        llm_client::MODEL,
        config.llm_timeout.as_secs(),
        config.llm_max_attempts
    );

    let profiles = ProfileStore::open(&config.profiles_dir, config.profile_backup_dirs.clone())
        .await
        .with_context(|| format!("opening profile dir {}", config.profiles_dir.display()))?;
    let history = Arc::new(HistoryStore::new(config.history_path()));
    info!("History file: {}", history.path().display());

    let state = AppState {
        profiles,
        history,
        settings,
        api_key,
        generator: Arc::new(llm),
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
