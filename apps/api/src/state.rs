use std::sync::Arc;

use crate::history::HistoryStore;
use crate::llm_client::{ApiKeyHandle, TextGenerator};
use crate::profiles::ProfileStore;
use crate::settings::SettingsStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub profiles: ProfileStore,
    pub history: Arc<HistoryStore>,
    pub settings: SettingsStore,
    /// Live key read by the LLM client on every call; updated by the settings endpoint.
    pub api_key: ApiKeyHandle,
    /// The orchestrator's only view of the generation service.
    pub generator: Arc<dyn TextGenerator>,
}
