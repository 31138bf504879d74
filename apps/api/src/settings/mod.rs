//! Persisted user settings. Currently only the generation-service API key.

pub mod handlers;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::StoreError;
use crate::storage::{read_json, write_json_atomic};

const MASK_PREFIX: &str = "sk-ant-...";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub async fn load(&self) -> Result<Settings, StoreError> {
        Ok(read_json(&self.path).await?.unwrap_or_default())
    }

    /// Blank keys are stored as absent.
    pub async fn api_key(&self) -> Result<Option<String>, StoreError> {
        Ok(self
            .load()
            .await?
            .api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty()))
    }

    pub async fn set_api_key(&self, key: &str) -> Result<(), StoreError> {
        let mut settings = self.load().await?;
        settings.api_key = Some(key.trim().to_string());
        write_json_atomic(&self.path, &settings).await?;
        info!("Stored API key in {}", self.path.display());
        Ok(())
    }
}

/// What the UI may see of a key: whether one is set and its last four characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiKeyStatus {
    pub configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub masked_key: Option<String>,
}

impl ApiKeyStatus {
    pub fn from_key(key: Option<&str>) -> Self {
        match key.filter(|k| !k.is_empty()) {
            Some(key) => Self {
                configured: true,
                masked_key: Some(mask_key(key)),
            },
            None => Self {
                configured: false,
                masked_key: None,
            },
        }
    }
}

pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let tail: String = chars[chars.len().saturating_sub(4)..].iter().collect();
    format!("{MASK_PREFIX}{tail}")
}
