use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every value has a default; only malformed numbers fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Holds `resume_history.json` and `settings.json`.
    pub data_dir: PathBuf,
    pub profiles_dir: PathBuf,
    /// Read-only fallback locations searched when a profile is missing from `profiles_dir`.
    pub profile_backup_dirs: Vec<PathBuf>,
    /// Overrides any key persisted through the settings endpoint.
    pub anthropic_api_key: Option<String>,
    pub llm_timeout: Duration,
    pub llm_max_attempts: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: parse_env("PORT", 8000)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            data_dir: path_env("DATA_DIR", "data"),
            profiles_dir: path_env("PROFILES_DIR", "profiles"),
            profile_backup_dirs: std::env::var("PROFILE_BACKUP_DIRS")
                .map(|v| split_dirs(&v))
                .unwrap_or_default(),
            anthropic_api_key: std::env::var("ANTHROPIC_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            llm_timeout: Duration::from_secs(parse_env("LLM_TIMEOUT_SECS", 120u64)?),
            llm_max_attempts: parse_env("LLM_MAX_ATTEMPTS", 2u32)?.max(1),
        })
    }

    pub fn history_path(&self) -> PathBuf {
        self.data_dir.join("resume_history.json")
    }

    pub fn settings_path(&self) -> PathBuf {
        self.data_dir.join("settings.json")
    }
}

fn path_env(key: &str, default: &str) -> PathBuf {
    std::env::var(key)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(default))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

fn split_dirs(raw: &str) -> Vec<PathBuf> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .collect()
}
