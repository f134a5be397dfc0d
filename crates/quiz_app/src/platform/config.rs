use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

use quiz_client::{ClientSettings, DEFAULT_API_BASE};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CONFIG_FILENAME: &str = "quizchat.ron";
pub const ENV_API_BASE: &str = "QUIZCHAT_API_BASE";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read quizchat.ron: {0}")]
    Read(#[from] io::Error),
    #[error("failed to parse quizchat.ron: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_base: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: Option<u64>,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let client = ClientSettings::default();
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            connect_timeout_secs: client.connect_timeout.as_secs(),
            request_timeout_secs: client.request_timeout.map(|t| t.as_secs()),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Applies `QUIZCHAT_API_BASE`, ignoring blank values.
    pub fn apply_env_override(&mut self, api_base: Option<String>) {
        if let Some(base) = api_base.map(|b| b.trim().to_string()) {
            if !base.is_empty() {
                self.api_base = base;
            }
        }
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            api_base: self.api_base.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
        }
    }
}

/// Reads `quizchat.ron` from `dir`. A missing file yields the defaults.
pub(crate) fn read_config(dir: &Path) -> Result<AppConfig, ConfigError> {
    let path = dir.join(CONFIG_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(AppConfig::default()),
        Err(err) => return Err(err.into()),
    };
    Ok(ron::from_str(&content)?)
}
