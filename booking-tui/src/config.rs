//! Application configuration

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Environment variable naming the config file location.
pub const CONFIG_PATH_ENV: &str = "BOOKING_CONFIG";

fn default_confirm_cancel() -> bool {
    true
}

/// Persisted application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Backend base URL; `BOOKING_API_URL` overrides the persisted value.
    pub api_url: Option<String>,
    /// Ask before cancelling a reservation.
    #[serde(default = "default_confirm_cancel")]
    pub confirm_cancel: bool,
    /// Directory log files are written into.
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            confirm_cancel: true,
            log_dir: None,
        }
    }
}

impl AppConfig {
    /// Default config file path (`BOOKING_CONFIG` or `./booking-tui.json`).
    pub fn default_path() -> PathBuf {
        std::env::var(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("booking-tui.json"))
    }

    /// Loads the configuration, falling back to defaults when the file does
    /// not exist yet.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}
