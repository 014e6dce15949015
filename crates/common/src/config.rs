//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{StillframeError, StillframeResult};

/// Global application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Default encoder settings.
    pub encoder: EncoderDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Default JPEG encoder parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncoderDefaults {
    /// Default JPEG quality (0-100).
    pub quality: u8,

    /// Default smoothing factor (0-100), if any.
    pub smoothing: Option<u8>,

    /// Number of background encode workers to reserve.
    pub workers: usize,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "stillframe=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            encoder: EncoderDefaults::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for EncoderDefaults {
    fn default() -> Self {
        Self {
            quality: 60,
            smoothing: None,
            workers: 2,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", config_path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Save config to the standard location.
    pub fn save(&self) -> StillframeResult<()> {
        let config_path = config_file_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| StillframeError::config(format!("Failed to serialize config: {e}")))?;
        std::fs::write(&config_path, json)?;
        Ok(())
    }

    /// Where `load`/`save` look for the config file.
    pub fn path() -> PathBuf {
        config_file_path()
    }
}

/// Standard config file location.
fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("stillframe").join("config.json")
}
