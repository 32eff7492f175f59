//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::core::errors::{Result, TranslationError};
use crate::core::token::Tkk;

const DEFAULT_HOST: &str = "https://translate.google.com";
const DEFAULT_CHINA_HOST: &str = "https://translate.google.cn";

/// Seed for the request token hash, as served by the provider's web page
pub const DEFAULT_TKK: &str = "448487.932609646";

/// Configuration for translator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatorConfig {
    pub international_host: String,
    pub china_host: String,
    pub china_mode: bool,
    pub tkk: String,
    pub timeout_ms: u64,
    pub history_path: PathBuf,
    pub phrasebook_path: PathBuf,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            international_host: DEFAULT_HOST.to_string(),
            china_host: DEFAULT_CHINA_HOST.to_string(),
            china_mode: false,
            tkk: DEFAULT_TKK.to_string(),
            timeout_ms: 30000,
            history_path: PathBuf::from("history.json"),
            phrasebook_path: PathBuf::from("phrasebook.json"),
        }
    }
}

impl TranslatorConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();

        let international_host =
            std::env::var("GTX_HOST").unwrap_or(defaults.international_host);

        let china_host = std::env::var("GTX_CHINA_HOST").unwrap_or(defaults.china_host);

        let china_mode = std::env::var("GTX_CHINA_MODE")
            .unwrap_or_else(|_| "false".to_string())
            .parse::<bool>()?;

        let tkk = std::env::var("GTX_TKK").unwrap_or(defaults.tkk);

        let timeout_ms = std::env::var("REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".to_string())
            .parse::<u64>()?;

        let history_path = std::env::var("GTX_HISTORY_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.history_path);

        let phrasebook_path = std::env::var("GTX_PHRASEBOOK_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.phrasebook_path);

        Ok(Self {
            international_host,
            china_host,
            china_mode,
            tkk,
            timeout_ms,
            history_path,
            phrasebook_path,
        })
    }

    /// Load from JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        for (name, host) in [
            ("international_host", &self.international_host),
            ("china_host", &self.china_host),
        ] {
            if let Err(e) = reqwest::Url::parse(host) {
                return Err(TranslationError::ConfigError {
                    message: format!("{} is not a valid URL ({}): {}", name, host, e),
                });
            }
        }

        Tkk::parse(&self.tkk).map_err(|e| TranslationError::ConfigError {
            message: e.to_string(),
        })?;

        if self.timeout_ms == 0 {
            return Err(TranslationError::ConfigError {
                message: "timeout_ms must be greater than 0".to_string(),
            });
        }

        if self.history_path == self.phrasebook_path {
            warn!("History and phrasebook share {}", self.history_path.display());
        }

        Ok(())
    }

    /// Host used for a request, picked by the china mode flag
    pub fn host(&self, china_mode: bool) -> &str {
        if china_mode {
            &self.china_host
        } else {
            &self.international_host
        }
    }
}
