use serde::{Deserialize, Serialize};

use crate::validate::ValidationThresholds;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub validation: ValidationThresholds,

    #[serde(default)]
    pub oracle: OracleConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,

    /// If true, log to stderr.
    #[serde(default = "default_logging_console")]
    pub console: bool,

    /// If true, log to a file under `directory` (or OS temp dir if unset).
    #[serde(default)]
    pub file: bool,

    /// EnvFilter string, e.g. "info" or "alchemist_core=debug".
    #[serde(default = "default_logging_level")]
    pub level: String,

    #[serde(default)]
    pub directory: Option<String>,
}

fn default_logging_enabled() -> bool {
    true
}

fn default_logging_console() -> bool {
    true
}

fn default_logging_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            console: default_logging_console(),
            file: false,
            level: default_logging_level(),
            directory: None,
        }
    }
}

/// Optional completion service used for header hints, rule conversion and
/// query interpretation. The engine never requires it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OracleConfig {
    #[serde(default = "default_oracle_enabled")]
    pub enabled: bool,

    #[serde(default = "default_oracle_base_url")]
    pub base_url: String,

    /// Empty means unavailable.
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_oracle_model")]
    pub model: String,

    #[serde(default = "default_oracle_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_oracle_enabled() -> bool {
    true
}

fn default_oracle_base_url() -> String {
    "https://api.openai.com".to_string()
}

fn default_oracle_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_oracle_timeout_ms() -> u64 {
    20_000
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            enabled: default_oracle_enabled(),
            base_url: default_oracle_base_url(),
            api_key: String::new(),
            model: default_oracle_model(),
            timeout_ms: default_oracle_timeout_ms(),
        }
    }
}

impl OracleConfig {
    pub fn is_available(&self) -> bool {
        self.enabled && !self.api_key.trim().is_empty() && !self.base_url.trim().is_empty()
    }
}
