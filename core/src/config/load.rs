use std::path::{Path, PathBuf};

use crate::error::ConfigError;

use super::types::AppConfig;

/// Get the default data directory: ~/.alchemist
pub fn get_alchemist_data_dir() -> Result<PathBuf, ConfigError> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| ConfigError::NoHome)?;
    Ok(PathBuf::from(home).join(".alchemist"))
}

pub fn load_from_path(path: &Path) -> Result<AppConfig, ConfigError> {
    let s = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    parse_config(&s, path)
}

fn parse_config(s: &str, path: &Path) -> Result<AppConfig, ConfigError> {
    toml::from_str::<AppConfig>(s).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })
}

pub fn load_default() -> Result<AppConfig, ConfigError> {
    // Priority 1: ~/.alchemist/config.toml (highest)
    let home_config = get_alchemist_data_dir().ok().map(|d| d.join("config.toml"));

    // Priority 2: ./config.toml (current directory)
    let local_config = Path::new("config.toml");

    let mut cfg = match home_config.filter(|p| p.exists()) {
        Some(p) => load_from_path(&p)?,
        None if local_config.exists() => load_from_path(local_config)?,
        None => AppConfig::default(),
    };

    apply_env_overrides(&mut cfg, |k| std::env::var(k).ok());
    Ok(cfg)
}

/// Environment variable overrides (Priority 0: highest)
pub fn apply_env_overrides<F>(cfg: &mut AppConfig, get: F)
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |k: &str| get(k).filter(|v| !v.trim().is_empty());

    if let Some(v) = non_empty("ALCHEMIST_ORACLE_URL") {
        cfg.oracle.base_url = v;
    }
    if let Some(v) = non_empty("ALCHEMIST_ORACLE_API_KEY").or_else(|| non_empty("OPENAI_API_KEY")) {
        cfg.oracle.api_key = v;
    }
    if let Some(v) = non_empty("ALCHEMIST_ORACLE_MODEL") {
        cfg.oracle.model = v;
    }
}
