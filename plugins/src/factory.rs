use anyhow::Result;

use alchemist_core::config::OracleConfig;
use alchemist_core::oracle::AssistOracle;

use crate::oracle::OpenAiOracle;

/// The configured oracle, or `None` when it is disabled or lacks credentials.
pub fn build_oracle(cfg: &OracleConfig) -> Result<Option<Box<dyn AssistOracle>>> {
    if !cfg.is_available() {
        tracing::debug!(
            target: "alchemist.oracle",
            stage = "oracle.factory.unavailable",
            enabled = cfg.enabled,
            has_key = !cfg.api_key.trim().is_empty()
        );
        return Ok(None);
    }

    Ok(Some(Box::new(OpenAiOracle::new(
        cfg.base_url.clone(),
        cfg.api_key.clone(),
        cfg.model.clone(),
        cfg.timeout_ms,
    )?)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_means_no_oracle() {
        let cfg = OracleConfig::default();
        assert!(build_oracle(&cfg).unwrap().is_none());
    }

    #[test]
    fn disabled_oracle_is_skipped_even_with_key() {
        let cfg = OracleConfig {
            enabled: false,
            api_key: "sk-test".into(),
            ..OracleConfig::default()
        };
        assert!(build_oracle(&cfg).unwrap().is_none());
    }

    #[test]
    fn configured_oracle_is_built() {
        let cfg = OracleConfig {
            api_key: "sk-test".into(),
            ..OracleConfig::default()
        };
        let oracle = build_oracle(&cfg).unwrap().unwrap();
        assert_eq!(oracle.name(), "openai");
    }
}
