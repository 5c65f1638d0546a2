use crate::model::Finding;

use super::models::Correction;
use super::r#trait::AssistOracle;

/// Remediation text per finding id. Findings the oracle skips, or every
/// finding when there is no working oracle, get their static suggestions.
pub async fn suggest_corrections(
    oracle: Option<&dyn AssistOracle>,
    findings: &[Finding],
) -> Vec<Correction> {
    let proposed = match oracle {
        Some(oracle) if !findings.is_empty() => match oracle.suggest_corrections(findings).await {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!(
                    target: "alchemist.oracle",
                    stage = "oracle.corrections.fallback",
                    oracle = oracle.name(),
                    error = %e,
                    "correction suggestions failed, using static suggestions"
                );
                Vec::new()
            }
        },
        _ => Vec::new(),
    };

    findings
        .iter()
        .map(|f| {
            let corrections = proposed
                .iter()
                .find(|c| c.finding_id == f.id() && !c.corrections.is_empty())
                .map(|c| c.corrections.clone())
                .unwrap_or_else(|| f.suggestions().to_vec());
            Correction {
                finding_id: f.id().to_string(),
                corrections,
            }
        })
        .collect()
}
