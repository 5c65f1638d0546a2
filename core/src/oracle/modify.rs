use crate::model::Dataset;
use crate::util::generate_modification_id;

use super::models::{ModificationSuggestion, QuerySchema};
use super::r#trait::AssistOracle;

pub const OFFLINE_PREVIEW: &str = "Data modifications require a configured oracle";
pub const FAILED_PREVIEW: &str = "Could not process modification command - please try rephrasing";

const OFFLINE_CONFIDENCE: f64 = 0.5;
const FAILED_CONFIDENCE: f64 = 0.3;

/// Edits proposed for a natural-language command. Nothing is applied here.
/// Without a working oracle a single suggestion with no changes explains why.
pub async fn suggest_modifications(
    oracle: Option<&dyn AssistOracle>,
    command: &str,
    data: &Dataset,
) -> Vec<ModificationSuggestion> {
    let Some(oracle) = oracle else {
        return vec![ModificationSuggestion::empty(
            generate_modification_id(),
            command,
            OFFLINE_CONFIDENCE,
            OFFLINE_PREVIEW,
        )];
    };
    let schema = QuerySchema::from_dataset(data);
    match oracle.suggest_modifications(command, &schema).await {
        Ok(drafts) => {
            let base = generate_modification_id();
            let out: Vec<ModificationSuggestion> = drafts
                .into_iter()
                .enumerate()
                .map(|(i, d)| ModificationSuggestion::from_draft(format!("{base}-{i}"), command, d))
                .collect();
            tracing::info!(
                target: "alchemist.oracle",
                stage = "oracle.modify",
                oracle = oracle.name(),
                suggestions = out.len(),
                changes = out.iter().map(|s| s.changes.len()).sum::<usize>()
            );
            out
        }
        Err(e) => {
            tracing::warn!(
                target: "alchemist.oracle",
                stage = "oracle.modify.fallback",
                oracle = oracle.name(),
                error = %e,
                "modification suggestions failed"
            );
            vec![ModificationSuggestion::empty(
                generate_modification_id(),
                command,
                FAILED_CONFIDENCE,
                FAILED_PREVIEW,
            )]
        }
    }
}
