use crate::oracle::{AssistOracle, DataSummary};
use crate::util::generate_rule_id;

use super::model::{Rule, RuleRecommendation};

/// Turn free text into a rule. Falls back to a pattern-match rule on the
/// text when there is no oracle or the oracle fails.
pub async fn text_to_rule(oracle: Option<&dyn AssistOracle>, text: &str) -> Rule {
    let id = generate_rule_id();
    let Some(oracle) = oracle else {
        return Rule::pattern_fallback(id, text);
    };
    match oracle.text_to_rule(text).await {
        Ok(draft) => {
            let rule = draft.into_rule(id, text);
            tracing::info!(
                target: "alchemist.rules",
                stage = "rules.convert",
                oracle = oracle.name(),
                rule_type = %rule.rule_type,
                priority = rule.priority
            );
            rule
        }
        Err(e) => {
            tracing::warn!(
                target: "alchemist.rules",
                stage = "rules.convert.fallback",
                oracle = oracle.name(),
                error = %e,
                "rule conversion failed, using pattern match rule"
            );
            Rule::pattern_fallback(id, text)
        }
    }
}

/// Suggested rules for a dataset of the given size. Without a working oracle
/// the single basic load-limit suggestion is returned.
pub async fn recommend_rules(
    oracle: Option<&dyn AssistOracle>,
    summary: &DataSummary,
) -> Vec<RuleRecommendation> {
    let Some(oracle) = oracle else {
        return vec![RuleRecommendation::basic_load_limit(generate_rule_id())];
    };
    match oracle.recommend_rules(summary).await {
        Ok(drafts) => drafts
            .into_iter()
            .map(|d| RuleRecommendation::from_draft(generate_rule_id(), d))
            .collect(),
        Err(e) => {
            tracing::warn!(
                target: "alchemist.rules",
                stage = "rules.recommend.fallback",
                oracle = oracle.name(),
                error = %e,
                "rule recommendation failed"
            );
            vec![RuleRecommendation::basic_load_limit(generate_rule_id())]
        }
    }
}
