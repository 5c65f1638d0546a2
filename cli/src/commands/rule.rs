use alchemist_core::api as core_api;

use super::cli::{RecommendArgs, RuleArgs};
use super::{to_json, CommandOutput};
use crate::input::load_dataset;

pub async fn handle_rule(
    args: RuleArgs,
    oracle: Option<&dyn core_api::AssistOracle>,
) -> Result<CommandOutput, core_api::CliError> {
    if args.text.trim().is_empty() {
        return Err(core_api::CliError::Command("rule text is empty".to_string()));
    }
    let rule = core_api::text_to_rule(oracle, &args.text).await;
    rule.validate()?;
    Ok(CommandOutput::ok(to_json(&rule)?))
}

pub async fn handle_recommend(
    args: RecommendArgs,
    oracle: Option<&dyn core_api::AssistOracle>,
) -> Result<CommandOutput, core_api::CliError> {
    let data = load_dataset(&args.files, oracle).await?;
    let summary = core_api::DataSummary::from_dataset(&data);
    let recommendations = core_api::recommend_rules(oracle, &summary).await;
    Ok(CommandOutput::ok(to_json(&recommendations)?))
}
