use alchemist_core::api as core_api;
use serde_json::json;

use super::cli::ModifyArgs;
use super::{to_json, CommandOutput};
use crate::input::load_dataset;

pub async fn handle_modify(
    args: ModifyArgs,
    thresholds: core_api::ValidationThresholds,
    oracle: Option<&dyn core_api::AssistOracle>,
) -> Result<CommandOutput, core_api::CliError> {
    if args.command.trim().is_empty() {
        return Err(core_api::CliError::Command(
            "modification command must not be empty".to_string(),
        ));
    }
    let data = load_dataset(&args.files, oracle).await?;
    let suggestions = core_api::suggest_modifications(oracle, &args.command, &data).await;
    if !args.apply {
        return Ok(CommandOutput::ok(to_json(&json!({ "suggestions": suggestions }))?));
    }

    let validator = core_api::DataValidator::new(thresholds);
    let mut session = core_api::Session::with_data(data);
    let applied: usize = suggestions
        .iter()
        .map(|s| session.apply_modification(s, &validator))
        .sum();
    session.revalidate(&validator);
    let report = core_api::ValidationReport::build(session.findings().to_vec());
    tracing::info!(
        target: "alchemist.session",
        stage = "modify.applied",
        suggestions = suggestions.len(),
        applied = applied,
        findings = report.stats.total
    );
    Ok(CommandOutput::ok(to_json(&json!({
        "suggestions": suggestions,
        "applied": applied,
        "data": session.data(),
        "report": report,
    }))?))
}
