use alchemist_core::api as core_api;

use super::cli::QueryArgs;
use super::{to_json, CommandOutput};
use crate::input::load_dataset;

pub async fn handle_query(
    args: QueryArgs,
    oracle: Option<&dyn core_api::AssistOracle>,
) -> Result<CommandOutput, core_api::CliError> {
    let data = load_dataset(&args.files, oracle).await?;
    let result = core_api::interpret_query(oracle, &args.query, &data).await;
    tracing::info!(
        target: "alchemist.query",
        stage = "query.done",
        matches = result.results.len()
    );
    Ok(CommandOutput::ok(to_json(&result)?))
}
