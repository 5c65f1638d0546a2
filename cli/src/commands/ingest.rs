use alchemist_core::api as core_api;
use serde_json::json;

use super::cli::IngestArgs;
use super::{to_json, CommandOutput};
use crate::input::{file_name, read_table};

pub async fn handle_ingest(
    args: IngestArgs,
    oracle: Option<&dyn core_api::AssistOracle>,
) -> Result<CommandOutput, core_api::CliError> {
    let kind = args
        .kind
        .as_deref()
        .map(str::parse::<core_api::EntityKind>)
        .transpose()?;
    let table = read_table(&args.file)?;
    let outcome = core_api::ingest_table(oracle, &file_name(&args.file), kind, &table).await;

    let output = json!({
        "kind": outcome.kind,
        "source": outcome.source,
        "mapping": outcome.mapping,
        "unmapped": outcome.mapping.unmapped_fields(),
        "records": outcome.records,
    });
    Ok(CommandOutput::ok(to_json(&output)?))
}
