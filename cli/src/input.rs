//! Reading row files produced by an external sheet reader.

use std::path::Path;

use alchemist_core::api as core_api;
use serde_json::Value;

use crate::commands::cli::DataFiles;

pub fn read_table(path: &Path) -> Result<core_api::RawTable, core_api::CliError> {
    let text = std::fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&text).map_err(|e| {
        core_api::CliError::Command(format!("{} is not valid JSON: {}", path.display(), e))
    })?;
    Ok(core_api::RawTable::from_json(value)?)
}

pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Ingest the three files with their kinds fixed by position.
pub async fn load_dataset(
    files: &DataFiles,
    oracle: Option<&dyn core_api::AssistOracle>,
) -> Result<core_api::Dataset, core_api::CliError> {
    let mut data = core_api::Dataset::new();
    for (kind, path) in [
        (core_api::EntityKind::Clients, &files.clients),
        (core_api::EntityKind::Workers, &files.workers),
        (core_api::EntityKind::Tasks, &files.tasks),
    ] {
        let table = read_table(path)?;
        let outcome = core_api::ingest_table(oracle, &file_name(path), Some(kind), &table).await;
        data.set(kind, outcome.records);
    }
    Ok(data)
}
