pub mod cli;
pub mod ingest;
pub mod modify;
pub mod query;
pub mod rule;
pub mod validate;

/// What a command prints on stdout and the process exit code it implies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub body: String,
    pub exit_code: i32,
}

impl CommandOutput {
    pub fn ok(body: String) -> Self {
        Self { body, exit_code: 0 }
    }
}

pub(crate) fn to_json<T: serde::Serialize>(
    value: &T,
) -> Result<String, alchemist_core::api::CliError> {
    serde_json::to_string_pretty(value).map_err(|e| {
        alchemist_core::api::CliError::Command(format!("failed to render output: {}", e))
    })
}
