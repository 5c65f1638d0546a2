use thiserror::Error;

/// Contract violations by the external table reader. Anything the engine can
/// reason about is reported as a finding instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IngestError {
    #[error("row sequence is missing")]
    MissingRows,

    #[error("expected an array of rows, found {0}")]
    NotAnArray(&'static str),

    #[error("row {index} is not an object (found {found})")]
    RowNotObject { index: usize, found: &'static str },

    #[error("unknown entity kind: {0}")]
    UnknownEntityKind(String),
}

/// JSON type name used in error messages.
pub fn json_type_name(v: &serde_json::Value) -> &'static str {
    match v {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
