use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    #[error("rule priority {0} is outside 1-10")]
    PriorityOutOfRange(i64),

    #[error("rule not found: {0}")]
    NotFound(String),

    #[error("duplicate rule id: {0}")]
    DuplicateId(String),

    #[error("unknown rule type: {0}")]
    UnknownType(String),
}
