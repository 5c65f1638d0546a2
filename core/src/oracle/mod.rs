//! Optional completion-service capability and the data it exchanges.

pub mod models;
pub mod r#trait;

mod corrections;
mod modify;

pub use corrections::suggest_corrections;
pub use modify::suggest_modifications;
pub use models::{
    Correction, DataSummary, FieldChange, ModificationDraft, ModificationSuggestion, QuerySchema,
    TableSchema, SAMPLE_ROWS,
};
pub use r#trait::AssistOracle;
