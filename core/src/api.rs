//! Stable re-exports for consumers (`cli`, `plugins`, and external crates).
//!
//! Prefer importing from `alchemist_core::api` instead of reaching into internal modules.

pub use crate::config::{load_default, load_from_path, AppConfig, LoggingConfig, OracleConfig};
pub use crate::error::{CliError, ConfigError, IngestError, RuleError};
pub use crate::ingest::{
    detect_entity_kind, ingest_table, keyword_mapping, normalize_headers, resolve_header_mapping,
    transform_rows, validate_header_mapping, HeaderMapping, IngestOutcome, MappingProposal,
    MappingSource, MappingTarget, RawRow, RawTable, ResolvedMapping,
};
pub use crate::model::{
    CanonicalField, Client, Dataset, EntityKind, Finding, FindingKind, Record, Severity, Task,
    Worker,
};
pub use crate::oracle::{
    suggest_corrections, suggest_modifications, AssistOracle, Correction, DataSummary,
    FieldChange, ModificationDraft, ModificationSuggestion, QuerySchema,
};
pub use crate::query::{
    fallback_query_plan, interpret_query, run_query, QueryFilter, QueryOperator, QueryPlan,
    QueryResult, QueryScope,
};
pub use crate::report::{ReportStats, ValidationReport};
pub use crate::rules::{
    recommend_rules, text_to_rule, Rule, RuleBook, RuleDraft, RulePatch, RuleRecommendation,
    RuleType,
};
pub use crate::session::Session;
pub use crate::validate::{DataValidator, ValidationThresholds};
