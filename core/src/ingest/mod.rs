//! Upload intake: raw tables, header mapping and row transformation.

mod detect;
mod mapping;
mod normalize;
mod pipeline;
mod table;
mod transform;

pub use detect::detect_entity_kind;
pub use mapping::{
    fallback_match, proposal_from_json, validate_header_mapping, HeaderMapping, MappingProposal,
    MappingTarget,
};
pub use normalize::{
    match_score, normalize_headers, normalize_key, EXACT_MATCH_SCORE,
    HEADER_CONTAINS_KEYWORD_SCORE, KEYWORD_CONTAINS_HEADER_SCORE, MATCH_THRESHOLD,
};
pub use pipeline::{
    ingest_table, keyword_mapping, resolve_header_mapping, IngestOutcome, MappingSource,
    ResolvedMapping,
};
pub use table::{RawRow, RawTable};
pub use transform::{transform_row, transform_rows, Coercion};
