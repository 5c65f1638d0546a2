use serde::Serialize;

use crate::model::{EntityKind, Record};
use crate::oracle::AssistOracle;

use super::detect::detect_entity_kind;
use super::mapping::{validate_header_mapping, HeaderMapping};
use super::normalize::normalize_headers;
use super::table::RawTable;
use super::transform::transform_rows;

/// Which path produced a header mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MappingSource {
    Oracle,
    Keyword,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedMapping {
    pub mapping: HeaderMapping,
    pub source: MappingSource,
}

/// Final, collision-free mapping for `headers`.
///
/// An oracle proposal is repaired before use. Without an oracle, or when it
/// fails, the keyword normalizer's candidate is repaired the same way.
pub async fn resolve_header_mapping(
    oracle: Option<&dyn AssistOracle>,
    kind: EntityKind,
    headers: &[String],
) -> ResolvedMapping {
    if let Some(oracle) = oracle {
        match oracle.map_headers(headers, kind).await {
            Ok(proposal) => {
                let mapping = validate_header_mapping(&proposal, headers, kind);
                tracing::info!(
                    target: "alchemist.ingest",
                    stage = "ingest.mapping.oracle",
                    oracle = oracle.name(),
                    kind = %kind,
                    mapped = mapping.mapped_count()
                );
                return ResolvedMapping {
                    mapping,
                    source: MappingSource::Oracle,
                };
            }
            Err(e) => {
                tracing::warn!(
                    target: "alchemist.ingest",
                    stage = "ingest.mapping.fallback",
                    oracle = oracle.name(),
                    error = %e,
                    "oracle header mapping failed, using keyword normalizer"
                );
            }
        }
    }
    keyword_mapping(kind, headers)
}

/// Oracle-free mapping path.
pub fn keyword_mapping(kind: EntityKind, headers: &[String]) -> ResolvedMapping {
    let candidate = normalize_headers(headers, kind);
    ResolvedMapping {
        mapping: validate_header_mapping(&candidate.to_proposal(), headers, kind),
        source: MappingSource::Keyword,
    }
}

/// Everything produced by ingesting one uploaded table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngestOutcome {
    pub kind: EntityKind,
    pub mapping: HeaderMapping,
    pub source: MappingSource,
    pub records: Vec<Record>,
}

/// Detect the kind (unless given), resolve the mapping and transform rows.
pub async fn ingest_table(
    oracle: Option<&dyn AssistOracle>,
    filename: &str,
    kind: Option<EntityKind>,
    table: &RawTable,
) -> IngestOutcome {
    let kind = kind.unwrap_or_else(|| detect_entity_kind(filename, table.headers()));
    let ResolvedMapping { mapping, source } =
        resolve_header_mapping(oracle, kind, table.headers()).await;
    let records = transform_rows(table.rows(), &mapping);
    tracing::info!(
        target: "alchemist.ingest",
        stage = "ingest.table",
        filename = %filename,
        kind = %kind,
        rows = records.len(),
        source = ?source
    );
    IngestOutcome {
        kind,
        mapping,
        source,
        records,
    }
}
