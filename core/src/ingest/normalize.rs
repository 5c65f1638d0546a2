//! Keyword-scored header normalization. Needs no oracle.

use crate::model::{CanonicalField, EntityKind};

use super::mapping::{HeaderMapping, MappingTarget};

/// Normalized header equals a keyword.
pub const EXACT_MATCH_SCORE: u32 = 100;
/// Normalized header contains a keyword.
pub const HEADER_CONTAINS_KEYWORD_SCORE: u32 = 80;
/// A keyword contains the normalized header.
pub const KEYWORD_CONTAINS_HEADER_SCORE: u32 = 60;
/// Scores must exceed this to claim a field.
pub const MATCH_THRESHOLD: u32 = 50;

/// Lower-case and strip everything but ASCII letters and digits.
pub fn normalize_key(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

/// Best score of a normalized header against one field's keywords.
pub fn match_score(normalized_header: &str, field: CanonicalField) -> u32 {
    if normalized_header.is_empty() {
        return 0;
    }
    let mut best = 0;
    for keyword in field.keywords() {
        let score = if normalized_header == *keyword {
            EXACT_MATCH_SCORE
        } else if normalized_header.contains(keyword) {
            HEADER_CONTAINS_KEYWORD_SCORE
        } else if keyword.contains(normalized_header) {
            KEYWORD_CONTAINS_HEADER_SCORE
        } else {
            0
        };
        best = best.max(score);
        if best == EXACT_MATCH_SCORE {
            break;
        }
    }
    best
}

/// Map every header to a best-guess canonical field of `kind`.
///
/// Candidate (field, header) pairs scoring above [`MATCH_THRESHOLD`] are
/// claimed greedily by descending score. Equal scores go to the field declared
/// first, then to the earlier header. A claimed field or header is never
/// reassigned; headers left over pass through unchanged.
///
/// Score ranks ahead of declaration order because id fields carry broad
/// keywords ("worker", "client"): claiming per field in declaration order would
/// let WorkerID take "Worker Name" on a contains-match and strand WorkerName.
pub fn normalize_headers(headers: &[String], kind: EntityKind) -> HeaderMapping {
    let fields = kind.fields();
    let normalized: Vec<String> = headers.iter().map(|h| normalize_key(h)).collect();

    let mut candidates: Vec<(u32, usize, usize)> = Vec::new();
    for (fi, field) in fields.iter().enumerate() {
        for (hi, norm) in normalized.iter().enumerate() {
            let score = match_score(norm, *field);
            if score > MATCH_THRESHOLD {
                candidates.push((score, fi, hi));
            }
        }
    }
    candidates.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)).then(a.2.cmp(&b.2)));

    let mut field_claimed = vec![false; fields.len()];
    let mut assigned: Vec<Option<CanonicalField>> = vec![None; headers.len()];
    for (_, fi, hi) in candidates {
        if field_claimed[fi] || assigned[hi].is_some() {
            continue;
        }
        field_claimed[fi] = true;
        assigned[hi] = Some(fields[fi]);
    }

    let mut mapping = HeaderMapping::new(kind);
    for (header, target) in headers.iter().zip(assigned) {
        let target = target.map_or(MappingTarget::Passthrough, MappingTarget::Field);
        mapping.insert(header.clone(), target);
    }

    tracing::debug!(
        target: "alchemist.ingest",
        stage = "ingest.normalize",
        kind = %kind,
        headers = headers.len(),
        mapped = mapping.mapped_count()
    );
    mapping
}
