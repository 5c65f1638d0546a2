use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{Dataset, EntityKind, Record};

/// Records per kind included as samples in an oracle prompt.
pub const SAMPLE_ROWS: usize = 2;

/// Table shape handed to an oracle for query interpretation: field names,
/// row counts and a couple of sample rows per kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuerySchema {
    pub tables: Vec<TableSchema>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSchema {
    pub entity: EntityKind,
    pub fields: Vec<String>,
    pub total: usize,
    pub samples: Vec<Record>,
}

impl QuerySchema {
    pub fn from_dataset(data: &Dataset) -> Self {
        let tables = EntityKind::ALL
            .into_iter()
            .map(|kind| {
                let records = data.records(kind);
                TableSchema {
                    entity: kind,
                    fields: records
                        .first()
                        .map(|r| r.iter().map(|(k, _)| k.clone()).collect())
                        .unwrap_or_default(),
                    total: records.len(),
                    samples: records.into_iter().take(SAMPLE_ROWS).cloned().collect(),
                }
            })
            .collect();
        Self { tables }
    }
}

/// Entity counts used to ask for rule recommendations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSummary {
    pub clients: usize,
    pub workers: usize,
    pub tasks: usize,
}

impl DataSummary {
    pub fn from_dataset(data: &Dataset) -> Self {
        Self {
            clients: data.len(EntityKind::Clients),
            workers: data.len(EntityKind::Workers),
            tasks: data.len(EntityKind::Tasks),
        }
    }
}

/// Remediation text for one finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Correction {
    #[serde(alias = "errorId")]
    pub finding_id: String,
    pub corrections: Vec<String>,
}

/// One proposed cell edit: set `field` of the record identified by `record_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldChange {
    #[serde(alias = "id")]
    pub record_id: String,
    pub field: String,
    #[serde(default)]
    pub old_value: Value,
    pub new_value: Value,
}

/// Modification as proposed by an oracle; missing fields default when it is
/// turned into a [`ModificationSuggestion`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ModificationDraft {
    pub command: Option<String>,
    #[serde(alias = "entity")]
    pub entity_type: Option<String>,
    pub changes: Option<Vec<FieldChange>>,
    pub confidence: Option<f64>,
    pub preview: Option<String>,
}

pub const DEFAULT_MODIFICATION_CONFIDENCE: f64 = 0.7;
pub const DEFAULT_MODIFICATION_PREVIEW: &str = "Suggested data modification";

/// A batch of edits to one entity table, derived from a natural-language command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModificationSuggestion {
    pub id: String,
    pub command: String,
    #[serde(rename = "entityType")]
    pub entity: EntityKind,
    pub changes: Vec<FieldChange>,
    pub confidence: f64,
    pub preview: String,
}

impl ModificationSuggestion {
    /// Placeholder carrying no changes, used when no suggestion can be produced.
    pub fn empty(id: String, command: &str, confidence: f64, preview: &str) -> Self {
        Self {
            id,
            command: command.to_string(),
            entity: EntityKind::Clients,
            changes: Vec::new(),
            confidence,
            preview: preview.to_string(),
        }
    }

    /// Unknown entity types fall back to clients; confidence is clamped to 0-1.
    pub fn from_draft(id: String, command: &str, draft: ModificationDraft) -> Self {
        let entity = draft
            .entity_type
            .as_deref()
            .and_then(|e| e.parse::<EntityKind>().ok())
            .unwrap_or(EntityKind::Clients);
        let confidence = draft
            .confidence
            .filter(|c| c.is_finite() && *c > 0.0)
            .map_or(DEFAULT_MODIFICATION_CONFIDENCE, |c| c.min(1.0));
        Self {
            id,
            command: draft
                .command
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| command.to_string()),
            entity,
            changes: draft.changes.unwrap_or_default(),
            confidence,
            preview: draft
                .preview
                .filter(|p| !p.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_MODIFICATION_PREVIEW.to_string()),
        }
    }

    /// Cell patch for one change, ready for a record merge.
    pub fn patch(change: &FieldChange) -> serde_json::Map<String, Value> {
        let mut patch = serde_json::Map::new();
        patch.insert(change.field.clone(), change.new_value.clone());
        patch
    }
}
