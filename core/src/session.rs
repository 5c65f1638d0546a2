//! In-memory working state of one upload session.

use serde_json::{Map, Value};

use crate::model::{Client, Dataset, EntityKind, Finding, Record, Task, Worker};
use crate::oracle::ModificationSuggestion;
use crate::rules::RuleBook;
use crate::validate::DataValidator;

/// Entity tables, latest findings and the rule book. Nothing here is persisted.
#[derive(Debug, Clone, Default)]
pub struct Session {
    data: Dataset,
    findings: Vec<Finding>,
    rules: RuleBook,
    file_name: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session over already-loaded tables.
    pub fn with_data(data: Dataset) -> Self {
        Self {
            data,
            ..Self::default()
        }
    }

    pub fn set_data(&mut self, kind: EntityKind, records: Vec<Record>) {
        tracing::debug!(
            target: "alchemist.session",
            stage = "session.set_data",
            kind = %kind,
            rows = records.len()
        );
        self.data.set(kind, records);
    }

    /// Drop every table and the findings; rules and file name are kept.
    pub fn clear_data(&mut self) {
        self.data.clear();
        self.findings.clear();
    }

    /// Shallow-merge `patch` into the first record of `kind` with identifier `id`.
    /// Returns false when no such record exists.
    pub fn update_record(&mut self, kind: EntityKind, id: &str, patch: &Map<String, Value>) -> bool {
        match self.data.find_mut(kind, id) {
            Some(record) => {
                record.merge(patch);
                true
            }
            None => {
                tracing::debug!(
                    target: "alchemist.session",
                    stage = "session.update_record.miss",
                    kind = %kind,
                    id = %id
                );
                false
            }
        }
    }

    /// Apply every change of an accepted suggestion, then revalidate. Changes
    /// naming an unknown record are skipped. Returns the number applied.
    pub fn apply_modification(
        &mut self,
        suggestion: &ModificationSuggestion,
        validator: &DataValidator,
    ) -> usize {
        let applied = suggestion
            .changes
            .iter()
            .filter(|change| {
                self.update_record(
                    suggestion.entity,
                    &change.record_id,
                    &ModificationSuggestion::patch(change),
                )
            })
            .count();
        tracing::info!(
            target: "alchemist.session",
            stage = "session.apply_modification",
            id = %suggestion.id,
            kind = %suggestion.entity,
            applied = applied,
            skipped = suggestion.changes.len() - applied
        );
        self.revalidate(validator);
        applied
    }

    /// Replace the stored findings with a fresh run over the current tables.
    pub fn revalidate(&mut self, validator: &DataValidator) -> &[Finding] {
        self.findings = validator.validate_dataset(&self.data);
        &self.findings
    }

    pub fn data(&self) -> &Dataset {
        &self.data
    }

    pub fn clients(&self) -> &[Client] {
        &self.data.clients
    }

    pub fn workers(&self) -> &[Worker] {
        &self.data.workers
    }

    pub fn tasks(&self) -> &[Task] {
        &self.data.tasks
    }

    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    pub fn rules(&self) -> &RuleBook {
        &self.rules
    }

    pub fn rules_mut(&mut self) -> &mut RuleBook {
        &mut self.rules
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn set_file_name(&mut self, name: impl Into<String>) {
        self.file_name = Some(name.into());
    }
}
