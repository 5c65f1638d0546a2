use std::collections::HashMap;

use crate::model::{CanonicalField, EntityKind, Finding, FindingKind, Severity};

/// Per-run finding accumulator. Ids are `{kind}-{entity}-{n}` with `n`
/// counting from 1 per (entity, kind), so a run is fully deterministic.
#[derive(Debug, Default)]
pub(crate) struct FindingSink {
    findings: Vec<Finding>,
    counters: HashMap<(EntityKind, FindingKind), usize>,
}

impl FindingSink {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(
        &mut self,
        kind: FindingKind,
        severity: Severity,
        entity: EntityKind,
        field: CanonicalField,
        message: String,
    ) {
        let n = self.counters.entry((entity, kind)).or_insert(0);
        *n += 1;
        let id = format!("{}-{}-{}", kind.as_str(), entity.as_str(), n);
        self.findings.push(Finding::new(
            id,
            kind,
            severity,
            message,
            entity,
            Some(field.name().to_string()),
        ));
    }

    pub(crate) fn error(
        &mut self,
        kind: FindingKind,
        entity: EntityKind,
        field: CanonicalField,
        message: String,
    ) {
        self.push(kind, Severity::Error, entity, field, message);
    }

    pub(crate) fn warning(
        &mut self,
        kind: FindingKind,
        entity: EntityKind,
        field: CanonicalField,
        message: String,
    ) {
        self.push(kind, Severity::Warning, entity, field, message);
    }

    pub(crate) fn into_findings(self) -> Vec<Finding> {
        self.findings
    }
}
