//! Structural checks on one entity table at a time.

use std::collections::HashMap;

use serde_json::Value;

use crate::model::value::{self, format_number};
use crate::model::{CanonicalField, Client, EntityKind, Finding, FindingKind, Record, Task, Worker};

use super::sink::FindingSink;
use super::thresholds::{out_of_range, PHASE_RANGE, PRIORITY_RANGE, QUALIFICATION_RANGE};

pub fn validate_clients(clients: &[Client]) -> Vec<Finding> {
    let kind = EntityKind::Clients;
    let mut sink = FindingSink::new();

    for (index, client) in clients.iter().enumerate() {
        let r = client.record();
        require(&mut sink, kind, r, index, CanonicalField::ClientId);
        require(&mut sink, kind, r, index, CanonicalField::ClientName);

        if let Some(p) = client.priority_level() {
            if out_of_range(p, PRIORITY_RANGE) {
                sink.warning(
                    FindingKind::InvalidRange,
                    kind,
                    CanonicalField::PriorityLevel,
                    format!(
                        "Client {} has invalid priority level ({}). Must be 1-10.",
                        client.id(),
                        format_number(p)
                    ),
                );
            }
        }

        let requested = r.field(CanonicalField::RequestedTaskIds);
        if !value::is_blank(requested) && !matches!(requested, Some(Value::Array(_))) {
            sink.error(
                FindingKind::MalformedList,
                kind,
                CanonicalField::RequestedTaskIds,
                format!(
                    "Client {} has malformed RequestedTaskIDs. Expected array format.",
                    client.id()
                ),
            );
        }

        let attrs = r.field(CanonicalField::AttributesJson);
        if !value::is_blank(attrs) && !matches!(attrs, Some(Value::Object(_))) {
            sink.error(
                FindingKind::BrokenJson,
                kind,
                CanonicalField::AttributesJson,
                format!("Client {} has invalid AttributesJSON format.", client.id()),
            );
        }
    }

    duplicates(&mut sink, kind, clients.iter().map(Client::id));
    sink.into_findings()
}

pub fn validate_workers(workers: &[Worker]) -> Vec<Finding> {
    let kind = EntityKind::Workers;
    let mut sink = FindingSink::new();

    for (index, worker) in workers.iter().enumerate() {
        let r = worker.record();
        let id = worker.id();
        require(&mut sink, kind, r, index, CanonicalField::WorkerId);
        require(&mut sink, kind, r, index, CanonicalField::WorkerName);

        match r.field(CanonicalField::Skills) {
            Some(Value::Array(skills)) if skills.is_empty() => sink.warning(
                FindingKind::InvalidSkills,
                kind,
                CanonicalField::Skills,
                format!("Worker {id} has no skills defined"),
            ),
            Some(Value::Array(_)) => {}
            _ => malformed(&mut sink, kind, CanonicalField::Skills, "Worker", &id),
        }

        match r.field(CanonicalField::AvailableSlots) {
            Some(Value::Array(slots)) => {
                if any_out_of_range(slots, PHASE_RANGE) {
                    sink.warning(
                        FindingKind::InvalidRange,
                        kind,
                        CanonicalField::AvailableSlots,
                        format!("Worker {id} has invalid slot numbers. Slots must be 1-10."),
                    );
                }
            }
            _ => malformed(&mut sink, kind, CanonicalField::AvailableSlots, "Worker", &id),
        }

        if let Some(q) = worker.qualification_level() {
            if out_of_range(q, QUALIFICATION_RANGE) {
                sink.warning(
                    FindingKind::InvalidRange,
                    kind,
                    CanonicalField::QualificationLevel,
                    format!(
                        "Worker {id} has invalid qualification level ({}). Must be 1-5.",
                        format_number(q)
                    ),
                );
            }
        }

        if let Some(load) = worker.max_load_per_phase() {
            if load <= 0.0 {
                sink.error(
                    FindingKind::InvalidRange,
                    kind,
                    CanonicalField::MaxLoadPerPhase,
                    format!(
                        "Worker {id} has invalid MaxLoadPerPhase ({}). Must be > 0.",
                        format_number(load)
                    ),
                );
            }
        }
    }

    duplicates(&mut sink, kind, workers.iter().map(Worker::id));
    sink.into_findings()
}

pub fn validate_tasks(tasks: &[Task]) -> Vec<Finding> {
    let kind = EntityKind::Tasks;
    let mut sink = FindingSink::new();

    for (index, task) in tasks.iter().enumerate() {
        let r = task.record();
        let id = task.id();
        require(&mut sink, kind, r, index, CanonicalField::TaskId);
        require(&mut sink, kind, r, index, CanonicalField::TaskName);

        if let Some(d) = task.duration() {
            if d <= 0.0 {
                sink.error(
                    FindingKind::InvalidDuration,
                    kind,
                    CanonicalField::Duration,
                    format!(
                        "Task {id} has invalid duration ({}). Must be > 0.",
                        format_number(d)
                    ),
                );
            }
        }

        if !matches!(r.field(CanonicalField::RequiredSkills), Some(Value::Array(_))) {
            malformed(&mut sink, kind, CanonicalField::RequiredSkills, "Task", &id);
        }

        match r.field(CanonicalField::PreferredPhases) {
            Some(Value::Array(phases)) => {
                if any_out_of_range(phases, PHASE_RANGE) {
                    sink.warning(
                        FindingKind::InvalidRange,
                        kind,
                        CanonicalField::PreferredPhases,
                        format!("Task {id} has invalid phase numbers. Phases must be 1-10."),
                    );
                }
            }
            _ => malformed(&mut sink, kind, CanonicalField::PreferredPhases, "Task", &id),
        }

        if let Some(c) = task.max_concurrent() {
            if c <= 0.0 {
                sink.error(
                    FindingKind::InvalidRange,
                    kind,
                    CanonicalField::MaxConcurrent,
                    format!(
                        "Task {id} has invalid MaxConcurrent ({}). Must be > 0.",
                        format_number(c)
                    ),
                );
            }
        }
    }

    duplicates(&mut sink, kind, tasks.iter().map(Task::id));
    sink.into_findings()
}

fn require(
    sink: &mut FindingSink,
    kind: EntityKind,
    record: &Record,
    index: usize,
    field: CanonicalField,
) {
    if value::is_blank(record.field(field)) {
        sink.error(
            FindingKind::MissingField,
            kind,
            field,
            format!("{} at row {} missing {}", kind.noun(), index + 1, field),
        );
    }
}

fn malformed(sink: &mut FindingSink, kind: EntityKind, field: CanonicalField, noun: &str, id: &str) {
    sink.error(
        FindingKind::MalformedList,
        kind,
        field,
        format!("{noun} {id} has malformed {field}. Expected array format."),
    );
}

/// Non-numeric elements are ignored.
fn any_out_of_range(items: &[Value], range: (f64, f64)) -> bool {
    items
        .iter()
        .filter_map(|v| value::as_number(Some(v)))
        .any(|n| out_of_range(n, range))
}

/// One finding per occurrence of every non-empty id that appears more than once.
fn duplicates(sink: &mut FindingSink, kind: EntityKind, ids: impl Iterator<Item = String>) {
    let ids: Vec<String> = ids.filter(|id| !id.is_empty()).collect();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for id in &ids {
        *counts.entry(id.as_str()).or_insert(0) += 1;
    }
    let field = kind.id_field();
    for id in &ids {
        if counts.get(id.as_str()).copied().unwrap_or(0) > 1 {
            sink.error(
                FindingKind::DuplicateId,
                kind,
                field,
                format!("Duplicate {field}: {id}"),
            );
        }
    }
}
