use crate::model::EntityKind;

const CLIENT_NAME_HINTS: [&str; 3] = ["client", "customer", "buyer"];
const WORKER_NAME_HINTS: [&str; 6] = ["worker", "employee", "staff", "resource", "personnel", "team"];
const TASK_NAME_HINTS: [&str; 6] = ["task", "job", "project", "assignment", "work", "activity"];

const CLIENT_HEADER_HINTS: [&str; 4] = ["client", "customer", "priority", "requested"];
const WORKER_HEADER_HINTS: [&str; 7] = [
    "worker",
    "employee",
    "staff",
    "skill",
    "available",
    "qualification",
    "load",
];
const TASK_HEADER_HINTS: [&str; 7] = [
    "task",
    "job",
    "project",
    "duration",
    "required",
    "phase",
    "concurrent",
];

/// Guess the entity kind of an upload from its file name, then its headers.
///
/// File name hints are checked clients, workers, tasks in that order. Header
/// hints are counted per kind; ties go to workers, then tasks. No signal at
/// all means clients.
pub fn detect_entity_kind(filename: &str, headers: &[String]) -> EntityKind {
    let name = filename.to_lowercase();
    let named = |hints: &[&str]| hints.iter().any(|h| name.contains(h));
    if named(&CLIENT_NAME_HINTS) {
        return EntityKind::Clients;
    }
    if named(&WORKER_NAME_HINTS) {
        return EntityKind::Workers;
    }
    if named(&TASK_NAME_HINTS) {
        return EntityKind::Tasks;
    }
    if headers.is_empty() {
        return EntityKind::Clients;
    }

    let lowered: Vec<String> = headers.iter().map(|h| h.to_lowercase()).collect();
    let count = |hints: &[&str]| {
        lowered
            .iter()
            .filter(|h| hints.iter().any(|hint| h.contains(hint)))
            .count()
    };
    let clients = count(&CLIENT_HEADER_HINTS);
    let workers = count(&WORKER_HEADER_HINTS);
    let tasks = count(&TASK_HEADER_HINTS);

    let kind = if workers >= clients && workers >= tasks {
        EntityKind::Workers
    } else if tasks >= clients {
        EntityKind::Tasks
    } else {
        EntityKind::Clients
    };
    tracing::debug!(
        target: "alchemist.ingest",
        stage = "ingest.detect",
        filename = %filename,
        clients, workers, tasks,
        kind = %kind
    );
    kind
}
