//! Referential integrity between the three tables.

use std::collections::HashSet;

use crate::model::{CanonicalField, Client, EntityKind, Finding, FindingKind, Task, Worker};

use super::sink::FindingSink;
use super::tally::Tally;
use super::ValidationThresholds;

pub fn validate_cross_references(
    clients: &[Client],
    workers: &[Worker],
    tasks: &[Task],
    thresholds: &ValidationThresholds,
) -> Vec<Finding> {
    let mut sink = FindingSink::new();

    let task_ids: HashSet<String> = tasks.iter().map(Task::id).collect();
    let worker_skills: HashSet<String> = workers.iter().flat_map(Worker::skills).collect();

    for client in clients {
        for task_id in client.requested_task_ids() {
            if !task_ids.contains(&task_id) {
                sink.error(
                    FindingKind::BrokenReference,
                    EntityKind::Clients,
                    CanonicalField::RequestedTaskIds,
                    format!(
                        "Client {} references non-existent task: {}",
                        client.id(),
                        task_id
                    ),
                );
            }
        }
    }

    for task in tasks {
        for skill in task.required_skills() {
            if !worker_skills.contains(&skill) {
                sink.warning(
                    FindingKind::MissingSkill,
                    EntityKind::Tasks,
                    CanonicalField::RequiredSkills,
                    format!(
                        "Task {} requires skill \"{}\" but no worker has it",
                        task.id(),
                        skill
                    ),
                );
            }
        }
    }

    corun_groups(&mut sink, clients, thresholds.corun_group_max);
    sink.into_findings()
}

/// Size heuristic only; group membership carries no ordering to detect cycles in.
fn corun_groups(sink: &mut FindingSink, clients: &[Client], max: usize) {
    let mut groups: Tally<String> = Tally::new();
    for tag in clients.iter().filter_map(Client::group_tag) {
        groups.add(tag, 1.0);
    }
    for (tag, members) in groups.iter() {
        let members = members as usize;
        if members > max {
            sink.warning(
                FindingKind::CircularCorun,
                EntityKind::Clients,
                CanonicalField::GroupTag,
                format!(
                    "Co-run group \"{tag}\" has {members} clients, which may cause scheduling conflicts"
                ),
            );
        }
    }
}
