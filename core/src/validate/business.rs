//! Aggregate supply and demand checks across the whole dataset.
//!
//! Each check is independent and reads its inputs only through the
//! ensure-array and loose-number helpers, so malformed cells never abort a run.

use std::collections::HashSet;

use crate::model::value::format_number;
use crate::model::{CanonicalField, Client, EntityKind, Finding, FindingKind, Task, Worker};

use super::sink::FindingSink;
use super::tally::Tally;
use super::thresholds::HIGH_PRIORITY_LEVELS;
use super::ValidationThresholds;

pub fn validate_business_logic(
    clients: &[Client],
    workers: &[Worker],
    tasks: &[Task],
    thresholds: &ValidationThresholds,
) -> Vec<Finding> {
    let mut findings = skill_coverage(workers, tasks);
    findings.extend(phase_saturation(workers, tasks, thresholds));
    findings.extend(worker_overload(clients, workers, tasks, thresholds));
    findings.extend(priority_distribution(clients, thresholds));
    findings.extend(task_complexity(workers, tasks, thresholds));
    findings
}

/// Skills demanded by more tasks than there are workers holding them.
pub fn skill_coverage(workers: &[Worker], tasks: &[Task]) -> Vec<Finding> {
    let mut demand: Tally<String> = Tally::new();
    for skill in tasks.iter().flat_map(Task::required_skills) {
        demand.add(skill, 1.0);
    }
    let mut supply: Tally<String> = Tally::new();
    for skill in workers.iter().flat_map(Worker::skills) {
        supply.add(skill, 1.0);
    }

    let mut sink = FindingSink::new();
    for (skill, needed) in demand.iter() {
        let have = supply.get(skill);
        if have < needed {
            sink.warning(
                FindingKind::SkillShortage,
                EntityKind::Tasks,
                CanonicalField::RequiredSkills,
                format!(
                    "Skill \"{skill}\" is required by {} tasks but only {} workers have it",
                    format_number(needed),
                    format_number(have)
                ),
            );
        }
    }
    sink.into_findings()
}

/// Phase demand (task durations) against phase capacity (worker max loads).
pub fn phase_saturation(
    workers: &[Worker],
    tasks: &[Task],
    thresholds: &ValidationThresholds,
) -> Vec<Finding> {
    let mut capacity: Tally<i64> = Tally::new();
    for worker in workers {
        let load = worker.max_load_per_phase().unwrap_or(0.0);
        for slot in worker.available_slots() {
            capacity.add(slot.trunc() as i64, load);
        }
    }
    let mut demand: Tally<i64> = Tally::new();
    for task in tasks {
        let duration = task.duration().unwrap_or(0.0);
        for phase in task.preferred_phases() {
            demand.add(phase.trunc() as i64, duration);
        }
    }

    let mut sink = FindingSink::new();
    for (phase, wanted) in demand.iter() {
        let available = capacity.get(phase);
        if wanted > available * thresholds.phase_saturation_ratio {
            sink.warning(
                FindingKind::PhaseSaturation,
                EntityKind::Tasks,
                CanonicalField::PreferredPhases,
                format!(
                    "Phase {phase} may be oversaturated: {} demand vs {} capacity",
                    format_number(wanted),
                    format_number(available)
                ),
            );
        }
    }
    sink.into_findings()
}

/// Spread each requested task's duration evenly over its capable workers.
/// A task requested by several clients counts once per client.
pub fn worker_overload(
    clients: &[Client],
    workers: &[Worker],
    tasks: &[Task],
    thresholds: &ValidationThresholds,
) -> Vec<Finding> {
    let mut load: Tally<String> = Tally::new();
    for client in clients {
        for task_id in client.requested_task_ids() {
            let Some(task) = tasks.iter().find(|t| t.id() == task_id) else {
                continue;
            };
            let required = task.required_skills();
            let capable: Vec<&Worker> = workers.iter().filter(|w| w.covers(&required)).collect();
            if capable.is_empty() {
                continue;
            }
            let share = task.duration().unwrap_or(0.0) / capable.len() as f64;
            for worker in capable {
                load.add(worker.id(), share);
            }
        }
    }

    let mut sink = FindingSink::new();
    let mut seen: HashSet<String> = HashSet::new();
    for worker in workers {
        let id = worker.id();
        if id.is_empty() || !seen.insert(id.clone()) || !load.contains(&id) {
            continue;
        }
        let Some(max) = worker.max_load_per_phase() else {
            continue;
        };
        let estimated = load.get(&id);
        if estimated > max * thresholds.worker_overload_ratio {
            sink.warning(
                FindingKind::WorkerOverload,
                EntityKind::Workers,
                CanonicalField::MaxLoadPerPhase,
                format!(
                    "Worker {id} may be overloaded: {estimated:.1} estimated load vs {} max capacity",
                    format_number(max)
                ),
            );
        }
    }
    sink.into_findings()
}

/// Too large a share of clients at the top priority levels.
pub fn priority_distribution(clients: &[Client], thresholds: &ValidationThresholds) -> Vec<Finding> {
    let mut sink = FindingSink::new();
    let total = clients.len();
    if total == 0 {
        return sink.into_findings();
    }
    let high = clients
        .iter()
        .filter_map(Client::priority_level)
        .filter(|p| HIGH_PRIORITY_LEVELS.contains(p))
        .count();
    if high as f64 > total as f64 * thresholds.high_priority_share {
        let pct = high as f64 / total as f64 * 100.0;
        sink.warning(
            FindingKind::PriorityImbalance,
            EntityKind::Clients,
            CanonicalField::PriorityLevel,
            format!(
                "{high} clients ({pct:.1}%) have high priority (9-10). Consider rebalancing priorities."
            ),
        );
    }
    sink.into_findings()
}

/// Complex tasks need enough highly qualified, capable workers.
pub fn task_complexity(
    workers: &[Worker],
    tasks: &[Task],
    thresholds: &ValidationThresholds,
) -> Vec<Finding> {
    let mut sink = FindingSink::new();
    for task in tasks {
        let required = task.required_skills();
        let score = thresholds.complexity_skill_weight * required.len() as f64
            + task.duration().unwrap_or(0.0);
        if score <= thresholds.complexity_score_threshold {
            continue;
        }

        let qualified = workers
            .iter()
            .filter(|w| {
                w.qualification_level()
                    .is_some_and(|q| q >= thresholds.min_qualification_for_complex)
                    && w.covers(&required)
            })
            .count();

        if qualified == 0 {
            sink.error(
                FindingKind::ComplexityMismatch,
                EntityKind::Tasks,
                CanonicalField::RequiredSkills,
                format!(
                    "High complexity task {} (score: {}) has no qualified workers (level {}+)",
                    task.id(),
                    format_number(score),
                    format_number(thresholds.min_qualification_for_complex)
                ),
            );
        } else if qualified < thresholds.min_qualified_workers {
            sink.warning(
                FindingKind::ComplexityMismatch,
                EntityKind::Tasks,
                CanonicalField::RequiredSkills,
                format!(
                    "High complexity task {} has only {} qualified worker(s). Consider adding backup resources.",
                    task.id(),
                    qualified
                ),
            );
        }
    }
    sink.into_findings()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Record, Severity};
    use serde_json::{json, Value};

    fn rec<T: From<Record>>(v: Value) -> T {
        T::from(serde_json::from_value::<Record>(v).unwrap())
    }

    fn th() -> ValidationThresholds {
        ValidationThresholds::default()
    }

    fn phase_workers() -> Vec<Worker> {
        (1..=4)
            .map(|i| rec(json!({"WorkerID": format!("W{i}"), "AvailableSlots": [1], "MaxLoadPerPhase": 10})))
            .collect()
    }

    fn phase_tasks(durations: &[u32]) -> Vec<Task> {
        durations
            .iter()
            .enumerate()
            .map(|(i, d)| rec(json!({"TaskID": format!("T{i}"), "Duration": d, "PreferredPhases": [1]})))
            .collect()
    }

    #[test]
    fn phase_below_threshold_is_quiet() {
        assert!(phase_saturation(&phase_workers(), &phase_tasks(&[10, 10, 10]), &th()).is_empty());
    }

    #[test]
    fn phase_above_threshold_warns() {
        let f = phase_saturation(&phase_workers(), &phase_tasks(&[10, 10, 10, 10]), &th());
        assert_eq!(f.len(), 1);
        assert_eq!(f[0].message(), "Phase 1 may be oversaturated: 40 demand vs 40 capacity");
    }

    #[test]
    fn text_slots_count_by_integer_prefix() {
        let workers: Vec<Worker> =
            vec![rec(json!({"WorkerID": "W1", "AvailableSlots": ["3a"], "MaxLoadPerPhase": 10}))];
        let tasks: Vec<Task> =
            vec![rec(json!({"TaskID": "T1", "Duration": 2, "PreferredPhases": ["3"]}))];
        assert!(phase_saturation(&workers, &tasks, &th()).is_empty());
    }

    #[test]
    fn phase_without_capacity_warns() {
        let f = phase_saturation(&[], &phase_tasks(&[1]), &th());
        assert_eq!(f.len(), 1);
    }

    #[test]
    fn shortage_compares_counts() {
        let tasks: Vec<Task> = vec![
            rec(json!({"TaskID": "T1", "RequiredSkills": ["rust", "go"]})),
            rec(json!({"TaskID": "T2", "RequiredSkills": ["rust"]})),
        ];
        let workers: Vec<Worker> = vec![rec(json!({"WorkerID": "W1", "Skills": ["rust", "go"]}))];
        let f = skill_coverage(&workers, &tasks);
        assert_eq!(f.len(), 1);
        assert_eq!(
            f[0].message(),
            "Skill \"rust\" is required by 2 tasks but only 1 workers have it"
        );
    }

    #[test]
    fn overload_splits_duration_across_capable_workers() {
        let workers: Vec<Worker> = vec![
            rec(json!({"WorkerID": "W1", "Skills": ["rust"], "MaxLoadPerPhase": 2})),
            rec(json!({"WorkerID": "W2", "Skills": ["rust", "go"], "MaxLoadPerPhase": 10})),
            rec(json!({"WorkerID": "W3", "Skills": ["go"], "MaxLoadPerPhase": 1})),
        ];
        let tasks: Vec<Task> = vec![rec(json!({"TaskID": "T1", "Duration": 6, "RequiredSkills": ["rust"]}))];
        let clients: Vec<Client> = vec![
            rec(json!({"ClientID": "C1", "RequestedTaskIDs": ["T1", "T404"]})),
        ];
        let f = worker_overload(&clients, &workers, &tasks, &th());
        assert_eq!(f.len(), 1);
        assert_eq!(
            f[0].message(),
            "Worker W1 may be overloaded: 3.0 estimated load vs 2 max capacity"
        );
    }

    #[test]
    fn overload_double_counts_repeat_requests() {
        let workers: Vec<Worker> = vec![rec(json!({"WorkerID": "W1", "Skills": [], "MaxLoadPerPhase": 5}))];
        let tasks: Vec<Task> = vec![rec(json!({"TaskID": "T1", "Duration": 4, "RequiredSkills": []}))];
        let one: Vec<Client> = vec![rec(json!({"ClientID": "C1", "RequestedTaskIDs": ["T1"]}))];
        assert!(worker_overload(&one, &workers, &tasks, &th()).is_empty());
        let two: Vec<Client> = vec![
            rec(json!({"ClientID": "C1", "RequestedTaskIDs": ["T1"]})),
            rec(json!({"ClientID": "C2", "RequestedTaskIDs": ["T1"]})),
        ];
        assert_eq!(worker_overload(&two, &workers, &tasks, &th()).len(), 1);
    }

    #[test]
    fn priority_imbalance_over_thirty_percent() {
        let make = |ps: &[i64]| -> Vec<Client> {
            ps.iter()
                .map(|p| rec(json!({"ClientID": "C", "PriorityLevel": p})))
                .collect()
        };
        assert!(priority_distribution(&make(&[9, 1, 1, 1]), &th()).is_empty());
        let f = priority_distribution(&make(&[9, 10, 1, 1]), &th());
        assert_eq!(
            f[0].message(),
            "2 clients (50.0%) have high priority (9-10). Consider rebalancing priorities."
        );
        assert!(priority_distribution(&[], &th()).is_empty());
    }

    #[test]
    fn complexity_needs_two_qualified_workers() {
        let task: Vec<Task> = vec![rec(json!({"TaskID": "T1", "Duration": 8, "RequiredSkills": ["rust", "go"]}))];
        let senior = |id: &str, q: u8| -> Worker {
            rec(json!({"WorkerID": id, "Skills": ["rust", "go"], "QualificationLevel": q}))
        };

        let f = task_complexity(&[senior("W1", 3)], &task, &th());
        assert_eq!(f[0].severity(), Severity::Error);
        assert_eq!(
            f[0].message(),
            "High complexity task T1 (score: 12) has no qualified workers (level 4+)"
        );

        let f = task_complexity(&[senior("W1", 4)], &task, &th());
        assert_eq!(f[0].severity(), Severity::Warning);

        assert!(task_complexity(&[senior("W1", 4), senior("W2", 5)], &task, &th()).is_empty());
    }

    #[test]
    fn simple_tasks_skip_complexity() {
        let task: Vec<Task> = vec![rec(json!({"TaskID": "T1", "Duration": 6, "RequiredSkills": ["a", "b"]}))];
        assert!(task_complexity(&[], &task, &th()).is_empty());
    }
}
