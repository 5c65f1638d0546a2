use crate::model::{Client, Dataset, EntityKind, Finding, Record, Task, Worker};

use super::business::validate_business_logic;
use super::cross_ref::validate_cross_references;
use super::entity::{validate_clients, validate_tasks, validate_workers};
use super::ValidationThresholds;

/// Runs the validation passes. Holds only configuration, so one instance can
/// serve concurrent runs.
#[derive(Debug, Clone, Default)]
pub struct DataValidator {
    thresholds: ValidationThresholds,
}

impl DataValidator {
    pub fn new(thresholds: ValidationThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &ValidationThresholds {
        &self.thresholds
    }

    /// Entity, cross-reference and business passes, concatenated in that order.
    pub fn validate_all(&self, clients: &[Client], workers: &[Worker], tasks: &[Task]) -> Vec<Finding> {
        let mut findings = self.validate_clients(clients);
        findings.extend(self.validate_workers(workers));
        findings.extend(self.validate_tasks(tasks));
        findings.extend(self.validate_cross_references(clients, workers, tasks));
        findings.extend(self.validate_business_logic(clients, workers, tasks));

        tracing::info!(
            target: "alchemist.validate",
            stage = "validate.all",
            clients = clients.len(),
            workers = workers.len(),
            tasks = tasks.len(),
            findings = findings.len(),
            errors = findings.iter().filter(|f| f.is_error()).count()
        );
        findings
    }

    pub fn validate_dataset(&self, data: &Dataset) -> Vec<Finding> {
        self.validate_all(&data.clients, &data.workers, &data.tasks)
    }

    pub fn validate_clients(&self, clients: &[Client]) -> Vec<Finding> {
        validate_clients(clients)
    }

    pub fn validate_workers(&self, workers: &[Worker]) -> Vec<Finding> {
        validate_workers(workers)
    }

    pub fn validate_tasks(&self, tasks: &[Task]) -> Vec<Finding> {
        validate_tasks(tasks)
    }

    /// Per-entity checks for a single uploaded table.
    pub fn validate_entity(&self, kind: EntityKind, records: &[Record]) -> Vec<Finding> {
        match kind {
            EntityKind::Clients => {
                let clients: Vec<Client> = records.iter().cloned().map(Client::new).collect();
                self.validate_clients(&clients)
            }
            EntityKind::Workers => {
                let workers: Vec<Worker> = records.iter().cloned().map(Worker::new).collect();
                self.validate_workers(&workers)
            }
            EntityKind::Tasks => {
                let tasks: Vec<Task> = records.iter().cloned().map(Task::new).collect();
                self.validate_tasks(&tasks)
            }
        }
    }

    pub fn validate_cross_references(
        &self,
        clients: &[Client],
        workers: &[Worker],
        tasks: &[Task],
    ) -> Vec<Finding> {
        validate_cross_references(clients, workers, tasks, &self.thresholds)
    }

    pub fn validate_business_logic(
        &self,
        clients: &[Client],
        workers: &[Worker],
        tasks: &[Task],
    ) -> Vec<Finding> {
        validate_business_logic(clients, workers, tasks, &self.thresholds)
    }
}
