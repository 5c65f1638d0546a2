use serde::{Deserialize, Serialize};

use super::entity::EntityKind;
use super::record::{Client, Record, Task, Worker};

/// The three entity tables of one upload session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dataset {
    pub clients: Vec<Client>,
    pub workers: Vec<Worker>,
    pub tasks: Vec<Task>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the table of `kind`.
    pub fn set(&mut self, kind: EntityKind, records: Vec<Record>) {
        match kind {
            EntityKind::Clients => self.clients = records.into_iter().map(Client::new).collect(),
            EntityKind::Workers => self.workers = records.into_iter().map(Worker::new).collect(),
            EntityKind::Tasks => self.tasks = records.into_iter().map(Task::new).collect(),
        }
    }

    pub fn records(&self, kind: EntityKind) -> Vec<&Record> {
        match kind {
            EntityKind::Clients => self.clients.iter().map(Client::record).collect(),
            EntityKind::Workers => self.workers.iter().map(Worker::record).collect(),
            EntityKind::Tasks => self.tasks.iter().map(Task::record).collect(),
        }
    }

    /// First record of `kind` whose identifier equals `id`.
    pub fn find_mut(&mut self, kind: EntityKind, id: &str) -> Option<&mut Record> {
        match kind {
            EntityKind::Clients => self
                .clients
                .iter_mut()
                .find(|c| c.id() == id)
                .map(Client::record_mut),
            EntityKind::Workers => self
                .workers
                .iter_mut()
                .find(|w| w.id() == id)
                .map(Worker::record_mut),
            EntityKind::Tasks => self
                .tasks
                .iter_mut()
                .find(|t| t.id() == id)
                .map(Task::record_mut),
        }
    }

    pub fn len(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Clients => self.clients.len(),
            EntityKind::Workers => self.workers.len(),
            EntityKind::Tasks => self.tasks.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty() && self.workers.is_empty() && self.tasks.is_empty()
    }

    pub fn clear(&mut self) {
        self.clients.clear();
        self.workers.clear();
        self.tasks.clear();
    }
}
