use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::entity::CanonicalField;
use super::value;

/// One canonical row: field name to cell value, in column order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: Map<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn field(&self, field: CanonicalField) -> Option<&Value> {
        self.fields.get(field.name())
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.fields.insert(name.into(), value)
    }

    pub fn set(&mut self, field: CanonicalField, value: Value) -> Option<Value> {
        self.insert(field.name(), value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Shallow merge: every key of `patch` overwrites this record's value.
    pub fn merge(&mut self, patch: &Map<String, Value>) {
        for (k, v) in patch {
            self.fields.insert(k.clone(), v.clone());
        }
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.fields
    }

    /// Trimmed identifier text for `field`, empty when blank.
    pub fn text(&self, field: CanonicalField) -> String {
        if value::is_blank(self.field(field)) {
            String::new()
        } else {
            value::display(self.field(field)).trim().to_string()
        }
    }

    pub fn number(&self, field: CanonicalField) -> Option<f64> {
        value::as_number(self.field(field))
    }

    pub fn list(&self, field: CanonicalField) -> Vec<String> {
        value::string_list(self.field(field))
    }

    pub fn numbers(&self, field: CanonicalField) -> Vec<f64> {
        value::number_list(self.field(field))
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Self::from_map(fields)
    }
}

macro_rules! entity_view {
    ($(#[$meta:meta])* $name:ident, $id:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Record);

        impl $name {
            pub fn new(record: Record) -> Self {
                Self(record)
            }

            pub fn record(&self) -> &Record {
                &self.0
            }

            pub fn record_mut(&mut self) -> &mut Record {
                &mut self.0
            }

            pub fn into_record(self) -> Record {
                self.0
            }

            /// Identifier text, empty when the cell is blank.
            pub fn id(&self) -> String {
                self.0.text($id)
            }
        }

        impl From<Record> for $name {
            fn from(record: Record) -> Self {
                Self(record)
            }
        }
    };
}

entity_view!(
    /// Read view over a client record.
    Client,
    CanonicalField::ClientId
);
entity_view!(
    /// Read view over a worker record.
    Worker,
    CanonicalField::WorkerId
);
entity_view!(
    /// Read view over a task record.
    Task,
    CanonicalField::TaskId
);

/// Marker for a co-run group label meaning "no group".
pub const DEFAULT_GROUP_TAG: &str = "default";

impl Client {
    pub fn priority_level(&self) -> Option<f64> {
        self.0.number(CanonicalField::PriorityLevel)
    }

    pub fn requested_task_ids(&self) -> Vec<String> {
        self.0.list(CanonicalField::RequestedTaskIds)
    }

    /// Co-run group label, `None` for blank or the default tag.
    pub fn group_tag(&self) -> Option<String> {
        let tag = self.0.text(CanonicalField::GroupTag);
        (!tag.is_empty() && tag != DEFAULT_GROUP_TAG).then_some(tag)
    }
}

impl Worker {
    pub fn skills(&self) -> Vec<String> {
        self.0.list(CanonicalField::Skills)
    }

    pub fn available_slots(&self) -> Vec<f64> {
        self.0.numbers(CanonicalField::AvailableSlots)
    }

    pub fn max_load_per_phase(&self) -> Option<f64> {
        self.0.number(CanonicalField::MaxLoadPerPhase)
    }

    pub fn qualification_level(&self) -> Option<f64> {
        self.0.number(CanonicalField::QualificationLevel)
    }

    /// True when every skill in `required` is among this worker's skills.
    pub fn covers(&self, required: &[String]) -> bool {
        let skills = self.skills();
        required.iter().all(|s| skills.contains(s))
    }
}

impl Task {
    pub fn duration(&self) -> Option<f64> {
        self.0.number(CanonicalField::Duration)
    }

    pub fn required_skills(&self) -> Vec<String> {
        self.0.list(CanonicalField::RequiredSkills)
    }

    pub fn preferred_phases(&self) -> Vec<f64> {
        self.0.numbers(CanonicalField::PreferredPhases)
    }

    pub fn max_concurrent(&self) -> Option<f64> {
        self.0.number(CanonicalField::MaxConcurrent)
    }
}
