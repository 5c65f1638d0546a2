use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::IngestError;

/// The three tables an upload can describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Clients,
    Workers,
    Tasks,
}

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [EntityKind::Clients, EntityKind::Workers, EntityKind::Tasks];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Clients => "clients",
            Self::Workers => "workers",
            Self::Tasks => "tasks",
        }
    }

    /// Canonical fields in declaration order. Earlier fields win ties during
    /// header normalization.
    pub fn fields(self) -> &'static [CanonicalField] {
        use CanonicalField::*;
        match self {
            Self::Clients => &[
                ClientId,
                ClientName,
                PriorityLevel,
                RequestedTaskIds,
                GroupTag,
                AttributesJson,
            ],
            Self::Workers => &[
                WorkerId,
                WorkerName,
                Skills,
                AvailableSlots,
                MaxLoadPerPhase,
                WorkerGroup,
                QualificationLevel,
            ],
            Self::Tasks => &[
                TaskId,
                TaskName,
                Category,
                Duration,
                RequiredSkills,
                PreferredPhases,
                MaxConcurrent,
            ],
        }
    }

    /// The field holding the record identifier.
    pub fn id_field(self) -> CanonicalField {
        match self {
            Self::Clients => CanonicalField::ClientId,
            Self::Workers => CanonicalField::WorkerId,
            Self::Tasks => CanonicalField::TaskId,
        }
    }

    /// Singular noun used in finding messages ("Client at row 3 ...").
    pub fn noun(self) -> &'static str {
        match self {
            Self::Clients => "Client",
            Self::Workers => "Worker",
            Self::Tasks => "Task",
        }
    }

    pub fn field_names(self) -> Vec<&'static str> {
        self.fields().iter().map(|f| f.name()).collect()
    }

    /// Look up a canonical field of this kind by its exact name.
    pub fn field_named(self, name: &str) -> Option<CanonicalField> {
        self.fields().iter().copied().find(|f| f.name() == name)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = IngestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "clients" | "client" => Ok(Self::Clients),
            "workers" | "worker" => Ok(Self::Workers),
            "tasks" | "task" => Ok(Self::Tasks),
            other => Err(IngestError::UnknownEntityKind(other.to_string())),
        }
    }
}

/// Every canonical attribute across the three entity kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CanonicalField {
    #[serde(rename = "ClientID")]
    ClientId,
    ClientName,
    PriorityLevel,
    #[serde(rename = "RequestedTaskIDs")]
    RequestedTaskIds,
    GroupTag,
    #[serde(rename = "AttributesJSON")]
    AttributesJson,
    #[serde(rename = "WorkerID")]
    WorkerId,
    WorkerName,
    Skills,
    AvailableSlots,
    MaxLoadPerPhase,
    WorkerGroup,
    QualificationLevel,
    #[serde(rename = "TaskID")]
    TaskId,
    TaskName,
    Category,
    Duration,
    RequiredSkills,
    PreferredPhases,
    MaxConcurrent,
}

impl CanonicalField {
    pub fn name(self) -> &'static str {
        match self {
            Self::ClientId => "ClientID",
            Self::ClientName => "ClientName",
            Self::PriorityLevel => "PriorityLevel",
            Self::RequestedTaskIds => "RequestedTaskIDs",
            Self::GroupTag => "GroupTag",
            Self::AttributesJson => "AttributesJSON",
            Self::WorkerId => "WorkerID",
            Self::WorkerName => "WorkerName",
            Self::Skills => "Skills",
            Self::AvailableSlots => "AvailableSlots",
            Self::MaxLoadPerPhase => "MaxLoadPerPhase",
            Self::WorkerGroup => "WorkerGroup",
            Self::QualificationLevel => "QualificationLevel",
            Self::TaskId => "TaskID",
            Self::TaskName => "TaskName",
            Self::Category => "Category",
            Self::Duration => "Duration",
            Self::RequiredSkills => "RequiredSkills",
            Self::PreferredPhases => "PreferredPhases",
            Self::MaxConcurrent => "MaxConcurrent",
        }
    }

    pub fn kind(self) -> EntityKind {
        match self {
            Self::ClientId
            | Self::ClientName
            | Self::PriorityLevel
            | Self::RequestedTaskIds
            | Self::GroupTag
            | Self::AttributesJson => EntityKind::Clients,
            Self::WorkerId
            | Self::WorkerName
            | Self::Skills
            | Self::AvailableSlots
            | Self::MaxLoadPerPhase
            | Self::WorkerGroup
            | Self::QualificationLevel => EntityKind::Workers,
            Self::TaskId
            | Self::TaskName
            | Self::Category
            | Self::Duration
            | Self::RequiredSkills
            | Self::PreferredPhases
            | Self::MaxConcurrent => EntityKind::Tasks,
        }
    }

    /// Lower-case alphanumeric synonyms used by the keyword normalizer.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::ClientId => &[
                "client",
                "customer",
                "id",
                "clientid",
                "customerid",
            ],
            Self::ClientName => &[
                "name",
                "clientname",
                "customername",
                "company",
            ],
            Self::PriorityLevel => &["priority", "level", "prioritylevel", "importance"],
            Self::RequestedTaskIds => &[
                "tasks",
                "taskids",
                "requested",
                "requestedtaskids",
                "assignments",
            ],
            Self::GroupTag => &["group", "tag", "grouptag", "category", "type", "segment"],
            Self::AttributesJson => &[
                "attributes",
                "attributesjson",
                "metadata",
                "properties",
                "details",
                "info",
            ],
            Self::WorkerId => &[
                "worker",
                "employee",
                "staff",
                "id",
                "workerid",
                "employeeid",
                "staffid",
            ],
            Self::WorkerName => &[
                "name",
                "workername",
                "employeename",
                "staffname",
                "fullname",
            ],
            Self::Skills => &[
                "skills",
                "skill",
                "abilities",
                "expertise",
                "competencies",
                "technologies",
            ],
            Self::AvailableSlots => &[
                "slots",
                "availableslots",
                "availability",
                "available",
                "phases",
                "time",
                "schedule",
                "capacity",
            ],
            Self::MaxLoadPerPhase => &[
                "load",
                "maxload",
                "maxloadperphase",
                "capacity",
                "workload",
                "bandwidth",
            ],
            Self::WorkerGroup => &[
                "group",
                "workergroup",
                "team",
                "department",
                "division",
                "unit",
                "squad",
            ],
            Self::QualificationLevel => &[
                "qualification",
                "qualificationlevel",
                "level",
                "experience",
                "seniority",
                "grade",
                "rank",
            ],
            Self::TaskId => &[
                "task",
                "job",
                "project",
                "id",
                "taskid",
                "jobid",
                "projectid",
            ],
            Self::TaskName => &[
                "name",
                "taskname",
                "jobname",
                "projectname",
                "title",
            ],
            Self::Category => &["category", "type", "kind", "classification", "class"],
            Self::Duration => &[
                "duration",
                "time",
                "hours",
                "days",
                "length",
                "effort",
                "estimate",
            ],
            Self::RequiredSkills => &[
                "skills",
                "requiredskills",
                "required",
                "requirements",
                "needed",
                "technologies",
                "expertise",
            ],
            Self::PreferredPhases => &[
                "phases",
                "preferredphases",
                "preferred",
                "schedule",
                "timeline",
                "slots",
                "periods",
            ],
            Self::MaxConcurrent => &[
                "concurrent",
                "maxconcurrent",
                "parallel",
                "simultaneous",
                "capacity",
            ],
        }
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
