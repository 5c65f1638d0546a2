use std::fmt;

use serde::{Deserialize, Serialize};

use super::entity::EntityKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocks downstream allocation.
    Error,
    /// Risk or quality concern; processing continues.
    Warning,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FindingKind {
    MissingField,
    DuplicateId,
    InvalidRange,
    InvalidDuration,
    InvalidSkills,
    MalformedList,
    BrokenJson,
    BrokenReference,
    MissingSkill,
    CircularCorun,
    SkillShortage,
    PhaseSaturation,
    WorkerOverload,
    PriorityImbalance,
    ComplexityMismatch,
}

impl FindingKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing-field",
            Self::DuplicateId => "duplicate-id",
            Self::InvalidRange => "invalid-range",
            Self::InvalidDuration => "invalid-duration",
            Self::InvalidSkills => "invalid-skills",
            Self::MalformedList => "malformed-list",
            Self::BrokenJson => "broken-json",
            Self::BrokenReference => "broken-reference",
            Self::MissingSkill => "missing-skill",
            Self::CircularCorun => "circular-corun",
            Self::SkillShortage => "skill-shortage",
            Self::PhaseSaturation => "phase-saturation",
            Self::WorkerOverload => "worker-overload",
            Self::PriorityImbalance => "priority-imbalance",
            Self::ComplexityMismatch => "complexity-mismatch",
        }
    }

    /// Static remediation hints. Kinds without an entry get none.
    pub fn suggestions(self) -> &'static [&'static str] {
        match self {
            Self::MissingField => &[
                "Check if the column exists in your file",
                "Verify column headers match expected format",
            ],
            Self::DuplicateId => &[
                "Use unique identifiers for each row",
                "Check for copy-paste errors",
            ],
            Self::InvalidRange => &[
                "Check the valid range for this field",
                "Verify data entry is correct",
            ],
            Self::MalformedList => &[
                "Use comma or semicolon separated values",
                "Ensure proper array format: [item1, item2, item3]",
            ],
            Self::BrokenJson => &[
                "Validate JSON syntax",
                "Use proper JSON format with quotes around keys",
            ],
            Self::BrokenReference => &[
                "Ensure referenced IDs exist in the related file",
                "Check for typos in ID references",
            ],
            Self::MissingSkill => &[
                "Add workers with required skills",
                "Update task requirements to match available skills",
            ],
            Self::CircularCorun => &[
                "Review co-run group assignments",
                "Consider splitting large groups",
            ],
            Self::SkillShortage => &[
                "Train existing workers in required skills",
                "Hire workers with needed skills",
                "Reduce skill requirements for some tasks",
            ],
            Self::PhaseSaturation => &[
                "Redistribute tasks across phases",
                "Add more workers to saturated phases",
                "Extend project timeline",
            ],
            Self::WorkerOverload => &[
                "Redistribute workload among team members",
                "Hire additional workers",
                "Extend task deadlines",
            ],
            Self::PriorityImbalance => &[
                "Review and adjust client priorities",
                "Use priority levels more strategically",
                "Consider priority-based scheduling",
            ],
            Self::ComplexityMismatch => &[
                "Assign high-qualification workers to complex tasks",
                "Break down complex tasks into smaller parts",
                "Provide additional training to workers",
            ],
            Self::InvalidDuration | Self::InvalidSkills => &[],
        }
    }
}

impl fmt::Display for FindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One reported validation issue. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    id: String,
    #[serde(rename = "type")]
    kind: FindingKind,
    severity: Severity,
    message: String,
    entity: EntityKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    field: Option<String>,
    #[serde(default)]
    suggestions: Vec<String>,
}

impl Finding {
    pub fn new(
        id: String,
        kind: FindingKind,
        severity: Severity,
        message: String,
        entity: EntityKind,
        field: Option<String>,
    ) -> Self {
        let suggestions = kind.suggestions().iter().map(|s| s.to_string()).collect();
        Self {
            id,
            kind,
            severity,
            message,
            entity,
            field,
            suggestions,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> FindingKind {
        self.kind
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn entity(&self) -> EntityKind {
        self.entity
    }

    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}
