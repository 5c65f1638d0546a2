use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::RuleError;

pub const MIN_RULE_PRIORITY: i64 = 1;
pub const MAX_RULE_PRIORITY: i64 = 10;
pub const DEFAULT_RULE_PRIORITY: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RuleType {
    CoRun,
    SlotRestriction,
    LoadLimit,
    PhaseWindow,
    PatternMatch,
    PrecedenceOverride,
}

impl RuleType {
    pub const ALL: [RuleType; 6] = [
        RuleType::CoRun,
        RuleType::SlotRestriction,
        RuleType::LoadLimit,
        RuleType::PhaseWindow,
        RuleType::PatternMatch,
        RuleType::PrecedenceOverride,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::CoRun => "coRun",
            Self::SlotRestriction => "slotRestriction",
            Self::LoadLimit => "loadLimit",
            Self::PhaseWindow => "phaseWindow",
            Self::PatternMatch => "patternMatch",
            Self::PrecedenceOverride => "precedenceOverride",
        }
    }

    /// Parameter keys a rule of this type is expected to carry.
    pub fn parameter_keys(self) -> &'static [&'static str] {
        match self {
            Self::CoRun => &["taskIds", "groupName"],
            Self::SlotRestriction => &["taskIds", "allowedSlots", "restrictedSlots"],
            Self::LoadLimit => &["workerIds", "maxLoad", "phases"],
            Self::PhaseWindow => &["taskIds", "startPhase", "endPhase"],
            Self::PatternMatch => &["pattern", "action", "conditions"],
            Self::PrecedenceOverride => &["beforeTaskIds", "afterTaskIds", "priority"],
        }
    }
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleType {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| RuleError::UnknownType(s.to_string()))
    }
}

/// A declarative allocation constraint. Nothing in this crate evaluates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub id: String,
    #[serde(rename = "type")]
    pub rule_type: RuleType,
    pub description: String,
    #[serde(default)]
    pub parameters: Map<String, Value>,
    pub priority: i64,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl Rule {
    pub fn new(
        id: impl Into<String>,
        rule_type: RuleType,
        description: impl Into<String>,
        parameters: Map<String, Value>,
        priority: i64,
    ) -> Result<Self, RuleError> {
        check_priority(priority)?;
        Ok(Self {
            id: id.into(),
            rule_type,
            description: description.into(),
            parameters,
            priority,
            enabled: true,
        })
    }

    /// The rule produced when free text cannot be interpreted: a pattern match
    /// on the text itself.
    pub fn pattern_fallback(id: impl Into<String>, text: &str) -> Self {
        let mut parameters = Map::new();
        parameters.insert("pattern".into(), Value::String(text.to_string()));
        Self {
            id: id.into(),
            rule_type: RuleType::PatternMatch,
            description: text.to_string(),
            parameters,
            priority: DEFAULT_RULE_PRIORITY,
            enabled: true,
        }
    }

    /// Expected parameter keys of this rule's type that are absent.
    pub fn missing_parameters(&self) -> Vec<&'static str> {
        self.rule_type
            .parameter_keys()
            .iter()
            .copied()
            .filter(|k| !self.parameters.contains_key(*k))
            .collect()
    }

    pub fn validate(&self) -> Result<(), RuleError> {
        check_priority(self.priority)
    }
}

pub(crate) fn check_priority(priority: i64) -> Result<(), RuleError> {
    if (MIN_RULE_PRIORITY..=MAX_RULE_PRIORITY).contains(&priority) {
        Ok(())
    } else {
        Err(RuleError::PriorityOutOfRange(priority))
    }
}

/// Loosely-typed rule as proposed by an oracle. Every field is optional and
/// defaults individually when turned into a [`Rule`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleDraft {
    #[serde(rename = "type")]
    pub rule_type: Option<String>,
    pub description: Option<String>,
    pub parameters: Option<Map<String, Value>>,
    pub priority: Option<f64>,
    pub enabled: Option<bool>,
    pub reasoning: Option<String>,
    pub impact: Option<String>,
}

impl RuleDraft {
    /// Build a rule for `text`. An unknown type becomes patternMatch, missing
    /// parameters become `{pattern: text}`, priority is clamped to 1-10.
    pub fn into_rule(self, id: impl Into<String>, text: &str) -> Rule {
        let rule_type = self
            .rule_type
            .as_deref()
            .and_then(|t| t.parse::<RuleType>().ok())
            .unwrap_or(RuleType::PatternMatch);
        let description = self
            .description
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| text.to_string());
        let parameters = self.parameters.unwrap_or_else(|| {
            let mut p = Map::new();
            p.insert("pattern".into(), Value::String(text.to_string()));
            p
        });
        Rule {
            id: id.into(),
            rule_type,
            description,
            parameters,
            priority: clamp_priority(self.priority),
            enabled: self.enabled.unwrap_or(true),
        }
    }
}

fn clamp_priority(p: Option<f64>) -> i64 {
    match p {
        Some(p) if p.is_finite() => (p.round() as i64).clamp(MIN_RULE_PRIORITY, MAX_RULE_PRIORITY),
        _ => DEFAULT_RULE_PRIORITY,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Low,
    Medium,
    High,
}

/// A suggested rule, always disabled until a user enables it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleRecommendation {
    #[serde(flatten)]
    pub rule: Rule,
    pub reasoning: String,
    pub impact: Impact,
}

impl RuleRecommendation {
    pub fn from_draft(id: impl Into<String>, draft: RuleDraft) -> Self {
        let reasoning = draft
            .reasoning
            .clone()
            .unwrap_or_else(|| "Based on data analysis".to_string());
        let impact = match draft.impact.as_deref().map(str::to_ascii_lowercase).as_deref() {
            Some("low") => Impact::Low,
            Some("high") => Impact::High,
            _ => Impact::Medium,
        };
        let description = draft
            .description
            .clone()
            .unwrap_or_else(|| "Recommended rule".to_string());
        let rule_type = draft
            .rule_type
            .as_deref()
            .and_then(|t| t.parse::<RuleType>().ok())
            .unwrap_or(RuleType::LoadLimit);
        let rule = Rule {
            id: id.into(),
            rule_type,
            description,
            parameters: draft.parameters.unwrap_or_default(),
            priority: clamp_priority(draft.priority),
            enabled: false,
        };
        Self {
            rule,
            reasoning,
            impact,
        }
    }

    /// Offered when no oracle can analyze the data.
    pub fn basic_load_limit(id: impl Into<String>) -> Self {
        let mut parameters = Map::new();
        parameters.insert("maxTasks".into(), Value::from(5));
        Self {
            rule: Rule {
                id: id.into(),
                rule_type: RuleType::LoadLimit,
                description: "Basic load balancing rule".to_string(),
                parameters,
                priority: DEFAULT_RULE_PRIORITY,
                enabled: false,
            },
            reasoning: "Default recommendation when no oracle is available".to_string(),
            impact: Impact::Medium,
        }
    }
}
