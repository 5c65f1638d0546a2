use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::RuleError;

use super::model::{check_priority, Rule};

/// Partial update applied by [`RuleBook::update`]. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulePatch {
    pub description: Option<String>,
    pub parameters: Option<Map<String, Value>>,
    pub priority: Option<i64>,
    pub enabled: Option<bool>,
}

/// Session-scoped rule store, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleBook {
    rules: Vec<Rule>,
}

impl RuleBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, rule: Rule) -> Result<(), RuleError> {
        rule.validate()?;
        if self.rules.iter().any(|r| r.id == rule.id) {
            return Err(RuleError::DuplicateId(rule.id));
        }
        tracing::debug!(
            target: "alchemist.rules",
            stage = "rules.add",
            id = %rule.id,
            rule_type = %rule.rule_type
        );
        self.rules.push(rule);
        Ok(())
    }

    /// Apply `patch` atomically: an invalid priority leaves the rule untouched.
    pub fn update(&mut self, id: &str, patch: RulePatch) -> Result<&Rule, RuleError> {
        if let Some(p) = patch.priority {
            check_priority(p)?;
        }
        let rule = self.get_mut(id)?;
        if let Some(d) = patch.description {
            rule.description = d;
        }
        if let Some(params) = patch.parameters {
            rule.parameters = params;
        }
        if let Some(p) = patch.priority {
            rule.priority = p;
        }
        if let Some(e) = patch.enabled {
            rule.enabled = e;
        }
        Ok(rule)
    }

    /// Flip `enabled`; returns the new state.
    pub fn toggle(&mut self, id: &str) -> Result<bool, RuleError> {
        let rule = self.get_mut(id)?;
        rule.enabled = !rule.enabled;
        Ok(rule.enabled)
    }

    pub fn remove(&mut self, id: &str) -> Result<Rule, RuleError> {
        let pos = self
            .rules
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| RuleError::NotFound(id.to_string()))?;
        Ok(self.rules.remove(pos))
    }

    pub fn get(&self, id: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut Rule, RuleError> {
        self.rules
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| RuleError::NotFound(id.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    pub fn enabled(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter().filter(|r| r.enabled)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn clear(&mut self) {
        self.rules.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleType;
    use serde_json::json;

    fn rule(id: &str, priority: i64) -> Rule {
        Rule::new(id, RuleType::LoadLimit, "limit", Map::new(), priority).unwrap()
    }

    #[test]
    fn add_rejects_duplicates_and_bad_priority() {
        let mut book = RuleBook::new();
        book.add(rule("r1", 3)).unwrap();
        assert_eq!(
            book.add(rule("r1", 4)).unwrap_err(),
            RuleError::DuplicateId("r1".into())
        );

        let mut bad = rule("r2", 3);
        bad.priority = 0;
        assert_eq!(book.add(bad).unwrap_err(), RuleError::PriorityOutOfRange(0));
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn update_is_all_or_nothing() {
        let mut book = RuleBook::new();
        book.add(rule("r1", 3)).unwrap();
        let err = book
            .update(
                "r1",
                RulePatch {
                    description: Some("changed".into()),
                    priority: Some(12),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert_eq!(err, RuleError::PriorityOutOfRange(12));
        assert_eq!(book.get("r1").unwrap().description, "limit");

        let updated = book
            .update(
                "r1",
                RulePatch {
                    parameters: Some(json!({"maxLoad": 3}).as_object().cloned().unwrap()),
                    priority: Some(9),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.priority, 9);
        assert_eq!(updated.parameters.get("maxLoad"), Some(&json!(3)));
    }

    #[test]
    fn toggle_and_enabled_view() {
        let mut book = RuleBook::new();
        book.add(rule("r1", 1)).unwrap();
        book.add(rule("r2", 2)).unwrap();
        assert!(!book.toggle("r1").unwrap());
        let enabled: Vec<_> = book.enabled().map(|r| r.id.as_str()).collect();
        assert_eq!(enabled, vec!["r2"]);
        assert!(book.toggle("r1").unwrap());
    }

    #[test]
    fn unknown_ids_are_reported() {
        let mut book = RuleBook::new();
        assert_eq!(book.toggle("nope").unwrap_err(), RuleError::NotFound("nope".into()));
        assert!(book.remove("nope").is_err());
        book.add(rule("r1", 5)).unwrap();
        assert_eq!(book.remove("r1").unwrap().id, "r1");
        assert!(book.is_empty());
    }
}
