use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::{EntityKind, Finding, FindingKind, Severity};

const MISSING_FIELD_LIMIT: usize = 5;
const SKILL_SHORTAGE_LIMIT: usize = 3;
const PHASE_SATURATION_LIMIT: usize = 2;
const WORKER_OVERLOAD_LIMIT: usize = 2;

pub const ALL_GOOD: &str =
    "Your data looks good! Minor issues can be addressed using the suggestions provided.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportStats {
    pub total: usize,
    pub errors: usize,
    pub warnings: usize,
    #[serde(rename = "byEntity")]
    pub by_entity: BTreeMap<EntityKind, usize>,
    #[serde(rename = "byType")]
    pub by_kind: BTreeMap<FindingKind, usize>,
}

/// Findings of one run plus their summary and high-level advice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub findings: Vec<Finding>,
    pub stats: ReportStats,
    pub recommendations: Vec<String>,
}

impl ValidationReport {
    pub fn build(findings: Vec<Finding>) -> Self {
        let mut by_entity: BTreeMap<EntityKind, usize> =
            EntityKind::ALL.into_iter().map(|k| (k, 0)).collect();
        let mut by_kind: BTreeMap<FindingKind, usize> = BTreeMap::new();
        let mut errors = 0;
        for f in &findings {
            *by_entity.entry(f.entity()).or_insert(0) += 1;
            *by_kind.entry(f.kind()).or_insert(0) += 1;
            if f.severity() == Severity::Error {
                errors += 1;
            }
        }
        let stats = ReportStats {
            total: findings.len(),
            errors,
            warnings: findings.len() - errors,
            by_entity,
            by_kind,
        };
        let recommendations = recommendations(&stats.by_kind);
        Self {
            findings,
            stats,
            recommendations,
        }
    }

    pub fn has_errors(&self) -> bool {
        self.stats.errors > 0
    }

    pub fn format_text(&self) -> String {
        let mut out = String::new();
        out.push_str("Validation report\n");
        out.push_str(&format!(
            "findings: {} ({} errors, {} warnings)\n",
            self.stats.total, self.stats.errors, self.stats.warnings
        ));
        let per_entity: Vec<String> = self
            .stats
            .by_entity
            .iter()
            .map(|(k, n)| format!("{k}={n}"))
            .collect();
        out.push_str(&format!("by entity: {}\n", per_entity.join(" ")));

        for f in &self.findings {
            let location = match f.field() {
                Some(field) => format!("{}.{}", f.entity(), field),
                None => f.entity().to_string(),
            };
            out.push_str(&format!(
                "- [{}] {} {}: {}\n",
                f.severity(),
                f.kind(),
                location,
                f.message()
            ));
            for s in f.suggestions() {
                out.push_str(&format!("    * {s}\n"));
            }
        }

        out.push_str("Recommendations\n");
        for r in &self.recommendations {
            out.push_str(&format!("- {r}\n"));
        }
        out
    }
}

fn recommendations(by_kind: &BTreeMap<FindingKind, usize>) -> Vec<String> {
    let count = |k: FindingKind| by_kind.get(&k).copied().unwrap_or(0);
    let mut out = Vec::new();
    if count(FindingKind::MissingField) > MISSING_FIELD_LIMIT {
        out.push("Consider reviewing your file headers and ensuring all required columns are present");
    }
    if count(FindingKind::SkillShortage) > SKILL_SHORTAGE_LIMIT {
        out.push("You may need to hire additional workers or provide skill training to meet task requirements");
    }
    if count(FindingKind::PhaseSaturation) > PHASE_SATURATION_LIMIT {
        out.push("Consider redistributing tasks across different phases to balance workload");
    }
    if count(FindingKind::WorkerOverload) > WORKER_OVERLOAD_LIMIT {
        out.push("Some workers may be overloaded. Consider hiring more staff or extending deadlines");
    }
    if count(FindingKind::PriorityImbalance) > 0 {
        out.push("Review client priority distribution to ensure realistic scheduling expectations");
    }
    if out.is_empty() {
        out.push(ALL_GOOD);
    }
    out.into_iter().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn finding(kind: FindingKind, severity: Severity, entity: EntityKind, n: usize) -> Finding {
        Finding::new(
            format!("{}-{}-{}", kind, entity, n),
            kind,
            severity,
            "msg".into(),
            entity,
            None,
        )
    }

    #[test]
    fn empty_run_looks_good() {
        let r = ValidationReport::build(Vec::new());
        assert_eq!(r.recommendations, vec![ALL_GOOD.to_string()]);
        assert!(!r.has_errors());
        assert_eq!(r.stats.by_entity.len(), 3);
    }

    #[test]
    fn thresholds_drive_recommendations() {
        let mut findings: Vec<Finding> = (0..6)
            .map(|n| finding(FindingKind::MissingField, Severity::Error, EntityKind::Clients, n))
            .collect();
        findings.push(finding(
            FindingKind::PriorityImbalance,
            Severity::Warning,
            EntityKind::Clients,
            1,
        ));
        findings.extend(
            (0..3).map(|n| finding(FindingKind::SkillShortage, Severity::Warning, EntityKind::Tasks, n)),
        );
        let r = ValidationReport::build(findings);
        assert_eq!(r.recommendations.len(), 2);
        assert!(r.recommendations[0].contains("file headers"));
        assert!(r.recommendations[1].contains("priority distribution"));
        assert_eq!(r.stats.errors, 6);
        assert_eq!(r.stats.warnings, 4);
    }

    #[test]
    fn stats_serialize_with_wire_names() {
        let r = ValidationReport::build(vec![finding(
            FindingKind::DuplicateId,
            Severity::Error,
            EntityKind::Workers,
            1,
        )]);
        let v = serde_json::to_value(&r.stats).unwrap();
        assert_eq!(v["byEntity"], json!({"clients": 0, "workers": 1, "tasks": 0}));
        assert_eq!(v["byType"], json!({"duplicate-id": 1}));
    }

    #[test]
    fn text_lists_findings_and_advice() {
        let r = ValidationReport::build(vec![finding(
            FindingKind::BrokenJson,
            Severity::Error,
            EntityKind::Clients,
            1,
        )]);
        let text = r.format_text();
        assert!(text.contains("findings: 1 (1 errors, 0 warnings)"));
        assert!(text.contains("- [error] broken-json clients: msg"));
        assert!(text.contains("    * Validate JSON syntax"));
        assert!(text.ends_with(&format!("- {ALL_GOOD}\n")));
    }
}
