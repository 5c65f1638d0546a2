#![allow(dead_code)]

use alchemist_core::ingest::{ingest_table, MappingProposal, RawTable};
use alchemist_core::model::{Dataset, EntityKind, Finding};
use alchemist_core::oracle::{
    AssistOracle, Correction, DataSummary, ModificationDraft, QuerySchema,
};
use alchemist_core::query::QueryPlan;
use alchemist_core::rules::RuleDraft;
use async_trait::async_trait;
use serde_json::{json, Value};

/// Rows as an external sheet reader would hand them over: every cell a string.
pub fn clients_rows() -> Value {
    json!([
        {
            "ClientID": "C1", "ClientName": "Acme", "PriorityLevel": "3",
            "RequestedTaskIDs": "T1,T2", "GroupTag": "alpha",
            "AttributesJSON": "{\"tier\":\"gold\"}"
        },
        {
            "ClientID": "C2", "ClientName": "Globex", "PriorityLevel": "5",
            "RequestedTaskIDs": "T2;T3", "GroupTag": "beta", "AttributesJSON": ""
        }
    ])
}

pub fn workers_rows() -> Value {
    json!([
        {
            "WorkerID": "W1", "WorkerName": "Ada", "Skills": "rust,go",
            "AvailableSlots": "1,2", "MaxLoadPerPhase": "6", "WorkerGroup": "core",
            "QualificationLevel": "4"
        },
        {
            "WorkerID": "W2", "WorkerName": "Linus", "Skills": "rust,c",
            "AvailableSlots": "1,2,3", "MaxLoadPerPhase": "6", "WorkerGroup": "core",
            "QualificationLevel": "5"
        },
        {
            "WorkerID": "W3", "WorkerName": "Grace", "Skills": "go,c",
            "AvailableSlots": "2,3", "MaxLoadPerPhase": "6", "WorkerGroup": "tools",
            "QualificationLevel": "3"
        }
    ])
}

pub fn tasks_rows() -> Value {
    json!([
        {
            "TaskID": "T1", "TaskName": "Parser", "Category": "build", "Duration": "2",
            "RequiredSkills": "rust,go", "PreferredPhases": "1,2", "MaxConcurrent": "1"
        },
        {
            "TaskID": "T2", "TaskName": "Runtime", "Category": "build", "Duration": "3",
            "RequiredSkills": "rust,c", "PreferredPhases": "2,3", "MaxConcurrent": "2"
        },
        {
            "TaskID": "T3", "TaskName": "Tooling", "Category": "ops", "Duration": "1",
            "RequiredSkills": "go,c", "PreferredPhases": "2,3", "MaxConcurrent": "1"
        }
    ])
}

pub fn table(rows: Value) -> RawTable {
    RawTable::from_json(rows).expect("fixture rows are an array of objects")
}

/// Ingest the three fixture tables through the keyword path.
pub async fn clean_dataset() -> Dataset {
    let mut data = Dataset::new();
    for (kind, rows) in [
        (EntityKind::Clients, clients_rows()),
        (EntityKind::Workers, workers_rows()),
        (EntityKind::Tasks, tasks_rows()),
    ] {
        let outcome = ingest_table(None, "upload.json", Some(kind), &table(rows)).await;
        data.set(kind, outcome.records);
    }
    data
}

pub fn kinds(findings: &[Finding]) -> Vec<String> {
    findings.iter().map(|f| f.kind().to_string()).collect()
}

/// Oracle with canned answers. A `None` answer fails the call.
#[derive(Default)]
pub struct ScriptedOracle {
    pub mapping: Option<MappingProposal>,
    pub rule: Option<RuleDraft>,
    pub plan: Option<QueryPlan>,
    pub corrections: Option<Vec<Correction>>,
    pub recommendations: Option<Vec<RuleDraft>>,
    pub modifications: Option<Vec<ModificationDraft>>,
}

impl ScriptedOracle {
    pub fn offline() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AssistOracle for ScriptedOracle {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn map_headers(&self, _: &[String], _: EntityKind) -> anyhow::Result<MappingProposal> {
        self.mapping.clone().ok_or_else(|| anyhow::anyhow!("oracle offline"))
    }

    async fn text_to_rule(&self, _: &str) -> anyhow::Result<RuleDraft> {
        self.rule.clone().ok_or_else(|| anyhow::anyhow!("oracle offline"))
    }

    async fn interpret_query(&self, _: &str, _: &QuerySchema) -> anyhow::Result<QueryPlan> {
        self.plan.clone().ok_or_else(|| anyhow::anyhow!("oracle offline"))
    }

    async fn suggest_corrections(&self, _: &[Finding]) -> anyhow::Result<Vec<Correction>> {
        self.corrections
            .clone()
            .ok_or_else(|| anyhow::anyhow!("oracle offline"))
    }

    async fn recommend_rules(&self, _: &DataSummary) -> anyhow::Result<Vec<RuleDraft>> {
        self.recommendations
            .clone()
            .ok_or_else(|| anyhow::anyhow!("oracle offline"))
    }

    async fn suggest_modifications(
        &self,
        _: &str,
        _: &QuerySchema,
    ) -> anyhow::Result<Vec<ModificationDraft>> {
        self.modifications
            .clone()
            .ok_or_else(|| anyhow::anyhow!("oracle offline"))
    }
}
