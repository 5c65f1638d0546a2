use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::Value;

use alchemist_core::api as core_api;
use alchemist_core::ingest::proposal_from_json;

use super::extract::extract_json;
use super::http_client::{HttpClient, OracleHttpError};

const SYSTEM_PROMPT: &str =
    "You help clean up resource-allocation spreadsheets. Answer with JSON only, no prose.";

/// [`core_api::AssistOracle`] backed by an OpenAI-compatible completion endpoint.
pub struct OpenAiOracle {
    client: HttpClient,
}

impl OpenAiOracle {
    pub fn new(base_url: String, api_key: String, model: String, timeout_ms: u64) -> Result<Self> {
        let client = HttpClient::new(base_url, api_key, model, timeout_ms)?;
        Ok(Self { client })
    }

    async fn ask(&self, stage: &'static str, prompt: String, want_array: bool) -> Result<Value> {
        tracing::debug!(
            target: "alchemist.oracle",
            stage = stage,
            model = %self.client.model(),
            prompt_len = prompt.len()
        );
        let result = match self.client.complete(SYSTEM_PROMPT, &prompt).await {
            Ok(reply) => extract_json(&reply, want_array).map_err(|e| {
                anyhow::Error::from(OracleHttpError::unparsable(e.to_string(), &reply))
            }),
            Err(e) => Err(e),
        };
        if let Err(e) = &result {
            let http = e.downcast_ref::<OracleHttpError>();
            tracing::warn!(
                target: "alchemist.oracle",
                stage = stage,
                kind = http.map_or("other", OracleHttpError::kind),
                config_problem = http.is_some_and(OracleHttpError::is_config_problem),
                error = %e,
                "oracle call failed"
            );
        }
        result
    }
}

fn header_prompt(headers: &[String], kind: core_api::EntityKind) -> String {
    let fields: Vec<&str> = kind.fields().iter().map(|f| f.name()).collect();
    format!(
        "Spreadsheet headers: {}\n\
         Canonical {} fields: {}\n\n\
         Map every header to one canonical field. Typical variants:\n\
         - \"Client ID\" -> \"ClientID\"\n\
         - \"Worker Name\" -> \"WorkerName\"\n\
         - \"Task IDs\" -> \"RequestedTaskIDs\"\n\
         - \"Phases\" -> \"PreferredPhases\" or \"AvailableSlots\"\n\
         A header that fits no field maps to itself. No two headers may share a field.\n\
         Reply with one JSON object keyed by the original header, for example \
         {{\"Client ID\": \"ClientID\", \"Notes\": \"Notes\"}}.",
        headers.join(", "),
        kind,
        fields.join(", ")
    )
}

fn rule_prompt(text: &str) -> String {
    let types: Vec<&str> = core_api::RuleType::ALL.iter().map(|t| t.as_str()).collect();
    format!(
        "Convert this scheduling rule to JSON: \"{text}\".\n\
         Reply with one object holding `type` (one of {}), `description`, \
         `parameters` (an object) and `priority` (1-10).",
        types.join(", ")
    )
}

fn query_prompt(query: &str, schema: &core_api::QuerySchema) -> Result<String> {
    let schema = serde_json::to_string_pretty(schema)?;
    Ok(format!(
        "User query: \"{query}\"\n\
         Tables (fields, totals and sample rows):\n{schema}\n\n\
         Turn the query into a filter. Reply with one object:\n\
         {{\"entityType\": \"clients|workers|tasks|all\", \
         \"filters\": [{{\"field\": \"Duration\", \"operator\": \
         \"equals|contains|greater|less|greaterEqual|lessEqual\", \"value\": 2}}], \
         \"explanation\": \"short summary\"}}\n\
         Examples:\n\
         - \"tasks longer than 2\" -> {{\"entityType\": \"tasks\", \"filters\": \
         [{{\"field\": \"Duration\", \"operator\": \"greater\", \"value\": 2}}]}}\n\
         - \"workers who know JavaScript\" -> {{\"entityType\": \"workers\", \"filters\": \
         [{{\"field\": \"Skills\", \"operator\": \"contains\", \"value\": \"JavaScript\"}}]}}"
    ))
}

fn corrections_prompt(findings: &[core_api::Finding]) -> String {
    let listed: Vec<String> = findings
        .iter()
        .map(|f| {
            format!(
                "Finding ID: {}\nType: {}\nEntity: {}\nField: {}\nMessage: {}",
                f.id(),
                f.kind(),
                f.entity(),
                f.field().unwrap_or("N/A"),
                f.message()
            )
        })
        .collect();
    format!(
        "Suggest fixes for these validation findings:\n\n{}\n\n\
         Give 2-3 concrete, actionable steps per finding. Reply with \
         {{\"corrections\": [{{\"findingId\": \"...\", \"corrections\": [\"...\"]}}]}}.",
        listed.join("\n\n")
    )
}

fn recommend_prompt(summary: &core_api::DataSummary) -> String {
    format!(
        "A dataset has {} clients, {} workers and {} tasks. Recommend 3 allocation \
         rules as a JSON array of objects with `type`, `description`, `parameters`, \
         `priority`, `reasoning` and `impact` (low|medium|high).",
        summary.clients, summary.workers, summary.tasks
    )
}

fn modify_prompt(command: &str, schema: &core_api::QuerySchema) -> Result<String> {
    let schema = serde_json::to_string_pretty(schema)?;
    Ok(format!(
        "Modification command: \"{command}\"\n\
         Tables (fields, totals and sample rows):\n{schema}\n\n\
         Propose concrete edits. Reply with a JSON array; each element is\n\
         {{\"entityType\": \"clients|workers|tasks\", \"changes\": [{{\"recordId\": \"T1\", \
         \"field\": \"Duration\", \"oldValue\": 1, \"newValue\": 2}}], \
         \"confidence\": 0.8, \"preview\": \"one-line summary\"}}\n\
         Use record ids and field names exactly as they appear in the tables. \
         List fields take JSON arrays as new values."
    ))
}

#[async_trait]
impl core_api::AssistOracle for OpenAiOracle {
    fn name(&self) -> &str {
        "openai"
    }

    async fn map_headers(
        &self,
        headers: &[String],
        kind: core_api::EntityKind,
    ) -> Result<core_api::MappingProposal> {
        let v = self
            .ask("oracle.map_headers.in", header_prompt(headers, kind), false)
            .await?;
        let proposal =
            proposal_from_json(&v).ok_or_else(|| anyhow!("header mapping is not a JSON object"))?;
        tracing::debug!(
            target: "alchemist.oracle",
            stage = "oracle.map_headers.out",
            proposed = proposal.len()
        );
        Ok(proposal)
    }

    async fn text_to_rule(&self, text: &str) -> Result<core_api::RuleDraft> {
        let v = self.ask("oracle.text_to_rule.in", rule_prompt(text), false).await?;
        serde_json::from_value(v).map_err(|e| anyhow!("Failed to parse rule draft: {}", e))
    }

    async fn interpret_query(
        &self,
        query: &str,
        schema: &core_api::QuerySchema,
    ) -> Result<core_api::QueryPlan> {
        let v = self
            .ask("oracle.interpret_query.in", query_prompt(query, schema)?, false)
            .await?;
        serde_json::from_value(v).map_err(|e| anyhow!("Failed to parse query plan: {}", e))
    }

    async fn suggest_corrections(
        &self,
        findings: &[core_api::Finding],
    ) -> Result<Vec<core_api::Correction>> {
        let v = self
            .ask("oracle.corrections.in", corrections_prompt(findings), false)
            .await?;
        let list = v
            .get("corrections")
            .cloned()
            .ok_or_else(|| anyhow!("reply has no corrections array"))?;
        serde_json::from_value(list).map_err(|e| anyhow!("Failed to parse corrections: {}", e))
    }

    async fn recommend_rules(
        &self,
        summary: &core_api::DataSummary,
    ) -> Result<Vec<core_api::RuleDraft>> {
        let v = self
            .ask("oracle.recommend.in", recommend_prompt(summary), true)
            .await?;
        serde_json::from_value(v).map_err(|e| anyhow!("Failed to parse recommendations: {}", e))
    }

    async fn suggest_modifications(
        &self,
        command: &str,
        schema: &core_api::QuerySchema,
    ) -> Result<Vec<core_api::ModificationDraft>> {
        let v = self
            .ask("oracle.modify.in", modify_prompt(command, schema)?, true)
            .await?;
        serde_json::from_value(v).map_err(|e| anyhow!("Failed to parse modifications: {}", e))
    }
}
