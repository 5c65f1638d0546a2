use async_trait::async_trait;

use crate::ingest::MappingProposal;
use crate::model::{EntityKind, Finding};
use crate::query::QueryPlan;
use crate::rules::RuleDraft;

use super::models::{Correction, DataSummary, ModificationDraft, QuerySchema};

/// Optional completion service. Every call may fail; callers always have a
/// deterministic fallback.
#[async_trait]
pub trait AssistOracle: Send + Sync {
    fn name(&self) -> &str;
    async fn map_headers(
        &self,
        headers: &[String],
        kind: EntityKind,
    ) -> anyhow::Result<MappingProposal>;
    async fn text_to_rule(&self, text: &str) -> anyhow::Result<RuleDraft>;
    async fn interpret_query(&self, query: &str, schema: &QuerySchema)
        -> anyhow::Result<QueryPlan>;
    async fn suggest_corrections(&self, findings: &[Finding]) -> anyhow::Result<Vec<Correction>>;
    async fn recommend_rules(&self, summary: &DataSummary) -> anyhow::Result<Vec<RuleDraft>>;
    async fn suggest_modifications(
        &self,
        command: &str,
        schema: &QuerySchema,
    ) -> anyhow::Result<Vec<ModificationDraft>>;
}
