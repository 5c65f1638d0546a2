use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::EntityKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryScope {
    Clients,
    Workers,
    Tasks,
    #[serde(other)]
    All,
}

impl QueryScope {
    pub fn kinds(self) -> &'static [EntityKind] {
        match self {
            Self::Clients => &[EntityKind::Clients],
            Self::Workers => &[EntityKind::Workers],
            Self::Tasks => &[EntityKind::Tasks],
            Self::All => &EntityKind::ALL,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QueryOperator {
    Equals,
    Contains,
    Greater,
    Less,
    GreaterEqual,
    LessEqual,
    /// Operators this engine does not know match everything.
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryFilter {
    pub field: String,
    pub operator: QueryOperator,
    #[serde(default)]
    pub value: Value,
}

/// Structured form of a free-text data query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryPlan {
    #[serde(rename = "entityType", alias = "scope", default = "default_scope")]
    pub scope: QueryScope,
    #[serde(default)]
    pub filters: Vec<QueryFilter>,
    #[serde(default)]
    pub explanation: Option<String>,
}

fn default_scope() -> QueryScope {
    QueryScope::All
}

impl QueryPlan {
    pub fn text_search(scope: QueryScope, explanation: impl Into<String>) -> Self {
        Self {
            scope,
            filters: Vec::new(),
            explanation: Some(explanation.into()),
        }
    }
}

/// Scope chosen from keywords in the query, with no filters. The result runs
/// as a plain text search.
pub fn fallback_query_plan(query: &str) -> QueryPlan {
    let q = query.to_lowercase();
    let scope = if q.contains("client") || q.contains("customer") {
        QueryScope::Clients
    } else if q.contains("worker") || q.contains("employee") {
        QueryScope::Workers
    } else if q.contains("task") || q.contains("job") {
        QueryScope::Tasks
    } else {
        QueryScope::All
    };
    QueryPlan::text_search(scope, format!("Performed basic search for: {query}"))
}
