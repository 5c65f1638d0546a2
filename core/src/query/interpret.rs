use crate::model::Dataset;
use crate::oracle::{AssistOracle, QuerySchema};

use super::plan::{fallback_query_plan, QueryPlan};
use super::run::{run_query, QueryResult};

/// Interpret `query` with the oracle when one is available, then run it.
pub async fn interpret_query(
    oracle: Option<&dyn AssistOracle>,
    query: &str,
    data: &Dataset,
) -> QueryResult {
    let plan = plan_query(oracle, query, data).await;
    run_query(&plan, query, data)
}

pub async fn plan_query(oracle: Option<&dyn AssistOracle>, query: &str, data: &Dataset) -> QueryPlan {
    let Some(oracle) = oracle else {
        return fallback_query_plan(query);
    };
    let schema = QuerySchema::from_dataset(data);
    match oracle.interpret_query(query, &schema).await {
        Ok(plan) => {
            tracing::debug!(
                target: "alchemist.oracle",
                stage = "query.plan",
                oracle = oracle.name(),
                scope = ?plan.scope,
                filters = plan.filters.len()
            );
            plan
        }
        Err(e) => {
            tracing::warn!(
                target: "alchemist.oracle",
                stage = "query.plan.fallback",
                oracle = oracle.name(),
                error = %e,
                "query interpretation failed, using keyword search"
            );
            fallback_query_plan(query)
        }
    }
}
