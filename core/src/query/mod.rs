//! Filtering entity tables by a structured or free-text query.

mod interpret;
mod plan;
mod run;

pub use interpret::{interpret_query, plan_query};
pub use plan::{fallback_query_plan, QueryFilter, QueryOperator, QueryPlan, QueryScope};
pub use run::{filter_match, run_query, QueryMatch, QueryResult};
