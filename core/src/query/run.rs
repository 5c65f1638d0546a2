use serde::Serialize;
use serde_json::Value;

use crate::model::{value, Dataset, EntityKind, Record};

use super::plan::{QueryFilter, QueryOperator, QueryPlan};

/// One record selected by a query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryMatch {
    pub entity: EntityKind,
    pub record: Record,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
    pub results: Vec<QueryMatch>,
    pub explanation: String,
}

/// Evaluate `plan` over `data`.
///
/// Filters are conjunctive. A filter on a field the record lacks is skipped.
/// Without filters, a record matches when any value contains `query`
/// case-insensitively.
pub fn run_query(plan: &QueryPlan, query: &str, data: &Dataset) -> QueryResult {
    let needle = query.to_lowercase();
    let mut results = Vec::new();
    for kind in plan.scope.kinds() {
        for record in data.records(*kind) {
            let hit = if plan.filters.is_empty() {
                text_match(record, &needle)
            } else {
                plan.filters.iter().all(|f| filter_match(record, f))
            };
            if hit {
                results.push(QueryMatch {
                    entity: *kind,
                    record: record.clone(),
                });
            }
        }
    }

    let explanation = plan
        .explanation
        .clone()
        .filter(|e| !e.trim().is_empty())
        .unwrap_or_else(|| format!("Found {} matching results for: {}", results.len(), query));
    QueryResult {
        results,
        explanation,
    }
}

fn text_match(record: &Record, needle: &str) -> bool {
    record
        .iter()
        .any(|(_, v)| value::display(Some(v)).to_lowercase().contains(needle))
}

pub fn filter_match(record: &Record, filter: &QueryFilter) -> bool {
    if filter.field.is_empty() {
        return true;
    }
    let Some(cell) = record.get(&filter.field) else {
        return true;
    };
    match filter.operator {
        QueryOperator::Equals => loose_equals(cell, &filter.value),
        QueryOperator::Contains => match cell {
            Value::Array(items) => items.iter().any(|item| loose_equals(item, &filter.value)),
            other => value::display(Some(other))
                .to_lowercase()
                .contains(&value::display(Some(&filter.value)).to_lowercase()),
        },
        QueryOperator::Greater => compare(cell, &filter.value, |a, b| a > b),
        QueryOperator::Less => compare(cell, &filter.value, |a, b| a < b),
        QueryOperator::GreaterEqual => compare(cell, &filter.value, |a, b| a >= b),
        QueryOperator::LessEqual => compare(cell, &filter.value, |a, b| a <= b),
        QueryOperator::Unknown => true,
    }
}

/// Equality where numbers compare by value, so `3` equals `3.0`.
fn loose_equals(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        _ => a == b,
    }
}

fn compare(cell: &Value, target: &Value, op: impl Fn(f64, f64) -> bool) -> bool {
    match (value::as_number(Some(cell)), value::as_number(Some(target))) {
        (Some(a), Some(b)) => op(a, b),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{fallback_query_plan, QueryScope};
    use serde_json::json;

    fn dataset() -> Dataset {
        let mut d = Dataset::new();
        let rec = |v: Value| -> Record { serde_json::from_value(v).unwrap() };
        d.set(
            EntityKind::Workers,
            vec![
                rec(json!({"WorkerID": "W1", "WorkerName": "Ada", "Skills": ["JavaScript", "Rust"]})),
                rec(json!({"WorkerID": "W2", "WorkerName": "Bob", "Skills": ["Go"]})),
            ],
        );
        d.set(
            EntityKind::Tasks,
            vec![
                rec(json!({"TaskID": "T1", "Duration": 1})),
                rec(json!({"TaskID": "T2", "Duration": 3})),
                rec(json!({"TaskID": "T3", "Duration": "n/a"})),
            ],
        );
        d
    }

    fn plan(scope: QueryScope, filters: Value) -> QueryPlan {
        QueryPlan {
            scope,
            filters: serde_json::from_value(filters).unwrap(),
            explanation: None,
        }
    }

    fn ids(result: &QueryResult) -> Vec<String> {
        result
            .results
            .iter()
            .map(|m| {
                let id = m.entity.id_field();
                m.record.text(id)
            })
            .collect()
    }

    #[test]
    fn numeric_filters_skip_non_numeric_cells() {
        let p = plan(
            QueryScope::Tasks,
            json!([{"field": "Duration", "operator": "greater", "value": 2}]),
        );
        let r = run_query(&p, "long", &dataset());
        assert_eq!(ids(&r), vec!["T2"]);
        assert_eq!(r.explanation, "Found 1 matching results for: long");
    }

    #[test]
    fn contains_checks_list_membership() {
        let p = plan(
            QueryScope::Workers,
            json!([{"field": "Skills", "operator": "contains", "value": "JavaScript"}]),
        );
        assert_eq!(ids(&run_query(&p, "", &dataset())), vec!["W1"]);

        let p = plan(
            QueryScope::Workers,
            json!([{"field": "WorkerName", "operator": "contains", "value": "BO"}]),
        );
        assert_eq!(ids(&run_query(&p, "", &dataset())), vec!["W2"]);
    }

    #[test]
    fn missing_field_filters_are_skipped() {
        let p = plan(
            QueryScope::Tasks,
            json!([
                {"field": "Priority", "operator": "equals", "value": 9},
                {"field": "Duration", "operator": "lessEqual", "value": 1}
            ]),
        );
        assert_eq!(ids(&run_query(&p, "", &dataset())), vec!["T1"]);
    }

    #[test]
    fn equals_treats_integral_floats_as_equal() {
        let p = plan(
            QueryScope::Tasks,
            json!([{"field": "Duration", "operator": "equals", "value": 3.0}]),
        );
        assert_eq!(ids(&run_query(&p, "", &dataset())), vec!["T2"]);
    }

    #[test]
    fn no_filters_runs_text_search() {
        let r = run_query(&fallback_query_plan("rust"), "rust", &dataset());
        assert_eq!(ids(&r), vec!["W1"]);
        assert_eq!(r.explanation, "Performed basic search for: rust");
    }
}
