use serde_json::Value;

use crate::model::{value, CanonicalField, Record};

use super::mapping::{HeaderMapping, MappingTarget};
use super::table::RawRow;

/// Value coercion selected by the canonical field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
    /// Split delimiter-separated strings into a string list.
    List,
    /// Parse numeric strings as floats.
    Number,
    /// Parse strings as JSON documents.
    Json,
    None,
}

const LIST_MARKERS: [&str; 4] = ["Skills", "TaskIDs", "Phases", "Slots"];
const NUMBER_MARKERS: [&str; 5] = ["Level", "Duration", "Priority", "Load", "Concurrent"];
const JSON_MARKERS: [&str; 2] = ["JSON", "Attributes"];

impl Coercion {
    pub fn for_field(field: CanonicalField) -> Self {
        let name = field.name();
        if LIST_MARKERS.iter().any(|m| name.contains(m)) {
            Self::List
        } else if NUMBER_MARKERS.iter().any(|m| name.contains(m)) {
            Self::Number
        } else if JSON_MARKERS.iter().any(|m| name.contains(m)) {
            Self::Json
        } else {
            Self::None
        }
    }

    /// Apply to one cell. A failed coercion leaves the value untouched.
    pub fn apply(self, raw: &Value) -> Value {
        let Value::String(s) = raw else {
            return raw.clone();
        };
        match self {
            Self::List if s.contains([',', ';']) => Value::Array(
                value::split_delimited(s)
                    .into_iter()
                    .map(Value::String)
                    .collect(),
            ),
            Self::Number => match value::parse_number(s) {
                Some(n) => serde_json::Number::from_f64(n).map_or_else(|| raw.clone(), Value::Number),
                None => raw.clone(),
            },
            Self::Json => serde_json::from_str(s).unwrap_or_else(|_| raw.clone()),
            _ => raw.clone(),
        }
    }
}

/// Re-key `rows` by canonical field name and coerce canonical cells.
///
/// Passthrough columns are copied first, so a canonical column always wins
/// when a passthrough header happens to spell a canonical name. Headers the
/// mapping does not know pass through unchanged.
pub fn transform_rows(rows: &[RawRow], mapping: &HeaderMapping) -> Vec<Record> {
    rows.iter().map(|row| transform_row(row, mapping)).collect()
}

pub fn transform_row(row: &RawRow, mapping: &HeaderMapping) -> Record {
    let mut record = Record::new();

    for (header, cell) in row {
        if !matches!(mapping.get(header), Some(MappingTarget::Field(_))) {
            record.insert(header.clone(), cell.clone());
        }
    }
    for (header, cell) in row {
        if let Some(field) = mapping.field_for(header) {
            record.set(field, Coercion::for_field(field).apply(cell));
        }
    }
    record
}
