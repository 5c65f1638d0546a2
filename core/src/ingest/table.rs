use serde_json::{Map, Value};

use crate::error::ingest::{json_type_name, IngestError};

/// One untyped row as delivered by the table reader.
pub type RawRow = Map<String, Value>;

/// Rows of one uploaded table plus its header list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<RawRow>,
}

impl RawTable {
    /// Headers are the union of row keys in first-seen order.
    pub fn new(rows: Vec<RawRow>) -> Self {
        let mut headers: Vec<String> = Vec::new();
        for row in &rows {
            for key in row.keys() {
                if !headers.iter().any(|h| h == key) {
                    headers.push(key.clone());
                }
            }
        }
        Self { headers, rows }
    }

    /// Explicit header list; keys missing from it are appended in first-seen order.
    pub fn with_headers(headers: Vec<String>, rows: Vec<RawRow>) -> Self {
        let mut table = Self::new(rows);
        let mut merged = headers;
        for h in table.headers.drain(..) {
            if !merged.contains(&h) {
                merged.push(h);
            }
        }
        table.headers = merged;
        table
    }

    /// Accept a JSON array of objects. Anything else violates the reader contract.
    pub fn from_json(value: Value) -> Result<Self, IngestError> {
        let items = match value {
            Value::Null => return Err(IngestError::MissingRows),
            Value::Array(items) => items,
            other => return Err(IngestError::NotAnArray(json_type_name(&other))),
        };

        let mut rows = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            match item {
                Value::Object(map) => rows.push(map),
                other => {
                    return Err(IngestError::RowNotObject {
                        index,
                        found: json_type_name(&other),
                    })
                }
            }
        }
        Ok(Self::new(rows))
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[RawRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn headers_union_in_first_seen_order() {
        let table = RawTable::from_json(json!([
            {"b": 1, "a": 2},
            {"a": 3, "c": 4}
        ]))
        .unwrap();
        assert_eq!(table.headers(), ["b", "a", "c"]);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn rejects_non_array_and_non_object_rows() {
        assert_eq!(
            RawTable::from_json(json!({"rows": []})).unwrap_err(),
            IngestError::NotAnArray("object")
        );
        assert_eq!(
            RawTable::from_json(Value::Null).unwrap_err(),
            IngestError::MissingRows
        );
        assert_eq!(
            RawTable::from_json(json!([{"a": 1}, "oops"])).unwrap_err(),
            IngestError::RowNotObject {
                index: 1,
                found: "string"
            }
        );
    }

    #[test]
    fn explicit_headers_keep_order_and_cover_rows() {
        let table = RawTable::with_headers(
            vec!["Name".into(), "Empty".into()],
            vec![json!({"ID": "1", "Name": "x"}).as_object().cloned().unwrap()],
        );
        assert_eq!(table.headers(), ["Name", "Empty", "ID"]);
    }

    #[test]
    fn empty_array_is_accepted() {
        let table = RawTable::from_json(json!([])).unwrap();
        assert!(table.is_empty());
        assert!(table.headers().is_empty());
    }
}
