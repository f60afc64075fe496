use serde_json::Value;

use crate::engine::types::{DatasetResult, Row};

/// Converts `json!` object literals into rows.
pub fn rows(values: Vec<Value>) -> Vec<Row> {
    values
        .into_iter()
        .map(|v| Row::from_json(v).expect("fixture rows must be JSON objects"))
        .collect()
}

pub struct DatasetResultFactory {
    id: String,
    name: String,
    rows: Vec<Row>,
}

impl DatasetResultFactory {
    pub fn new(name: &str) -> Self {
        Self {
            id: format!("ds-{}", name.to_lowercase()),
            name: name.to_string(),
            rows: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    pub fn with_rows(mut self, values: Vec<Value>) -> Self {
        self.rows = rows(values);
        self
    }

    pub fn add_row(mut self, value: Value) -> Self {
        self.rows.extend(rows(vec![value]));
        self
    }

    pub fn create(self) -> DatasetResult {
        DatasetResult::new(self.id, self.name, self.rows)
    }
}
