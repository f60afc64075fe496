use super::Row;

/// Rows returned for one dataset, tagged with the dataset's identity.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetResult {
    pub dataset_id: String,
    pub dataset_name: String,
    pub rows: Vec<Row>,
}

impl DatasetResult {
    pub fn new(dataset_id: impl Into<String>, dataset_name: impl Into<String>, rows: Vec<Row>) -> Self {
        Self {
            dataset_id: dataset_id.into(),
            dataset_name: dataset_name.into(),
            rows,
        }
    }

    /// A dataset whose query failed contributes no rows.
    pub fn empty(dataset_id: impl Into<String>, dataset_name: impl Into<String>) -> Self {
        Self::new(dataset_id, dataset_name, Vec::new())
    }
}
