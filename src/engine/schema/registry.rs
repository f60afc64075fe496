use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Column set and display name of one queryable dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSchema {
    pub id: String,
    pub name: String,
    pub columns: HashSet<String>,
}

impl DatasetSchema {
    pub fn new<I, S>(id: impl Into<String>, name: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            name: name.into(),
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.contains(column)
    }
}

/// Lookup of dataset schemas by id.
pub trait DatasetCatalog: Send + Sync {
    fn describe(&self, dataset_id: &str) -> Option<DatasetSchema>;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaRegistry {
    schemas: HashMap<String, DatasetSchema>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a schema, returning the one it replaced.
    pub fn register(&mut self, schema: DatasetSchema) -> Option<DatasetSchema> {
        self.schemas.insert(schema.id.clone(), schema)
    }

    pub fn get(&self, dataset_id: &str) -> Option<&DatasetSchema> {
        self.schemas.get(dataset_id)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

impl DatasetCatalog for SchemaRegistry {
    fn describe(&self, dataset_id: &str) -> Option<DatasetSchema> {
        self.schemas.get(dataset_id).cloned()
    }
}
