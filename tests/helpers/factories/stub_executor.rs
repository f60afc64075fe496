use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use super::dataset_result_factory::rows;
use crate::engine::errors::DatasetQueryError;
use crate::engine::executor::{DatasetQuery, DatasetQueryExecutor};
use crate::engine::schema::DatasetSchema;
use crate::engine::types::Row;

/// Executor returning canned rows per dataset id, optionally failing or
/// sleeping, and recording every query it receives.
pub struct StubExecutor {
    responses: HashMap<String, Result<Vec<Row>, String>>,
    delays: HashMap<String, Duration>,
    received: Mutex<Vec<(String, DatasetQuery)>>,
}

impl StubExecutor {
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
            delays: HashMap::new(),
            received: Mutex::new(Vec::new()),
        }
    }

    pub fn with_rows(mut self, dataset_id: &str, values: Vec<Value>) -> Self {
        self.responses
            .insert(dataset_id.to_string(), Ok(rows(values)));
        self
    }

    pub fn with_failure(mut self, dataset_id: &str, message: &str) -> Self {
        self.responses
            .insert(dataset_id.to_string(), Err(message.to_string()));
        self
    }

    pub fn with_delay(mut self, dataset_id: &str, delay: Duration) -> Self {
        self.delays.insert(dataset_id.to_string(), delay);
        self
    }

    pub fn received(&self) -> Vec<(String, DatasetQuery)> {
        self.received.lock().expect("lock").clone()
    }
}

#[async_trait]
impl DatasetQueryExecutor for StubExecutor {
    async fn execute(
        &self,
        dataset: &DatasetSchema,
        query: &DatasetQuery,
    ) -> Result<Vec<Row>, DatasetQueryError> {
        self.received
            .lock()
            .expect("lock")
            .push((dataset.id.clone(), query.clone()));

        if let Some(delay) = self.delays.get(&dataset.id) {
            tokio::time::sleep(*delay).await;
        }

        match self.responses.get(&dataset.id) {
            Some(Ok(rows)) => Ok(rows.clone()),
            Some(Err(message)) => Err(DatasetQueryError::Executor {
                dataset_id: dataset.id.clone(),
                message: message.clone(),
            }),
            None => Ok(Vec::new()),
        }
    }
}
