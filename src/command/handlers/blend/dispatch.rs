use std::time::Duration;

use futures::future::join_all;
use tracing::{debug, info};

use crate::engine::errors::DatasetQueryError;
use crate::engine::executor::{DatasetQuery, DatasetQueryExecutor};
use crate::engine::schema::DatasetSchema;
use crate::engine::types::DatasetResult;

/// Fans one query out to every dataset concurrently.
///
/// A dataset whose query fails or overruns the deadline contributes an
/// empty result; it never fails the request.
pub struct DatasetQueryOrchestrator<'a> {
    executor: &'a dyn DatasetQueryExecutor,
    timeout: Option<Duration>,
}

impl<'a> DatasetQueryOrchestrator<'a> {
    pub fn new(executor: &'a dyn DatasetQueryExecutor, timeout: Option<Duration>) -> Self {
        Self { executor, timeout }
    }

    /// Results come back in `datasets` order regardless of completion order.
    pub async fn dispatch(
        &self,
        datasets: &[DatasetSchema],
        query: &DatasetQuery,
    ) -> Vec<DatasetResult> {
        info!(
            target: "chart_blend::dispatch",
            datasets = datasets.len(),
            aggregate_only = query.aggregate_only,
            "Dispatching dataset queries"
        );

        let tasks = datasets.iter().map(|dataset| self.query_one(dataset, query));
        let results = join_all(tasks).await;

        let failed = results.iter().filter(|(ok, _)| !ok).count();
        debug!(
            target: "chart_blend::dispatch",
            completed = results.len() - failed,
            failed,
            "Dataset queries finished"
        );

        results.into_iter().map(|(_, result)| result).collect()
    }

    async fn query_one(
        &self,
        dataset: &DatasetSchema,
        query: &DatasetQuery,
    ) -> (bool, DatasetResult) {
        let outcome = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.executor.execute(dataset, query))
                .await
                .unwrap_or_else(|_| {
                    Err(DatasetQueryError::Timeout {
                        dataset_id: dataset.id.clone(),
                        after_ms: limit.as_millis() as u64,
                    })
                }),
            None => self.executor.execute(dataset, query).await,
        };

        match outcome {
            Ok(rows) => {
                debug!(
                    target: "chart_blend::dispatch",
                    dataset = %dataset.name,
                    rows = rows.len(),
                    "Dataset query returned"
                );
                (true, DatasetResult::new(&dataset.id, &dataset.name, rows))
            }
            Err(err) => {
                err.log_error(&dataset.name);
                (false, DatasetResult::empty(&dataset.id, &dataset.name))
            }
        }
    }
}
