pub mod memory;


pub use memory::{DatasetFixture, InMemoryDatasets};

use async_trait::async_trait;
use serde_json::Value;

use crate::command::resolve::{AxisMode, ColumnRef, Metric, ResolvedConfig, XAxis};
use crate::engine::errors::DatasetQueryError;
use crate::engine::schema::DatasetSchema;
use crate::engine::types::Row;

/// The aggregate query sent to one dataset.
///
/// Post-blend concerns (`limit`, `sortBy`) are never part of it, and the
/// synthetic source dimension is stripped since no dataset stores it.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetQuery {
    pub x: Option<XAxis>,
    pub metrics: Vec<Metric>,
    pub group_by: Vec<ColumnRef>,
    pub filters: Vec<Value>,
    pub aggregate_only: bool,
}

impl DatasetQuery {
    pub fn for_config(config: &ResolvedConfig) -> Self {
        match &config.axis {
            AxisMode::Ordinary(x) => Self {
                x: Some(x.clone()),
                metrics: config.metrics.clone(),
                group_by: config
                    .group_by
                    .iter()
                    .filter(|g| !g.is_source())
                    .cloned()
                    .collect(),
                filters: config.filters.clone(),
                aggregate_only: false,
            },
            AxisMode::SourceAxis | AxisMode::Kpi => Self {
                x: None,
                metrics: config.metrics.clone(),
                group_by: Vec::new(),
                filters: config.filters.clone(),
                aggregate_only: true,
            },
        }
    }

    /// Dimension columns in output order: x first, then group-by.
    pub fn dimensions(&self) -> impl Iterator<Item = &ColumnRef> {
        self.x.iter().map(|x| &x.column).chain(self.group_by.iter())
    }
}

/// Runs one aggregate query against one dataset.
#[async_trait]
pub trait DatasetQueryExecutor: Send + Sync {
    async fn execute(
        &self,
        dataset: &DatasetSchema,
        query: &DatasetQuery,
    ) -> Result<Vec<Row>, DatasetQueryError>;
}
