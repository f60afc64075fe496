use std::collections::{HashMap, HashSet};

use ahash::RandomState as AHashRandomState;
use async_trait::async_trait;
use chrono::{Datelike, Timelike};
use serde::Deserialize;
use tracing::debug;

use super::{DatasetQuery, DatasetQueryExecutor};
use crate::command::resolve::ColumnRef;
use crate::command::types::{Aggregation, TimeGranularity};
use crate::engine::errors::DatasetQueryError;
use crate::engine::schema::{DatasetCatalog, DatasetSchema, SchemaRegistry};
use crate::engine::types::{Row, ScalarValue};
use crate::shared::datetime::CalendarTimeBucketer;

/// A dataset loaded from a fixture file: raw, unaggregated rows.
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetFixture {
    pub id: String,
    pub name: String,
    /// Schema columns; inferred from the rows when omitted.
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Row>,
}

/// Reference catalog and executor over in-memory raw rows.
///
/// Groups by x and group-by columns, evaluates each metric's aggregation,
/// computes derived columns and truncates date-like x values to their
/// bucket. Filters are not evaluated.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDatasets {
    registry: SchemaRegistry,
    rows: HashMap<String, Vec<Row>>,
    bucketer: CalendarTimeBucketer,
}

impl InMemoryDatasets {
    pub fn new(bucketer: CalendarTimeBucketer) -> Self {
        Self {
            registry: SchemaRegistry::new(),
            rows: HashMap::new(),
            bucketer,
        }
    }

    pub fn from_fixtures(fixtures: Vec<DatasetFixture>, bucketer: CalendarTimeBucketer) -> Self {
        let mut datasets = Self::new(bucketer);
        for fixture in fixtures {
            datasets.insert(fixture);
        }
        datasets
    }

    pub fn from_json_str(
        raw: &str,
        bucketer: CalendarTimeBucketer,
    ) -> Result<Self, serde_json::Error> {
        let fixtures: Vec<DatasetFixture> = serde_json::from_str(raw)?;
        Ok(Self::from_fixtures(fixtures, bucketer))
    }

    pub fn insert(&mut self, fixture: DatasetFixture) {
        let columns: Vec<String> = if fixture.columns.is_empty() {
            let mut seen = HashSet::new();
            fixture
                .rows
                .iter()
                .flat_map(|row| row.columns().cloned())
                .filter(|c| seen.insert(c.clone()))
                .collect()
        } else {
            fixture.columns
        };
        self.registry
            .register(DatasetSchema::new(&fixture.id, fixture.name, columns));
        self.rows.insert(fixture.id, fixture.rows);
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    fn aggregate(&self, rows: &[Row], query: &DatasetQuery) -> Result<Vec<Row>, DatasetQueryError> {
        let dimensions: Vec<&ColumnRef> = if query.aggregate_only {
            Vec::new()
        } else {
            query.dimensions().collect()
        };
        let x_bucket = query.x.as_ref().and_then(|x| x.bucket);

        let mut index: HashMap<Vec<String>, usize, AHashRandomState> =
            HashMap::with_hasher(AHashRandomState::new());
        let mut groups: Vec<(Vec<(String, ScalarValue)>, Vec<MetricAccumulator>)> = Vec::new();

        for row in rows {
            let mut dims = Vec::with_capacity(dimensions.len());
            for (position, column) in dimensions.iter().enumerate() {
                // x is always the first dimension when present
                let bucket = if position == 0 && query.x.is_some() {
                    x_bucket
                } else {
                    None
                };
                let value = self.dimension_value(row, column, bucket)?;
                dims.push((column.column.clone(), value));
            }

            let key: Vec<String> = dims.iter().map(|(_, v)| v.to_string_repr()).collect();
            let slot = match index.get(&key) {
                Some(slot) => *slot,
                None => {
                    groups.push((dims, vec![MetricAccumulator::default(); query.metrics.len()]));
                    index.insert(key, groups.len() - 1);
                    groups.len() - 1
                }
            };

            for (acc, metric) in groups[slot].1.iter_mut().zip(&query.metrics) {
                acc.push(row.get(&metric.column));
            }
        }

        if groups.is_empty() && query.aggregate_only {
            groups.push((Vec::new(), vec![MetricAccumulator::default(); query.metrics.len()]));
        }

        Ok(groups
            .into_iter()
            .map(|(dims, accs)| {
                let mut out: Row = dims.into_iter().collect();
                for (acc, metric) in accs.iter().zip(&query.metrics) {
                    out.set(metric.column.clone(), acc.finish(metric.aggregation));
                }
                out
            })
            .collect())
    }

    fn dimension_value(
        &self,
        row: &Row,
        column: &ColumnRef,
        bucket: Option<TimeGranularity>,
    ) -> Result<ScalarValue, DatasetQueryError> {
        let value = match &column.derived {
            Some(kind) => self.derive(kind, row.get(column.physical_column()), column)?,
            None => row.get(&column.column).cloned().unwrap_or(ScalarValue::Null),
        };

        if let (Some(gran), Some(raw)) = (bucket, value.as_str()) {
            if let Some(key) = self.bucketer.bucket_key(raw, gran) {
                return Ok(ScalarValue::Utf8(key));
            }
        }
        Ok(value)
    }

    fn derive(
        &self,
        kind: &str,
        source: Option<&ScalarValue>,
        column: &ColumnRef,
    ) -> Result<ScalarValue, DatasetQueryError> {
        let dt = source
            .and_then(ScalarValue::as_str)
            .and_then(|raw| self.bucketer.parse(raw));

        let value = match kind {
            "day_of_week" => dt.map(|dt| ScalarValue::Utf8(dt.format("%A").to_string())),
            "month" => dt.map(|dt| ScalarValue::Utf8(dt.format("%B").to_string())),
            "year" => dt.map(|dt| ScalarValue::Int64(dt.year() as i64)),
            "hour" => dt.map(|dt| ScalarValue::Int64(dt.hour() as i64)),
            "date" => dt.map(|dt| ScalarValue::Utf8(dt.format("%Y-%m-%d").to_string())),
            "quarter" => dt.map(|dt| ScalarValue::Utf8(format!("Q{}", dt.month0() / 3 + 1))),
            other => {
                return Err(DatasetQueryError::UnsupportedDerivation {
                    column: column.column.clone(),
                    kind: other.to_string(),
                });
            }
        };
        Ok(value.unwrap_or(ScalarValue::Null))
    }
}

impl DatasetCatalog for InMemoryDatasets {
    fn describe(&self, dataset_id: &str) -> Option<DatasetSchema> {
        self.registry.describe(dataset_id)
    }
}

#[async_trait]
impl DatasetQueryExecutor for InMemoryDatasets {
    async fn execute(
        &self,
        dataset: &DatasetSchema,
        query: &DatasetQuery,
    ) -> Result<Vec<Row>, DatasetQueryError> {
        let rows = self
            .rows
            .get(&dataset.id)
            .ok_or_else(|| DatasetQueryError::Executor {
                dataset_id: dataset.id.clone(),
                message: "no rows registered".to_string(),
            })?;

        let result = self.aggregate(rows, query)?;
        debug!(
            target: "chart_blend::executor",
            dataset_id = %dataset.id,
            input_rows = rows.len(),
            output_rows = result.len(),
            "In-memory aggregate complete"
        );
        Ok(result)
    }
}

#[derive(Debug, Clone, Default)]
struct MetricAccumulator {
    sum: f64,
    numeric: usize,
    non_null: usize,
    distinct: HashSet<String>,
    min: Option<f64>,
    max: Option<f64>,
}

impl MetricAccumulator {
    fn push(&mut self, value: Option<&ScalarValue>) {
        let Some(value) = value.filter(|v| !v.is_null()) else {
            return;
        };
        self.non_null += 1;
        self.distinct.insert(value.to_string_repr());
        if let Some(n) = value.as_f64() {
            self.sum += n;
            self.numeric += 1;
            self.min = Some(self.min.map_or(n, |m| m.min(n)));
            self.max = Some(self.max.map_or(n, |m| m.max(n)));
        }
    }

    fn finish(&self, aggregation: Aggregation) -> ScalarValue {
        match aggregation {
            Aggregation::Sum => ScalarValue::from_f64(self.sum),
            Aggregation::Avg if self.numeric > 0 => {
                ScalarValue::from_f64(self.sum / self.numeric as f64)
            }
            Aggregation::Avg => ScalarValue::Null,
            Aggregation::Count => ScalarValue::Int64(self.non_null as i64),
            Aggregation::CountDistinct => ScalarValue::Int64(self.distinct.len() as i64),
            Aggregation::Min => self.min.map_or(ScalarValue::Null, ScalarValue::from_f64),
            Aggregation::Max => self.max.map_or(ScalarValue::Null, ScalarValue::from_f64),
        }
    }
}
