use crate::command::resolve::ResolvedConfig;
use crate::command::types::{
    Aggregation, AxisSpec, BlendMode, ColumnSpec, MetricSpec, NormalizeMode, QueryConfigSpec,
    SortDirection, SortSpec, TimeGranularity,
};

/// Builds wire configs with `x = month`, `y = [sales]` unless overridden.
pub struct QueryConfigFactory {
    spec: QueryConfigSpec,
}

impl QueryConfigFactory {
    pub fn new() -> Self {
        Self {
            spec: QueryConfigSpec {
                x: Some(AxisSpec {
                    column: "month".into(),
                    ..Default::default()
                }),
                y: vec![MetricSpec {
                    column: "sales".into(),
                    aggregation: Some(Aggregation::Sum),
                }],
                ..Default::default()
            },
        }
    }

    pub fn with_x(mut self, column: &str) -> Self {
        self.spec.x = Some(AxisSpec {
            column: column.into(),
            ..Default::default()
        });
        self
    }

    pub fn without_x(mut self) -> Self {
        self.spec.x = None;
        self
    }

    pub fn with_bucket(mut self, bucket: TimeGranularity) -> Self {
        if let Some(x) = self.spec.x.as_mut() {
            x.bucket = Some(bucket);
        }
        self
    }

    pub fn with_derived_x(mut self, column: &str, derived: &str, source: &str) -> Self {
        self.spec.x = Some(AxisSpec {
            column: column.into(),
            derived: Some(derived.into()),
            source_column: Some(source.into()),
            bucket: None,
        });
        self
    }

    pub fn with_y(mut self, columns: &[&str]) -> Self {
        self.spec.y = columns
            .iter()
            .map(|c| MetricSpec {
                column: c.to_string(),
                aggregation: None,
            })
            .collect();
        self
    }

    pub fn add_metric(mut self, column: &str, aggregation: Aggregation) -> Self {
        self.spec.y.push(MetricSpec {
            column: column.into(),
            aggregation: Some(aggregation),
        });
        self
    }

    pub fn with_group_by(mut self, columns: &[&str]) -> Self {
        self.spec.group_by = columns
            .iter()
            .map(|c| ColumnSpec {
                column: c.to_string(),
                ..Default::default()
            })
            .collect();
        self
    }

    pub fn add_derived_group_by(mut self, column: &str, derived: &str, source: &str) -> Self {
        self.spec.group_by.push(ColumnSpec {
            column: column.into(),
            derived: Some(derived.into()),
            source_column: Some(source.into()),
        });
        self
    }

    pub fn separate(mut self) -> Self {
        self.spec.blend_mode = Some(BlendMode::Separate);
        self
    }

    pub fn normalize(mut self, mode: NormalizeMode) -> Self {
        self.spec.normalize_to = Some(mode);
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.spec.limit = Some(limit);
        self
    }

    pub fn sort_by(mut self, column: &str, direction: SortDirection) -> Self {
        self.spec.sort_by = Some(SortSpec {
            column: column.into(),
            direction: Some(direction),
        });
        self
    }

    pub fn aggregate_only(mut self) -> Self {
        self.spec.aggregate_only = Some(true);
        self
    }

    pub fn transform_for_chart(mut self) -> Self {
        self.spec.transform_for_chart = Some(true);
        self
    }

    pub fn spec(self) -> QueryConfigSpec {
        self.spec
    }

    pub fn create(self) -> ResolvedConfig {
        ResolvedConfig::resolve(&self.spec).expect("factory config should resolve")
    }
}
