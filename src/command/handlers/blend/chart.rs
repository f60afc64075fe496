use indexmap::{IndexMap, IndexSet};
use tracing::debug;

use crate::command::resolve::{AxisMode, ResolvedConfig};
use crate::command::types::BlendMode;
use crate::engine::types::{Row, SOURCE_COLUMN, ScalarValue};
use crate::shared::datetime::{CalendarTimeBucketer, is_date_like};
use crate::shared::response::{ChartPoint, POINT_LABEL_KEY};

/// Dimension whose values become separate series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PivotDimension<'a> {
    None,
    Column(&'a str),
    Source,
}

/// Pivoted rows plus what the response meta needs to know about them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartSeries {
    pub points: Vec<ChartPoint>,
    pub data_keys: Vec<String>,
    pub x_is_date: bool,
}

pub struct ChartTransformer<'a> {
    config: &'a ResolvedConfig,
    bucketer: &'a CalendarTimeBucketer,
}

impl<'a> ChartTransformer<'a> {
    pub fn new(config: &'a ResolvedConfig, bucketer: &'a CalendarTimeBucketer) -> Self {
        Self { config, bucketer }
    }

    pub fn pivot_dimension(&self) -> PivotDimension<'a> {
        let config = self.config;
        if !matches!(config.axis, AxisMode::Ordinary(_)) {
            return PivotDimension::None;
        }
        if let Some(column) = config.first_group_column() {
            return PivotDimension::Column(column);
        }
        // separate blends key on `_source`, whether one dataset or many
        if config.blend_mode == BlendMode::Separate {
            return PivotDimension::Source;
        }
        PivotDimension::None
    }

    pub fn transform(&self, rows: &[Row]) -> ChartSeries {
        let Some(x_column) = self.config.x_column() else {
            return ChartSeries::default();
        };
        let pivot = self.pivot_dimension();
        let bucket = self.config.x_axis().and_then(|x| x.bucket);
        let x_is_date = !self.config.is_source_axis()
            && rows
                .first()
                .and_then(|row| row.text(x_column))
                .is_some_and(is_date_like);
        let metrics: Vec<&str> = self.config.metric_columns().collect();

        let mut points: IndexMap<String, ChartPoint> = IndexMap::new();
        let mut data_keys: IndexSet<String> = IndexSet::new();

        for row in rows {
            let name = match row.get(x_column) {
                Some(ScalarValue::Utf8(raw)) if x_is_date => self.bucketer.label(raw, bucket),
                Some(value) => value.to_string_repr(),
                None => String::new(),
            };
            let point = points
                .entry(name.clone())
                .or_insert_with(|| ChartPoint::new(name));

            let group = match pivot {
                PivotDimension::None => None,
                PivotDimension::Column(column) => Some(row.key_part(column)),
                PivotDimension::Source => Some(row.key_part(SOURCE_COLUMN)),
            };

            for metric in &metrics {
                let key = series_key(group.as_deref(), metric, metrics.len());
                point.accumulate(&key, row.number(metric));
                data_keys.insert(key);
            }
        }

        debug!(
            target: "chart_blend::chart",
            ?pivot,
            rows = rows.len(),
            points = points.len(),
            series = data_keys.len(),
            x_is_date,
            "Pivoted rows into chart points"
        );

        ChartSeries {
            points: points.into_values().collect(),
            data_keys: data_keys.into_iter().collect(),
            x_is_date,
        }
    }
}

/// Series name: the group value alone for a single metric, disambiguated
/// with the metric name when several are plotted.
/// A key equal to the point label key is suffixed so it cannot shadow it.
fn series_key(group: Option<&str>, metric: &str, metric_count: usize) -> String {
    let key = match group {
        None => metric.to_string(),
        Some(group) if metric_count == 1 => group.to_string(),
        Some(group) => format!("{group} - {metric}"),
    };
    if key == POINT_LABEL_KEY {
        format!("{key} (series)")
    } else {
        key
    }
}
