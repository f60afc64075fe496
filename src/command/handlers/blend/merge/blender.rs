use std::collections::HashMap;

use ahash::RandomState as AHashRandomState;
use tracing::debug;

use super::group_key::GroupKey;
use crate::command::resolve::{AxisMode, ResolvedConfig, XAxis};
use crate::command::types::BlendMode;
use crate::engine::types::{DatasetResult, Row, SOURCE_COLUMN, ScalarValue};

/// Merges per-dataset rows into one row set according to the axis and
/// blend modes of the request.
pub struct RowBlender<'a> {
    config: &'a ResolvedConfig,
}

impl<'a> RowBlender<'a> {
    pub fn new(config: &'a ResolvedConfig) -> Self {
        Self { config }
    }

    pub fn blend(&self, results: &[DatasetResult]) -> Vec<Row> {
        let config = self.config;
        let blended = match &config.axis {
            AxisMode::Kpi => vec![self.sum_rows(results.iter().flat_map(|r| r.rows.iter()))],
            AxisMode::SourceAxis => results
                .iter()
                .map(|result| {
                    let mut row = Row::new().with(SOURCE_COLUMN, result.dataset_name.as_str());
                    for (column, value) in &self.sum_rows(result.rows.iter()) {
                        row.set(column.clone(), value.clone());
                    }
                    row
                })
                .collect(),
            AxisMode::Ordinary(x) => self.group_rows(x, &tag_sources(results)),
        };

        debug!(
            target: "chart_blend::merge",
            datasets = results.len(),
            input_rows = results.iter().map(|r| r.rows.len()).sum::<usize>(),
            output_rows = blended.len(),
            "Blended dataset rows"
        );
        blended
    }

    /// Key columns for ordinary mode: x, then `_source` when series stay
    /// separate, then the explicit group-by columns.
    pub fn key_columns(&self, x: &'a XAxis) -> Vec<&'a str> {
        let config = self.config;
        let mut columns = vec![x.column.column.as_str()];
        if config.blend_mode == BlendMode::Separate {
            columns.push(SOURCE_COLUMN);
        }
        for group in &config.group_by {
            if !columns.contains(&group.column.as_str()) {
                columns.push(group.column.as_str());
            }
        }
        columns
    }

    fn sum_rows<'r>(&self, rows: impl Iterator<Item = &'r Row>) -> Row {
        let mut totals = vec![0.0; self.config.metrics.len()];
        for row in rows {
            for (total, column) in totals.iter_mut().zip(self.config.metric_columns()) {
                *total += row.number(column);
            }
        }
        let mut out = Row::new();
        for (total, column) in totals.into_iter().zip(self.config.metric_columns()) {
            out.set_number(column, total);
        }
        out
    }

    fn group_rows(&self, x: &'a XAxis, rows: &[Row]) -> Vec<Row> {
        let key_columns = self.key_columns(x);
        let mut index: HashMap<GroupKey, usize, AHashRandomState> =
            HashMap::with_hasher(AHashRandomState::new());
        let mut groups: Vec<(Row, Vec<f64>)> = Vec::new();

        for row in rows {
            let key = GroupKey::from_row(row, &key_columns);
            let slot = match index.get(&key) {
                Some(slot) => *slot,
                None => {
                    let dims: Row = key_columns
                        .iter()
                        .map(|c| {
                            let value = row.get(c).cloned().unwrap_or(ScalarValue::Null);
                            (c.to_string(), value)
                        })
                        .collect();
                    groups.push((dims, vec![0.0; self.config.metrics.len()]));
                    index.insert(key, groups.len() - 1);
                    groups.len() - 1
                }
            };

            let totals = &mut groups[slot].1;
            for (total, column) in totals.iter_mut().zip(self.config.metric_columns()) {
                *total += row.number(column);
            }
        }

        groups
            .into_iter()
            .map(|(mut row, totals)| {
                for (total, column) in totals.into_iter().zip(self.config.metric_columns()) {
                    row.set_number(column, total);
                }
                row
            })
            .collect()
    }
}

/// Copies every row, tagging it with its dataset's display name.
fn tag_sources(results: &[DatasetResult]) -> Vec<Row> {
    results
        .iter()
        .flat_map(|result| {
            result.rows.iter().map(move |row| {
                let mut tagged = row.clone();
                tagged.set(SOURCE_COLUMN, result.dataset_name.as_str());
                tagged
            })
        })
        .collect()
}
