use std::cmp::Ordering;
use std::collections::HashSet;

use indexmap::IndexMap;
use tracing::debug;

use super::sort::compare_rows;
use crate::command::resolve::{AxisMode, ResolvedConfig};
use crate::command::types::{BlendMode, SortDirection};
use crate::engine::types::{Row, SOURCE_COLUMN};

/// Truncation policy, picked from the shape of the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitPolicy<'a> {
    /// Keep every row of the top groups of this column.
    GroupRanked(&'a str),
    /// Equal share per `_source` partition.
    Balanced,
    /// First rows of the sorted result.
    Global,
}

pub struct Limiter<'a> {
    config: &'a ResolvedConfig,
}

impl<'a> Limiter<'a> {
    pub fn new(config: &'a ResolvedConfig) -> Self {
        Self { config }
    }

    pub fn policy(&self) -> LimitPolicy<'a> {
        let config = self.config;
        match (&config.axis, config.first_group_column()) {
            (AxisMode::Ordinary(_), Some(column)) => LimitPolicy::GroupRanked(column),
            (AxisMode::Ordinary(_), None) if config.blend_mode == BlendMode::Separate => {
                LimitPolicy::Balanced
            }
            _ => LimitPolicy::Global,
        }
    }

    pub fn apply(&self, rows: Vec<Row>) -> Vec<Row> {
        let Some(limit) = self.config.limit else {
            return rows;
        };
        let policy = self.policy();
        let input_rows = rows.len();

        let limited = match policy {
            LimitPolicy::GroupRanked(column) => self.top_groups(rows, column, limit),
            LimitPolicy::Balanced => self.balanced(rows, limit),
            LimitPolicy::Global => {
                let mut rows = rows;
                rows.truncate(limit);
                rows
            }
        };

        debug!(
            target: "chart_blend::limit",
            ?policy,
            limit,
            input_rows,
            output_rows = limited.len(),
            "Applied limit"
        );
        limited
    }

    /// Ranks groups by their total of the primary metric and keeps every
    /// row belonging to the top `limit` groups.
    fn top_groups(&self, rows: Vec<Row>, column: &str, limit: usize) -> Vec<Row> {
        let metric = self.config.primary_metric();
        let mut totals: IndexMap<String, f64> = IndexMap::new();
        for row in &rows {
            *totals.entry(row.key_part(column)).or_insert(0.0) += row.number(metric);
        }

        let mut ranked: Vec<(String, f64)> = totals.into_iter().collect();
        let direction = self.config.sort_direction();
        ranked.sort_by(|(_, a), (_, b)| {
            let ordering = a.partial_cmp(b).unwrap_or(Ordering::Equal);
            match direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });

        let kept: HashSet<String> = ranked.into_iter().take(limit).map(|(g, _)| g).collect();
        rows.into_iter()
            .filter(|row| kept.contains(&row.key_part(column)))
            .collect()
    }

    /// Takes `ceil(limit / sources)` rows per source, then trims the excess
    /// one row at a time from the largest partition so no two full
    /// partitions differ by more than one row.
    fn balanced(&self, rows: Vec<Row>, limit: usize) -> Vec<Row> {
        let mut partitions: IndexMap<String, Vec<(usize, Row)>> = IndexMap::new();
        for (position, row) in rows.into_iter().enumerate() {
            partitions
                .entry(row.key_part(SOURCE_COLUMN))
                .or_default()
                .push((position, row));
        }
        if partitions.is_empty() {
            return Vec::new();
        }

        let quota = limit.div_ceil(partitions.len());
        for partition in partitions.values_mut() {
            partition.sort_by(|a, b| self.rank(a, b));
            partition.truncate(quota);
        }

        let mut excess = partitions
            .values()
            .map(Vec::len)
            .sum::<usize>()
            .saturating_sub(limit);
        while excess > 0 {
            let largest = partitions
                .values_mut()
                .filter(|p| !p.is_empty())
                .max_by(|a, b| {
                    a.len().cmp(&b.len()).then_with(|| {
                        // among equally large partitions, trim the worst tail row
                        match (a.last(), b.last()) {
                            (Some(x), Some(y)) => self.rank(x, y),
                            _ => Ordering::Equal,
                        }
                    })
                });
            match largest {
                Some(partition) => {
                    partition.pop();
                    excess -= 1;
                }
                None => break,
            }
        }

        let mut combined: Vec<(usize, Row)> = partitions.into_values().flatten().collect();
        combined.sort_by(|a, b| self.rank(a, b));
        combined.into_iter().map(|(_, row)| row).collect()
    }

    /// Ranking used by the balanced policy: sort criteria first, blended
    /// order as the tie-breaker. `Less` ranks better.
    fn rank(&self, a: &(usize, Row), b: &(usize, Row)) -> Ordering {
        let by_sort = match &self.config.sort_by {
            Some(sort_by) => compare_rows(&a.1, &b.1, sort_by),
            None => Ordering::Equal,
        };
        by_sort.then_with(|| a.0.cmp(&b.0))
    }
}
