use crate::command::resolve::ResolvedConfig;
use crate::command::types::NormalizeMode;
use crate::engine::types::Row;

/// Rescales metric columns to percentages.
pub struct Normalizer<'a> {
    mode: NormalizeMode,
    metrics: Vec<&'a str>,
}

impl<'a> Normalizer<'a> {
    pub fn new(config: &'a ResolvedConfig) -> Self {
        Self {
            mode: config.normalize,
            metrics: config.metric_columns().collect(),
        }
    }

    pub fn apply(&self, rows: Vec<Row>) -> Vec<Row> {
        match self.mode {
            NormalizeMode::None => rows,
            NormalizeMode::Row => rows
                .into_iter()
                .map(|row| {
                    let total = self.row_total(&row);
                    self.scale(row, total)
                })
                .collect(),
            NormalizeMode::All => {
                let total: f64 = rows.iter().map(|row| self.row_total(row)).sum();
                rows.into_iter().map(|row| self.scale(row, total)).collect()
            }
        }
    }

    fn row_total(&self, row: &Row) -> f64 {
        self.metrics.iter().map(|m| row.number(m)).sum()
    }

    /// Rewrites each metric as a percentage of `total`; a zero total leaves
    /// the row untouched.
    fn scale(&self, mut row: Row, total: f64) -> Row {
        if total == 0.0 {
            return row;
        }
        for metric in &self.metrics {
            let value = row.number(metric);
            row.set_number(metric, value * 100.0 / total);
        }
        row
    }
}
