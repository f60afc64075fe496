use tracing::debug;

use crate::shared::response::ChartPoint;

/// Bucketed min/max downsampling that keeps a series' visible shape.
pub struct Sampler {
    threshold: usize,
}

impl Sampler {
    pub fn new(threshold: usize) -> Self {
        Self {
            threshold: threshold.max(2),
        }
    }

    /// Reduces `points` to at most `threshold` entries when over budget.
    ///
    /// The first and last points always survive; each interior bucket keeps
    /// its minimum and maximum on `metric_key`, in original order.
    pub fn sample(&self, points: Vec<ChartPoint>, metric_key: Option<&str>) -> Vec<ChartPoint> {
        let total = points.len();
        if total <= self.threshold {
            return points;
        }

        let last = total - 1;
        let interior = total - 2;
        let buckets = ((self.threshold - 2) / 2).min(interior);
        let value = |idx: usize| metric_key.map_or(0.0, |key| points[idx].value(key));

        let mut keep = vec![false; total];
        keep[0] = true;
        keep[last] = true;
        for bucket in 0..buckets {
            let start = 1 + bucket * interior / buckets;
            let end = 1 + (bucket + 1) * interior / buckets;
            if start >= end {
                continue;
            }
            let (mut min_idx, mut max_idx) = (start, start);
            for idx in start + 1..end {
                if value(idx) < value(min_idx) {
                    min_idx = idx;
                }
                if value(idx) > value(max_idx) {
                    max_idx = idx;
                }
            }
            keep[min_idx] = true;
            keep[max_idx] = true;
        }

        let sampled: Vec<ChartPoint> = points
            .into_iter()
            .zip(keep)
            .filter_map(|(point, kept)| kept.then_some(point))
            .collect();

        debug!(
            target: "chart_blend::sample",
            original = total,
            sampled = sampled.len(),
            threshold = self.threshold,
            "Downsampled chart points"
        );
        sampled
    }
}
