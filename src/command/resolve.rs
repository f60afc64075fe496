use std::collections::HashSet;

use serde_json::Value;

use crate::command::types::{
    Aggregation, AxisSpec, BlendMode, ColumnSpec, NormalizeMode, QueryConfigSpec, SortDirection,
    TimeGranularity,
};
use crate::engine::errors::{ValidationError, ValidationErrors};
use crate::engine::types::SOURCE_COLUMN;

/// Legacy x-axis spellings meaning "KPI query, ignore the x-axis".
pub const KPI_MARKERS: [&str; 2] = ["_kpi", "_unused"];

/// A dimension column, possibly derived from another physical column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRef {
    pub column: String,
    pub derived: Option<String>,
    pub source_column: Option<String>,
}

impl ColumnRef {
    /// Column that must exist in a dataset schema for this reference.
    pub fn physical_column(&self) -> &str {
        match (&self.derived, &self.source_column) {
            (Some(_), Some(source)) => source,
            _ => &self.column,
        }
    }

    pub fn is_source(&self) -> bool {
        self.column == SOURCE_COLUMN
    }

    fn from_spec(
        column: &str,
        derived: &Option<String>,
        source_column: &Option<String>,
    ) -> Result<Self, ValidationError> {
        let derived = derived.clone().filter(|d| !d.trim().is_empty());
        let source_column = source_column.clone().filter(|s| !s.trim().is_empty());
        if derived.is_some() && source_column.is_none() {
            return Err(ValidationError::DerivedWithoutSource {
                column: column.to_string(),
            });
        }
        Ok(Self {
            column: column.to_string(),
            derived,
            source_column,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XAxis {
    pub column: ColumnRef,
    pub bucket: Option<TimeGranularity>,
}

/// How the x-axis participates in the request, decided once at resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AxisMode {
    Ordinary(XAxis),
    /// One point per dataset, labelled by dataset name.
    SourceAxis,
    /// Aggregate-only: a single summary row.
    Kpi,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metric {
    pub column: String,
    pub aggregation: Aggregation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortBy {
    pub column: String,
    pub direction: SortDirection,
}

/// Fully defaulted configuration; downstream stages hold no default logic.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub axis: AxisMode,
    pub metrics: Vec<Metric>,
    pub group_by: Vec<ColumnRef>,
    pub filters: Vec<Value>,
    pub blend_mode: BlendMode,
    pub normalize: NormalizeMode,
    pub limit: Option<usize>,
    pub sort_by: Option<SortBy>,
    pub transform_for_chart: bool,
    /// The request asked for aggregate-only output, whatever its axis mode.
    pub aggregate_only: bool,
}

impl ResolvedConfig {
    pub fn resolve(spec: &QueryConfigSpec) -> Result<Self, ValidationErrors> {
        let mut errors = Vec::new();
        let aggregate_only = spec.aggregate_only.unwrap_or(false);

        let axis = match resolve_axis(spec.x.as_ref(), aggregate_only) {
            Ok(axis) => Some(axis),
            Err(error) => {
                errors.push(error);
                None
            }
        };

        // rows hold one value per column, so a repeated y column keeps its first entry
        let mut seen_metrics = HashSet::new();
        let metrics: Vec<Metric> = spec
            .y
            .iter()
            .filter(|m| !m.column.trim().is_empty())
            .filter(|m| seen_metrics.insert(m.column.as_str()))
            .map(|m| Metric {
                column: m.column.clone(),
                aggregation: m.aggregation.unwrap_or_default(),
            })
            .collect();
        if metrics.is_empty() {
            errors.push(ValidationError::MissingYAxis);
        }

        let mut group_by = Vec::with_capacity(spec.group_by.len());
        for ColumnSpec {
            column,
            derived,
            source_column,
        } in spec.group_by.iter().filter(|g| !g.column.trim().is_empty())
        {
            match ColumnRef::from_spec(column, derived, source_column) {
                Ok(column) => group_by.push(column),
                Err(error) => errors.push(error),
            }
        }

        let limit = match spec.limit {
            Some(limit) if limit <= 0 => {
                errors.push(ValidationError::InvalidLimit);
                None
            }
            Some(limit) => Some(limit as usize),
            None => None,
        };

        let sort_by = spec
            .sort_by
            .as_ref()
            .filter(|s| !s.column.trim().is_empty())
            .map(|s| SortBy {
                column: s.column.clone(),
                direction: s.direction.unwrap_or_default(),
            });

        match axis {
            Some(axis) if errors.is_empty() => Ok(Self {
                axis,
                metrics,
                group_by,
                filters: spec.filters.clone(),
                blend_mode: spec.blend_mode.unwrap_or_default(),
                normalize: spec.normalize_to.unwrap_or_default(),
                limit,
                sort_by,
                transform_for_chart: spec.transform_for_chart.unwrap_or(false),
                aggregate_only,
            }),
            _ => Err(ValidationErrors(errors)),
        }
    }

    pub fn is_kpi(&self) -> bool {
        matches!(self.axis, AxisMode::Kpi)
    }

    pub fn is_source_axis(&self) -> bool {
        matches!(self.axis, AxisMode::SourceAxis)
    }

    pub fn x_axis(&self) -> Option<&XAxis> {
        match &self.axis {
            AxisMode::Ordinary(x) => Some(x),
            _ => None,
        }
    }

    /// Name of the column carrying x labels in blended rows.
    pub fn x_column(&self) -> Option<&str> {
        match &self.axis {
            AxisMode::Ordinary(x) => Some(x.column.column.as_str()),
            AxisMode::SourceAxis => Some(SOURCE_COLUMN),
            AxisMode::Kpi => None,
        }
    }

    pub fn metric_columns(&self) -> impl Iterator<Item = &str> {
        self.metrics.iter().map(|m| m.column.as_str())
    }

    pub fn first_group_column(&self) -> Option<&str> {
        self.group_by.first().map(|g| g.column.as_str())
    }

    /// Metric used for ranking: the sort column if set, else the first y column.
    pub fn primary_metric(&self) -> &str {
        match &self.sort_by {
            Some(sort) => sort.column.as_str(),
            None => self
                .metrics
                .first()
                .map(|m| m.column.as_str())
                .unwrap_or_default(),
        }
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.sort_by
            .as_ref()
            .map(|s| s.direction)
            .unwrap_or_default()
    }
}

fn resolve_axis(x: Option<&AxisSpec>, aggregate_only: bool) -> Result<AxisMode, ValidationError> {
    let x = x.filter(|x| !x.column.trim().is_empty());
    match x {
        Some(x) if x.column == SOURCE_COLUMN => Ok(AxisMode::SourceAxis),
        Some(x) if KPI_MARKERS.contains(&x.column.as_str()) => Ok(AxisMode::Kpi),
        _ if aggregate_only => Ok(AxisMode::Kpi),
        Some(x) => Ok(AxisMode::Ordinary(XAxis {
            column: ColumnRef::from_spec(&x.column, &x.derived, &x.source_column)?,
            bucket: x.bucket,
        })),
        None => Err(ValidationError::MissingXAxis),
    }
}
