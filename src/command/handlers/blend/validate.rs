use indexmap::IndexSet;
use tracing::debug;

use crate::command::resolve::{AxisMode, ResolvedConfig};
use crate::engine::errors::{ValidationError, ValidationErrors};
use crate::engine::schema::{DatasetCatalog, DatasetSchema};

/// Looks up every requested dataset, collecting one error per unknown id.
pub fn resolve_datasets(
    dataset_ids: &[String],
    catalog: &dyn DatasetCatalog,
) -> Result<Vec<DatasetSchema>, ValidationErrors> {
    if dataset_ids.is_empty() {
        return Err(ValidationErrors::single(ValidationError::MissingDatasetIds));
    }

    let mut schemas = Vec::with_capacity(dataset_ids.len());
    let mut errors = Vec::new();
    for id in dataset_ids {
        match catalog.describe(id) {
            Some(schema) => schemas.push(schema),
            None => errors.push(ValidationError::UnknownDataset {
                dataset_id: id.clone(),
            }),
        }
    }

    if errors.is_empty() {
        Ok(schemas)
    } else {
        Err(ValidationErrors(errors))
    }
}

/// Checks that every referenced column exists in every selected dataset.
pub struct ConfigValidator<'a> {
    config: &'a ResolvedConfig,
}

impl<'a> ConfigValidator<'a> {
    pub fn new(config: &'a ResolvedConfig) -> Self {
        Self { config }
    }

    /// Physical columns each dataset must carry, in request order.
    pub fn required_columns(&self) -> Vec<&'a str> {
        let config = self.config;
        let mut columns: IndexSet<&'a str> = IndexSet::new();

        if let AxisMode::Ordinary(x) = &config.axis {
            columns.insert(x.column.physical_column());
        }
        for metric in &config.metrics {
            columns.insert(metric.column.as_str());
        }
        // aggregate-only requests ignore their group-by
        if !config.aggregate_only {
            for group in config.group_by.iter().filter(|g| !g.is_source()) {
                columns.insert(group.physical_column());
            }
        }

        columns.into_iter().collect()
    }

    pub fn validate(&self, datasets: &[DatasetSchema]) -> Result<(), ValidationErrors> {
        let required = self.required_columns();
        let errors: Vec<ValidationError> = datasets
            .iter()
            .flat_map(|dataset| {
                required
                    .iter()
                    .filter(move |column| !dataset.has_column(column))
                    .map(move |column| ValidationError::MissingColumn {
                        dataset: dataset.name.clone(),
                        column: column.to_string(),
                    })
            })
            .collect();

        debug!(
            target: "chart_blend::validate",
            datasets = datasets.len(),
            required = ?required,
            missing = errors.len(),
            "Validated column references"
        );

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(errors))
        }
    }
}
