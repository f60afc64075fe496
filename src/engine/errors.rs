use std::fmt;

use thiserror::Error;
use tracing::{debug, warn};

/// A single reason a request was rejected before any dataset was queried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("at least one dataset id is required")]
    MissingDatasetIds,

    #[error("x-axis column is required")]
    MissingXAxis,

    #[error("at least one y-axis metric is required")]
    MissingYAxis,

    #[error("derived column '{column}' has no source column")]
    DerivedWithoutSource { column: String },

    #[error("limit must be greater than zero")]
    InvalidLimit,

    #[error("dataset '{dataset_id}' not found")]
    UnknownDataset { dataset_id: String },

    #[error("column '{column}' not found in dataset '{dataset}'")]
    MissingColumn { dataset: String, column: String },
}

/// Every validation failure found for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl ValidationErrors {
    pub fn single(error: ValidationError) -> Self {
        Self(vec![error])
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self::single(error)
    }
}

/// Failure of one dataset's aggregate query. Never escapes the dispatcher.
#[derive(Debug, Error)]
pub enum DatasetQueryError {
    #[error("query for dataset '{dataset_id}' timed out after {after_ms}ms")]
    Timeout { dataset_id: String, after_ms: u64 },

    #[error("query for dataset '{dataset_id}' failed: {message}")]
    Executor { dataset_id: String, message: String },

    #[error("column '{column}' uses unsupported derivation '{kind}'")]
    UnsupportedDerivation { column: String, kind: String },
}

impl DatasetQueryError {
    pub fn log_error(&self, dataset_name: &str) {
        warn!(
            target: "chart_blend::dispatch",
            dataset_name,
            error = %self,
            "Dataset query failed, continuing with empty rows"
        );
        debug!(target: "chart_blend::dispatch", "Dataset query error details: {:?}", self);
    }
}

/// Terminal failures surfaced to the caller of the pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("malformed request: {0}")]
    Request(#[from] serde_json::Error),

    #[error("pipeline failure: {0}")]
    Unexpected(String),
}

impl From<ValidationError> for PipelineError {
    fn from(error: ValidationError) -> Self {
        PipelineError::Validation(error.into())
    }
}
