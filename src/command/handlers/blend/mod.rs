//! Blending pipeline: per-dataset query results in, chart-ready series out.

pub mod chart;
pub mod dispatch;
pub mod limit;
pub mod merge;
pub mod normalize;
pub mod pipeline;
pub mod sample;
pub mod sort;
pub mod validate;

#[cfg(test)]
mod normalize_test;
#[cfg(test)]
mod sort_test;

pub use pipeline::BlendPipeline;

use std::sync::Arc;
use std::time::Duration;

use tracing::error;

use crate::command::types::QueryRequest;
use crate::engine::errors::PipelineError;
use crate::engine::executor::DatasetQueryExecutor;
use crate::engine::schema::DatasetCatalog;
use crate::shared::config::Settings;
use crate::shared::datetime::TimeConfig;
use crate::shared::response::BlendResponse;

/// Knobs the pipeline reads; built from `Settings` by the binary.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOptions {
    pub sample_threshold: usize,
    pub dataset_timeout: Option<Duration>,
    pub time: TimeConfig,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            sample_threshold: 1000,
            dataset_timeout: None,
            time: TimeConfig::default(),
        }
    }
}

impl PipelineOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            sample_threshold: settings.pipeline.sample_threshold,
            dataset_timeout: settings
                .pipeline
                .dataset_timeout_ms
                .map(Duration::from_millis),
            time: settings.time.clone(),
        }
    }
}

/// Runs one request on its own task so a defect in a stage surfaces as
/// `PipelineError::Unexpected` instead of tearing down the caller.
pub async fn handle(
    request: QueryRequest,
    catalog: Arc<dyn DatasetCatalog>,
    executor: Arc<dyn DatasetQueryExecutor>,
    options: PipelineOptions,
) -> Result<BlendResponse, PipelineError> {
    let task = tokio::spawn(async move {
        BlendPipeline::new(catalog.as_ref(), executor.as_ref(), &options)
            .execute(&request)
            .await
    });

    match task.await {
        Ok(result) => result,
        Err(join_err) => {
            error!(
                target: "chart_blend::pipeline",
                error = %join_err,
                "Blend pipeline task aborted"
            );
            Err(PipelineError::Unexpected(join_err.to_string()))
        }
    }
}

/// Same as [`handle`], starting from a raw JSON request body.
pub async fn handle_json(
    raw: &str,
    catalog: Arc<dyn DatasetCatalog>,
    executor: Arc<dyn DatasetQueryExecutor>,
    options: PipelineOptions,
) -> Result<BlendResponse, PipelineError> {
    let request: QueryRequest = serde_json::from_str(raw)?;
    handle(request, catalog, executor, options).await
}
