use tracing::{debug, info};

use super::PipelineOptions;
use super::chart::ChartTransformer;
use super::dispatch::DatasetQueryOrchestrator;
use super::limit::Limiter;
use super::merge::RowBlender;
use super::normalize::Normalizer;
use super::sample::Sampler;
use super::sort::Sorter;
use super::validate::{ConfigValidator, resolve_datasets};
use crate::command::resolve::ResolvedConfig;
use crate::command::types::QueryRequest;
use crate::engine::errors::{PipelineError, ValidationErrors};
use crate::engine::executor::{DatasetQuery, DatasetQueryExecutor};
use crate::engine::schema::{DatasetCatalog, DatasetSchema};
use crate::engine::types::DatasetResult;
use crate::shared::datetime::CalendarTimeBucketer;
use crate::shared::response::{BlendResponse, ChartMeta, ChartResponse};

/// One request's trip from wire config to chart payload.
pub struct BlendPipeline<'a> {
    catalog: &'a dyn DatasetCatalog,
    executor: &'a dyn DatasetQueryExecutor,
    options: &'a PipelineOptions,
    bucketer: CalendarTimeBucketer,
}

impl<'a> BlendPipeline<'a> {
    pub fn new(
        catalog: &'a dyn DatasetCatalog,
        executor: &'a dyn DatasetQueryExecutor,
        options: &'a PipelineOptions,
    ) -> Self {
        Self {
            catalog,
            executor,
            options,
            bucketer: CalendarTimeBucketer::new(options.time.clone()),
        }
    }

    pub async fn execute(&self, request: &QueryRequest) -> Result<BlendResponse, PipelineError> {
        let (config, datasets) = self.prepare(request)?;

        let query = DatasetQuery::for_config(&config);
        let results = DatasetQueryOrchestrator::new(self.executor, self.options.dataset_timeout)
            .dispatch(&datasets, &query)
            .await;

        Ok(self.transform(&config, &results))
    }

    /// Resolves the config and the datasets, reporting every problem at once.
    fn prepare(
        &self,
        request: &QueryRequest,
    ) -> Result<(ResolvedConfig, Vec<DatasetSchema>), ValidationErrors> {
        let config = ResolvedConfig::resolve(&request.config);
        let datasets = resolve_datasets(&request.dataset_ids, self.catalog);

        let (config, datasets) = match (config, datasets) {
            (Ok(config), Ok(datasets)) => (config, datasets),
            (config, datasets) => {
                let mut errors = Vec::new();
                if let Err(ValidationErrors(found)) = datasets {
                    errors.extend(found);
                }
                if let Err(ValidationErrors(found)) = config {
                    errors.extend(found);
                }
                return Err(ValidationErrors(errors));
            }
        };

        ConfigValidator::new(&config).validate(&datasets)?;
        debug!(
            target: "chart_blend::pipeline",
            axis = ?config.axis,
            datasets = datasets.len(),
            "Request validated"
        );
        Ok((config, datasets))
    }

    /// Every post-query stage, from blending to sampling.
    pub fn transform(&self, config: &ResolvedConfig, results: &[DatasetResult]) -> BlendResponse {
        let rows = RowBlender::new(config).blend(results);
        if config.is_kpi() {
            info!(target: "chart_blend::pipeline", "Returning single KPI row");
            return BlendResponse::Rows(rows);
        }

        let rows = Normalizer::new(config).apply(rows);
        let rows = Sorter::new(config.sort_by.as_ref()).apply(rows);
        let rows = Limiter::new(config).apply(rows);

        if !config.transform_for_chart {
            info!(
                target: "chart_blend::pipeline",
                rows = rows.len(),
                "Returning blended rows"
            );
            return BlendResponse::Rows(rows);
        }

        let series = ChartTransformer::new(config, &self.bucketer).transform(&rows);
        let original_row_count = series.points.len();
        let data = Sampler::new(self.options.sample_threshold)
            .sample(series.points, series.data_keys.first().map(String::as_str));

        info!(
            target: "chart_blend::pipeline",
            points = data.len(),
            series = series.data_keys.len(),
            "Returning chart response"
        );

        BlendResponse::Chart(ChartResponse {
            meta: ChartMeta {
                transformed: true,
                original_row_count,
                sampled_row_count: data.len(),
                x_axis_is_date: series.x_is_date,
                data_keys: series.data_keys,
            },
            data,
        })
    }
}
