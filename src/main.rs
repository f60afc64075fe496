use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use chart_blend::command::handlers::blend::{PipelineOptions, handle_json};
use chart_blend::engine::executor::InMemoryDatasets;
use chart_blend::logging;
use chart_blend::shared::config::CONFIG;
use chart_blend::shared::datetime::CalendarTimeBucketer;
use chart_blend::shared::response::{JsonRenderer, Renderer};

#[derive(Parser)]
#[command(name = "chart_blend")]
#[command(about = "Blend dataset query results into a chart-ready series", long_about = None)]
struct Args {
    /// JSON request body: `{ datasetIds, config }`
    #[arg(short, long)]
    request: PathBuf,

    /// JSON fixture file: `[{ id, name, columns?, rows }]`
    #[arg(short, long)]
    datasets: PathBuf,

    /// Pretty-print the response
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init()?;

    let options = PipelineOptions::from_settings(&CONFIG);
    let raw_request = fs::read_to_string(&args.request)
        .with_context(|| format!("reading request {}", args.request.display()))?;
    let raw_datasets = fs::read_to_string(&args.datasets)
        .with_context(|| format!("reading datasets {}", args.datasets.display()))?;

    let datasets = Arc::new(
        InMemoryDatasets::from_json_str(&raw_datasets, CalendarTimeBucketer::new(options.time.clone()))
            .context("parsing dataset fixtures")?,
    );
    info!(
        target: "chart_blend::cli",
        datasets = datasets.registry().len(),
        "Loaded dataset fixtures"
    );

    let renderer = JsonRenderer::new(args.pretty);
    let result = handle_json(&raw_request, datasets.clone(), datasets, options).await;

    let mut stdout = std::io::stdout().lock();
    match result {
        Ok(response) => {
            stdout.write_all(&renderer.render(&response))?;
            writeln!(stdout)?;
            Ok(())
        }
        Err(err) => {
            stdout.write_all(&renderer.render_error(&err))?;
            writeln!(stdout)?;
            Err(err.into())
        }
    }
}
