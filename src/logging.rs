use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

use crate::shared::config::CONFIG;
use tracing::info;

pub fn init() -> anyhow::Result<()> {
    let cfg = &CONFIG.logging;
    let stdout_filter = cfg
        .stdout_level
        .parse::<tracing_subscriber::filter::LevelFilter>()?;
    let file_filter = cfg
        .file_level
        .parse::<tracing_subscriber::filter::LevelFilter>()?;

    // stdout is reserved for the rendered response
    let stdout_layer = fmt::layer()
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(stdout_filter);

    let file_appender = tracing_appender::rolling::daily(&cfg.log_dir, "chart_blend.log");
    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_writer(file_appender)
        .with_filter(file_filter);

    tracing_subscriber::registry()
        .with(stdout_layer)
        .with(file_layer)
        .try_init()?;

    info!(target: "chart_blend::logging", log_dir = %cfg.log_dir, "Logging initialized");
    Ok(())
}

#[cfg(test)]
pub fn init_for_tests() {
    use std::sync::Once;
    use tracing_subscriber::EnvFilter;

    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let filter = EnvFilter::from_default_env()
            .add_directive("chart_blend=debug".parse().expect("static directive"));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}
