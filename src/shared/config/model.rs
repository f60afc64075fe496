use serde::Deserialize;

use crate::shared::datetime::TimeConfig;

#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub time: TimeConfig,
}

#[derive(Debug, Deserialize)]
pub struct PipelineConfig {
    /// Point count above which chart series are downsampled
    #[serde(default = "default_sample_threshold")]
    pub sample_threshold: usize,
    /// Deadline applied to each dataset query; unset means no deadline
    pub dataset_timeout_ms: Option<u64>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            sample_threshold: default_sample_threshold(),
            dataset_timeout_ms: None,
        }
    }
}

fn default_sample_threshold() -> usize {
    1000
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
    #[serde(default = "default_stdout_level")]
    pub stdout_level: String,
    #[serde(default = "default_file_level")]
    pub file_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: default_log_dir(),
            stdout_level: default_stdout_level(),
            file_level: default_file_level(),
        }
    }
}

fn default_log_dir() -> String {
    "logs".to_string()
}

fn default_stdout_level() -> String {
    "info".to_string()
}

fn default_file_level() -> String {
    "debug".to_string()
}

use std::env;

pub fn load_settings() -> Result<Settings, config::ConfigError> {
    let config_path = env::var("CHART_BLEND_CONFIG").unwrap_or_else(|_| "config".to_string());

    let settings: Settings = config::Config::builder()
        .add_source(config::File::with_name(&config_path).required(false))
        .add_source(config::Environment::with_prefix("CHART_BLEND").separator("__"))
        .build()?
        .try_deserialize()?;

    Ok(settings)
}
