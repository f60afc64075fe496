pub mod global;
pub mod model;

pub use global::CONFIG;
pub use model::{LoggingConfig, PipelineConfig, Settings, load_settings};
