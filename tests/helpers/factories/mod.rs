pub mod dataset_result_factory;
pub mod query_config_factory;
pub mod schema_registry_factory;
pub mod stub_executor;

pub use dataset_result_factory::{DatasetResultFactory, rows};
pub use query_config_factory::QueryConfigFactory;
pub use schema_registry_factory::SchemaRegistryFactory;
pub use stub_executor::StubExecutor;
