pub use super::factories::{
    DatasetResultFactory, QueryConfigFactory, SchemaRegistryFactory, StubExecutor,
};

pub struct Factory;

impl Factory {
    pub fn query_config() -> QueryConfigFactory {
        QueryConfigFactory::new()
    }

    pub fn dataset(name: &str) -> DatasetResultFactory {
        DatasetResultFactory::new(name)
    }

    pub fn schema_registry() -> SchemaRegistryFactory {
        SchemaRegistryFactory::new()
    }

    pub fn executor() -> StubExecutor {
        StubExecutor::new()
    }
}
