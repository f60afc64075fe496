use crate::engine::schema::{DatasetSchema, SchemaRegistry};

pub struct SchemaRegistryFactory {
    registry: SchemaRegistry,
}

impl SchemaRegistryFactory {
    pub fn new() -> Self {
        Self {
            registry: SchemaRegistry::new(),
        }
    }

    /// Registers `name` under id `ds-<lowercase name>`.
    pub fn with_dataset(mut self, name: &str, columns: &[&str]) -> Self {
        self.registry.register(DatasetSchema::new(
            format!("ds-{}", name.to_lowercase()),
            name,
            columns.iter().copied(),
        ));
        self
    }

    pub fn create(self) -> SchemaRegistry {
        self.registry
    }
}
