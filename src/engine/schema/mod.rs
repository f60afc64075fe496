pub mod registry;

#[cfg(test)]
mod registry_test;

pub use registry::{DatasetCatalog, DatasetSchema, SchemaRegistry};
