use crate::engine::schema::{DatasetCatalog, DatasetSchema, SchemaRegistry};

#[test]
fn register_and_describe_dataset() {
    let mut registry = SchemaRegistry::new();
    registry.register(DatasetSchema::new("ds-1", "Orders", ["month", "sales"]));

    let schema = registry.describe("ds-1").expect("registered schema");
    assert_eq!(schema.name, "Orders");
    assert!(schema.has_column("sales"));
    assert!(!schema.has_column("profit"));
    assert!(registry.describe("ds-2").is_none());
}

#[test]
fn register_replaces_existing_schema() {
    let mut registry = SchemaRegistry::new();
    assert!(
        registry
            .register(DatasetSchema::new("ds-1", "Orders", ["sales"]))
            .is_none()
    );

    let previous = registry
        .register(DatasetSchema::new("ds-1", "Orders v2", ["sales", "profit"]))
        .expect("previous schema returned");

    assert_eq!(previous.name, "Orders");
    assert_eq!(registry.len(), 1);
    assert!(registry.get("ds-1").expect("schema").has_column("profit"));
}
