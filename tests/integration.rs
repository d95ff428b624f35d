//! End-to-end tests: catalog-built pipelines wired, validated, run and
//! round-tripped.
use kairo::prelude::*;
use serde_json::json;

#[test]
fn test_instantiate_copies_spec() {
    let catalog = Catalog::with_builtins();

    let component = catalog.instantiate("standard_scaler", "scaler-1").unwrap();

    assert_eq!(component.id, "scaler-1");
    assert_eq!(component.name, "Standard Scaler");
    assert_eq!(component.category, Category::Preprocess);
    assert!(component.input("data").is_some());
    assert!(component.output("data").is_some());
    assert_eq!(component.properties["with_mean"], json!(true));
}

#[test]
fn test_instantiated_components_do_not_share_properties() {
    let catalog = Catalog::with_builtins();
    let mut first = catalog.instantiate("csv_loader", "a").unwrap();
    let second = catalog.instantiate("csv_loader", "b").unwrap();

    first
        .properties
        .insert("file_path".to_string(), json!("a.csv"));

    assert_eq!(second.properties["file_path"], json!(""));
}

#[test]
fn test_unknown_type_rejected() {
    let catalog = Catalog::with_builtins();
    let result = catalog.instantiate("quantum_annealer", "q1");
    assert!(
        matches!(result, Err(CatalogError::UnknownComponentType { type_name }) if type_name == "quantum_annealer")
    );
}

#[test]
fn test_type_names_grouped_by_category() {
    let catalog = Catalog::with_builtins();

    let models: Vec<&str> = catalog.type_names_in(Category::Model).collect();
    assert_eq!(
        models,
        vec!["linear_regression", "logistic_regression", "random_forest", "decision_tree"]
    );

    // Every listed name resolves to a spec of the right category.
    for name in catalog.type_names() {
        assert!(catalog.spec(name).is_some());
    }
}

#[test]
fn test_register_replaces_existing_spec() {
    let mut catalog = Catalog::with_builtins();
    let count = catalog.type_names().count();

    catalog.register(
        ComponentSpec::new("csv_loader", "CSV Loader v2", Category::Data)
            .with_outputs(vec![PortSpec::new("data", "dataframe")]),
    );

    assert_eq!(catalog.type_names().count(), count);
    assert_eq!(catalog.spec("csv_loader").unwrap().display_name, "CSV Loader v2");
}

#[test]
fn test_catalog_pipeline_end_to_end() {
    let catalog = Catalog::with_builtins();
    let mut graph = Graph::new();

    for (type_name, id) in [
        ("csv_loader", "loader"),
        ("standard_scaler", "scaler"),
        ("train_test_split", "split"),
        ("random_forest", "forest"),
        ("accuracy_score", "accuracy"),
        ("generate_report", "report"),
    ] {
        graph
            .add_component(catalog.instantiate(type_name, id).unwrap())
            .unwrap();
    }

    graph.connect(Connection::new("loader", "data", "scaler", "data")).unwrap();
    graph.connect(Connection::new("scaler", "data", "split", "data")).unwrap();
    graph.connect(Connection::new("split", "train", "forest", "train")).unwrap();
    graph.connect(Connection::new("forest", "model", "accuracy", "model")).unwrap();
    graph.connect(Connection::new("split", "test", "accuracy", "test")).unwrap();
    graph.connect(Connection::new("accuracy", "metrics", "report", "metrics")).unwrap();

    assert!(validate(&graph).is_valid());
    assert_eq!(
        execution_order(&graph).unwrap(),
        vec!["loader", "scaler", "split", "forest", "accuracy", "report"]
    );

    let record = Runner::new(SimulatedExecutor).run(&graph, &NullSink, &StopHandle::new());
    assert_eq!(record.status, RunStatus::Completed);
    assert_eq!(record.results.len(), 6);
    assert!(record.results.values().all(|result| result.success));

    // The run survives a document round-trip of the same pipeline.
    let restored = WorkflowDocument::from_graph(&graph).into_graph();
    let record = Runner::new(SimulatedExecutor).run(&restored, &NullSink, &StopHandle::new());
    assert_eq!(record.status, RunStatus::Completed);
}
