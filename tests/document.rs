//! Tests for the JSON workflow document format and file round-trips.
mod common;
use common::*;
use kairo::prelude::*;
use serde_json::json;

#[test]
fn test_round_trip_preserves_graph() {
    let mut graph = create_linear_graph();
    graph
        .component_mut("L")
        .unwrap()
        .properties
        .insert("file_path".to_string(), json!("train.csv"));
    graph.component_mut("L").unwrap().position = (120.0, 48.5);

    let document = WorkflowDocument::from_graph(&graph);
    let restored = document.into_graph();

    assert_eq!(restored, graph);
    assert!(validate(&restored).is_valid());
}

#[test]
fn test_round_trip_keeps_execution_order_stable() {
    let graph = create_diamond_graph();
    let before = execution_order(&graph).unwrap();

    let json = WorkflowDocument::from_graph(&graph).to_json().unwrap();
    let restored = WorkflowDocument::from_json(&json).unwrap().into_graph();

    assert_eq!(execution_order(&restored).unwrap(), before);
}

#[test]
fn test_json_field_names() {
    let graph = create_linear_graph();
    let json = WorkflowDocument::from_graph(&graph).to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["components"][0]["id"], json!("L"));
    assert_eq!(value["components"][0]["type"], json!("data"));
    assert_eq!(value["components"][1]["type"], json!("preprocess"));
    assert_eq!(value["connections"][0]["start_component"], json!("L"));
    assert_eq!(value["connections"][0]["start_port"], json!("data"));
    assert_eq!(value["connections"][0]["end_component"], json!("S"));
    assert_eq!(value["connections"][0]["end_port"], json!("data"));
}

#[test]
fn test_save_and_load_file() {
    let graph = create_linear_graph();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("workflow.json");

    WorkflowDocument::from_graph(&graph).save(&path).unwrap();
    let restored = WorkflowDocument::from_file(&path).unwrap().into_graph();

    assert_eq!(restored, graph);
}

#[test]
fn test_load_missing_file_fails() {
    let result = WorkflowDocument::from_file("/nonexistent/workflow.json");
    assert!(matches!(result, Err(DocumentError::FileRead { .. })));
}

#[test]
fn test_malformed_json_rejected() {
    let result = WorkflowDocument::from_json("{\"components\": [");
    assert!(matches!(result, Err(DocumentError::JsonParse(_))));
}

#[test]
fn test_minimal_document_parses_with_defaults() {
    let document = WorkflowDocument::from_json(
        r#"{
            "components": [
                {"id": "n1", "type": "data", "name": "Source"}
            ]
        }"#,
    )
    .unwrap();

    let graph = document.into_graph();
    let component = graph.component("n1").unwrap();
    assert_eq!(component.category, Category::Data);
    assert_eq!(component.position, (0.0, 0.0));
    assert!(component.properties.is_empty());
    assert!(component.inputs.is_empty());
    assert!(component.outputs.is_empty());
}

#[test]
fn test_document_with_dangling_connection_loads_but_fails_validation() {
    let document = WorkflowDocument::from_json(
        r#"{
            "components": [
                {
                    "id": "L",
                    "type": "data",
                    "name": "Loader",
                    "outputs": [{"name": "data", "data_type": "dataframe"}]
                }
            ],
            "connections": [
                {
                    "start_component": "L",
                    "start_port": "data",
                    "end_component": "ghost",
                    "end_port": "in"
                }
            ]
        }"#,
    )
    .unwrap();

    // Loading takes the document at face value; validation rejects it.
    let graph = document.into_graph();
    assert_eq!(graph.connections().len(), 1);

    let report = validate(&graph);
    assert!(
        report
            .issues
            .iter()
            .any(|issue| issue.kind == IssueKind::DanglingConnection)
    );
}

#[test]
fn test_unknown_category_rejected() {
    let result = WorkflowDocument::from_json(
        r#"{"components": [{"id": "n1", "type": "quantum", "name": "Q"}]}"#,
    );
    assert!(matches!(result, Err(DocumentError::JsonParse(_))));
}
