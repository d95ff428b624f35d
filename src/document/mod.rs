//! The JSON workflow document: the save/load boundary of the engine.
//!
//! A document has two top-level collections, `components` and `connections`.
//! Port declarations are stored alongside each component so a document is
//! self-contained; round-tripping a graph through [`WorkflowDocument`]
//! reproduces its components, connections, properties and insertion order,
//! which keeps topological tie-breaking stable across save/load.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::DocumentError;
use crate::graph::{Category, Component, Connection, Graph, PortSpec};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub category: Category,
    pub name: String,
    #[serde(default)]
    pub position: (f64, f64),
    #[serde(default)]
    pub properties: AHashMap<String, serde_json::Value>,
    #[serde(default)]
    pub inputs: Vec<PortSpec>,
    #[serde(default)]
    pub outputs: Vec<PortSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionEntry {
    pub start_component: String,
    pub start_port: String,
    pub end_component: String,
    pub end_port: String,
}

/// A complete workflow in its serialized form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowDocument {
    #[serde(default)]
    pub components: Vec<ComponentEntry>,
    #[serde(default)]
    pub connections: Vec<ConnectionEntry>,
}

impl WorkflowDocument {
    /// Serializes a graph, preserving component insertion order.
    pub fn from_graph(graph: &Graph) -> Self {
        Self {
            components: graph
                .components()
                .map(|component| ComponentEntry {
                    id: component.id.clone(),
                    category: component.category,
                    name: component.name.clone(),
                    position: component.position,
                    properties: component.properties.clone(),
                    inputs: component.inputs.clone(),
                    outputs: component.outputs.clone(),
                })
                .collect(),
            connections: graph
                .connections()
                .iter()
                .map(|conn| ConnectionEntry {
                    start_component: conn.source.clone(),
                    start_port: conn.source_port.clone(),
                    end_component: conn.target.clone(),
                    end_port: conn.target_port.clone(),
                })
                .collect(),
        }
    }

    /// Reconstructs the graph described by this document.
    ///
    /// The document is taken at face value; run
    /// [`crate::validate::validate`] on the result before executing it.
    pub fn into_graph(self) -> Graph {
        let components = self
            .components
            .into_iter()
            .map(|entry| {
                let mut component = Component::new(entry.id, entry.name, entry.category)
                    .with_inputs(entry.inputs)
                    .with_outputs(entry.outputs)
                    .with_position(entry.position.0, entry.position.1);
                component.properties = entry.properties;
                component
            })
            .collect();
        let connections = self
            .connections
            .into_iter()
            .map(|entry| {
                Connection::new(
                    entry.start_component,
                    entry.start_port,
                    entry.end_component,
                    entry.end_port,
                )
            })
            .collect();
        Graph::from_parts(components, connections)
    }

    pub fn to_json(&self) -> Result<String, DocumentError> {
        serde_json::to_string_pretty(self).map_err(|e| DocumentError::JsonWrite(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        serde_json::from_str(json).map_err(|e| DocumentError::JsonParse(e.to_string()))
    }

    /// Writes the document to a file as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), DocumentError> {
        let path = path.as_ref();
        let json = self.to_json()?;
        fs::write(path, json).map_err(|e| DocumentError::FileWrite {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Reads a document from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| DocumentError::FileRead {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&json)
    }
}
