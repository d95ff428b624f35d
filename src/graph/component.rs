use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a component within a graph. Assigned at creation and
/// never reused.
pub type ComponentId = String;

/// Port type tag that is compatible with every other type.
pub const ANY_TYPE: &str = "any";

/// The closed set of pipeline stages a component can belong to.
///
/// The category is decided at construction time and never inferred from a
/// component's display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Data,
    Preprocess,
    Model,
    Evaluate,
    Output,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Category::Data => "data",
            Category::Preprocess => "preprocess",
            Category::Model => "model",
            Category::Evaluate => "evaluate",
            Category::Output => "output",
        };
        write!(f, "{}", tag)
    }
}

/// A named, typed slot through which data enters or leaves a component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortSpec {
    pub name: String,
    pub data_type: String,
}

impl PortSpec {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
        }
    }

    /// A port accepting or producing any data type.
    pub fn any(name: impl Into<String>) -> Self {
        Self::new(name, ANY_TYPE)
    }

    /// Two ports are compatible unless both declare concrete, unequal types.
    pub fn is_compatible_with(&self, other: &PortSpec) -> bool {
        self.data_type == ANY_TYPE || other.data_type == ANY_TYPE || self.data_type == other.data_type
    }
}

/// A unit of work in the pipeline: typed input/output ports plus an owned
/// configuration map.
///
/// The `position` field carries canvas coordinates through save/load for the
/// benefit of graphical editors; the engine itself never interprets it.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub id: ComponentId,
    pub name: String,
    pub category: Category,
    pub inputs: Vec<PortSpec>,
    pub outputs: Vec<PortSpec>,
    pub properties: AHashMap<String, serde_json::Value>,
    pub position: (f64, f64),
}

impl Component {
    pub fn new(id: impl Into<String>, name: impl Into<String>, category: Category) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            inputs: Vec::new(),
            outputs: Vec::new(),
            properties: AHashMap::new(),
            position: (0.0, 0.0),
        }
    }

    pub fn with_inputs(mut self, inputs: Vec<PortSpec>) -> Self {
        self.inputs = inputs;
        self
    }

    pub fn with_outputs(mut self, outputs: Vec<PortSpec>) -> Self {
        self.outputs = outputs;
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.position = (x, y);
        self
    }

    /// Looks up a declared input port by name.
    pub fn input(&self, name: &str) -> Option<&PortSpec> {
        self.inputs.iter().find(|p| p.name == name)
    }

    /// Looks up a declared output port by name.
    pub fn output(&self, name: &str) -> Option<&PortSpec> {
        self.outputs.iter().find(|p| p.name == name)
    }
}
