//! Common test utilities for building workflow graphs, executors and sinks.
use kairo::prelude::*;
use serde_json::json;
use std::sync::Mutex;

/// Creates the canonical three-stage pipeline:
/// `L (data) -> S (preprocess) -> M (model)`.
#[allow(dead_code)]
pub fn create_linear_graph() -> Graph {
    let mut graph = Graph::new();
    graph
        .add_component(
            Component::new("L", "Loader", Category::Data)
                .with_outputs(vec![PortSpec::new("data", "dataframe")]),
        )
        .unwrap();
    graph
        .add_component(
            Component::new("S", "Scaler", Category::Preprocess)
                .with_inputs(vec![PortSpec::new("data", "dataframe")])
                .with_outputs(vec![PortSpec::new("data", "dataframe")]),
        )
        .unwrap();
    graph
        .add_component(
            Component::new("M", "Model", Category::Model)
                .with_inputs(vec![PortSpec::new("data", "dataframe")])
                .with_outputs(vec![PortSpec::new("model", "model")]),
        )
        .unwrap();
    graph.connect(Connection::new("L", "data", "S", "data")).unwrap();
    graph.connect(Connection::new("S", "data", "M", "data")).unwrap();
    graph
}

/// Creates a chain `c1 -> c2 -> ... -> cN` of pass-through components with
/// untyped ports.
#[allow(dead_code)]
pub fn create_chain_graph(length: usize) -> Graph {
    let mut graph = Graph::new();
    for i in 1..=length {
        let id = format!("c{}", i);
        let mut component = Component::new(&id, format!("Step {}", i), Category::Preprocess)
            .with_outputs(vec![PortSpec::any("out")]);
        if i > 1 {
            component = component.with_inputs(vec![PortSpec::any("in")]);
        }
        graph.add_component(component).unwrap();
    }
    for i in 1..length {
        graph
            .connect(Connection::new(format!("c{}", i), "out", format!("c{}", i + 1), "in"))
            .unwrap();
    }
    graph
}

/// Creates a diamond: `a -> b -> d`, `a -> c -> d`.
#[allow(dead_code)]
pub fn create_diamond_graph() -> Graph {
    let mut graph = Graph::new();
    graph
        .add_component(
            Component::new("a", "Source", Category::Data)
                .with_outputs(vec![PortSpec::any("out")]),
        )
        .unwrap();
    for id in ["b", "c"] {
        graph
            .add_component(
                Component::new(id, format!("Branch {}", id), Category::Preprocess)
                    .with_inputs(vec![PortSpec::any("in")])
                    .with_outputs(vec![PortSpec::any("out")]),
            )
            .unwrap();
    }
    graph
        .add_component(
            Component::new("d", "Join", Category::Evaluate)
                .with_inputs(vec![PortSpec::any("left"), PortSpec::any("right")]),
        )
        .unwrap();
    graph.connect(Connection::new("a", "out", "b", "in")).unwrap();
    graph.connect(Connection::new("a", "out", "c", "in")).unwrap();
    graph.connect(Connection::new("b", "out", "d", "left")).unwrap();
    graph.connect(Connection::new("c", "out", "d", "right")).unwrap();
    graph
}

/// What a scripted executor should do when it reaches a component.
#[allow(dead_code)]
pub enum Script {
    /// Return these outputs.
    Outputs(AHashMap<String, serde_json::Value>),
    /// Report a failure with this message.
    Fail(String),
    /// Panic mid-execution.
    Panic,
}

/// An executor driven by a per-component script. Components without a
/// script emit one `"<id>:<port>"` string per declared output port. Records
/// the inputs each component received.
#[allow(dead_code)]
pub struct ScriptedExecutor {
    scripts: AHashMap<String, Script>,
    pub seen_inputs: Mutex<Vec<(String, AHashMap<String, serde_json::Value>)>>,
}

#[allow(dead_code)]
impl ScriptedExecutor {
    pub fn new() -> Self {
        Self {
            scripts: AHashMap::new(),
            seen_inputs: Mutex::new(Vec::new()),
        }
    }

    pub fn with_script(mut self, component_id: impl Into<String>, script: Script) -> Self {
        self.scripts.insert(component_id.into(), script);
        self
    }

    pub fn inputs_of(&self, component_id: &str) -> Option<AHashMap<String, serde_json::Value>> {
        self.seen_inputs
            .lock()
            .unwrap()
            .iter()
            .find(|(id, _)| id == component_id)
            .map(|(_, inputs)| inputs.clone())
    }
}

impl ComponentExecutor for ScriptedExecutor {
    fn execute(
        &self,
        component: &Component,
        inputs: &AHashMap<String, serde_json::Value>,
    ) -> Result<AHashMap<String, serde_json::Value>, ComponentError> {
        self.seen_inputs
            .lock()
            .unwrap()
            .push((component.id.clone(), inputs.clone()));
        match self.scripts.get(&component.id) {
            Some(Script::Outputs(outputs)) => Ok(outputs.clone()),
            Some(Script::Fail(message)) => Err(ComponentError::new(message.clone())),
            Some(Script::Panic) => panic!("scripted panic in {}", component.id),
            None => {
                let mut outputs = AHashMap::new();
                for port in &component.outputs {
                    outputs.insert(
                        port.name.clone(),
                        json!(format!("{}:{}", component.id, port.name)),
                    );
                }
                Ok(outputs)
            }
        }
    }
}

/// An executor that raises the stop flag after finishing a given component.
#[allow(dead_code)]
pub struct StoppingExecutor {
    pub stop_after: String,
    pub handle: StopHandle,
}

impl ComponentExecutor for StoppingExecutor {
    fn execute(
        &self,
        component: &Component,
        _inputs: &AHashMap<String, serde_json::Value>,
    ) -> Result<AHashMap<String, serde_json::Value>, ComponentError> {
        if component.id == self.stop_after {
            self.handle.request_stop();
        }
        let mut outputs = AHashMap::new();
        for port in &component.outputs {
            outputs.insert(port.name.clone(), json!(null));
        }
        Ok(outputs)
    }
}

/// A sink that records every update and terminal record it receives.
#[allow(dead_code)]
#[derive(Default)]
pub struct RecordingSink {
    pub updates: Mutex<Vec<ProgressUpdate>>,
    pub finished: Mutex<Vec<RunRecord>>,
}

impl ProgressSink for RecordingSink {
    fn on_update(&self, update: &ProgressUpdate) {
        self.updates.lock().unwrap().push(update.clone());
    }

    fn on_finished(&self, record: &RunRecord) {
        self.finished.lock().unwrap().push(record.clone());
    }
}
