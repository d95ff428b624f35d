use ahash::AHashMap;
use serde_json::json;

use super::ComponentExecutor;
use crate::error::ComponentError;
use crate::graph::Component;

/// An executor that fabricates outputs instead of calling a real ML
/// backend.
///
/// Every declared output port receives a small JSON object tagged with the
/// producing component and the port's data type, so a complete pipeline can
/// be wired up and run end to end before any backend exists. Deterministic
/// for a given graph.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedExecutor;

impl ComponentExecutor for SimulatedExecutor {
    fn execute(
        &self,
        component: &Component,
        inputs: &AHashMap<String, serde_json::Value>,
    ) -> Result<AHashMap<String, serde_json::Value>, ComponentError> {
        let mut outputs = AHashMap::new();
        for port in &component.outputs {
            outputs.insert(
                port.name.clone(),
                json!({
                    "simulated": true,
                    "component": component.id,
                    "category": component.category.to_string(),
                    "data_type": port.data_type,
                    "inputs_received": inputs.len(),
                }),
            );
        }
        Ok(outputs)
    }
}
