//! The execution driver: runs components one at a time in dependency order,
//! threading outputs forward along connections.
//!
//! The driver performs no internal parallelism. Callers that want a
//! responsive UI run [`Runner::run`] on a worker thread and observe it
//! through the [`ProgressSink`]; the [`StopHandle`] crosses threads to
//! request cooperative cancellation. The graph must not be mutated while a
//! run over it is active.

pub mod progress;
pub mod record;
pub mod simulated;

pub use progress::*;
pub use record::*;
pub use simulated::*;

use ahash::AHashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, error, info, warn};

use crate::error::{ComponentError, ExecutionError};
use crate::graph::{Component, Graph};
use crate::order::execution_order;
use crate::validate::validate;

/// The execution contract a component fulfills: a mapping from input-port
/// names to values in, a mapping from output-port names to values out.
///
/// The engine treats implementations as opaque. A panic escaping `execute`
/// is caught at the per-component boundary and converted into a failure
/// result, so a misbehaving component fails its run without crashing the
/// driver.
pub trait ComponentExecutor: Send + Sync {
    fn execute(
        &self,
        component: &Component,
        inputs: &AHashMap<String, serde_json::Value>,
    ) -> Result<AHashMap<String, serde_json::Value>, ComponentError>;
}

/// Cooperative cancellation flag for a run.
///
/// Clones share the flag, so one copy can travel to another thread while
/// the driver polls the original between component steps. A component
/// already executing is never interrupted; at most one component finishes
/// after the request.
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    flag: Arc<AtomicBool>,
}

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_stop(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_stop_requested(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Drives graph execution with an injected component executor.
pub struct Runner<E: ComponentExecutor> {
    executor: E,
}

impl<E: ComponentExecutor> Runner<E> {
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    /// Consumes the runner and hands back the executor, e.g. to inspect
    /// state it accumulated across runs.
    pub fn into_executor(self) -> E {
        self.executor
    }

    /// Executes every component of `graph` in topological order and returns
    /// the completed run record.
    ///
    /// The run fails fast if validation or ordering rejects the graph, fails
    /// with partial results retained if a component reports an error, and
    /// stops at the next component boundary after `stop` is raised. The
    /// order is computed once at run start and never recomputed.
    pub fn run(&self, graph: &Graph, sink: &dyn ProgressSink, stop: &StopHandle) -> RunRecord {
        let mut record = RunRecord::new();

        let report = validate(graph);
        if !report.is_valid() {
            warn!(run_id = %record.id, "workflow rejected by validation: {}", report.summary());
            return self.finish(record, RunStatus::Failed, Some(report.summary()), sink);
        }

        let order = match execution_order(graph) {
            Ok(order) => order,
            Err(cycle) => {
                warn!(run_id = %record.id, "workflow rejected by ordering: {}", cycle);
                return self.finish(record, RunStatus::Failed, Some(cycle.to_string()), sink);
            }
        };

        let total = order.len();
        info!(run_id = %record.id, components = total, "starting workflow run");
        record.status = RunStatus::Running;
        sink.on_update(&ProgressUpdate {
            run_id: record.id.clone(),
            status: RunStatus::Running,
            progress: 0.0,
            current_component: None,
        });

        for (index, id) in order.iter().enumerate() {
            if stop.is_stop_requested() {
                info!(run_id = %record.id, completed = record.results.len(), "stop requested, ending run");
                return self.finish(record, RunStatus::Stopped, None, sink);
            }

            let Some(component) = graph.component(id) else {
                let fault = ExecutionError::ComponentVanished {
                    component_id: id.clone(),
                };
                error!(run_id = %record.id, "{}", fault);
                return self.finish(record, RunStatus::Failed, Some(fault.to_string()), sink);
            };

            debug!(run_id = %record.id, component = %id, name = %component.name, "executing component");
            sink.on_update(&ProgressUpdate {
                run_id: record.id.clone(),
                status: RunStatus::Running,
                progress: record.progress,
                current_component: Some(component.name.clone()),
            });

            let inputs = match gather_inputs(graph, component, &record) {
                Ok(inputs) => inputs,
                Err(fault) => {
                    // Internal invariant violation: fatal to the run, never
                    // to the process.
                    error!(run_id = %record.id, "{}", fault);
                    return self.finish(record, RunStatus::Failed, Some(fault.to_string()), sink);
                }
            };

            let result = self.execute_one(component, &inputs);
            let success = result.success;
            let failure = result.error.clone();
            record.results.insert(id.clone(), result);
            record.progress = (index + 1) as f64 / total as f64;

            sink.on_update(&ProgressUpdate {
                run_id: record.id.clone(),
                status: RunStatus::Running,
                progress: record.progress,
                current_component: Some(component.name.clone()),
            });

            if !success {
                let message = format!(
                    "component '{}' failed: {}",
                    component.name,
                    failure.unwrap_or_default()
                );
                warn!(run_id = %record.id, "{}", message);
                return self.finish(record, RunStatus::Failed, Some(message), sink);
            }
        }

        record.progress = 1.0;
        self.finish(record, RunStatus::Completed, None, sink)
    }

    /// Invokes the execution contract with a panic boundary around it.
    fn execute_one(
        &self,
        component: &Component,
        inputs: &AHashMap<String, serde_json::Value>,
    ) -> ComponentResult {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            self.executor.execute(component, inputs)
        }));
        match outcome {
            Ok(Ok(outputs)) => ComponentResult::succeeded(outputs),
            Ok(Err(err)) => ComponentResult::failed(err.to_string()),
            Err(payload) => ComponentResult::failed(panic_message(payload)),
        }
    }

    fn finish(
        &self,
        mut record: RunRecord,
        status: RunStatus,
        error: Option<String>,
        sink: &dyn ProgressSink,
    ) -> RunRecord {
        debug_assert!(status.is_terminal());
        record.status = status;
        record.error = error;
        info!(
            run_id = %record.id,
            status = %record.status,
            results = record.results.len(),
            "run finished"
        );
        sink.on_finished(&record);
        record
    }
}

/// Collects the input values for a component from the results of its
/// already-executed upstream neighbors. Unbound input ports are simply
/// absent from the map; the execution contract decides whether that is
/// acceptable.
fn gather_inputs(
    graph: &Graph,
    component: &Component,
    record: &RunRecord,
) -> Result<AHashMap<String, serde_json::Value>, ExecutionError> {
    let mut inputs = AHashMap::new();
    for port in &component.inputs {
        let Some(conn) = graph.connection_into(&component.id, &port.name) else {
            continue;
        };
        let upstream = record.results.get(&conn.source).ok_or_else(|| {
            ExecutionError::MissingUpstreamResult {
                component_id: component.id.clone(),
                port: port.name.clone(),
                upstream_id: conn.source.clone(),
            }
        })?;
        if let Some(value) = upstream.outputs.get(&conn.source_port) {
            inputs.insert(port.name.clone(), value.clone());
        }
    }
    Ok(inputs)
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "component panicked".to_string()
    }
}
