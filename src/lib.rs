//! # Kairo - Workflow Graph Engine
//!
//! **Kairo** is the core engine behind node-based machine-learning pipeline
//! editors: a typed dependency graph of components, structural validation,
//! deterministic topological ordering, and a sequential execution driver
//! with progress reporting and cooperative cancellation.
//!
//! The engine deliberately knows nothing about canvases, widgets or actual
//! ML algorithms. Components are executed through the narrow
//! [`ComponentExecutor`](runner::ComponentExecutor) contract; everything a
//! UI needs to display a run arrives through a
//! [`ProgressSink`](runner::ProgressSink).
//!
//! ## Core Workflow
//!
//! 1. **Build a graph**: add [`Component`](graph::Component)s (by hand or
//!    from the [`Catalog`](catalog::Catalog)) and wire their ports with
//!    [`Graph::connect`](graph::Graph::connect). Invalid connections -
//!    dangling ports, incompatible types, double-bound inputs, cycles - are
//!    rejected before any mutation.
//! 2. **Validate**: [`validate`](validate::validate) reports every
//!    structural problem as data, never as a crash.
//! 3. **Run**: a [`Runner`](runner::Runner) executes components one at a
//!    time in dependency order, hands each component the outputs of its
//!    upstream neighbors, and records per-component results. A failing
//!    component fails the run but keeps all earlier results inspectable.
//! 4. **Save/Load**: [`WorkflowDocument`](document::WorkflowDocument)
//!    round-trips the graph through JSON.
//!
//! ## Quick Start
//!
//! ```rust
//! use kairo::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut graph = Graph::new();
//!     graph.add_component(
//!         Component::new("loader", "CSV Loader", Category::Data)
//!             .with_outputs(vec![PortSpec::new("data", "dataframe")]),
//!     )?;
//!     graph.add_component(
//!         Component::new("scaler", "Standard Scaler", Category::Preprocess)
//!             .with_inputs(vec![PortSpec::new("data", "dataframe")])
//!             .with_outputs(vec![PortSpec::new("data", "dataframe")]),
//!     )?;
//!     graph.connect(Connection::new("loader", "data", "scaler", "data"))?;
//!
//!     assert!(validate(&graph).is_valid());
//!     assert_eq!(execution_order(&graph)?, vec!["loader", "scaler"]);
//!
//!     // No real ML backend attached: simulate the run.
//!     let runner = Runner::new(SimulatedExecutor);
//!     let record = runner.run(&graph, &NullSink, &StopHandle::new());
//!     assert_eq!(record.status, RunStatus::Completed);
//!     assert!(record.results["scaler"].success);
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod document;
pub mod error;
pub mod graph;
pub mod order;
pub mod prelude;
pub mod runner;
pub mod validate;
