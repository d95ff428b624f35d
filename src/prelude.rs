//! Prelude module for convenient imports
//!
//! Re-exports the most commonly used types and functions so downstream code
//! can pull in the whole engine surface with a single `use`.
//!
//! # Example
//!
//! ```rust,no_run
//! use kairo::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let document = WorkflowDocument::from_file("path/to/workflow.json")?;
//! let graph = document.into_graph();
//!
//! let report = validate(&graph);
//! if !report.is_valid() {
//!     eprintln!("workflow is not executable: {}", report.summary());
//! }
//!
//! let runner = Runner::new(SimulatedExecutor);
//! let record = runner.run(&graph, &NullSink, &StopHandle::new());
//! println!("run {} finished: {}", record.id, record.status);
//! # Ok(())
//! # }
//! ```

// Graph data model
pub use crate::graph::{ANY_TYPE, Category, Component, ComponentId, Connection, Graph, PortSpec};

// Validation and ordering
pub use crate::order::execution_order;
pub use crate::validate::{IssueKind, ValidationIssue, ValidationReport, validate};

// Execution
pub use crate::runner::{
    ComponentExecutor, ComponentResult, NullSink, ProgressSink, ProgressUpdate, RunRecord,
    RunStatus, Runner, SimulatedExecutor, StopHandle,
};

// Catalog and persistence
pub use crate::catalog::{Catalog, ComponentSpec};
pub use crate::document::WorkflowDocument;

// Error types
pub use crate::error::{
    CatalogError, ComponentError, CycleError, DocumentError, ExecutionError, GraphError,
};

// Map type used throughout the public API
pub use ahash::AHashMap;

// Result type alias for convenience. The error parameter defaults to a
// boxed error but can be overridden, so the alias coexists with code that
// names a concrete error type.
pub type Result<T, E = Box<dyn std::error::Error>> = std::result::Result<T, E>;
