use thiserror::Error;

/// Errors that can occur while mutating a workflow graph.
///
/// Every mutation checks its preconditions before touching any state, so a
/// returned error guarantees the graph is unchanged.
#[derive(Error, Debug, Clone)]
pub enum GraphError {
    #[error("a component with id '{id}' already exists in the graph")]
    DuplicateComponent { id: String },

    #[error("component '{id}' does not exist in the graph")]
    ComponentNotFound { id: String },

    #[error("component '{component_id}' has no {direction} port named '{port}'")]
    PortNotFound {
        component_id: String,
        port: String,
        direction: PortDirection,
    },

    #[error(
        "port types are incompatible: {source_id}.{source_port} is '{source_type}' but {target_id}.{target_port} is '{target_type}'"
    )]
    TypeMismatch {
        source_id: String,
        source_port: String,
        source_type: String,
        target_id: String,
        target_port: String,
        target_type: String,
    },

    #[error("input port {target_id}.{target_port} already has an incoming connection")]
    InputAlreadyBound {
        target_id: String,
        target_port: String,
    },

    #[error("connecting '{source_id}' to '{target_id}' would create a circular dependency")]
    WouldCycle {
        source_id: String,
        target_id: String,
    },

    #[error("no connection exists from {source_id}.{source_port} to {target_id}.{target_port}")]
    ConnectionNotFound {
        source_id: String,
        source_port: String,
        target_id: String,
        target_port: String,
    },
}

/// Which side of a component a port lives on. Used in error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortDirection {
    Input,
    Output,
}

impl std::fmt::Display for PortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PortDirection::Input => write!(f, "input"),
            PortDirection::Output => write!(f, "output"),
        }
    }
}

/// A cycle found while linearizing the dependency graph.
///
/// Names the component at which the traversal re-entered its own path.
#[derive(Error, Debug, Clone)]
#[error("circular dependency detected at component '{component_id}'")]
pub struct CycleError {
    pub component_id: String,
}

/// Failure signaled by a component's execution contract.
///
/// The engine treats the contract as opaque; all it keeps from a failed
/// component is this message.
#[derive(Error, Debug, Clone)]
#[error("{message}")]
pub struct ComponentError {
    pub message: String,
}

impl ComponentError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Faults raised by the execution driver itself, as opposed to failures
/// reported by components.
#[derive(Error, Debug, Clone)]
pub enum ExecutionError {
    /// The upstream component feeding an input port has no recorded result.
    /// Unreachable with a correct topological order; hitting it means the
    /// engine itself is broken, so the run is failed loudly.
    #[error(
        "input '{port}' of component '{component_id}' has no result from upstream component '{upstream_id}'"
    )]
    MissingUpstreamResult {
        component_id: String,
        port: String,
        upstream_id: String,
    },

    /// A component named by the execution order vanished from the graph.
    /// Only possible if the graph was mutated during a run, which callers
    /// must prevent.
    #[error("component '{component_id}' disappeared from the graph mid-run")]
    ComponentVanished { component_id: String },
}

/// Errors that can occur while looking up or instantiating catalog entries.
#[derive(Error, Debug, Clone)]
pub enum CatalogError {
    #[error("unknown component type: '{type_name}'")]
    UnknownComponentType { type_name: String },
}

/// Errors that can occur while reading or writing workflow documents.
#[derive(Error, Debug, Clone)]
pub enum DocumentError {
    #[error("failed to parse workflow JSON: {0}")]
    JsonParse(String),

    #[error("failed to serialize workflow to JSON: {0}")]
    JsonWrite(String),

    #[error("could not read workflow file '{path}': {message}")]
    FileRead { path: String, message: String },

    #[error("could not write workflow file '{path}': {message}")]
    FileWrite { path: String, message: String },
}
