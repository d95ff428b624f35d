//! The workflow graph data model: components stored in a flat arena keyed by
//! id, connections as plain id/port references.
//!
//! Mutations are reject-before-mutate: every precondition is checked before
//! any state changes, so a failed operation leaves the graph exactly as it
//! was. The acyclicity invariant is enforced at connection time, which means
//! a graph built exclusively through [`Graph::connect`] can never contain a
//! cycle. Graphs assembled in bulk via [`Graph::from_parts`] skip these
//! checks and must be passed through [`crate::validate::validate`] instead.

pub mod component;
pub mod connection;

pub use component::*;
pub use connection::*;

use ahash::AHashMap;

use crate::error::{GraphError, PortDirection};
use crate::order::DependencyWalker;

/// Owns the component set and the connection set of one workflow.
///
/// Component iteration follows insertion order, which doubles as the
/// deterministic tie-break for topological sorting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graph {
    components: AHashMap<ComponentId, Component>,
    insertion: Vec<ComponentId>,
    connections: Vec<Connection>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from pre-assembled parts without enforcing any
    /// invariants. This is the bulk-load path used by document import;
    /// callers are expected to run validation before executing the result.
    ///
    /// A component repeating an earlier id replaces it.
    pub fn from_parts(components: Vec<Component>, connections: Vec<Connection>) -> Self {
        let mut graph = Self::new();
        for component in components {
            let id = component.id.clone();
            if graph.components.insert(id.clone(), component).is_none() {
                graph.insertion.push(id);
            }
        }
        graph.connections = connections;
        graph
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Adds a component to the graph. Ids are never reused, so a duplicate
    /// is rejected rather than replaced.
    pub fn add_component(&mut self, component: Component) -> Result<(), GraphError> {
        if self.components.contains_key(&component.id) {
            return Err(GraphError::DuplicateComponent {
                id: component.id.clone(),
            });
        }
        self.insertion.push(component.id.clone());
        self.components.insert(component.id.clone(), component);
        Ok(())
    }

    /// Removes a component and, atomically with it, every connection
    /// touching it. Returns the removed component.
    pub fn remove_component(&mut self, id: &str) -> Result<Component, GraphError> {
        let component = self
            .components
            .remove(id)
            .ok_or_else(|| GraphError::ComponentNotFound { id: id.to_string() })?;
        self.insertion.retain(|existing| existing != id);
        self.connections
            .retain(|conn| conn.source != id && conn.target != id);
        Ok(component)
    }

    pub fn component(&self, id: &str) -> Option<&Component> {
        self.components.get(id)
    }

    /// Mutable access to a component, e.g. to adjust its configuration
    /// between runs. Ports and identity should not be changed while
    /// connections reference them.
    pub fn component_mut(&mut self, id: &str) -> Option<&mut Component> {
        self.components.get_mut(id)
    }

    /// Components in insertion order.
    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.insertion.iter().filter_map(|id| self.components.get(id))
    }

    pub(crate) fn ordered_ids(&self) -> &[ComponentId] {
        &self.insertion
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// The connection bound to an input port, if any. Input ports accept at
    /// most one incoming connection, so this is unambiguous.
    pub fn connection_into(&self, target: &str, target_port: &str) -> Option<&Connection> {
        self.connections
            .iter()
            .find(|conn| conn.target == target && conn.target_port == target_port)
    }

    /// Creates a connection after checking, in order: both endpoints exist,
    /// both ports are declared, the port types are compatible, the input
    /// port is still free, and the new edge does not close a cycle.
    pub fn connect(&mut self, connection: Connection) -> Result<(), GraphError> {
        let source = self.components.get(&connection.source).ok_or_else(|| {
            GraphError::ComponentNotFound {
                id: connection.source.clone(),
            }
        })?;
        let source_port = source.output(&connection.source_port).ok_or_else(|| {
            GraphError::PortNotFound {
                component_id: connection.source.clone(),
                port: connection.source_port.clone(),
                direction: PortDirection::Output,
            }
        })?;
        let target = self.components.get(&connection.target).ok_or_else(|| {
            GraphError::ComponentNotFound {
                id: connection.target.clone(),
            }
        })?;
        let target_port = target.input(&connection.target_port).ok_or_else(|| {
            GraphError::PortNotFound {
                component_id: connection.target.clone(),
                port: connection.target_port.clone(),
                direction: PortDirection::Input,
            }
        })?;

        if !source_port.is_compatible_with(target_port) {
            return Err(GraphError::TypeMismatch {
                source_id: connection.source.clone(),
                source_port: connection.source_port.clone(),
                source_type: source_port.data_type.clone(),
                target_id: connection.target.clone(),
                target_port: connection.target_port.clone(),
                target_type: target_port.data_type.clone(),
            });
        }

        if self
            .connection_into(&connection.target, &connection.target_port)
            .is_some()
        {
            return Err(GraphError::InputAlreadyBound {
                target_id: connection.target.clone(),
                target_port: connection.target_port.clone(),
            });
        }

        // The new edge source -> target closes a cycle exactly when the
        // source already depends on the target (self-loops included).
        let walker = DependencyWalker::new(self);
        if walker.depends_on(&connection.source, &connection.target) {
            return Err(GraphError::WouldCycle {
                source_id: connection.source.clone(),
                target_id: connection.target.clone(),
            });
        }

        self.connections.push(connection);
        Ok(())
    }

    /// Removes one connection identified by its endpoints.
    pub fn disconnect(&mut self, connection: &Connection) -> Result<(), GraphError> {
        let position = self
            .connections
            .iter()
            .position(|existing| existing == connection)
            .ok_or_else(|| GraphError::ConnectionNotFound {
                source_id: connection.source.clone(),
                source_port: connection.source_port.clone(),
                target_id: connection.target.clone(),
                target_port: connection.target_port.clone(),
            })?;
        self.connections.remove(position);
        Ok(())
    }
}
