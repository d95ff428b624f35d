use std::fmt;

use super::component::ComponentId;

/// A directed binding from one component's output port to another
/// component's input port.
///
/// Endpoints are referenced by component id and port name rather than by
/// live pointers, so a connection stays valid wherever the graph is moved.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Connection {
    pub source: ComponentId,
    pub source_port: String,
    pub target: ComponentId,
    pub target_port: String,
}

impl Connection {
    pub fn new(
        source: impl Into<String>,
        source_port: impl Into<String>,
        target: impl Into<String>,
        target_port: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            source_port: source_port.into(),
            target: target.into(),
            target_port: target_port.into(),
        }
    }
}

impl fmt::Display for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{} -> {}.{}",
            self.source, self.source_port, self.target, self.target_port
        )
    }
}
