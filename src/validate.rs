//! Whole-graph structural validation.
//!
//! Validation is pure and total: it never mutates the graph, always
//! terminates, and reports findings as data rather than errors. Graphs built
//! incrementally through [`Graph::connect`] uphold most of these invariants
//! already; the full check matters for graphs assembled in bulk, e.g. loaded
//! from a workflow document.

use itertools::Itertools;
use serde::Serialize;

use crate::graph::{ANY_TYPE, ComponentId, Graph};
use crate::order::find_cycle;

/// Classification of a structural problem. All of these are recoverable by
/// editing the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueKind {
    EmptyGraph,
    DanglingConnection,
    TypeMismatch,
    MultipleInputBinding,
    CircularDependency,
}

/// One structural problem found in a graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationIssue {
    /// The component the issue is attached to, when one can be named.
    pub component_id: Option<ComponentId>,
    pub kind: IssueKind,
    pub message: String,
}

impl ValidationIssue {
    fn new(component_id: Option<ComponentId>, kind: IssueKind, message: String) -> Self {
        Self {
            component_id,
            kind,
            message,
        }
    }
}

/// The outcome of validating a graph. An empty issue list means the graph is
/// executable.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    /// All issue messages joined into one line, for logs and run records.
    pub fn summary(&self) -> String {
        self.issues.iter().map(|issue| issue.message.as_str()).join("; ")
    }
}

/// Decides whether a graph is executable.
pub fn validate(graph: &Graph) -> ValidationReport {
    let mut report = ValidationReport::default();

    if graph.is_empty() {
        report.issues.push(ValidationIssue::new(
            None,
            IssueKind::EmptyGraph,
            "the workflow contains no components".to_string(),
        ));
        return report;
    }

    for conn in graph.connections() {
        let source = match graph.component(&conn.source) {
            Some(component) => component,
            None => {
                report.issues.push(ValidationIssue::new(
                    Some(conn.source.clone()),
                    IssueKind::DanglingConnection,
                    format!("connection {} references missing component '{}'", conn, conn.source),
                ));
                continue;
            }
        };
        let target = match graph.component(&conn.target) {
            Some(component) => component,
            None => {
                report.issues.push(ValidationIssue::new(
                    Some(conn.target.clone()),
                    IssueKind::DanglingConnection,
                    format!("connection {} references missing component '{}'", conn, conn.target),
                ));
                continue;
            }
        };

        let source_port = source.output(&conn.source_port);
        if source_port.is_none() {
            report.issues.push(ValidationIssue::new(
                Some(conn.source.clone()),
                IssueKind::DanglingConnection,
                format!(
                    "connection {} references undeclared output port '{}' on component '{}'",
                    conn, conn.source_port, conn.source
                ),
            ));
        }
        let target_port = target.input(&conn.target_port);
        if target_port.is_none() {
            report.issues.push(ValidationIssue::new(
                Some(conn.target.clone()),
                IssueKind::DanglingConnection,
                format!(
                    "connection {} references undeclared input port '{}' on component '{}'",
                    conn, conn.target_port, conn.target
                ),
            ));
        }

        if let (Some(out_port), Some(in_port)) = (source_port, target_port) {
            let both_concrete = out_port.data_type != ANY_TYPE && in_port.data_type != ANY_TYPE;
            if both_concrete && out_port.data_type != in_port.data_type {
                report.issues.push(ValidationIssue::new(
                    Some(conn.target.clone()),
                    IssueKind::TypeMismatch,
                    format!(
                        "connection {} binds incompatible port types '{}' and '{}'",
                        conn, out_port.data_type, in_port.data_type
                    ),
                ));
            }
        }
    }

    let overbound = graph
        .connections()
        .iter()
        .map(|conn| (conn.target.as_str(), conn.target_port.as_str()))
        .duplicates()
        .collect::<Vec<_>>();
    for (target, port) in overbound {
        report.issues.push(ValidationIssue::new(
            Some(target.to_string()),
            IssueKind::MultipleInputBinding,
            format!("input port {}.{} has more than one incoming connection", target, port),
        ));
    }

    if let Some(cycle) = find_cycle(graph) {
        report.issues.push(ValidationIssue::new(
            Some(cycle.component_id.clone()),
            IssueKind::CircularDependency,
            cycle.to_string(),
        ));
    }

    report
}
