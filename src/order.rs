//! Dependency-ordered traversal of a workflow graph.
//!
//! One walker backs all three graph-shape questions the engine asks: the
//! full topological linearization before a run, cycle detection during
//! validation, and the reachability probe that guards connection creation.

use ahash::{AHashMap, AHashSet};

use crate::error::CycleError;
use crate::graph::{ComponentId, Graph};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// Upstream adjacency over a graph, built once per traversal.
///
/// Connections whose endpoints do not resolve to known components are
/// skipped; dangling references are a validation concern, not an ordering
/// one.
pub(crate) struct DependencyWalker<'a> {
    ids: &'a [ComponentId],
    upstream: AHashMap<&'a str, Vec<&'a str>>,
}

impl<'a> DependencyWalker<'a> {
    pub(crate) fn new(graph: &'a Graph) -> Self {
        let ids = graph.ordered_ids();
        let mut position: AHashMap<&str, usize> = AHashMap::with_capacity(ids.len());
        let mut upstream: AHashMap<&str, Vec<&str>> = AHashMap::with_capacity(ids.len());
        for (index, id) in ids.iter().enumerate() {
            position.insert(id.as_str(), index);
            upstream.insert(id.as_str(), Vec::new());
        }
        for conn in graph.connections() {
            if !position.contains_key(conn.source.as_str()) {
                continue;
            }
            let Some(deps) = upstream.get_mut(conn.target.as_str()) else {
                continue;
            };
            if !deps.contains(&conn.source.as_str()) {
                deps.push(conn.source.as_str());
            }
        }
        // Dependency lists follow component insertion order, not the order
        // in which the connections happened to be created.
        for deps in upstream.values_mut() {
            deps.sort_unstable_by_key(|dep| position[*dep]);
        }
        Self { ids, upstream }
    }

    /// Produces the full execution order, or fails on the first cycle.
    ///
    /// Depth-first, post-order over upstream dependencies. Both the outer
    /// iteration and the dependency lists follow insertion order, so the
    /// result is identical across repeated calls on the same graph.
    pub(crate) fn linearize(&self) -> Result<Vec<ComponentId>, CycleError> {
        let mut marks: AHashMap<&str, Mark> = AHashMap::with_capacity(self.ids.len());
        let mut order = Vec::with_capacity(self.ids.len());
        for id in self.ids {
            self.visit(id.as_str(), &mut marks, &mut order)?;
        }
        Ok(order)
    }

    fn visit(
        &self,
        node: &'a str,
        marks: &mut AHashMap<&'a str, Mark>,
        order: &mut Vec<ComponentId>,
    ) -> Result<(), CycleError> {
        match marks.get(node).copied().unwrap_or(Mark::Unvisited) {
            Mark::Done => return Ok(()),
            Mark::InProgress => {
                return Err(CycleError {
                    component_id: node.to_string(),
                });
            }
            Mark::Unvisited => {}
        }
        marks.insert(node, Mark::InProgress);
        if let Some(deps) = self.upstream.get(node) {
            for &dep in deps {
                self.visit(dep, marks, order)?;
            }
        }
        marks.insert(node, Mark::Done);
        order.push(node.to_string());
        Ok(())
    }

    /// Whether `node` transitively depends on `candidate` through existing
    /// connections. A node depends on itself, which makes the probe reject
    /// self-loops when used as a pre-connect cycle check.
    pub(crate) fn depends_on(&self, node: &str, candidate: &str) -> bool {
        if node == candidate {
            return true;
        }
        let mut seen: AHashSet<&str> = AHashSet::new();
        let mut pending: Vec<&str> = vec![node];
        while let Some(current) = pending.pop() {
            if !seen.insert(current) {
                continue;
            }
            if let Some(deps) = self.upstream.get(current) {
                for &dep in deps {
                    if dep == candidate {
                        return true;
                    }
                    pending.push(dep);
                }
            }
        }
        false
    }
}

/// Computes the deterministic execution order of a graph: a linearization in
/// which every component appears exactly once, after all of its upstream
/// dependencies. Components with no unresolved dependencies keep the order
/// in which they were added to the graph.
pub fn execution_order(graph: &Graph) -> Result<Vec<ComponentId>, CycleError> {
    DependencyWalker::new(graph).linearize()
}

/// Runs cycle detection only, discarding the order.
pub(crate) fn find_cycle(graph: &Graph) -> Option<CycleError> {
    execution_order(graph).err()
}
