//! In-memory call graph backed by petgraph::DiGraph.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;

use crate::config::CallEdge;

/// Directed multigraph over symbol ids.
///
/// Nodes are created on first encounter while edges are inserted, so node
/// index order doubles as first-encounter order over the edge scan. Parallel
/// edges are kept; nodes may dangle (no fact behind the id).
pub struct CallGraph {
    graph: DiGraph<String, ()>,
    /// O(1) symbol id → NodeIndex lookup.
    id_index: HashMap<String, NodeIndex>,
}

impl CallGraph {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            id_index: HashMap::new(),
        }
    }

    fn ensure_node(&mut self, id: &str) -> NodeIndex {
        if let Some(&idx) = self.id_index.get(id) {
            idx
        } else {
            let idx = self.graph.add_node(id.to_string());
            self.id_index.insert(id.to_string(), idx);
            idx
        }
    }

    /// Record a source → destination call edge.
    pub fn add_edge(&mut self, source: &str, destination: &str) {
        let from = self.ensure_node(source);
        let to = self.ensure_node(destination);
        self.graph.add_edge(from, to, ());
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.id_index.contains_key(id)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Edges in insertion order as (source, destination) id pairs.
    pub fn edges(&self) -> Vec<CallEdge> {
        self.graph
            .edge_indices()
            .filter_map(|e| {
                self.graph
                    .edge_endpoints(e)
                    .map(|(s, t)| CallEdge(self.graph[s].clone(), self.graph[t].clone()))
            })
            .collect()
    }

    /// Undirected degree: how often the node appears as an edge endpoint.
    /// A self-loop contributes two.
    pub fn degree(&self, idx: NodeIndex) -> usize {
        self.graph.edges_directed(idx, Direction::Outgoing).count()
            + self.graph.edges_directed(idx, Direction::Incoming).count()
    }

    /// Nodes in first-encounter order with their symbol ids.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeIndex, &str)> {
        self.graph
            .node_indices()
            .map(move |idx| (idx, self.graph[idx].as_str()))
    }
}

impl Default for CallGraph {
    fn default() -> Self {
        Self::new()
    }
}
