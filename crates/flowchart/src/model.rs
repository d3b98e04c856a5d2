use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Kind of a flowchart node, mapped to a Graphviz shape at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    Start,
    End,
    /// A defined function or method.
    Function,
    /// A branch construct (rendered as a diamond).
    Decision,
    /// Module-level code.
    Process,
}

/// Kind of a flowchart edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeKind {
    /// Start/End linkage.
    Flow,
    /// Element to the branches inside it.
    Contains,
    /// Caller to defined callee.
    Calls,
}

/// A node in the graph model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowNode {
    /// Stable identifier, unique within the model.
    pub id: String,
    /// Human label shown on the rendered chart.
    pub label: String,
    pub kind: NodeKind,
}

/// Node/edge representation of the code structure, ready for layout.
#[derive(Debug, Default)]
pub struct GraphModel {
    pub graph: DiGraph<FlowNode, EdgeKind>,
    id_index: HashMap<String, NodeIndex>,
}

impl GraphModel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node; the id must be unique (later ids win the index slot).
    pub fn add_node(&mut self, node: FlowNode) -> NodeIndex {
        let id = node.id.clone();
        let idx = self.graph.add_node(node);
        self.id_index.insert(id, idx);
        idx
    }

    pub fn add_edge(&mut self, from: NodeIndex, to: NodeIndex, kind: EdgeKind) {
        self.graph.add_edge(from, to, kind);
    }

    /// Look up a node index by id.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<NodeIndex> {
        self.id_index.get(id).copied()
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Targets of outgoing edges of a given kind.
    #[must_use]
    pub fn targets_of(&self, node: NodeIndex, kind: EdgeKind) -> Vec<NodeIndex> {
        self.graph
            .edges(node)
            .filter(|e| *e.weight() == kind)
            .map(|e| e.target())
            .collect()
    }

    /// Whether a node has any incoming edge of the given kind.
    #[must_use]
    pub fn has_incoming(&self, node: NodeIndex, kind: EdgeKind) -> bool {
        self.graph
            .edges_directed(node, Direction::Incoming)
            .any(|e| *e.weight() == kind)
    }
}
