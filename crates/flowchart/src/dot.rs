use crate::model::{EdgeKind, GraphModel, NodeKind};
use petgraph::visit::EdgeRef;
use std::fmt::Write;

/// A drawable flowchart: DOT source ready for a layout engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flowchart {
    dot: String,
}

impl Flowchart {
    #[must_use]
    pub fn dot(&self) -> &str {
        &self.dot
    }

    #[must_use]
    pub fn into_dot(self) -> String {
        self.dot
    }
}

/// Render the graph model to DOT.
///
/// Returns `None` for an empty model; callers treat that as a failed
/// flowchart rather than rendering a blank image.
#[must_use]
pub fn create_logic_flowchart(model: &GraphModel) -> Option<Flowchart> {
    if model.is_empty() {
        return None;
    }

    let mut output = String::new();
    writeln!(output, "digraph LogicFlowchart {{").unwrap();
    writeln!(output, "  rankdir=TB;").unwrap();
    writeln!(output, "  node [fontname=\"Helvetica\", fontsize=11];").unwrap();

    for idx in model.graph.node_indices() {
        let node = &model.graph[idx];
        let id = sanitize_id(&node.id);
        let label = escape_label(&node.label);
        let attrs = match node.kind {
            NodeKind::Start | NodeKind::End => {
                "shape=oval, style=filled, fillcolor=lightgray"
            }
            NodeKind::Function => "shape=box, style=\"rounded,filled\", fillcolor=lightblue",
            NodeKind::Decision => "shape=diamond, style=filled, fillcolor=lightyellow",
            NodeKind::Process => "shape=box, style=filled, fillcolor=lightgreen",
        };
        writeln!(output, "  {id} [label=\"{label}\", {attrs}];").unwrap();
    }

    for edge in model.graph.edge_references() {
        let from = sanitize_id(&model.graph[edge.source()].id);
        let to = sanitize_id(&model.graph[edge.target()].id);
        let attrs = match edge.weight() {
            EdgeKind::Flow => String::new(),
            EdgeKind::Contains => " [style=dashed]".to_string(),
            EdgeKind::Calls => " [label=\"calls\"]".to_string(),
        };
        writeln!(output, "  {from} -> {to}{attrs};").unwrap();
    }

    writeln!(output, "}}").unwrap();
    Some(Flowchart { dot: output })
}

/// Sanitize a string into a valid DOT identifier.
fn sanitize_id(id: &str) -> String {
    let cleaned: String = id
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if cleaned.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        format!("n{cleaned}")
    } else if cleaned.is_empty() {
        "n".to_string()
    } else {
        cleaned
    }
}

/// Escape a string for use inside a double-quoted DOT label.
fn escape_label(label: &str) -> String {
    label
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}
