use crate::model::{EdgeKind, FlowNode, GraphModel, NodeKind};
use flowmap_analyzer::{CodeElement, CodeStructure, ElementKind};
use petgraph::graph::NodeIndex;
use std::collections::{HashMap, HashSet};

/// Build the graph model for a structure.
///
/// An empty structure produces an empty model; callers treat that as a
/// failed flowchart. Call edges are only drawn to names defined in the
/// structure, so calls into libraries stay off the chart.
#[must_use]
pub fn build_graph_model(structure: &CodeStructure) -> GraphModel {
    let mut model = GraphModel::new();
    if structure.is_empty() {
        return model;
    }

    let start = model.add_node(FlowNode {
        id: "start".to_string(),
        label: "Start".to_string(),
        kind: NodeKind::Start,
    });

    // Phase 1: one node per element, plus decision nodes for its branches.
    let mut element_nodes: Vec<(NodeIndex, &CodeElement)> = Vec::new();
    let mut by_name: HashMap<&str, NodeIndex> = HashMap::new();
    let mut by_last_segment: HashMap<&str, NodeIndex> = HashMap::new();

    for (pos, element) in structure.elements.iter().enumerate() {
        let (kind, label) = match element.kind {
            ElementKind::Module => (NodeKind::Process, "module level".to_string()),
            _ => (NodeKind::Function, element_label(element)),
        };

        let idx = model.add_node(FlowNode {
            id: element_id(&element.name, pos),
            label,
            kind,
        });
        element_nodes.push((idx, element));
        by_name.entry(element.name.as_str()).or_insert(idx);
        // Methods are also reachable by bare name: `self.wave()` records
        // the callee as `wave`, not `Greeter.wave`.
        if let Some(bare) = element.name.rsplit('.').next() {
            by_last_segment.entry(bare).or_insert(idx);
        }

        for (branch_pos, branch) in element.branches.iter().enumerate() {
            let label = if branch.condition.is_empty() {
                branch.kind.as_str().to_string()
            } else {
                format!("{} {}", branch.kind.as_str(), branch.condition)
            };
            let branch_idx = model.add_node(FlowNode {
                id: format!("{}_branch_{branch_pos}", element_id(&element.name, pos)),
                label,
                kind: NodeKind::Decision,
            });
            model.add_edge(idx, branch_idx, EdgeKind::Contains);
        }
    }

    // Phase 2: call edges between defined elements, deduplicated.
    for (idx, element) in &element_nodes {
        let mut seen: HashSet<NodeIndex> = HashSet::new();
        for call in &element.calls {
            let target = by_name
                .get(call.callee.as_str())
                .or_else(|| by_last_segment.get(call.callee.as_str()));
            if let Some(&target) = target {
                if target != *idx && seen.insert(target) {
                    model.add_edge(*idx, target, EdgeKind::Calls);
                }
            }
        }
    }

    // Phase 3: flow. Entry elements are those nothing calls; when every
    // element is called (cycles), fall back to all of them.
    let entries: Vec<NodeIndex> = {
        let uncalled: Vec<NodeIndex> = element_nodes
            .iter()
            .map(|(idx, _)| *idx)
            .filter(|idx| !model.has_incoming(*idx, EdgeKind::Calls))
            .collect();
        if uncalled.is_empty() {
            element_nodes.iter().map(|(idx, _)| *idx).collect()
        } else {
            uncalled
        }
    };
    for entry in &entries {
        model.add_edge(start, *entry, EdgeKind::Flow);
    }

    let end = model.add_node(FlowNode {
        id: "end".to_string(),
        label: "End".to_string(),
        kind: NodeKind::End,
    });
    for (idx, _) in &element_nodes {
        if model.targets_of(*idx, EdgeKind::Calls).is_empty() {
            model.add_edge(*idx, end, EdgeKind::Flow);
        }
    }

    log::debug!(
        "Built graph model: {} nodes, {} edges",
        model.node_count(),
        model.edge_count()
    );
    model
}

fn element_label(element: &CodeElement) -> String {
    if element.params.is_empty() {
        format!("{}()", element.name)
    } else {
        format!("{}({})", element.name, element.params.join(", "))
    }
}

/// Stable node id for an element; the position disambiguates duplicates.
fn element_id(name: &str, pos: usize) -> String {
    format!("el{pos}_{name}")
}
