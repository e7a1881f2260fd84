//! Display view of the network for the canvas front-end.

use std::collections::HashSet;

use serde::Serialize;
use tracing::trace;

use crate::graph::{EdgeId, Graph, Node, NodeId};

/// Fill and border colour of a stop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeStyle {
    pub background: String,
    pub border: String,
}

impl NodeStyle {
    /// Interchanges are drawn white with a black border; single-line stops
    /// take their line's colour.
    pub fn for_node(node: &Node) -> Self {
        if node.line_count() >= 2 {
            Self {
                background: "white".to_string(),
                border: "black".to_string(),
            }
        } else {
            let color = format!("#{}", node.color);
            Self {
                background: color.clone(),
                border: color,
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayNode {
    pub id: NodeId,
    pub label: String,
    pub lines: Vec<String>,
    pub line_count: usize,
    pub color: NodeStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayEdge {
    /// Graph edge id, so highlight instructions can address it.
    pub id: EdgeId,
    pub from: NodeId,
    pub to: NodeId,

    /// Traversal time in seconds.
    pub label: f64,

    /// Draw an arrow: there is no edge back the other way.
    pub arrows: bool,
}

/// Nodes and edges to draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkView {
    pub nodes: Vec<DisplayNode>,
    pub edges: Vec<DisplayEdge>,
}

impl NetworkView {
    /// Build the display view of a graph.
    ///
    /// Each pair of stops is drawn once, using the first edge that joins
    /// them in either direction. Zero-time self-loops are not drawn.
    pub fn from_graph(graph: &Graph) -> Self {
        let nodes = graph
            .nodes()
            .iter()
            .map(|node| DisplayNode {
                id: node.id,
                label: node.label.clone(),
                lines: node.lines().to_vec(),
                line_count: node.line_count(),
                color: NodeStyle::for_node(node),
            })
            .collect();

        let directed_pairs: HashSet<(NodeId, NodeId)> =
            graph.edges().iter().map(|e| (e.from, e.to)).collect();
        let mut drawn: HashSet<(NodeId, NodeId)> = HashSet::new();
        let mut edges = Vec::new();

        for (id, edge) in graph.edges_with_ids() {
            if edge.from == edge.to && edge.weight == 0.0 {
                continue;
            }
            if drawn.contains(&(edge.from, edge.to)) || drawn.contains(&(edge.to, edge.from)) {
                trace!(from = %edge.from, to = %edge.to, "skipping duplicate display edge");
                continue;
            }
            drawn.insert((edge.from, edge.to));

            let reverse = directed_pairs.contains(&(edge.to, edge.from));
            edges.push(DisplayEdge {
                id,
                from: edge.from,
                to: edge.to,
                label: edge.weight,
                arrows: edge.directed && !reverse,
            });
        }

        Self { nodes, edges }
    }
}
