//! Highlight instructions for the presenter.
//!
//! The core never draws anything. It describes colour changes as a list of
//! `(target, colour)` pairs that the front-end applies to its canvas.

use serde::Serialize;

use crate::graph::{EdgeId, Graph, NodeId};

/// Colour of an edge that is not on the highlighted route.
pub const EDGE_COLOR: &str = "#000000";

/// Colour of the selected start stop.
pub const START_COLOR: &str = "#ff0000";

/// Colour of edges on the highlighted route.
pub const PATH_COLOR: &str = "#0000ff";

/// What a highlight instruction applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum Target {
    Node(NodeId),
    Edge(EdgeId),
}

/// Set `target` to `color`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Highlight {
    pub target: Target,
    pub color: &'static str,
}

impl Highlight {
    pub fn node(id: NodeId, color: &'static str) -> Self {
        Self {
            target: Target::Node(id),
            color,
        }
    }

    pub fn edge(id: EdgeId, color: &'static str) -> Self {
        Self {
            target: Target::Edge(id),
            color,
        }
    }
}

/// Return every edge to its default colour.
pub fn reset(graph: &Graph) -> Vec<Highlight> {
    graph
        .edges_with_ids()
        .map(|(id, _)| Highlight::edge(id, EDGE_COLOR))
        .collect()
}

/// Clear previous highlighting and mark the selected start stop.
pub fn start(graph: &Graph, node: NodeId) -> Vec<Highlight> {
    let mut highlights = reset(graph);
    highlights.push(Highlight::node(node, START_COLOR));
    highlights
}

/// Mark every edge joining consecutive stops of a route, in either direction.
pub fn path(graph: &Graph, nodes: &[NodeId]) -> Vec<Highlight> {
    nodes
        .windows(2)
        .flat_map(|hop| {
            graph
                .edges_with_ids()
                .filter(move |(_, e)| e.joins(hop[0], hop[1]))
                .map(|(id, _)| Highlight::edge(id, PATH_COLOR))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_graph() -> Graph {
        let mut g = Graph::new();
        let a = g.add_node("A", "1", "fecd08").unwrap();
        let b = g.add_node("B", "1", "fecd08").unwrap();
        let c = g.add_node("C", "1", "fecd08").unwrap();
        g.add_edge(a, b, 60.0, true).unwrap();
        g.add_edge(b, a, 60.0, true).unwrap();
        g.add_edge(b, c, 90.0, true).unwrap();
        g.add_edge(a, c, 400.0, true).unwrap();
        g
    }

    #[test]
    fn reset_covers_every_edge() {
        let g = line_graph();
        let highlights = reset(&g);

        assert_eq!(highlights.len(), 4);
        assert!(highlights.iter().all(|h| h.color == EDGE_COLOR));
    }

    #[test]
    fn start_resets_then_marks_node() {
        let g = line_graph();
        let highlights = start(&g, NodeId(1));

        assert_eq!(highlights.len(), 5);
        assert_eq!(
            highlights.last(),
            Some(&Highlight::node(NodeId(1), START_COLOR))
        );
    }

    #[test]
    fn path_marks_both_directions() {
        let g = line_graph();
        let highlights = path(&g, &[NodeId(0), NodeId(1), NodeId(2)]);

        assert_eq!(
            highlights,
            vec![
                Highlight::edge(EdgeId(0), PATH_COLOR),
                Highlight::edge(EdgeId(1), PATH_COLOR),
                Highlight::edge(EdgeId(2), PATH_COLOR),
            ]
        );
    }

    #[test]
    fn single_stop_path_marks_nothing() {
        let g = line_graph();
        assert!(path(&g, &[NodeId(0)]).is_empty());
    }

    #[test]
    fn serializes_target_kind() {
        let json = serde_json::to_value(Highlight::edge(EdgeId(3), PATH_COLOR)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "target": { "kind": "edge", "id": 3 }, "color": "#0000ff" })
        );
    }
}
