//! Minimum-time routing with Bellman-Ford relaxation.
//!
//! Weights may be negative, so the engine relaxes every edge |V|-1 times
//! rather than running a label-setting search. Any negative-weight cycle
//! in the graph fails the query, even one the route never touches.

use tracing::debug;

use crate::graph::{Graph, GraphError, NodeId};

/// Why a route could not be computed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RouteError {
    /// The start or end stop does not exist
    #[error("unknown stop: {0}")]
    UnknownNode(String),

    /// Some cycle in the graph has negative total weight
    #[error("graph contains a negative-weight cycle")]
    NegativeCycleDetected,

    /// The end stop cannot be reached from the start stop
    #[error("no path from {from} to {to}")]
    NoPathFound { from: String, to: String },

    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// A minimum-time route: stops from start to end, inclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub nodes: Vec<NodeId>,

    /// Total weight along the route, in seconds.
    pub distance: f64,
}

impl Route {
    pub fn start(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    pub fn end(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }
}

/// Find the minimum-time route between two stops given by label.
pub fn shortest_path(graph: &Graph, start: &str, end: &str) -> Result<Route, RouteError> {
    let start_id = graph
        .lookup(start)
        .ok_or_else(|| RouteError::UnknownNode(start.to_string()))?;
    let end_id = graph
        .lookup(end)
        .ok_or_else(|| RouteError::UnknownNode(end.to_string()))?;

    shortest_path_between(graph, start_id, end_id)
}

/// Find the minimum-time route between two stops given by id.
///
/// Edges are processed in insertion order on every pass, so equal-time
/// alternatives always resolve the same way for the same graph.
pub fn shortest_path_between(
    graph: &Graph,
    start: NodeId,
    end: NodeId,
) -> Result<Route, RouteError> {
    for id in [start, end] {
        if graph.node(id).is_none() {
            return Err(RouteError::UnknownNode(id.to_string()));
        }
    }

    let n = graph.node_count();
    let mut dist = vec![f64::INFINITY; n];
    let mut pred: Vec<Option<NodeId>> = vec![None; n];
    dist[start.0] = 0.0;

    let mut passes = 0;
    for _ in 1..n {
        passes += 1;
        if !relax_pass(graph, &mut dist, &mut pred) {
            break;
        }
    }

    if has_negative_cycle(graph) {
        debug!(passes, "negative-weight cycle detected");
        return Err(RouteError::NegativeCycleDetected);
    }

    let nodes = reconstruct(&pred, start, end);
    if nodes.first() != Some(&start) {
        debug!(%start, %end, "no path found");
        return Err(RouteError::NoPathFound {
            from: label_of(graph, start),
            to: label_of(graph, end),
        });
    }

    debug!(
        %start,
        %end,
        passes,
        stops = nodes.len(),
        distance = dist[end.0],
        "route found"
    );

    Ok(Route {
        nodes,
        distance: dist[end.0],
    })
}

/// Whether any cycle in the graph has negative total weight.
///
/// Runs the relaxation from a virtual source joined to every stop at zero
/// cost, so cycles unreachable from any particular stop are still found.
pub fn has_negative_cycle(graph: &Graph) -> bool {
    let n = graph.node_count();
    let mut dist = vec![0.0; n];
    let mut pred: Vec<Option<NodeId>> = vec![None; n];

    for _ in 1..n {
        if !relax_pass(graph, &mut dist, &mut pred) {
            return false;
        }
    }

    relax_pass(graph, &mut dist, &mut pred)
}

/// Relax every arc once. Returns whether any distance improved.
fn relax_pass(graph: &Graph, dist: &mut [f64], pred: &mut [Option<NodeId>]) -> bool {
    let mut changed = false;

    for edge in graph.edges() {
        changed |= relax(edge.from, edge.to, edge.weight, dist, pred);
        if !edge.directed {
            changed |= relax(edge.to, edge.from, edge.weight, dist, pred);
        }
    }

    changed
}

fn relax(
    u: NodeId,
    v: NodeId,
    weight: f64,
    dist: &mut [f64],
    pred: &mut [Option<NodeId>],
) -> bool {
    let candidate = dist[u.0] + weight;
    if candidate < dist[v.0] {
        dist[v.0] = candidate;
        pred[v.0] = Some(u);
        true
    } else {
        false
    }
}

/// Follow predecessors back from `end`.
///
/// The walk is bounded by the node count; the caller checks that it
/// arrived at `start`.
fn reconstruct(pred: &[Option<NodeId>], start: NodeId, end: NodeId) -> Vec<NodeId> {
    let mut path = vec![end];
    let mut current = end;

    while current != start && path.len() <= pred.len() {
        match pred[current.0] {
            Some(previous) => {
                path.push(previous);
                current = previous;
            }
            None => break,
        }
    }

    path.reverse();
    path
}

fn label_of(graph: &Graph, id: NodeId) -> String {
    graph
        .node(id)
        .map(|n| n.label.clone())
        .unwrap_or_else(|| id.to_string())
}
