//! Transit network graph.
//!
//! A [`Graph`] owns its stops ([`Node`]) and the timed links between them
//! ([`Edge`]). Stops are keyed externally by their display label; the
//! label index is maintained by [`Graph::add_node`] and is never mutated
//! on its own.

mod build;

pub use build::{BuildError, EdgeRecord, StopRecord, build_graph};

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a stop within one graph.
///
/// Assigned sequentially from 0 in creation order, so it doubles as an
/// index into the graph's node storage.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub usize);

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of an edge within one graph (its insertion position).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(pub usize);

/// Errors raised by graph lookups and mutation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    /// No stop carries this label
    #[error("unknown stop label: {0}")]
    UnknownLabel(String),

    /// No stop has this identifier
    #[error("unknown node id: {0}")]
    UnknownNode(NodeId),

    /// A stop with this label already exists
    #[error("stop label already present: {0}")]
    DuplicateLabel(String),
}

/// A stop in the network.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,

    /// Display name, unique within the graph.
    pub label: String,

    /// Colour token of the first record seen for this stop (hex, no `#`).
    pub color: String,

    /// Lines serving this stop, deduplicated in insertion order.
    lines: Vec<String>,
}

impl Node {
    fn new(id: NodeId, label: String, line: String, color: String) -> Self {
        Self {
            id,
            label,
            color,
            lines: vec![line],
        }
    }

    /// Lines serving this stop, in the order they were first seen.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of distinct lines serving this stop. Always at least 1.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Whether `line` serves this stop.
    pub fn serves(&self, line: &str) -> bool {
        self.lines.iter().any(|l| l == line)
    }

    /// Record another serving line. Returns false if it was already known.
    fn add_line(&mut self, line: String) -> bool {
        if self.serves(&line) {
            return false;
        }
        self.lines.push(line);
        true
    }
}

/// A timed link between two stops.
///
/// Edges are directed primitives. An undirected edge (`directed == false`)
/// is relaxed in both directions by the router.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,

    /// Traversal time in seconds.
    pub weight: f64,

    pub directed: bool,
}

impl Edge {
    /// Whether this edge can be traversed from `a` to `b`.
    pub fn connects(&self, a: NodeId, b: NodeId) -> bool {
        (self.from == a && self.to == b) || (!self.directed && self.from == b && self.to == a)
    }

    /// Whether this edge joins `a` and `b`, ignoring direction.
    pub fn joins(&self, a: NodeId, b: NodeId) -> bool {
        (self.from == a && self.to == b) || (self.from == b && self.to == a)
    }
}

/// Stops, edges, and the label index over the stops.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    index: HashMap<String, NodeId>,
}

impl Graph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a stop served by `line`.
    ///
    /// Labels are unique: adding a label that already exists is an error,
    /// callers fold further lines in with [`Graph::add_line`] instead.
    pub fn add_node(
        &mut self,
        label: impl Into<String>,
        line: impl Into<String>,
        color: impl Into<String>,
    ) -> Result<NodeId, GraphError> {
        let label = label.into();
        if self.index.contains_key(&label) {
            return Err(GraphError::DuplicateLabel(label));
        }

        let id = NodeId(self.nodes.len());
        self.index.insert(label.clone(), id);
        self.nodes.push(Node::new(id, label, line.into(), color.into()));
        Ok(id)
    }

    /// Record that `line` also serves an existing stop.
    ///
    /// Returns whether the line was new for that stop.
    pub fn add_line(&mut self, id: NodeId, line: impl Into<String>) -> Result<bool, GraphError> {
        let node = self
            .nodes
            .get_mut(id.0)
            .ok_or(GraphError::UnknownNode(id))?;
        Ok(node.add_line(line.into()))
    }

    /// Append an edge. Parallel edges and self-loops are allowed.
    pub fn add_edge(
        &mut self,
        from: NodeId,
        to: NodeId,
        weight: f64,
        directed: bool,
    ) -> Result<EdgeId, GraphError> {
        for id in [from, to] {
            if id.0 >= self.nodes.len() {
                return Err(GraphError::UnknownNode(id));
            }
        }

        let id = EdgeId(self.edges.len());
        self.edges.push(Edge {
            from,
            to,
            weight,
            directed,
        });
        Ok(id)
    }

    /// Look up a stop by label.
    pub fn lookup(&self, label: &str) -> Option<NodeId> {
        self.index.get(label).copied()
    }

    /// Look up a stop by label, failing with [`GraphError::UnknownLabel`].
    pub fn require(&self, label: &str) -> Result<NodeId, GraphError> {
        self.lookup(label)
            .ok_or_else(|| GraphError::UnknownLabel(label.to_string()))
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.0)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Edges with their identifiers, in insertion order.
    pub fn edges_with_ids(&self) -> impl Iterator<Item = (EdgeId, &Edge)> {
        self.edges.iter().enumerate().map(|(i, e)| (EdgeId(i), e))
    }

    /// Cheapest edge that can be traversed from `from` to `to`.
    ///
    /// Among parallel edges of equal weight the earliest inserted wins.
    pub fn find_edge(&self, from: NodeId, to: NodeId) -> Option<&Edge> {
        self.edges
            .iter()
            .filter(|e| e.connects(from, to))
            .min_by(|a, b| a.weight.total_cmp(&b.weight))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
