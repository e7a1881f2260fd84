//! Line assignment and transfer counting along a computed route.
//!
//! The router only minimises travel time; this pass decides which line the
//! rider is on at each stop and counts line changes. It never alters the
//! route itself.

use serde::Serialize;

use crate::config::RouteConfig;
use crate::graph::{Graph, GraphError, NodeId};

/// One stop of an annotated route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatedStop {
    pub node: NodeId,
    pub label: String,

    /// Every line serving this stop, for display.
    pub lines: Vec<String>,

    /// Line ridden out of this stop (for the final stop, the line ridden
    /// into it). `None` only when no line could be determined.
    pub line: Option<String>,

    /// The rider changes line at this stop.
    pub transfer: bool,

    /// Transfers made up to and including this stop.
    pub transfers: usize,
}

/// A route annotated with lines, transfers and travel times.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatedPath {
    pub stops: Vec<AnnotatedStop>,
    pub transfers: usize,

    /// Sum of traversed edge weights, in seconds.
    pub total_secs: f64,

    /// `total_secs` plus the transfer penalty for each transfer.
    pub total_with_transfers_secs: f64,

    /// Consecutive stop pairs with no joining edge. Each contributes zero
    /// to the totals, so a non-zero value means the times are understated.
    pub missing_edges: usize,
}

impl AnnotatedPath {
    pub fn total_mins(&self) -> f64 {
        self.total_secs / 60.0
    }

    pub fn total_with_transfers_mins(&self) -> f64 {
        self.total_with_transfers_secs / 60.0
    }

    /// Whether every hop of the route had an edge to time it.
    pub fn is_complete(&self) -> bool {
        self.missing_edges == 0
    }
}

/// Annotate a route using the default transfer penalty.
pub fn annotate(path: &[NodeId], graph: &Graph) -> Result<AnnotatedPath, GraphError> {
    annotate_with(path, graph, &RouteConfig::default())
}

/// Annotate a route.
///
/// The rider starts on the first stop's only line, or on a line the first
/// stop shares with the second. At each stop, if the next stop is not on
/// the current line, the rider transfers, preferring a line the next stop
/// shares with the one after it.
pub fn annotate_with(
    path: &[NodeId],
    graph: &Graph,
    config: &RouteConfig,
) -> Result<AnnotatedPath, GraphError> {
    let nodes = path
        .iter()
        .map(|id| graph.node(*id).ok_or(GraphError::UnknownNode(*id)))
        .collect::<Result<Vec<_>, _>>()?;
    let lines: Vec<&[String]> = nodes.iter().map(|n| n.lines()).collect();

    let mut active = initial_line(&lines);
    let mut transfers = 0;
    let mut stops = Vec::with_capacity(nodes.len());

    for (i, node) in nodes.iter().enumerate() {
        let mut transfer = false;

        if let Some(next) = lines.get(i + 1) {
            let stays = active.is_some_and(|line| next.iter().any(|l| l == line));
            if !stays {
                let after = lines.get(i + 2);
                active = next
                    .iter()
                    .find(|l| after.is_some_and(|a| a.contains(*l)))
                    .or_else(|| next.first())
                    .map(String::as_str);
                transfers += 1;
                transfer = true;
            }
        }

        stops.push(AnnotatedStop {
            node: node.id,
            label: node.label.clone(),
            lines: node.lines().to_vec(),
            line: active.map(str::to_string),
            transfer,
            transfers,
        });
    }

    let (total_secs, missing_edges) = travel_time(path, graph);

    Ok(AnnotatedPath {
        stops,
        transfers,
        total_secs,
        total_with_transfers_secs: total_secs + transfers as f64 * config.transfer_penalty_secs,
        missing_edges,
    })
}

/// Line the rider boards at the first stop.
///
/// When the first stop has several lines and none is shared with the
/// second stop, the first listed line is used.
fn initial_line<'a>(lines: &[&'a [String]]) -> Option<&'a str> {
    let first: &'a [String] = lines.first().copied()?;
    if first.len() > 1 {
        if let Some(next) = lines.get(1).copied() {
            if let Some(shared) = first.iter().find(|l| next.contains(*l)) {
                return Some(shared.as_str());
            }
        }
    }
    first.first().map(String::as_str)
}

/// Sum the edge weights along a path.
///
/// A hop with no edge adds nothing and is counted as missing.
fn travel_time(path: &[NodeId], graph: &Graph) -> (f64, usize) {
    path.windows(2)
        .fold((0.0, 0), |(total, missing), hop| {
            match graph.find_edge(hop[0], hop[1]) {
                Some(edge) => (total + edge.weight, missing),
                None => (total, missing + 1),
            }
        })
}
