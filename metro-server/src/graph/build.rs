//! Building a [`Graph`] from stop and edge records.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::{Graph, GraphError, NodeId};

/// One row of the stop file: a stop as served by a single line.
///
/// A stop served by several lines appears once per line, always with the
/// same display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopRecord {
    /// Record identifier, referenced by [`EdgeRecord`]s.
    #[serde(rename = "ID")]
    pub id: String,

    /// Display name shared by every record of the same stop
    #[serde(rename = "Nom")]
    pub name: String,

    #[serde(rename = "Line")]
    pub line: String,

    /// Colour token of the line (hex, no `#`)
    #[serde(rename = "Color", default)]
    pub color: String,

    #[serde(rename = "IsTerminus", default)]
    pub is_terminus: Option<String>,

    #[serde(rename = "NumberOfLine", default)]
    pub number_of_lines: Option<u32>,
}

impl StopRecord {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        line: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            line: line.into(),
            color: color.into(),
            is_terminus: None,
            number_of_lines: None,
        }
    }
}

/// One row of the edge file: a timed link between two stop records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    #[serde(rename = "Sommet1")]
    pub from: String,

    #[serde(rename = "Sommet2")]
    pub to: String,

    /// Traversal time in seconds, as text.
    #[serde(rename = "Time")]
    pub time: String,
}

impl EdgeRecord {
    pub fn new(from: impl Into<String>, to: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            time: time.into(),
        }
    }
}

/// Errors raised while building a graph from records.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BuildError {
    /// An edge's time field is not a finite number
    #[error("malformed weight {value:?} on edge {from} -> {to}")]
    MalformedWeight {
        from: String,
        to: String,
        value: String,
    },

    /// An edge references a stop record that does not exist
    #[error("edge references unknown stop record {0}")]
    UnknownStop(String),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Build a graph from stop and edge records.
///
/// Stop records sharing a display name fold into one node whose line set
/// accumulates every line seen for that name. Each edge record becomes one
/// directed edge; two-way track is expected to appear as a pair of records.
///
/// Any malformed weight aborts the build rather than producing a graph
/// with a silently missing or zero-cost edge.
pub fn build_graph(stops: &[StopRecord], edges: &[EdgeRecord]) -> Result<Graph, BuildError> {
    let mut graph = Graph::new();
    let mut by_record: HashMap<&str, NodeId> = HashMap::with_capacity(stops.len());

    for stop in stops {
        let id = match graph.lookup(&stop.name) {
            Some(existing) => {
                if graph.add_line(existing, stop.line.as_str())? {
                    trace!(stop = %stop.name, line = %stop.line, "folded line into stop");
                }
                existing
            }
            None => graph.add_node(stop.name.as_str(), stop.line.as_str(), stop.color.as_str())?,
        };
        by_record.insert(stop.id.as_str(), id);
    }

    for record in edges {
        let from = *by_record
            .get(record.from.as_str())
            .ok_or_else(|| BuildError::UnknownStop(record.from.clone()))?;
        let to = *by_record
            .get(record.to.as_str())
            .ok_or_else(|| BuildError::UnknownStop(record.to.clone()))?;
        let weight = parse_weight(record)?;

        graph.add_edge(from, to, weight, true)?;
    }

    debug!(
        records = stops.len(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "built graph"
    );

    Ok(graph)
}

fn parse_weight(record: &EdgeRecord) -> Result<f64, BuildError> {
    record
        .time
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|w| w.is_finite())
        .ok_or_else(|| BuildError::MalformedWeight {
            from: record.from.clone(),
            to: record.to.clone(),
            value: record.time.clone(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(id: &str, name: &str, line: &str) -> StopRecord {
        StopRecord::new(id, name, line, "fecd08")
    }

    #[test]
    fn folds_records_with_same_name() {
        let stops = vec![
            stop("0001", "Nation", "1"),
            stop("0002", "Bastille", "1"),
            stop("0003", "Nation", "2"),
        ];

        let graph = build_graph(&stops, &[]).unwrap();

        assert_eq!(graph.node_count(), 2);
        let nation = graph.node(graph.lookup("Nation").unwrap()).unwrap();
        assert_eq!(nation.lines(), ["1", "2"]);
        assert_eq!(nation.line_count(), 2);
    }

    #[test]
    fn repeated_line_counts_once() {
        let stops = vec![stop("0001", "Nation", "1"), stop("0002", "Nation", "1")];

        let graph = build_graph(&stops, &[]).unwrap();
        let nation = graph.node(NodeId(0)).unwrap();

        assert_eq!(nation.line_count(), 1);
    }

    #[test]
    fn first_record_sets_colour() {
        let stops = vec![
            StopRecord::new("0001", "Nation", "1", "fecd08"),
            StopRecord::new("0002", "Nation", "2", "006db8"),
        ];

        let graph = build_graph(&stops, &[]).unwrap();
        assert_eq!(graph.node(NodeId(0)).unwrap().color, "fecd08");
    }

    #[test]
    fn edges_resolve_through_folded_stops() {
        let stops = vec![
            stop("0001", "Nation", "1"),
            stop("0002", "Bastille", "1"),
            stop("0003", "Nation", "2"),
        ];
        let edges = vec![
            EdgeRecord::new("0001", "0002", "120"),
            EdgeRecord::new("0002", "0003", " 90.5 "),
        ];

        let graph = build_graph(&stops, &edges).unwrap();

        assert_eq!(graph.edge_count(), 2);
        let second = &graph.edges()[1];
        assert_eq!(second.from, NodeId(1));
        assert_eq!(second.to, NodeId(0));
        assert_eq!(second.weight, 90.5);
        assert!(second.directed);
    }

    #[test]
    fn malformed_weight_refuses_build() {
        let stops = vec![stop("0001", "A", "1"), stop("0002", "B", "1")];
        let edges = vec![
            EdgeRecord::new("0001", "0002", "60"),
            EdgeRecord::new("0002", "0001", "abc"),
        ];

        let err = build_graph(&stops, &edges).unwrap_err();
        assert_eq!(
            err,
            BuildError::MalformedWeight {
                from: "0002".into(),
                to: "0001".into(),
                value: "abc".into(),
            }
        );
    }

    #[test]
    fn non_finite_weight_is_malformed() {
        let stops = vec![stop("0001", "A", "1"), stop("0002", "B", "1")];

        for value in ["NaN", "inf", "-inf", ""] {
            let edges = vec![EdgeRecord::new("0001", "0002", value)];
            assert!(
                matches!(
                    build_graph(&stops, &edges),
                    Err(BuildError::MalformedWeight { .. })
                ),
                "{value:?} should be rejected"
            );
        }
    }

    #[test]
    fn negative_weight_is_accepted() {
        let stops = vec![stop("0001", "A", "1"), stop("0002", "B", "1")];
        let edges = vec![EdgeRecord::new("0001", "0002", "-5")];

        let graph = build_graph(&stops, &edges).unwrap();
        assert_eq!(graph.edges()[0].weight, -5.0);
    }

    #[test]
    fn unknown_stop_reference() {
        let stops = vec![stop("0001", "A", "1")];
        let edges = vec![EdgeRecord::new("0001", "0404", "60")];

        assert_eq!(
            build_graph(&stops, &edges).unwrap_err(),
            BuildError::UnknownStop("0404".into())
        );
    }

    #[test]
    fn zero_weight_self_loop_kept() {
        let stops = vec![stop("0001", "Nation", "1"), stop("0002", "Nation", "2")];
        let edges = vec![EdgeRecord::new("0001", "0002", "0")];

        let graph = build_graph(&stops, &edges).unwrap();
        let edge = &graph.edges()[0];
        assert_eq!(edge.from, edge.to);
        assert_eq!(edge.weight, 0.0);
    }
}
