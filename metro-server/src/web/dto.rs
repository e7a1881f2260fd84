//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::coordinator::{Phase, PickOutcome};
use crate::graph::NodeId;
use crate::highlight::Highlight;
use crate::routing::{AnnotatedPath, AnnotatedStop, RouteError};

/// Request to route between two stops by label.
#[derive(Debug, Deserialize)]
pub struct RouteRequest {
    /// Start stop label
    pub start: String,

    /// End stop label
    pub end: String,
}

/// An annotated route.
#[derive(Debug, Serialize)]
pub struct RouteResult {
    /// Stops in travel order
    pub stops: Vec<AnnotatedStop>,

    /// Number of line changes
    pub transfers: usize,

    /// Travel time in seconds
    pub total_secs: f64,

    /// Travel time in minutes
    pub total_mins: f64,

    /// Travel time plus transfer penalties, in seconds
    pub total_with_transfers_secs: f64,

    /// Travel time plus transfer penalties, in minutes
    pub total_with_transfers_mins: f64,

    /// Hops with no edge to time them
    pub missing_edges: usize,

    /// Colour changes to apply to the canvas
    pub highlights: Vec<Highlight>,
}

/// Request for one stop pick in the two-click selection.
#[derive(Debug, Deserialize)]
pub struct PickRequest {
    /// Picked stop id
    pub node: NodeId,
}

/// Response to a stop pick.
#[derive(Debug, Serialize)]
pub struct PickResponse {
    /// Phase after handling the pick
    pub state: Phase,

    /// What the pick did
    pub outcome: PickResult,
}

/// Outcome of a stop pick.
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PickResult {
    UnknownNode {
        node: NodeId,
    },
    StartSelected {
        start: NodeId,
        highlights: Vec<Highlight>,
    },
    Routed {
        route: RouteResult,
    },
    Failed {
        reason: FailureReason,
    },
}

/// Structured reason a route query failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    UnknownNode,
    NegativeCycleDetected,
    NoPathFound,
    Internal,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,

    /// Machine-readable reason, when the error is a route failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<FailureReason>,
}

// Conversion implementations

impl RouteResult {
    /// Create from an annotated path and its highlight instructions.
    pub fn from_path(path: AnnotatedPath, highlights: Vec<Highlight>) -> Self {
        Self {
            transfers: path.transfers,
            total_secs: path.total_secs,
            total_mins: path.total_mins(),
            total_with_transfers_secs: path.total_with_transfers_secs,
            total_with_transfers_mins: path.total_with_transfers_mins(),
            missing_edges: path.missing_edges,
            stops: path.stops,
            highlights,
        }
    }
}

impl From<&RouteError> for FailureReason {
    fn from(e: &RouteError) -> Self {
        match e {
            RouteError::UnknownNode(_) => FailureReason::UnknownNode,
            RouteError::NegativeCycleDetected => FailureReason::NegativeCycleDetected,
            RouteError::NoPathFound { .. } => FailureReason::NoPathFound,
            RouteError::Graph(_) => FailureReason::Internal,
        }
    }
}

impl From<PickOutcome> for PickResult {
    fn from(outcome: PickOutcome) -> Self {
        match outcome {
            PickOutcome::UnknownNode(node) => PickResult::UnknownNode { node },
            PickOutcome::StartSelected { start, highlights } => {
                PickResult::StartSelected { start, highlights }
            }
            PickOutcome::Routed { path, highlights } => PickResult::Routed {
                route: RouteResult::from_path(path, highlights),
            },
            PickOutcome::Failed(e) => PickResult::Failed {
                reason: FailureReason::from(&e),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn failure_reasons() {
        assert_eq!(
            FailureReason::from(&RouteError::NegativeCycleDetected),
            FailureReason::NegativeCycleDetected
        );
        assert_eq!(
            FailureReason::from(&RouteError::NoPathFound {
                from: "A".into(),
                to: "B".into(),
            }),
            FailureReason::NoPathFound
        );
        assert_eq!(
            FailureReason::from(&RouteError::UnknownNode("Z".into())),
            FailureReason::UnknownNode
        );
    }

    #[test]
    fn failed_pick_serializes_reason() {
        let response = PickResponse {
            state: Phase::AwaitingStart,
            outcome: PickOutcome::Failed(RouteError::NegativeCycleDetected).into(),
        };

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "state": { "phase": "awaiting_start" },
                "outcome": { "kind": "failed", "reason": "negative_cycle_detected" }
            })
        );
    }

    #[test]
    fn awaiting_end_carries_start() {
        let response = PickResponse {
            state: Phase::AwaitingEnd { start: NodeId(4) },
            outcome: PickOutcome::UnknownNode(NodeId(9)).into(),
        };

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "state": { "phase": "awaiting_end", "start": 4 },
                "outcome": { "kind": "unknown_node", "node": 9 }
            })
        );
    }

    #[test]
    fn pick_request_parses() {
        let req: PickRequest = serde_json::from_str(r#"{ "node": 7 }"#).unwrap();
        assert_eq!(req.node, NodeId(7));
    }
}
