//! Route computation.
//!
//! [`engine`] finds the minimum-time sequence of stops; [`annotate`] works
//! out which line the rider is on at each stop and what the transfers cost.
//! [`plan`] runs both.

mod annotate;
mod engine;


pub use annotate::{AnnotatedPath, AnnotatedStop, annotate, annotate_with};
pub use engine::{Route, RouteError, has_negative_cycle, shortest_path, shortest_path_between};

use crate::config::RouteConfig;
use crate::graph::{Graph, NodeId};

/// A computed route together with its annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    pub route: Route,
    pub annotated: AnnotatedPath,
}

/// Compute and annotate the fastest route between two stops.
pub fn plan(
    graph: &Graph,
    start: NodeId,
    end: NodeId,
    config: &RouteConfig,
) -> Result<Plan, RouteError> {
    let route = shortest_path_between(graph, start, end)?;
    let annotated = annotate_with(&route.nodes, graph, config)?;
    Ok(Plan { route, annotated })
}

/// Like [`plan`], with stops given by label.
pub fn plan_by_label(
    graph: &Graph,
    start: &str,
    end: &str,
    config: &RouteConfig,
) -> Result<Plan, RouteError> {
    let route = shortest_path(graph, start, end)?;
    let annotated = annotate_with(&route.nodes, graph, config)?;
    Ok(Plan { route, annotated })
}
