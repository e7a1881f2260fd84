//! Two-click stop selection.
//!
//! The first pick chooses the start stop, the second the end stop; the
//! second pick runs a route query and the coordinator goes back to waiting
//! for a start, whatever the outcome.

use serde::Serialize;
use tracing::debug;

use crate::config::RouteConfig;
use crate::graph::{Graph, NodeId};
use crate::highlight::{self, Highlight};
use crate::routing::{self, AnnotatedPath, RouteError};

/// Where the coordinator is in the two-click cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase {
    #[default]
    AwaitingStart,
    AwaitingEnd {
        start: NodeId,
    },
}

/// What happened in response to a pick.
#[derive(Debug, Clone, PartialEq)]
pub enum PickOutcome {
    /// The picked stop does not exist; the phase is unchanged.
    UnknownNode(NodeId),

    /// The start stop was chosen.
    StartSelected {
        start: NodeId,
        highlights: Vec<Highlight>,
    },

    /// A route was found between the chosen stops.
    Routed {
        path: AnnotatedPath,
        highlights: Vec<Highlight>,
    },

    /// The query ran but produced no route.
    Failed(RouteError),
}

/// Advance the selection state machine by one pick.
///
/// Returns the next phase and the outcome for the presenter.
pub fn on_node_picked(
    graph: &Graph,
    phase: Phase,
    node: NodeId,
    config: &RouteConfig,
) -> (Phase, PickOutcome) {
    if graph.node(node).is_none() {
        debug!(%node, ?phase, "ignoring pick of unknown stop");
        return (phase, PickOutcome::UnknownNode(node));
    }

    match phase {
        Phase::AwaitingStart => {
            debug!(start = %node, "start selected");
            let outcome = PickOutcome::StartSelected {
                start: node,
                highlights: highlight::start(graph, node),
            };
            (Phase::AwaitingEnd { start: node }, outcome)
        }
        Phase::AwaitingEnd { start } => {
            let outcome = match routing::plan(graph, start, node, config) {
                Ok(plan) => PickOutcome::Routed {
                    highlights: highlight::path(graph, &plan.route.nodes),
                    path: plan.annotated,
                },
                Err(e) => {
                    debug!(%start, end = %node, error = %e, "route query failed");
                    PickOutcome::Failed(e)
                }
            };
            (Phase::AwaitingStart, outcome)
        }
    }
}

/// Holds the selection phase between picks.
///
/// The selected start stop lives only here and is cleared after every
/// completed query.
#[derive(Debug, Clone, Default)]
pub struct SelectionCoordinator {
    phase: Phase,
    config: RouteConfig,
}

impl SelectionCoordinator {
    pub fn new(config: RouteConfig) -> Self {
        Self {
            phase: Phase::AwaitingStart,
            config,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Currently selected start stop, if any.
    pub fn selected_start(&self) -> Option<NodeId> {
        match self.phase {
            Phase::AwaitingStart => None,
            Phase::AwaitingEnd { start } => Some(start),
        }
    }

    /// Handle a pick event.
    pub fn pick(&mut self, graph: &Graph, node: NodeId) -> PickOutcome {
        let (phase, outcome) = on_node_picked(graph, self.phase, node, &self.config);
        self.phase = phase;
        outcome
    }

    /// Drop any half-made selection.
    pub fn reset(&mut self) {
        self.phase = Phase::AwaitingStart;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::{PATH_COLOR, START_COLOR};

    /// A - B - C on one line, plus an isolated stop D.
    fn network() -> Graph {
        let mut g = Graph::new();
        let a = g.add_node("A", "1", "fecd08").unwrap();
        let b = g.add_node("B", "1", "fecd08").unwrap();
        let c = g.add_node("C", "1", "fecd08").unwrap();
        g.add_node("D", "9", "cdc92a").unwrap();
        g.add_edge(a, b, 60.0, false).unwrap();
        g.add_edge(b, c, 90.0, false).unwrap();
        g
    }

    #[test]
    fn starts_awaiting_start() {
        let coordinator = SelectionCoordinator::default();
        assert_eq!(coordinator.phase(), Phase::AwaitingStart);
        assert_eq!(coordinator.selected_start(), None);
    }

    #[test]
    fn first_pick_selects_start() {
        let g = network();
        let mut coordinator = SelectionCoordinator::default();

        let outcome = coordinator.pick(&g, NodeId(0));

        let PickOutcome::StartSelected { start, highlights } = outcome else {
            panic!("expected start selection");
        };
        assert_eq!(start, NodeId(0));
        assert_eq!(highlights.last(), Some(&Highlight::node(NodeId(0), START_COLOR)));
        assert_eq!(coordinator.phase(), Phase::AwaitingEnd { start: NodeId(0) });
    }

    #[test]
    fn second_pick_routes_and_resets() {
        let g = network();
        let mut coordinator = SelectionCoordinator::default();
        coordinator.pick(&g, NodeId(0));

        let outcome = coordinator.pick(&g, NodeId(2));

        let PickOutcome::Routed { path, highlights } = outcome else {
            panic!("expected a route");
        };
        assert_eq!(path.total_secs, 150.0);
        assert_eq!(path.transfers, 0);
        assert_eq!(highlights.len(), 2);
        assert!(highlights.iter().all(|h| h.color == PATH_COLOR));
        assert_eq!(coordinator.phase(), Phase::AwaitingStart);
        assert_eq!(coordinator.selected_start(), None);
    }

    #[test]
    fn failed_query_still_resets() {
        let g = network();
        let mut coordinator = SelectionCoordinator::default();
        coordinator.pick(&g, NodeId(0));

        let outcome = coordinator.pick(&g, NodeId(3));

        assert!(matches!(
            outcome,
            PickOutcome::Failed(RouteError::NoPathFound { .. })
        ));
        assert_eq!(coordinator.phase(), Phase::AwaitingStart);
    }

    #[test]
    fn negative_cycle_reported() {
        let mut g = network();
        g.add_edge(NodeId(3), NodeId(3), -1.0, true).unwrap();
        let mut coordinator = SelectionCoordinator::default();
        coordinator.pick(&g, NodeId(0));

        assert_eq!(
            coordinator.pick(&g, NodeId(2)),
            PickOutcome::Failed(RouteError::NegativeCycleDetected)
        );
        assert_eq!(coordinator.phase(), Phase::AwaitingStart);

        // The graph stays usable for further picks.
        assert!(matches!(
            coordinator.pick(&g, NodeId(1)),
            PickOutcome::StartSelected { .. }
        ));
    }

    #[test]
    fn unknown_start_is_ignored() {
        let g = network();
        let mut coordinator = SelectionCoordinator::default();

        assert_eq!(
            coordinator.pick(&g, NodeId(42)),
            PickOutcome::UnknownNode(NodeId(42))
        );
        assert_eq!(coordinator.phase(), Phase::AwaitingStart);
    }

    #[test]
    fn unknown_end_keeps_start() {
        let g = network();
        let mut coordinator = SelectionCoordinator::default();
        coordinator.pick(&g, NodeId(1));

        assert_eq!(
            coordinator.pick(&g, NodeId(42)),
            PickOutcome::UnknownNode(NodeId(42))
        );
        assert_eq!(coordinator.selected_start(), Some(NodeId(1)));

        // A valid end afterwards completes the query from the kept start.
        assert!(matches!(
            coordinator.pick(&g, NodeId(2)),
            PickOutcome::Routed { .. }
        ));
    }

    #[test]
    fn same_stop_twice() {
        let g = network();
        let (phase, _) = on_node_picked(&g, Phase::AwaitingStart, NodeId(1), &RouteConfig::default());
        let (phase, outcome) = on_node_picked(&g, phase, NodeId(1), &RouteConfig::default());

        let PickOutcome::Routed { path, highlights } = outcome else {
            panic!("expected a route");
        };
        assert_eq!(path.stops.len(), 1);
        assert!(highlights.is_empty());
        assert_eq!(phase, Phase::AwaitingStart);
    }

    #[test]
    fn reset_clears_selection() {
        let g = network();
        let mut coordinator = SelectionCoordinator::new(RouteConfig::default());
        coordinator.pick(&g, NodeId(0));
        coordinator.reset();

        assert_eq!(coordinator.selected_start(), None);
    }
}
