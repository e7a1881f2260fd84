//! Application state for the web layer.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::RouteConfig;
use crate::coordinator::SelectionCoordinator;
use crate::graph::Graph;
use crate::network::NetworkView;
use crate::source::{NetworkData, SourceError};

/// Shared application state.
///
/// The graph is built once at startup and never mutated. The selection
/// coordinator sits behind a mutex so picks are handled one at a time.
#[derive(Clone)]
pub struct AppState {
    /// Raw records, served as-is
    pub data: Arc<NetworkData>,

    /// Routing graph
    pub graph: Arc<Graph>,

    /// Display view of the graph
    pub view: Arc<NetworkView>,

    /// Route annotation settings
    pub config: Arc<RouteConfig>,

    /// Two-click selection state
    pub coordinator: Arc<Mutex<SelectionCoordinator>>,
}

impl AppState {
    /// Build the graph and view from loaded records.
    pub fn new(data: NetworkData, config: RouteConfig) -> Result<Self, SourceError> {
        let graph = data.graph()?;
        let view = NetworkView::from_graph(&graph);
        let coordinator = SelectionCoordinator::new(config.clone());

        Ok(Self {
            data: Arc::new(data),
            graph: Arc::new(graph),
            view: Arc::new(view),
            config: Arc::new(config),
            coordinator: Arc::new(Mutex::new(coordinator)),
        })
    }
}
