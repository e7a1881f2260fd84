//! Web layer for the metro route planner.
//!
//! Serves the network data and display view, answers route queries, and
//! drives the two-click stop selection over HTTP.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
