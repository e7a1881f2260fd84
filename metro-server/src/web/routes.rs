//! HTTP route handlers.

use std::path::Path;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tracing::warn;

use crate::highlight;
use crate::network::NetworkView;
use crate::routing::{RouteError, plan_by_label};
use crate::source::NetworkData;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
///
/// `static_dir` is the path to the front-end assets, served at `/`.
pub fn create_router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/data", get(data))
        .route("/network", get(network))
        .route("/route", post(route))
        .route("/pick", post(pick))
        .fallback_service(ServeDir::new(static_dir.as_ref()))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Raw stop and edge records.
async fn data(State(state): State<AppState>) -> Json<NetworkData> {
    Json(state.data.as_ref().clone())
}

/// Display view of the network.
async fn network(State(state): State<AppState>) -> Json<NetworkView> {
    Json(state.view.as_ref().clone())
}

/// Fastest route between two stops given by label.
async fn route(
    State(state): State<AppState>,
    Json(req): Json<RouteRequest>,
) -> Result<Json<RouteResult>, AppError> {
    if req.start.is_empty() || req.end.is_empty() {
        return Err(AppError::BadRequest {
            message: "start and end stops are required".to_string(),
        });
    }

    let plan = plan_by_label(&state.graph, &req.start, &req.end, &state.config)?;
    let highlights = highlight::path(&state.graph, &plan.route.nodes);

    Ok(Json(RouteResult::from_path(plan.annotated, highlights)))
}

/// One click of the two-click stop selection.
async fn pick(State(state): State<AppState>, Json(req): Json<PickRequest>) -> Json<PickResponse> {
    let mut coordinator = state.coordinator.lock().await;
    let outcome = coordinator.pick(&state.graph, req.node);

    Json(PickResponse {
        state: coordinator.phase(),
        outcome: outcome.into(),
    })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest {
        message: String,
    },
    NotFound {
        message: String,
        reason: Option<FailureReason>,
    },
    Unprocessable {
        message: String,
        reason: FailureReason,
    },
    Internal {
        message: String,
    },
}

impl From<RouteError> for AppError {
    fn from(e: RouteError) -> Self {
        let reason = FailureReason::from(&e);
        let message = e.to_string();
        match e {
            RouteError::UnknownNode(_) => AppError::NotFound {
                message,
                reason: Some(reason),
            },
            RouteError::NoPathFound { .. } | RouteError::NegativeCycleDetected => {
                AppError::Unprocessable { message, reason }
            }
            RouteError::Graph(_) => AppError::Internal { message },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, error, reason) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message, None),
            AppError::NotFound { message, reason } => (StatusCode::NOT_FOUND, message, reason),
            AppError::Unprocessable { message, reason } => {
                (StatusCode::UNPROCESSABLE_ENTITY, message, Some(reason))
            }
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message, None),
        };

        warn!(status = status.as_u16(), error = %error, "request failed");

        let body = Json(ErrorResponse { error, reason });
        (status, body).into_response()
    }
}
