//! Notification endpoints
//!
//! Evaluation is pull-based: `POST /notifications/check` runs the rule
//! engine for the acting user and returns only newly created records.

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use whaletrace_core::EntityId;

use crate::error::ApiResult;
use crate::state::AppState;
use crate::types::{CheckNotificationsResponse, ListNotificationsResponse, UserQuery};

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/notifications", get(list_notifications))
        .route("/notifications/check", post(check_notifications))
        .route("/notifications/:id/acknowledge", post(acknowledge_notification))
}

// ============================================================================
// ROUTE HANDLERS
// ============================================================================

/// POST /api/v1/notifications/check - Evaluate spending rules now
#[utoipa::path(
    post,
    path = "/api/v1/notifications/check",
    tag = "Notifications",
    params(UserQuery),
    responses(
        (status = 200, description = "Evaluation report", body = CheckNotificationsResponse),
    ),
)]
pub async fn check_notifications(
    State(state): State<AppState>,
    Query(params): Query<UserQuery>,
) -> ApiResult<impl IntoResponse> {
    let user_id = state.resolve_user(params.user_id);
    let report = state.engine.evaluate(user_id)?;
    tracing::info!(
        user_id,
        created = report.created.len(),
        skipped = report.skipped.len(),
        "Notification check completed"
    );
    Ok(Json(CheckNotificationsResponse {
        created: report.created,
        skipped: report.skipped.iter().map(|e| e.to_string()).collect(),
    }))
}

/// GET /api/v1/notifications - All notifications, newest first
#[utoipa::path(
    get,
    path = "/api/v1/notifications",
    tag = "Notifications",
    params(UserQuery),
    responses(
        (status = 200, description = "Notification list", body = ListNotificationsResponse),
    ),
)]
pub async fn list_notifications(
    State(state): State<AppState>,
    Query(params): Query<UserQuery>,
) -> ApiResult<impl IntoResponse> {
    let user_id = state.resolve_user(params.user_id);
    let notifications = state.store.notification_list(user_id)?;
    let total = notifications.len();
    Ok(Json(ListNotificationsResponse {
        notifications,
        total,
    }))
}

/// POST /api/v1/notifications/:id/acknowledge - One-way acknowledgement
#[utoipa::path(
    post,
    path = "/api/v1/notifications/{id}/acknowledge",
    tag = "Notifications",
    params(
        ("id" = i64, Path, description = "Notification id"),
    ),
    responses(
        (status = 200, description = "Acknowledged notification", body = whaletrace_core::SmartNotification),
        (status = 404, description = "Unknown notification id", body = crate::error::ApiError),
    ),
)]
pub async fn acknowledge_notification(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> ApiResult<impl IntoResponse> {
    let notification = state.store.notification_acknowledge(id)?;
    Ok(Json(notification))
}
