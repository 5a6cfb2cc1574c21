//! User-defined alert endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get},
    Json, Router,
};
use whaletrace_core::{EntityId, NewAlert};

use crate::error::ApiResult;
use crate::state::AppState;
use crate::types::{CreateAlertRequest, ListAlertsResponse, UserQuery};
use crate::validation::validate_create_alert;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/alerts", get(list_alerts).post(create_alert))
        .route("/alerts/:id", delete(delete_alert))
}

// ============================================================================
// ROUTE HANDLERS
// ============================================================================

/// POST /api/v1/alerts - Create a user-defined alert
#[utoipa::path(
    post,
    path = "/api/v1/alerts",
    tag = "Alerts",
    request_body = CreateAlertRequest,
    responses(
        (status = 201, description = "Alert created", body = whaletrace_core::Alert),
        (status = 400, description = "Invalid payload", body = crate::error::ApiError),
    ),
)]
pub async fn create_alert(
    State(state): State<AppState>,
    Json(req): Json<CreateAlertRequest>,
) -> ApiResult<impl IntoResponse> {
    validate_create_alert(&req)?;
    let alert = state.store.alert_insert(NewAlert {
        user_id: state.resolve_user(req.user_id),
        category: req.category.trim().to_string(),
        threshold: req.threshold,
    })?;
    Ok((StatusCode::CREATED, Json(alert)))
}

/// GET /api/v1/alerts - Alerts for the acting user
#[utoipa::path(
    get,
    path = "/api/v1/alerts",
    tag = "Alerts",
    params(UserQuery),
    responses(
        (status = 200, description = "Alert list", body = ListAlertsResponse),
    ),
)]
pub async fn list_alerts(
    State(state): State<AppState>,
    Query(params): Query<UserQuery>,
) -> ApiResult<impl IntoResponse> {
    let user_id = state.resolve_user(params.user_id);
    let alerts = state.store.alert_list(user_id)?;
    let total = alerts.len();
    Ok(Json(ListAlertsResponse { alerts, total }))
}

/// DELETE /api/v1/alerts/:id - Remove an alert
#[utoipa::path(
    delete,
    path = "/api/v1/alerts/{id}",
    tag = "Alerts",
    params(
        ("id" = i64, Path, description = "Alert id"),
    ),
    responses(
        (status = 204, description = "Alert deleted"),
        (status = 404, description = "Unknown alert id", body = crate::error::ApiError),
    ),
)]
pub async fn delete_alert(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> ApiResult<impl IntoResponse> {
    state.store.alert_delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}
