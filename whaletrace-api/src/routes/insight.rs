//! Market insight endpoints

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::error::ApiResult;
use crate::state::AppState;
use crate::types::{LimitQuery, ListInsightsResponse};
use crate::validation::resolve_limit;

pub fn create_router() -> Router<AppState> {
    Router::new().route("/insights", get(list_insights))
}

/// GET /api/v1/insights - Latest insights from the analysis feed
#[utoipa::path(
    get,
    path = "/api/v1/insights",
    tag = "Insights",
    params(LimitQuery),
    responses(
        (status = 200, description = "Insight list", body = ListInsightsResponse),
        (status = 400, description = "Invalid limit", body = crate::error::ApiError),
    ),
)]
pub async fn list_insights(
    State(state): State<AppState>,
    Query(params): Query<LimitQuery>,
) -> ApiResult<impl IntoResponse> {
    let limit = resolve_limit(params.limit)?;
    let insights = state.store.insight_list_recent(limit)?;
    let total = insights.len();
    Ok(Json(ListInsightsResponse { insights, total }))
}
