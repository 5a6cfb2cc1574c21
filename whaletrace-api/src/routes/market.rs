//! Market overview endpoint

use axum::{extract::State, response::IntoResponse, routing::get, Json, Router};

use crate::error::ApiResult;
use crate::state::AppState;

pub fn create_router() -> Router<AppState> {
    Router::new().route("/market", get(get_market))
}

/// GET /api/v1/market - Current token quotes
#[utoipa::path(
    get,
    path = "/api/v1/market",
    tag = "Market",
    responses(
        (status = 200, description = "Market snapshot", body = whaletrace_core::MarketSnapshot),
    ),
)]
pub async fn get_market(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let snapshot = state.store.market_snapshot()?;
    Ok(Json(snapshot))
}
