//! Whale transaction endpoints

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::error::ApiResult;
use crate::state::AppState;
use crate::types::{LimitQuery, ListTransactionsResponse};
use crate::validation::resolve_limit;

pub fn create_router() -> Router<AppState> {
    Router::new().route("/transactions", get(list_transactions))
}

/// GET /api/v1/transactions - Recent large transfers, newest first
#[utoipa::path(
    get,
    path = "/api/v1/transactions",
    tag = "Transactions",
    params(LimitQuery),
    responses(
        (status = 200, description = "Transaction list", body = ListTransactionsResponse),
        (status = 400, description = "Invalid limit", body = crate::error::ApiError),
    ),
)]
pub async fn list_transactions(
    State(state): State<AppState>,
    Query(params): Query<LimitQuery>,
) -> ApiResult<impl IntoResponse> {
    let limit = resolve_limit(params.limit)?;
    let transactions = state.store.transaction_list_recent(limit)?;
    let total = transactions.len();
    Ok(Json(ListTransactionsResponse {
        transactions,
        total,
    }))
}
