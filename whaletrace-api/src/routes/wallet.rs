//! Wallet endpoints

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use crate::types::ListWalletsResponse;
use crate::validation::validate_wallet_address;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/wallets", get(list_wallets))
        .route("/wallets/:address", get(get_wallet))
}

// ============================================================================
// ROUTE HANDLERS
// ============================================================================

/// GET /api/v1/wallets - Tracked wallets, largest balance first
#[utoipa::path(
    get,
    path = "/api/v1/wallets",
    tag = "Wallets",
    responses(
        (status = 200, description = "Wallet list", body = ListWalletsResponse),
    ),
)]
pub async fn list_wallets(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let wallets = state.store.wallet_list()?;
    let total = wallets.len();
    Ok(Json(ListWalletsResponse { wallets, total }))
}

/// GET /api/v1/wallets/:address - Look up a wallet by address
#[utoipa::path(
    get,
    path = "/api/v1/wallets/{address}",
    tag = "Wallets",
    params(
        ("address" = String, Path, description = "0x-prefixed hex address"),
    ),
    responses(
        (status = 200, description = "Wallet details", body = whaletrace_core::Wallet),
        (status = 400, description = "Malformed address", body = ApiError),
        (status = 404, description = "Wallet not tracked", body = ApiError),
    ),
)]
pub async fn get_wallet(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> ApiResult<impl IntoResponse> {
    validate_wallet_address(&address)?;
    match state.store.wallet_get(&address)? {
        Some(wallet) => Ok(Json(wallet)),
        None => Err(ApiError::wallet_not_found(&address)),
    }
}
