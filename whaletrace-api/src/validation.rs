//! Request validation helpers
//!
//! Pure functions returning `ApiError` on rejection, called at the top of
//! handlers before touching the store.

use crate::error::{ApiError, ApiResult};
use crate::types::CreateAlertRequest;

/// Default list cap when no `limit` parameter is supplied.
pub const DEFAULT_LIST_LIMIT: usize = 10;

/// Largest list cap a caller may request.
pub const MAX_LIST_LIMIT: usize = 100;

/// Validate a wallet address path parameter: `0x` followed by hex.
pub fn validate_wallet_address(address: &str) -> ApiResult<()> {
    let hex = address
        .strip_prefix("0x")
        .ok_or_else(|| ApiError::invalid_format("address", "0x-prefixed hex string"))?;
    if hex.is_empty() || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ApiError::invalid_format("address", "0x-prefixed hex string"));
    }
    Ok(())
}

/// Validate and resolve a `limit` query parameter.
pub fn resolve_limit(limit: Option<usize>) -> ApiResult<usize> {
    match limit {
        None => Ok(DEFAULT_LIST_LIMIT),
        Some(0) => Err(ApiError::invalid_input("limit must be at least 1")),
        Some(n) if n > MAX_LIST_LIMIT => Err(ApiError::invalid_input(format!(
            "limit must be at most {}",
            MAX_LIST_LIMIT
        ))),
        Some(n) => Ok(n),
    }
}

/// Validate an alert creation payload.
pub fn validate_create_alert(req: &CreateAlertRequest) -> ApiResult<()> {
    if req.category.trim().is_empty() {
        return Err(ApiError::missing_field("category"));
    }
    if !req.threshold.is_finite() || req.threshold <= 0.0 {
        return Err(ApiError::invalid_input(
            "threshold must be a positive finite number",
        ));
    }
    Ok(())
}

// ============================================================================
// UNIT TESTS
// ============================================================================
