//! Request and response types for the REST API
//!
//! Domain entities serialize directly; the types here are the request
//! payloads and list wrappers specific to the HTTP surface.

use serde::{Deserialize, Serialize};
use whaletrace_core::{
    Alert, MarketInsight, SmartNotification, UserId, Wallet, WhaleTransaction,
};

// ============================================================================
// CONVERSATION
// ============================================================================

/// Body of `POST /api/v1/chat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ChatRequest {
    /// Free-text user query.
    pub query: String,
}

/// Body of `POST /api/v1/assistant`. Same semantics as `ChatRequest`,
/// kept as a separate shape for dashboard compatibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AssistantRequest {
    /// Free-text user message.
    pub message: String,
}

// ============================================================================
// QUERY PARAMETERS
// ============================================================================

/// Optional acting-user selector. Absent means the seeded demo user.
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
pub struct UserQuery {
    pub user_id: Option<UserId>,
}

/// Optional list size cap.
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
pub struct LimitQuery {
    pub limit: Option<usize>,
}

// ============================================================================
// NOTIFICATIONS
// ============================================================================

/// Response of `POST /api/v1/notifications/check`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CheckNotificationsResponse {
    /// Notifications created by this evaluation pass (possibly empty).
    pub created: Vec<SmartNotification>,
    /// Human-readable reasons for signals that were skipped as malformed.
    pub skipped: Vec<String>,
}

/// Response of `GET /api/v1/notifications`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ListNotificationsResponse {
    pub notifications: Vec<SmartNotification>,
    pub total: usize,
}

// ============================================================================
// DASHBOARD DATA
// ============================================================================

/// Response of `GET /api/v1/wallets`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ListWalletsResponse {
    pub wallets: Vec<Wallet>,
    pub total: usize,
}

/// Response of `GET /api/v1/transactions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ListTransactionsResponse {
    pub transactions: Vec<WhaleTransaction>,
    pub total: usize,
}

/// Response of `GET /api/v1/insights`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ListInsightsResponse {
    pub insights: Vec<MarketInsight>,
    pub total: usize,
}

// ============================================================================
// ALERTS
// ============================================================================

/// Body of `POST /api/v1/alerts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateAlertRequest {
    /// Owner of the alert; absent means the seeded demo user.
    pub user_id: Option<UserId>,
    pub category: String,
    pub threshold: f64,
}

/// Response of `GET /api/v1/alerts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ListAlertsResponse {
    pub alerts: Vec<Alert>,
    pub total: usize,
}
