//! OpenAPI specification for the Whaletrace API
//!
//! Generated with utoipa from route annotations and domain types; served
//! at /openapi.json.

use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

use crate::error::{ApiError, ErrorCode};
use crate::routes::{alert, chat, health, insight, market, notification, transaction, wallet};
use crate::state::AppState;
use crate::types::{
    AssistantRequest, ChatRequest, CheckNotificationsResponse, CreateAlertRequest,
    ListAlertsResponse, ListInsightsResponse, ListNotificationsResponse,
    ListTransactionsResponse, ListWalletsResponse,
};

use whaletrace_core::{
    Alert, ChatChoice, ChatMessage, ChatResponse, ChatRole, Chain, MarketInsight, MarketSnapshot,
    Sentiment, SmartNotification, SpendingSignal, TokenQuote, TriggerType, User, Wallet,
    WhaleTransaction,
};

/// OpenAPI document for the Whaletrace API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Whaletrace API",
        version = "0.3.0",
        description = "Whale wallet tracking dashboard backend: market data, spending notifications, and a conversational assistant",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT"),
    ),
    servers(
        (url = "http://localhost:3000", description = "Local Development")
    ),
    tags(
        (name = "Assistant", description = "Conversational endpoints with capability routing and LLM fallback"),
        (name = "Notifications", description = "Spending rule evaluation and notification lifecycle"),
        (name = "Wallets", description = "Tracked whale wallets"),
        (name = "Transactions", description = "Recent large on-chain transfers"),
        (name = "Insights", description = "Editorial market insights"),
        (name = "Market", description = "Token price overview"),
        (name = "Alerts", description = "User-defined alert rules"),
        (name = "Health", description = "Liveness and readiness probes")
    ),
    paths(
        chat::chat,
        chat::assistant,
        notification::check_notifications,
        notification::list_notifications,
        notification::acknowledge_notification,
        wallet::list_wallets,
        wallet::get_wallet,
        transaction::list_transactions,
        insight::list_insights,
        market::get_market,
        alert::create_alert,
        alert::list_alerts,
        alert::delete_alert,
        health::health,
        health::liveness,
        health::readiness,
    ),
    components(schemas(
        ApiError,
        ErrorCode,
        ChatRequest,
        AssistantRequest,
        ChatResponse,
        ChatChoice,
        ChatMessage,
        ChatRole,
        CheckNotificationsResponse,
        ListNotificationsResponse,
        ListWalletsResponse,
        ListTransactionsResponse,
        ListInsightsResponse,
        CreateAlertRequest,
        ListAlertsResponse,
        SmartNotification,
        SpendingSignal,
        TriggerType,
        User,
        Wallet,
        Chain,
        WhaleTransaction,
        MarketInsight,
        Sentiment,
        MarketSnapshot,
        TokenQuote,
        Alert,
        health::HealthResponse,
        health::HealthStatus,
        health::HealthDetails,
    ))
)]
pub struct ApiDoc;

pub fn create_router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(serve_openapi))
}

/// GET /openapi.json - The generated specification
pub async fn serve_openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

// ============================================================================
// UNIT TESTS
// ============================================================================
