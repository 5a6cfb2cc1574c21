//! REST API routes
//!
//! All route handlers organized by entity type:
//! - Conversational endpoints (chat/assistant)
//! - Notifications (check/list/acknowledge)
//! - Dashboard data (wallets, transactions, insights, market)
//! - User-defined alerts
//! - Health checks
//!
//! CORS is permissive by default for browser dashboards; a tower-http
//! timeout layer bounds every request.

pub mod alert;
pub mod chat;
pub mod health;
pub mod insight;
pub mod market;
pub mod notification;
pub mod transaction;
pub mod wallet;

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::state::AppState;

/// Build the complete API router.
pub fn create_api_router(state: AppState, config: &ApiConfig) -> Router {
    // An unparseable configured origin falls back to wildcard rather than
    // refusing to start.
    let origin = match config.cors_allow_origin.as_str() {
        "*" => AllowOrigin::from(Any),
        other => other
            .parse::<HeaderValue>()
            .map(AllowOrigin::exact)
            .unwrap_or_else(|_| {
                tracing::warn!(origin = other, "Invalid CORS origin, allowing any");
                AllowOrigin::from(Any)
            }),
    };
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_origin(origin);

    let api = Router::new()
        .merge(chat::create_router())
        .merge(notification::create_router())
        .merge(wallet::create_router())
        .merge(transaction::create_router())
        .merge(insight::create_router())
        .merge(market::create_router())
        .merge(alert::create_router());

    let router = Router::new()
        .nest("/api/v1", api)
        .merge(health::create_router());

    #[cfg(feature = "openapi")]
    let router = router.merge(crate::openapi::create_router());

    router
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(cors)
        .with_state(state)
}
