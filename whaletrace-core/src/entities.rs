//! Core entity structures

use crate::{Chain, EntityId, Sentiment, Timestamp, TriggerType, UserId};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A registered user of the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct User {
    pub user_id: UserId,
    pub username: String,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    pub created_at: Timestamp,
}

/// A tracked whale wallet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Wallet {
    /// Hex address, `0x`-prefixed. Used as the lookup key.
    pub address: String,
    pub label: Option<String>,
    pub chain: Chain,
    /// Current balance in the wallet's native token.
    pub balance: f64,
    pub token: String,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    pub last_active: Timestamp,
}

/// A large on-chain transfer surfaced on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct WhaleTransaction {
    pub id: EntityId,
    pub hash: String,
    pub from_address: String,
    pub to_address: String,
    pub amount: f64,
    pub token: String,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    pub timestamp: Timestamp,
}

/// An editorial market insight shown in the feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MarketInsight {
    pub id: EntityId,
    pub title: String,
    pub body: String,
    pub sentiment: Sentiment,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    pub created_at: Timestamp,
}

/// Per-token price snapshot in the market overview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TokenQuote {
    pub symbol: String,
    pub price_usd: f64,
    /// 24h change in percent.
    pub change_24h: f64,
}

/// Market overview served by the market endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MarketSnapshot {
    pub quotes: Vec<TokenQuote>,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    pub as_of: Timestamp,
}

/// A user-defined alert rule over a spending category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Alert {
    pub id: EntityId,
    pub user_id: UserId,
    pub category: String,
    pub threshold: f64,
    pub active: bool,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    pub created_at: Timestamp,
}

/// Payload for creating a user-defined alert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NewAlert {
    pub user_id: UserId,
    pub category: String,
    pub threshold: f64,
}

/// Per-user, per-category spending reference data.
///
/// Seeded at startup and never mutated by the engine; the rule engine treats
/// this as read-only input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SpendingSignal {
    pub user_id: UserId,
    pub category: String,
    pub current_month: f64,
    pub previous_month: f64,
    pub historical_average: f64,
    pub threshold: Option<f64>,
}

/// A notification emitted by the rule engine.
///
/// Lifecycle: created when a rule condition newly holds and no matching
/// unacknowledged notification exists; mutated only by acknowledgement
/// (one-way); never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SmartNotification {
    pub id: EntityId,
    pub user_id: UserId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub trigger_type: TriggerType,
    /// Formatted numeric value that tripped the rule.
    pub trigger_value: String,
    pub acknowledged: bool,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    pub created_at: Timestamp,
}

/// Payload for creating a notification. The store assigns id and timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct NewNotification {
    pub user_id: UserId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub trigger_type: TriggerType,
    pub trigger_value: String,
}

impl NewNotification {
    /// Materialize into a full notification record with the given id.
    pub fn into_notification(self, id: EntityId) -> SmartNotification {
        SmartNotification {
            id,
            user_id: self.user_id,
            title: self.title,
            description: self.description,
            category: self.category,
            trigger_type: self.trigger_type,
            trigger_value: self.trigger_value,
            acknowledged: false,
            created_at: Utc::now(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
