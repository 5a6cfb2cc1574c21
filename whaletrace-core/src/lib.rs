//! Whaletrace Core - Entity Types
//!
//! Pure data structures with no behavior. All other crates depend on this.
//! This crate contains ONLY data types - no business logic.

pub mod chat;
pub mod entities;
pub mod enums;
pub mod error;
pub mod format;

pub use chat::{ChatChoice, ChatMessage, ChatResponse, ChatRole};
pub use entities::{
    Alert, MarketInsight, MarketSnapshot, NewAlert, NewNotification, SmartNotification,
    SpendingSignal, TokenQuote, User, Wallet, WhaleTransaction,
};
pub use enums::{Chain, Sentiment, TriggerType};
pub use error::{
    AgentError, ConfigError, LlmError, StoreError, ValidationError, WhaletraceError,
    WhaletraceResult,
};
pub use format::{format_amount, format_percent};

use chrono::{DateTime, Utc};

// ============================================================================
// IDENTITY TYPES
// ============================================================================

/// Entity identifier. Monotonically increasing per entity collection,
/// assigned by the store from an atomic counter.
pub type EntityId = i64;

/// Identifier of a user account.
pub type UserId = i64;

/// Timestamp type using UTC timezone.
pub type Timestamp = DateTime<Utc>;
