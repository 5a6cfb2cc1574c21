//! Per-capability argument extraction heuristics
//!
//! Each capability's parsing lives here behind a plain function so it can be
//! tested independently of routing and execution. These are heuristics, not
//! parsers: regex and substring checks over the raw message.

use once_cell::sync::Lazy;
use regex::Regex;

/// `0x` followed by hex characters. First match wins.
static WALLET_ADDRESS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"0x[0-9a-fA-F]+").expect("static regex must compile"));

/// Default number of transactions returned by the transactions capability.
pub const DEFAULT_TRANSACTION_LIMIT: usize = 10;

/// Smaller limit used when the user asks for "recent"/"latest" activity.
pub const RECENT_TRANSACTION_LIMIT: usize = 5;

/// Extract the first wallet address mentioned in the message, if any.
pub fn extract_wallet_address(message: &str) -> Option<String> {
    WALLET_ADDRESS_RE
        .find(message)
        .map(|m| m.as_str().to_string())
}

/// Derive the transaction result limit from recency wording.
pub fn transaction_limit(message: &str) -> usize {
    let lower = message.to_lowercase();
    if lower.contains("recent") || lower.contains("latest") {
        RECENT_TRANSACTION_LIMIT
    } else {
        DEFAULT_TRANSACTION_LIMIT
    }
}

/// Advisory topic-mention flags for the insights capability.
///
/// Computed during extraction but only loosely used downstream - the
/// insights handler treats them as hints, not filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InsightMentions {
    pub price: bool,
    pub whale: bool,
    pub market: bool,
    pub trend: bool,
}

/// Which insight topics the message mentions.
pub fn insight_mentions(message: &str) -> InsightMentions {
    let lower = message.to_lowercase();
    InsightMentions {
        price: lower.contains("price"),
        whale: lower.contains("whale"),
        market: lower.contains("market"),
        trend: lower.contains("trend"),
    }
}

// ============================================================================
// UNIT TESTS
// ============================================================================


// ============================================================================
// PROPERTY-BASED TESTS
// ============================================================================
