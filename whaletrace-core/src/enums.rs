//! Enum types for Whaletrace entities

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// CORE ENUMS
// ============================================================================

/// Category of rule that caused a notification to fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TriggerType {
    /// Current-month spend reached a user-configured threshold (>=).
    Threshold,
    /// Month-over-month increase exceeded 20% (strict >).
    MonthlyComparison,
    /// Deviation from the historical average exceeded 20% (strict >).
    Trend,
}

impl TriggerType {
    /// All trigger types, in evaluation order.
    pub const ALL: [TriggerType; 3] = [
        TriggerType::Threshold,
        TriggerType::MonthlyComparison,
        TriggerType::Trend,
    ];
}

impl fmt::Display for TriggerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TriggerType::Threshold => "THRESHOLD",
            TriggerType::MonthlyComparison => "MONTHLY_COMPARISON",
            TriggerType::Trend => "TREND",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for TriggerType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "THRESHOLD" => Ok(TriggerType::Threshold),
            "MONTHLY_COMPARISON" => Ok(TriggerType::MonthlyComparison),
            "TREND" => Ok(TriggerType::Trend),
            other => Err(format!("Unknown trigger type: {}", other)),
        }
    }
}

/// Blockchain a wallet or transaction lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum Chain {
    Ethereum,
    Bitcoin,
    Solana,
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Market sentiment attached to an insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum Sentiment {
    Bullish,
    Bearish,
    #[default]
    Neutral,
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_type_display_roundtrip() {
        for trigger in TriggerType::ALL {
            let s = trigger.to_string();
            let parsed: TriggerType = s.parse().unwrap();
            assert_eq!(parsed, trigger);
        }
    }

    #[test]
    fn test_trigger_type_unknown_string() {
        let result: Result<TriggerType, _> = "PRICE_SPIKE".parse();
        assert!(result.is_err());
    }

    #[test]
    fn test_trigger_type_serde_screaming_snake() {
        let json = serde_json::to_string(&TriggerType::MonthlyComparison).unwrap();
        assert_eq!(json, "\"MONTHLY_COMPARISON\"");

        let parsed: TriggerType = serde_json::from_str("\"TREND\"").unwrap();
        assert_eq!(parsed, TriggerType::Trend);
    }

    #[test]
    fn test_sentiment_default_is_neutral() {
        assert_eq!(Sentiment::default(), Sentiment::Neutral);
    }
}
