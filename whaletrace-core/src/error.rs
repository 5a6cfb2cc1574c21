//! Error types for Whaletrace operations

use thiserror::Error;

/// Storage layer errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("Insert failed for {entity}: {reason}")]
    InsertFailed { entity: &'static str, reason: String },

    #[error("Storage lock poisoned")]
    LockPoisoned,
}

/// Validation errors for user input and seed data.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error("Required field missing: {field}")]
    RequiredFieldMissing { field: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Malformed spending signal for category {category:?}: {reason}")]
    MalformedSignal { category: String, reason: String },
}

/// LLM provider errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LlmError {
    #[error("No chat provider configured")]
    ProviderNotConfigured,

    #[error("Rate limited by {provider}")]
    RateLimited { provider: String },

    #[error("Quota exhausted for {provider}")]
    QuotaExhausted { provider: String },

    #[error("Invalid API key for {provider}")]
    InvalidApiKey { provider: String },

    #[error("Request to {provider} failed: {message}")]
    RequestFailed { provider: String, message: String },

    #[error("Invalid response from {provider}: {reason}")]
    InvalidResponse { provider: String, reason: String },
}

/// Capability routing and execution errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AgentError {
    #[error("Capability already registered: {name}")]
    DuplicateCapability { name: String },

    #[error("No capability matched the message")]
    NoCapabilityMatched,

    #[error("Capability {name} failed: {reason}")]
    CapabilityFailed { name: String, reason: String },
}

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required configuration field: {field}")]
    MissingRequired { field: String },

    #[error("Invalid value for {field}: {value} - {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// Master error type for all Whaletrace errors.
#[derive(Debug, Clone, Error)]
pub enum WhaletraceError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Agent error: {0}")]
    Agent(#[from] AgentError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for Whaletrace operations.
pub type WhaletraceResult<T> = Result<T, WhaletraceError>;

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display_not_found() {
        let err = StoreError::NotFound {
            entity: "Wallet",
            key: "0xdead".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("Wallet"));
        assert!(msg.contains("0xdead"));
    }

    #[test]
    fn test_validation_error_display_malformed_signal() {
        let err = ValidationError::MalformedSignal {
            category: "BTC".to_string(),
            reason: "current_month is NaN".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("BTC"));
        assert!(msg.contains("NaN"));
    }

    #[test]
    fn test_llm_error_display_rate_limited() {
        let err = LlmError::RateLimited {
            provider: "openai".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("Rate limited"));
        assert!(msg.contains("openai"));
    }

    #[test]
    fn test_agent_error_display_duplicate() {
        let err = AgentError::DuplicateCapability {
            name: "wallet_lookup".to_string(),
        };
        assert!(format!("{}", err).contains("wallet_lookup"));
    }

    #[test]
    fn test_whaletrace_error_from_variants() {
        let store = WhaletraceError::from(StoreError::LockPoisoned);
        assert!(matches!(store, WhaletraceError::Store(_)));

        let llm = WhaletraceError::from(LlmError::ProviderNotConfigured);
        assert!(matches!(llm, WhaletraceError::Llm(_)));

        let validation = WhaletraceError::from(ValidationError::RequiredFieldMissing {
            field: "category".to_string(),
        });
        assert!(matches!(validation, WhaletraceError::Validation(_)));

        let agent = WhaletraceError::from(AgentError::NoCapabilityMatched);
        assert!(matches!(agent, WhaletraceError::Agent(_)));

        let config = WhaletraceError::from(ConfigError::MissingRequired {
            field: "WHALETRACE_API_PORT".to_string(),
        });
        assert!(matches!(config, WhaletraceError::Config(_)));
    }
}
