//! Whaletrace LLM - Chat Completion Abstraction
//!
//! Provider-agnostic trait for chat completions plus the OpenAI-compatible
//! HTTP implementation and a mock provider for tests. The assistant's
//! fallback chain only ever talks to the `ChatProvider` trait.

pub mod openai;

pub use openai::OpenAiChatProvider;

use async_trait::async_trait;
use std::time::Duration;
use whaletrace_core::{ChatMessage, LlmError, WhaletraceResult};

// ============================================================================
// CHAT PROVIDER TRAIT
// ============================================================================

/// Trait for chat completion providers.
/// Implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Run a chat completion over the full message history.
    ///
    /// # Returns
    /// * `Ok(String)` - The assistant's reply text
    /// * `Err(WhaletraceError::Llm)` - If the completion fails
    async fn complete(&self, messages: &[ChatMessage]) -> WhaletraceResult<String>;

    /// Model identifier this provider talks to.
    fn model_id(&self) -> &str;
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// LLM configuration, loaded from environment variables.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// API key. `None` means no model credential is configured and the
    /// assistant skips the completion stage entirely.
    pub api_key: Option<String>,
    /// Model name sent with every completion request.
    pub model: String,
    /// Base URL of the OpenAI-compatible endpoint.
    pub base_url: String,
    /// Outbound request timeout. A hung provider call must never stall a
    /// chat request indefinitely.
    pub timeout: Duration,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout: Duration::from_secs(15),
        }
    }
}

impl LlmConfig {
    /// Create LlmConfig from environment variables.
    ///
    /// Environment variables:
    /// - `WHALETRACE_OPENAI_API_KEY`: API key (unset = stage disabled)
    /// - `WHALETRACE_LLM_MODEL`: Model name (default: gpt-4o-mini)
    /// - `WHALETRACE_LLM_BASE_URL`: Endpoint base (default: api.openai.com/v1)
    /// - `WHALETRACE_LLM_TIMEOUT_SECS`: Request timeout (default: 15)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_key: std::env::var("WHALETRACE_OPENAI_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            model: std::env::var("WHALETRACE_LLM_MODEL").unwrap_or(defaults.model),
            base_url: std::env::var("WHALETRACE_LLM_BASE_URL").unwrap_or(defaults.base_url),
            timeout: std::env::var("WHALETRACE_LLM_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
        }
    }

    /// Build the provider, if a credential is configured.
    pub fn provider(&self) -> Option<OpenAiChatProvider> {
        self.api_key.as_ref().map(|key| {
            OpenAiChatProvider::new(key.clone(), self.model.clone())
                .with_base_url(self.base_url.clone())
                .with_timeout(self.timeout)
        })
    }
}

// ============================================================================
// MOCK PROVIDER FOR TESTING
// ============================================================================

/// Mock chat provider for testing.
/// Replies with a fixed string, or fails with a scripted error.
#[derive(Debug, Clone)]
pub struct MockChatProvider {
    reply: String,
    failure: Option<LlmError>,
}

impl MockChatProvider {
    /// Create a mock that always replies with `reply`.
    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            failure: None,
        }
    }

    /// Create a mock that always fails with `error`.
    pub fn failing(error: LlmError) -> Self {
        Self {
            reply: String::new(),
            failure: Some(error),
        }
    }
}

#[async_trait]
impl ChatProvider for MockChatProvider {
    async fn complete(&self, messages: &[ChatMessage]) -> WhaletraceResult<String> {
        if let Some(error) = &self.failure {
            return Err(error.clone().into());
        }
        if messages.is_empty() {
            return Err(LlmError::InvalidResponse {
                provider: "mock".to_string(),
                reason: "Empty message history".to_string(),
            }
            .into());
        }
        Ok(self.reply.clone())
    }

    fn model_id(&self) -> &str {
        "mock-chat"
    }
}

// ============================================================================
// UNIT TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use whaletrace_core::WhaletraceError;

    #[tokio::test]
    async fn test_mock_provider_replies() {
        let provider = MockChatProvider::with_reply("whales are moving");
        let reply = provider
            .complete(&[ChatMessage::user("what's happening?")])
            .await
            .unwrap();
        assert_eq!(reply, "whales are moving");
        assert_eq!(provider.model_id(), "mock-chat");
    }

    #[tokio::test]
    async fn test_mock_provider_scripted_failure() {
        let provider = MockChatProvider::failing(LlmError::RateLimited {
            provider: "mock".to_string(),
        });
        let err = provider
            .complete(&[ChatMessage::user("hi")])
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            WhaletraceError::Llm(LlmError::RateLimited { .. })
        ));
    }

    #[tokio::test]
    async fn test_mock_provider_rejects_empty_history() {
        let provider = MockChatProvider::with_reply("x");
        assert!(provider.complete(&[]).await.is_err());
    }

    #[test]
    fn test_config_defaults() {
        let config = LlmConfig::default();
        assert!(config.api_key.is_none());
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.timeout, Duration::from_secs(15));
        // No credential, no provider.
        assert!(config.provider().is_none());
    }

    #[test]
    fn test_config_with_key_builds_provider() {
        let config = LlmConfig {
            api_key: Some("sk-test".to_string()),
            ..Default::default()
        };
        let provider = config.provider().unwrap();
        assert_eq!(provider.model_id(), "gpt-4o-mini");
    }
}
