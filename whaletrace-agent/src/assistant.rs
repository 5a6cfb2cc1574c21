//! Assistant runtime and fallback chain
//!
//! The conversational surface must always produce a well-formed response.
//! Four stages run in order, each consuming the failures of the one before:
//!
//! 1. Remote delegation - if a remote agent endpoint is configured, forward
//!    the conversation there; on any error, fall through.
//! 2. Local capability routing - keyword match against the registry.
//! 3. Chat completion - if a model credential is configured; provider errors
//!    are absorbed into a canned topic listing, they never fall through.
//! 4. Static fallback - when nothing matched and no provider is configured.

use crate::capabilities;
use crate::capability::CapabilityRegistry;
use std::sync::Arc;
use whaletrace_core::{AgentError, ChatMessage, ChatResponse, ChatRole};
use whaletrace_llm::{ChatProvider, LlmConfig, OpenAiChatProvider};
use whaletrace_store::Store;

/// System prompt prepended before a chat completion.
const SYSTEM_PROMPT: &str = "You are the Whaletrace assistant. You help users understand \
whale wallet activity, large on-chain transfers, market trends, and spending notifications. \
Answer briefly and factually.";

/// Reply when no capability matched and no model is configured.
const STATIC_FALLBACK: &str = "I can help with whale wallets, recent transactions, \
market trends, and insights. Try asking about one of those topics.";

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Assistant configuration, loaded from environment variables.
#[derive(Debug, Clone, Default)]
pub struct AgentConfig {
    /// Credential for a remote agent endpoint. `None` disables delegation.
    pub remote_api_key: Option<String>,
    /// Base URL of the remote agent (OpenAI-compatible).
    pub remote_base_url: Option<String>,
    /// Model name forwarded to the remote agent.
    pub remote_model: String,
}

impl AgentConfig {
    /// Create AgentConfig from environment variables.
    ///
    /// Environment variables:
    /// - `WHALETRACE_REMOTE_AGENT_KEY`: remote credential (unset = disabled)
    /// - `WHALETRACE_REMOTE_AGENT_URL`: remote endpoint base URL
    /// - `WHALETRACE_REMOTE_AGENT_MODEL`: model name (default: whaletrace-agent)
    pub fn from_env() -> Self {
        Self {
            remote_api_key: std::env::var("WHALETRACE_REMOTE_AGENT_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            remote_base_url: std::env::var("WHALETRACE_REMOTE_AGENT_URL").ok(),
            remote_model: std::env::var("WHALETRACE_REMOTE_AGENT_MODEL")
                .unwrap_or_else(|_| "whaletrace-agent".to_string()),
        }
    }

    /// Build the remote delegation provider, if both key and URL are set.
    pub fn remote_provider(&self) -> Option<OpenAiChatProvider> {
        match (&self.remote_api_key, &self.remote_base_url) {
            (Some(key), Some(url)) => Some(
                OpenAiChatProvider::new(key.clone(), self.remote_model.clone())
                    .with_base_url(url.clone()),
            ),
            _ => None,
        }
    }
}

// ============================================================================
// RUNTIME
// ============================================================================

/// Assistant runtime. `respond` is infallible by construction: every stage
/// failure degrades to the next stage or to a canned reply.
pub struct AssistantRuntime {
    registry: CapabilityRegistry,
    remote: Option<Arc<dyn ChatProvider>>,
    provider: Option<Arc<dyn ChatProvider>>,
}

impl AssistantRuntime {
    /// Build the runtime with the default capability registry and providers
    /// taken from environment configuration.
    pub fn from_env(store: Arc<dyn Store>) -> Result<Self, AgentError> {
        let registry = capabilities::default_registry(store)?;
        let remote = AgentConfig::from_env()
            .remote_provider()
            .map(|p| Arc::new(p) as Arc<dyn ChatProvider>);
        let provider = LlmConfig::from_env()
            .provider()
            .map(|p| Arc::new(p) as Arc<dyn ChatProvider>);
        Ok(Self {
            registry,
            remote,
            provider,
        })
    }

    /// Build the runtime from explicit parts. Used by tests and by callers
    /// that manage configuration themselves.
    pub fn new(
        registry: CapabilityRegistry,
        remote: Option<Arc<dyn ChatProvider>>,
        provider: Option<Arc<dyn ChatProvider>>,
    ) -> Self {
        Self {
            registry,
            remote,
            provider,
        }
    }

    /// The capability registry backing local routing.
    pub fn registry(&self) -> &CapabilityRegistry {
        &self.registry
    }

    /// Run the fallback chain over a conversation. Never fails: the worst
    /// case is the static fallback message.
    pub async fn respond(&self, messages: &[ChatMessage]) -> ChatResponse {
        // Stage 1: remote delegation. Any error falls through.
        if let Some(remote) = &self.remote {
            match remote.complete(messages).await {
                Ok(reply) => {
                    tracing::debug!(model = remote.model_id(), "Remote agent answered");
                    return ChatResponse::assistant(reply);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Remote agent failed, falling back to local routing");
                }
            }
        }

        let query = last_user_message(messages);

        // Stage 2: local capability routing.
        if let Some(reply) = self.registry.respond(query) {
            return ChatResponse::assistant(reply);
        }

        // Stage 3: chat completion. Errors do NOT fall through to stage 4;
        // they become a topic listing so the caller still gets guidance.
        if let Some(provider) = &self.provider {
            let mut prompt = Vec::with_capacity(messages.len() + 1);
            prompt.push(ChatMessage::system(SYSTEM_PROMPT));
            prompt.extend(messages.iter().cloned());
            return match provider.complete(&prompt).await {
                Ok(reply) => ChatResponse::assistant(reply),
                Err(e) => {
                    tracing::warn!(error = %e, "Completion failed, serving topic listing");
                    ChatResponse::assistant(self.topic_listing())
                }
            };
        }

        // Stage 4: static fallback.
        ChatResponse::assistant(STATIC_FALLBACK)
    }

    /// Convenience wrapper for single-query surfaces.
    pub async fn respond_to_query(&self, query: &str) -> ChatResponse {
        self.respond(&[ChatMessage::user(query)]).await
    }

    fn topic_listing(&self) -> String {
        let mut reply = String::from(
            "I couldn't reach the language model just now. Meanwhile, I can answer directly about:\n",
        );
        for (name, description) in self.registry.describe() {
            reply.push_str(&format!("- {}: {}\n", name, description));
        }
        reply.trim_end().to_string()
    }
}

/// Content of the most recent user message, or empty when there is none.
fn last_user_message(messages: &[ChatMessage]) -> &str {
    messages
        .iter()
        .rev()
        .find(|m| m.role == ChatRole::User)
        .map(|m| m.content.as_str())
        .unwrap_or("")
}

// ============================================================================
// UNIT TESTS
// ============================================================================
