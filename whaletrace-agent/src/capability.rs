//! Capability trait and registry
//!
//! A capability is a named, independently invocable operation with a
//! schema-described input and a text-producing handler. Capabilities are
//! registered once at startup and looked up by testing keyword predicates
//! in registration order - order acts as an explicit priority.

use crate::extract::InsightMentions;
use std::sync::Arc;
use whaletrace_core::{AgentError, WhaletraceResult};

// ============================================================================
// ARGUMENTS
// ============================================================================

/// Structured arguments extracted from a free-text message, one variant per
/// capability family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapabilityArgs {
    /// No arguments.
    None,
    /// Wallet lookup: the first `0x...` address in the message, if any.
    Wallet { address: Option<String> },
    /// Transaction listing: result count limit derived from recency wording.
    Transactions { limit: usize },
    /// Insight listing: advisory topic-mention flags.
    Insights { mentions: InsightMentions },
}

// ============================================================================
// CAPABILITY TRAIT
// ============================================================================

/// A named operation the assistant can invoke.
/// Implementations must be thread-safe (Send + Sync).
pub trait Capability: Send + Sync {
    /// Unique name within the registry.
    fn name(&self) -> &str;

    /// Human-readable description, surfaced in topic listings.
    fn description(&self) -> &str;

    /// JSON schema descriptor for the capability's input.
    fn input_schema(&self) -> serde_json::Value;

    /// Keywords whose presence (substring, case-insensitive) routes a
    /// message to this capability.
    fn keywords(&self) -> &[&str];

    /// Extract structured arguments from the raw message.
    fn extract(&self, message: &str) -> CapabilityArgs;

    /// Execute the capability with previously extracted arguments.
    fn run(&self, args: &CapabilityArgs) -> WhaletraceResult<String>;
}

// ============================================================================
// REGISTRY
// ============================================================================

/// Ordered capability registry with first-match-wins routing.
#[derive(Clone, Default)]
pub struct CapabilityRegistry {
    capabilities: Vec<Arc<dyn Capability>>,
}

impl CapabilityRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a capability at the end of the routing order.
    ///
    /// Duplicate names are rejected: the original source silently relied on
    /// first-registered-wins, which hides mistakes; here a second
    /// registration under an existing name is an error.
    pub fn register(&mut self, capability: Arc<dyn Capability>) -> Result<(), AgentError> {
        if self.capabilities.iter().any(|c| c.name() == capability.name()) {
            return Err(AgentError::DuplicateCapability {
                name: capability.name().to_string(),
            });
        }
        self.capabilities.push(capability);
        Ok(())
    }

    /// Route a message to the first capability whose keyword predicate
    /// matches. Deterministic: same message and registration order always
    /// yield the same capability.
    pub fn route(&self, message: &str) -> Option<Arc<dyn Capability>> {
        let lower = message.to_lowercase();
        self.capabilities
            .iter()
            .find(|c| c.keywords().iter().any(|k| lower.contains(k)))
            .cloned()
    }

    /// Extract and execute against a routed capability, converting handler
    /// failures into a user-facing string. This sits behind a chat surface,
    /// so errors must never propagate.
    pub fn execute(&self, capability: &dyn Capability, message: &str) -> String {
        let args = capability.extract(message);
        match capability.run(&args) {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(capability = capability.name(), error = %e, "Capability execution failed");
                format!(
                    "Sorry, I couldn't complete that request ({}). Try asking about wallets, transactions, market trends, or insights.",
                    capability.name()
                )
            }
        }
    }

    /// Route and execute in one step. `None` when no capability matched.
    pub fn respond(&self, message: &str) -> Option<String> {
        self.route(message)
            .map(|capability| self.execute(capability.as_ref(), message))
    }

    /// Registered capabilities in routing order.
    pub fn capabilities(&self) -> &[Arc<dyn Capability>] {
        &self.capabilities
    }

    /// Names and descriptions, for topic listings.
    pub fn describe(&self) -> Vec<(String, String)> {
        self.capabilities
            .iter()
            .map(|c| (c.name().to_string(), c.description().to_string()))
            .collect()
    }
}

impl std::fmt::Debug for CapabilityRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapabilityRegistry")
            .field(
                "capabilities",
                &self
                    .capabilities
                    .iter()
                    .map(|c| c.name().to_string())
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

// ============================================================================
// UNIT TESTS
// ============================================================================


// ============================================================================
// PROPERTY-BASED TESTS
// ============================================================================

#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    struct KeywordOnly {
        name: &'static str,
        keywords: &'static [&'static str],
    }

    impl Capability for KeywordOnly {
        fn name(&self) -> &str {
            self.name
        }

        fn description(&self) -> &str {
            "keyword-only"
        }

        fn input_schema(&self) -> serde_json::Value {
            serde_json::json!({"type": "object"})
        }

        fn keywords(&self) -> &[&str] {
            self.keywords
        }

        fn extract(&self, _message: &str) -> CapabilityArgs {
            CapabilityArgs::None
        }

        fn run(&self, _args: &CapabilityArgs) -> WhaletraceResult<String> {
            Ok(self.name.to_string())
        }
    }

    fn registry() -> CapabilityRegistry {
        let mut registry = CapabilityRegistry::new();
        registry
            .register(Arc::new(KeywordOnly {
                name: "market",
                keywords: &["market", "trend", "price"],
            }))
            .unwrap();
        registry
            .register(Arc::new(KeywordOnly {
                name: "wallet",
                keywords: &["wallet", "address", "0x"],
            }))
            .unwrap();
        registry
            .register(Arc::new(KeywordOnly {
                name: "transactions",
                keywords: &["transaction", "transfer"],
            }))
            .unwrap();
        registry
    }

    proptest! {
        /// Routing is a pure function of the message: repeated calls always
        /// pick the same capability (or consistently none).
        #[test]
        fn prop_route_is_deterministic(message in ".{0,200}") {
            let registry = registry();
            let first = registry.route(&message).map(|c| c.name().to_string());
            for _ in 0..5 {
                let again = registry.route(&message).map(|c| c.name().to_string());
                prop_assert_eq!(&again, &first);
            }
        }

        /// A routed capability always has a keyword present in the lowercased
        /// message; a miss means no registered keyword is present.
        #[test]
        fn prop_route_agrees_with_keyword_presence(message in ".{0,200}") {
            let registry = registry();
            let lower = message.to_lowercase();
            match registry.route(&message) {
                Some(capability) => {
                    prop_assert!(capability.keywords().iter().any(|k| lower.contains(k)));
                }
                None => {
                    for capability in registry.capabilities() {
                        prop_assert!(capability.keywords().iter().all(|k| !lower.contains(k)));
                    }
                }
            }
        }
    }
}
