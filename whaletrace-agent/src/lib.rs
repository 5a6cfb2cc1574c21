//! Whaletrace Agent - Capability Routing and Fallback Chain
//!
//! Maps unstructured natural-language input onto a fixed set of structured
//! operations (capabilities) and guarantees the conversational surface
//! always produces a well-formed response.
//!
//! Routing is deliberately simple: an ordered list of (keyword predicate,
//! handler) pairs, first match wins. It is not an intent classifier - false
//! positives and negatives are expected and acceptable. On a routing miss
//! the runtime escalates to a chat-completion provider and, failing that,
//! to a static fallback message.

pub mod assistant;
pub mod capabilities;
pub mod capability;
pub mod extract;

pub use assistant::{AgentConfig, AssistantRuntime};
pub use capabilities::{
    default_registry, InsightsCapability, MarketTrendsCapability, WalletLookupCapability,
    WhaleTransactionsCapability,
};
pub use capability::{Capability, CapabilityArgs, CapabilityRegistry};
pub use extract::{extract_wallet_address, insight_mentions, transaction_limit, InsightMentions};
