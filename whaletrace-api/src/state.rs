//! Shared application state for Axum routers.

use std::sync::Arc;
use std::time::Instant;

use whaletrace_agent::AssistantRuntime;
use whaletrace_core::UserId;
use whaletrace_rules::RuleEngine;
use whaletrace_store::seed::DEMO_USER_ID;
use whaletrace_store::Store;

/// Application-wide state shared across all routes.
#[derive(Clone)]
pub struct AppState {
    /// In-memory store; the single source of truth for all entities.
    pub store: Arc<dyn Store>,
    /// Notification rule engine over the same store.
    pub engine: RuleEngine,
    /// Assistant runtime backing the conversational endpoints.
    pub assistant: Arc<AssistantRuntime>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, assistant: Arc<AssistantRuntime>) -> Self {
        Self {
            engine: RuleEngine::new(store.clone()),
            store,
            assistant,
            start_time: Instant::now(),
        }
    }

    /// Resolve the acting user. No session auth: an explicit `user_id`
    /// parameter wins, otherwise the seeded demo user.
    pub fn resolve_user(&self, user_id: Option<UserId>) -> UserId {
        user_id.unwrap_or(DEMO_USER_ID)
    }
}
