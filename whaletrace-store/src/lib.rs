//! Whaletrace Store - Storage Trait and In-Memory Implementation
//!
//! Defines the storage abstraction consumed by the rule engine, the
//! assistant capabilities, and the API layer. The only implementation is
//! in-memory: data is seeded at startup and regenerated on restart. The
//! store is constructed explicitly and injected into request handlers -
//! there is no module-level global.

pub mod seed;

pub use seed::seed_demo_data;

use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::RwLock;
use whaletrace_core::{
    Alert, EntityId, MarketInsight, MarketSnapshot, NewAlert, NewNotification, SmartNotification,
    SpendingSignal, StoreError, TriggerType, User, UserId, Wallet, WhaleTransaction,
    WhaletraceResult,
};

// ============================================================================
// STORE TRAIT
// ============================================================================

/// Storage trait for Whaletrace entities.
///
/// List-typed results are never null: absent data yields an empty `Vec`.
/// All operations are synchronous; a single map mutation is the only unit of
/// atomicity callers may rely on.
pub trait Store: Send + Sync {
    // === Users ===

    /// Get a user by id.
    fn user_get(&self, id: UserId) -> WhaletraceResult<Option<User>>;

    // === Spending signals (read-only reference data) ===

    /// All spending signals for a user.
    fn spending_signals(&self, user_id: UserId) -> WhaletraceResult<Vec<SpendingSignal>>;

    // === Notifications ===

    /// Insert a new notification; the store assigns the id and timestamp.
    fn notification_insert(&self, new: NewNotification) -> WhaletraceResult<SmartNotification>;

    /// All notifications for a user, most recent first.
    fn notification_list(&self, user_id: UserId) -> WhaletraceResult<Vec<SmartNotification>>;

    /// Unacknowledged notifications for a `(user, category, trigger)` tuple.
    fn notification_find_pending(
        &self,
        user_id: UserId,
        category: &str,
        trigger_type: TriggerType,
    ) -> WhaletraceResult<Vec<SmartNotification>>;

    /// Acknowledge a notification. Idempotent: acknowledging twice is a
    /// no-op, not an error. Unknown ids are a not-found error.
    fn notification_acknowledge(&self, id: EntityId) -> WhaletraceResult<SmartNotification>;

    // === Wallets ===

    /// Look up a wallet by address (case-insensitive on the hex part).
    fn wallet_get(&self, address: &str) -> WhaletraceResult<Option<Wallet>>;

    /// All tracked wallets.
    fn wallet_list(&self) -> WhaletraceResult<Vec<Wallet>>;

    // === Transactions ===

    /// Most recent whale transactions, newest first, capped at `limit`.
    fn transaction_list_recent(&self, limit: usize) -> WhaletraceResult<Vec<WhaleTransaction>>;

    // === Insights ===

    /// Most recent market insights, newest first, capped at `limit`.
    fn insight_list_recent(&self, limit: usize) -> WhaletraceResult<Vec<MarketInsight>>;

    // === Alerts ===

    /// Create a user-defined alert.
    fn alert_insert(&self, new: NewAlert) -> WhaletraceResult<Alert>;

    /// All alerts for a user.
    fn alert_list(&self, user_id: UserId) -> WhaletraceResult<Vec<Alert>>;

    /// Delete an alert by id. Unknown ids are a not-found error.
    fn alert_delete(&self, id: EntityId) -> WhaletraceResult<()>;

    // === Market ===

    /// Current market overview.
    fn market_snapshot(&self) -> WhaletraceResult<MarketSnapshot>;
}

// ============================================================================
// IN-MEMORY STORE
// ============================================================================

/// In-memory store backing the whole backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<UserId, User>>,
    signals: RwLock<Vec<SpendingSignal>>,
    notifications: RwLock<HashMap<EntityId, SmartNotification>>,
    wallets: RwLock<HashMap<String, Wallet>>,
    transactions: RwLock<Vec<WhaleTransaction>>,
    insights: RwLock<Vec<MarketInsight>>,
    alerts: RwLock<HashMap<EntityId, Alert>>,
    market: RwLock<Option<MarketSnapshot>>,
    next_notification_id: AtomicI64,
    next_alert_id: AtomicI64,
}

impl MemoryStore {
    /// Create a new empty store. Id counters start at 1.
    pub fn new() -> Self {
        Self {
            next_notification_id: AtomicI64::new(1),
            next_alert_id: AtomicI64::new(1),
            ..Default::default()
        }
    }

    /// Create a store pre-populated with the demo dataset.
    pub fn with_demo_data() -> Self {
        let store = Self::new();
        seed::seed_demo_data(&store);
        store
    }

    /// Insert a user record.
    pub fn user_insert(&self, user: User) -> WhaletraceResult<()> {
        self.users
            .write()
            .map_err(|_| StoreError::LockPoisoned)?
            .insert(user.user_id, user);
        Ok(())
    }

    /// Replace the spending signal reference data.
    pub fn signals_set(&self, signals: Vec<SpendingSignal>) -> WhaletraceResult<()> {
        *self.signals.write().map_err(|_| StoreError::LockPoisoned)? = signals;
        Ok(())
    }

    /// Insert a tracked wallet, keyed by lowercased address.
    pub fn wallet_insert(&self, wallet: Wallet) -> WhaletraceResult<()> {
        self.wallets
            .write()
            .map_err(|_| StoreError::LockPoisoned)?
            .insert(wallet.address.to_lowercase(), wallet);
        Ok(())
    }

    /// Append a whale transaction.
    pub fn transaction_insert(&self, tx: WhaleTransaction) -> WhaletraceResult<()> {
        self.transactions
            .write()
            .map_err(|_| StoreError::LockPoisoned)?
            .push(tx);
        Ok(())
    }

    /// Append a market insight.
    pub fn insight_insert(&self, insight: MarketInsight) -> WhaletraceResult<()> {
        self.insights
            .write()
            .map_err(|_| StoreError::LockPoisoned)?
            .push(insight);
        Ok(())
    }

    /// Replace the market snapshot.
    pub fn market_set(&self, snapshot: MarketSnapshot) -> WhaletraceResult<()> {
        *self.market.write().map_err(|_| StoreError::LockPoisoned)? = Some(snapshot);
        Ok(())
    }

    /// Count of stored notifications (acknowledged or not).
    pub fn notification_count(&self) -> usize {
        self.notifications.read().map(|n| n.len()).unwrap_or(0)
    }

    /// Clear all stored data. Id counters keep advancing.
    pub fn clear(&self) {
        if let Ok(mut users) = self.users.write() {
            users.clear();
        }
        if let Ok(mut signals) = self.signals.write() {
            signals.clear();
        }
        if let Ok(mut notifications) = self.notifications.write() {
            notifications.clear();
        }
        if let Ok(mut wallets) = self.wallets.write() {
            wallets.clear();
        }
        if let Ok(mut transactions) = self.transactions.write() {
            transactions.clear();
        }
        if let Ok(mut insights) = self.insights.write() {
            insights.clear();
        }
        if let Ok(mut alerts) = self.alerts.write() {
            alerts.clear();
        }
    }
}

impl Store for MemoryStore {
    fn user_get(&self, id: UserId) -> WhaletraceResult<Option<User>> {
        Ok(self
            .users
            .read()
            .map_err(|_| StoreError::LockPoisoned)?
            .get(&id)
            .cloned())
    }

    fn spending_signals(&self, user_id: UserId) -> WhaletraceResult<Vec<SpendingSignal>> {
        Ok(self
            .signals
            .read()
            .map_err(|_| StoreError::LockPoisoned)?
            .iter()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect())
    }

    fn notification_insert(&self, new: NewNotification) -> WhaletraceResult<SmartNotification> {
        let id = self.next_notification_id.fetch_add(1, Ordering::SeqCst);
        let notification = new.into_notification(id);
        self.notifications
            .write()
            .map_err(|_| StoreError::LockPoisoned)?
            .insert(id, notification.clone());
        Ok(notification)
    }

    fn notification_list(&self, user_id: UserId) -> WhaletraceResult<Vec<SmartNotification>> {
        let mut list: Vec<SmartNotification> = self
            .notifications
            .read()
            .map_err(|_| StoreError::LockPoisoned)?
            .values()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect();
        // Ids are monotonic, so descending id is newest-first.
        list.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(list)
    }

    fn notification_find_pending(
        &self,
        user_id: UserId,
        category: &str,
        trigger_type: TriggerType,
    ) -> WhaletraceResult<Vec<SmartNotification>> {
        Ok(self
            .notifications
            .read()
            .map_err(|_| StoreError::LockPoisoned)?
            .values()
            .filter(|n| {
                !n.acknowledged
                    && n.user_id == user_id
                    && n.category == category
                    && n.trigger_type == trigger_type
            })
            .cloned()
            .collect())
    }

    fn notification_acknowledge(&self, id: EntityId) -> WhaletraceResult<SmartNotification> {
        let mut notifications = self
            .notifications
            .write()
            .map_err(|_| StoreError::LockPoisoned)?;
        let notification = notifications.get_mut(&id).ok_or(StoreError::NotFound {
            entity: "SmartNotification",
            key: id.to_string(),
        })?;
        // One-way transition; already-acknowledged is a no-op.
        notification.acknowledged = true;
        Ok(notification.clone())
    }

    fn wallet_get(&self, address: &str) -> WhaletraceResult<Option<Wallet>> {
        Ok(self
            .wallets
            .read()
            .map_err(|_| StoreError::LockPoisoned)?
            .get(&address.to_lowercase())
            .cloned())
    }

    fn wallet_list(&self) -> WhaletraceResult<Vec<Wallet>> {
        let mut list: Vec<Wallet> = self
            .wallets
            .read()
            .map_err(|_| StoreError::LockPoisoned)?
            .values()
            .cloned()
            .collect();
        list.sort_by(|a, b| b.balance.total_cmp(&a.balance));
        Ok(list)
    }

    fn transaction_list_recent(&self, limit: usize) -> WhaletraceResult<Vec<WhaleTransaction>> {
        let mut list: Vec<WhaleTransaction> = self
            .transactions
            .read()
            .map_err(|_| StoreError::LockPoisoned)?
            .clone();
        list.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        list.truncate(limit);
        Ok(list)
    }

    fn insight_list_recent(&self, limit: usize) -> WhaletraceResult<Vec<MarketInsight>> {
        let mut list: Vec<MarketInsight> = self
            .insights
            .read()
            .map_err(|_| StoreError::LockPoisoned)?
            .clone();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        list.truncate(limit);
        Ok(list)
    }

    fn alert_insert(&self, new: NewAlert) -> WhaletraceResult<Alert> {
        let id = self.next_alert_id.fetch_add(1, Ordering::SeqCst);
        let alert = Alert {
            id,
            user_id: new.user_id,
            category: new.category,
            threshold: new.threshold,
            active: true,
            created_at: Utc::now(),
        };
        self.alerts
            .write()
            .map_err(|_| StoreError::LockPoisoned)?
            .insert(id, alert.clone());
        Ok(alert)
    }

    fn alert_list(&self, user_id: UserId) -> WhaletraceResult<Vec<Alert>> {
        let mut list: Vec<Alert> = self
            .alerts
            .read()
            .map_err(|_| StoreError::LockPoisoned)?
            .values()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect();
        list.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(list)
    }

    fn alert_delete(&self, id: EntityId) -> WhaletraceResult<()> {
        let removed = self
            .alerts
            .write()
            .map_err(|_| StoreError::LockPoisoned)?
            .remove(&id);
        match removed {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound {
                entity: "Alert",
                key: id.to_string(),
            }
            .into()),
        }
    }

    fn market_snapshot(&self) -> WhaletraceResult<MarketSnapshot> {
        Ok(self
            .market
            .read()
            .map_err(|_| StoreError::LockPoisoned)?
            .clone()
            .unwrap_or(MarketSnapshot {
                quotes: Vec::new(),
                as_of: Utc::now(),
            }))
    }
}

// ============================================================================
// UNIT TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use whaletrace_core::WhaletraceError;

    fn notification(user_id: UserId, category: &str, trigger: TriggerType) -> NewNotification {
        NewNotification {
            user_id,
            title: format!("{} alert", category),
            description: "test".to_string(),
            category: category.to_string(),
            trigger_type: trigger,
            trigger_value: "100".to_string(),
        }
    }

    #[test]
    fn test_notification_ids_are_monotonic() {
        let store = MemoryStore::new();
        let a = store
            .notification_insert(notification(1, "BTC", TriggerType::Threshold))
            .unwrap();
        let b = store
            .notification_insert(notification(1, "ETH", TriggerType::Trend))
            .unwrap();
        assert!(b.id > a.id);
    }

    #[test]
    fn test_notification_list_newest_first() {
        let store = MemoryStore::new();
        for category in ["BTC", "ETH", "SOL"] {
            store
                .notification_insert(notification(1, category, TriggerType::Threshold))
                .unwrap();
        }
        let list = store.notification_list(1).unwrap();
        assert_eq!(list.len(), 3);
        assert!(list.windows(2).all(|w| w[0].id > w[1].id));
    }

    #[test]
    fn test_notification_list_scoped_to_user() {
        let store = MemoryStore::new();
        store
            .notification_insert(notification(1, "BTC", TriggerType::Threshold))
            .unwrap();
        store
            .notification_insert(notification(2, "BTC", TriggerType::Threshold))
            .unwrap();
        assert_eq!(store.notification_list(1).unwrap().len(), 1);
        assert_eq!(store.notification_list(3).unwrap().len(), 0);
    }

    #[test]
    fn test_acknowledge_is_idempotent() {
        let store = MemoryStore::new();
        let created = store
            .notification_insert(notification(1, "BTC", TriggerType::Threshold))
            .unwrap();

        let first = store.notification_acknowledge(created.id).unwrap();
        assert!(first.acknowledged);

        let second = store.notification_acknowledge(created.id).unwrap();
        assert!(second.acknowledged);
        // No other field changes on repeat acknowledgement.
        assert_eq!(first, second);
    }

    #[test]
    fn test_acknowledge_unknown_id_is_not_found() {
        let store = MemoryStore::new();
        let err = store.notification_acknowledge(999).unwrap_err();
        assert!(matches!(
            err,
            WhaletraceError::Store(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn test_find_pending_excludes_acknowledged() {
        let store = MemoryStore::new();
        let created = store
            .notification_insert(notification(1, "BTC", TriggerType::Trend))
            .unwrap();

        let pending = store
            .notification_find_pending(1, "BTC", TriggerType::Trend)
            .unwrap();
        assert_eq!(pending.len(), 1);

        store.notification_acknowledge(created.id).unwrap();
        let pending = store
            .notification_find_pending(1, "BTC", TriggerType::Trend)
            .unwrap();
        assert!(pending.is_empty());
    }

    #[test]
    fn test_wallet_lookup_is_case_insensitive() {
        let store = MemoryStore::with_demo_data();
        let wallets = store.wallet_list().unwrap();
        assert!(!wallets.is_empty());

        let address = wallets[0].address.clone();
        let upper = address.to_uppercase().replace("0X", "0x");
        assert!(store.wallet_get(&upper).unwrap().is_some());
        assert!(store.wallet_get("0xdoesnotexist").unwrap().is_none());
    }

    #[test]
    fn test_transaction_list_respects_limit() {
        let store = MemoryStore::with_demo_data();
        let five = store.transaction_list_recent(5).unwrap();
        assert!(five.len() <= 5);
        let all = store.transaction_list_recent(100).unwrap();
        assert!(all.len() >= five.len());
        // Newest first.
        assert!(all.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
    }

    #[test]
    fn test_alert_crud() {
        let store = MemoryStore::new();
        let alert = store
            .alert_insert(NewAlert {
                user_id: 1,
                category: "BTC".to_string(),
                threshold: 10_000.0,
            })
            .unwrap();
        assert!(alert.active);
        assert_eq!(store.alert_list(1).unwrap().len(), 1);

        store.alert_delete(alert.id).unwrap();
        assert!(store.alert_list(1).unwrap().is_empty());

        let err = store.alert_delete(alert.id).unwrap_err();
        assert!(matches!(
            err,
            WhaletraceError::Store(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn test_empty_lists_not_errors() {
        let store = MemoryStore::new();
        assert!(store.spending_signals(1).unwrap().is_empty());
        assert!(store.notification_list(1).unwrap().is_empty());
        assert!(store.wallet_list().unwrap().is_empty());
        assert!(store.transaction_list_recent(10).unwrap().is_empty());
        assert!(store.insight_list_recent(10).unwrap().is_empty());
        assert!(store.alert_list(1).unwrap().is_empty());
    }

    #[test]
    fn test_demo_data_seeds_demo_user() {
        let store = MemoryStore::with_demo_data();
        let user = store.user_get(seed::DEMO_USER_ID).unwrap();
        assert!(user.is_some());
        assert!(!store.spending_signals(seed::DEMO_USER_ID).unwrap().is_empty());
        assert!(!store.market_snapshot().unwrap().quotes.is_empty());
    }
}

// ============================================================================
// PROPERTY-BASED TESTS
// ============================================================================

#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_new_notification() -> impl Strategy<Value = NewNotification> {
        (
            1i64..4,
            "[A-Z]{2,5}",
            prop::sample::select(TriggerType::ALL.to_vec()),
        )
            .prop_map(|(user_id, category, trigger_type)| NewNotification {
                user_id,
                title: format!("{} alert", category),
                description: "generated".to_string(),
                category,
                trigger_type,
                trigger_value: "100".to_string(),
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(128))]

        /// Ids are unique and strictly increasing across any insert sequence.
        #[test]
        fn prop_notification_ids_strictly_increase(
            news in prop::collection::vec(arb_new_notification(), 1..32)
        ) {
            let store = MemoryStore::new();
            let mut last = 0;
            for new in news {
                let created = store.notification_insert(new).unwrap();
                prop_assert!(created.id > last);
                last = created.id;
            }
        }

        /// Listing is always newest-first and scoped to the requested user.
        #[test]
        fn prop_list_is_sorted_and_scoped(
            news in prop::collection::vec(arb_new_notification(), 0..32)
        ) {
            let store = MemoryStore::new();
            for new in news {
                store.notification_insert(new).unwrap();
            }
            for user in 1..4 {
                let list = store.notification_list(user).unwrap();
                prop_assert!(list.iter().all(|n| n.user_id == user));
                prop_assert!(list.windows(2).all(|w| w[0].id > w[1].id));
            }
        }

        /// Repeat acknowledgement returns the identical record, and an
        /// acknowledged notification never shows up as pending.
        #[test]
        fn prop_acknowledge_is_idempotent(
            news in prop::collection::vec(arb_new_notification(), 1..16)
        ) {
            let store = MemoryStore::new();
            let created: Vec<SmartNotification> = news
                .into_iter()
                .map(|n| store.notification_insert(n).unwrap())
                .collect();
            for n in &created {
                let first = store.notification_acknowledge(n.id).unwrap();
                let second = store.notification_acknowledge(n.id).unwrap();
                prop_assert_eq!(&first, &second);
                let pending = store
                    .notification_find_pending(n.user_id, &n.category, n.trigger_type)
                    .unwrap();
                prop_assert!(pending.iter().all(|p| p.id != n.id));
            }
        }
    }
}
