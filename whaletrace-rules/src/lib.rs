//! Whaletrace Rules - Notification Rule Engine
//!
//! Evaluates a user's spending signals against three independent rule types
//! and emits deduplicated notification records through the injected store.
//!
//! The engine is pure computation over in-memory data; its only side effect
//! is notification creation. One malformed signal never aborts the batch -
//! signals are processed one at a time and failures are collected in the
//! report.

use std::sync::Arc;
use whaletrace_core::{
    format_amount, format_percent, NewNotification, SmartNotification, SpendingSignal,
    TriggerType, UserId, ValidationError, WhaletraceResult,
};
use whaletrace_store::Store;

/// Percentage increase (strict >) that trips the comparison and trend rules.
const GROWTH_THRESHOLD_PERCENT: f64 = 20.0;

// ============================================================================
// EVALUATION REPORT
// ============================================================================

/// Outcome of one evaluation pass.
#[derive(Debug, Clone, Default)]
pub struct EvaluationReport {
    /// Notifications created by this pass, in creation order.
    pub created: Vec<SmartNotification>,
    /// Per-signal validation failures. The corresponding signals were
    /// skipped; the rest of the batch still ran.
    pub skipped: Vec<ValidationError>,
}

// ============================================================================
// RULE ENGINE
// ============================================================================

/// The notification rule engine.
///
/// Holds an injected store handle; constructed once and shared across
/// request handlers.
#[derive(Clone)]
pub struct RuleEngine {
    store: Arc<dyn Store>,
}

impl RuleEngine {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Evaluate all spending signals for `user_id`.
    ///
    /// For each signal, each of the three rules is tested independently (all
    /// three may fire for the same category). A rule that fires only creates
    /// a notification when no unacknowledged notification already exists for
    /// the same `(user, category, trigger_type)` tuple.
    pub fn evaluate(&self, user_id: UserId) -> WhaletraceResult<EvaluationReport> {
        let signals = self.store.spending_signals(user_id)?;
        let mut report = EvaluationReport::default();

        for signal in &signals {
            if let Err(e) = validate_signal(signal) {
                tracing::warn!(category = %signal.category, error = %e, "Skipping malformed spending signal");
                report.skipped.push(e);
                continue;
            }

            for firing in evaluate_signal(signal) {
                let pending = self.store.notification_find_pending(
                    user_id,
                    &signal.category,
                    firing.trigger_type,
                )?;
                if !pending.is_empty() {
                    // An unacknowledged notification of this kind is already
                    // waiting; suppress to avoid alert storms.
                    continue;
                }

                let created = self.store.notification_insert(NewNotification {
                    user_id,
                    title: firing.title,
                    description: firing.description,
                    category: signal.category.clone(),
                    trigger_type: firing.trigger_type,
                    trigger_value: firing.trigger_value,
                })?;
                tracing::info!(
                    id = created.id,
                    category = %created.category,
                    trigger = %created.trigger_type,
                    "Created smart notification"
                );
                report.created.push(created);
            }
        }

        Ok(report)
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine").finish()
    }
}

// ============================================================================
// RULE EVALUATION (pure)
// ============================================================================

/// A rule that fired for a signal, with the rendered notification copy.
#[derive(Debug, Clone, PartialEq)]
struct Firing {
    trigger_type: TriggerType,
    trigger_value: String,
    title: String,
    description: String,
}

/// Check a signal's numeric fields before evaluation.
fn validate_signal(signal: &SpendingSignal) -> Result<(), ValidationError> {
    if signal.category.trim().is_empty() {
        return Err(ValidationError::MalformedSignal {
            category: signal.category.clone(),
            reason: "category is empty".to_string(),
        });
    }

    let fields = [
        ("current_month", signal.current_month),
        ("previous_month", signal.previous_month),
        ("historical_average", signal.historical_average),
    ];
    for (name, value) in fields {
        if !value.is_finite() {
            return Err(ValidationError::MalformedSignal {
                category: signal.category.clone(),
                reason: format!("{} is not a finite number", name),
            });
        }
    }
    if let Some(threshold) = signal.threshold {
        if !threshold.is_finite() {
            return Err(ValidationError::MalformedSignal {
                category: signal.category.clone(),
                reason: "threshold is not a finite number".to_string(),
            });
        }
    }
    Ok(())
}

/// Evaluate the three rules for a single validated signal.
fn evaluate_signal(signal: &SpendingSignal) -> Vec<Firing> {
    let mut firings = Vec::new();

    if let Some(firing) = check_threshold(signal) {
        firings.push(firing);
    }
    if let Some(firing) = check_monthly_comparison(signal) {
        firings.push(firing);
    }
    if let Some(firing) = check_trend(signal) {
        firings.push(firing);
    }

    firings
}

/// THRESHOLD: fires when a threshold is configured and the current month
/// reached it (>=, not >).
fn check_threshold(signal: &SpendingSignal) -> Option<Firing> {
    let threshold = signal.threshold?;
    if signal.current_month < threshold {
        return None;
    }
    Some(Firing {
        trigger_type: TriggerType::Threshold,
        trigger_value: format_amount(signal.current_month),
        title: format!("{} spending threshold reached", signal.category),
        description: format!(
            "Your {} spending this month is {}, at or above your {} threshold.",
            signal.category,
            format_amount(signal.current_month),
            format_amount(threshold),
        ),
    })
}

/// MONTHLY_COMPARISON: fires on a strictly-greater-than-20% month-over-month
/// increase. A zero previous month does not fire: the original divides by
/// zero here, and alerting on every first month of activity would be noise.
fn check_monthly_comparison(signal: &SpendingSignal) -> Option<Firing> {
    if signal.previous_month == 0.0 {
        return None;
    }
    let increase = signal.current_month - signal.previous_month;
    // Cross-multiplied form: an increase of exactly 20% must not fire, and
    // dividing first would round 20.0 up past the boundary.
    if increase * 100.0 <= GROWTH_THRESHOLD_PERCENT * signal.previous_month {
        return None;
    }
    let percent = increase / signal.previous_month * 100.0;
    Some(Firing {
        trigger_type: TriggerType::MonthlyComparison,
        trigger_value: format_percent(percent),
        title: format!(
            "{} spending up {}% month-over-month",
            signal.category,
            format_percent(percent),
        ),
        description: format!(
            "Your {} spending rose from {} to {}, a {}% increase over last month.",
            signal.category,
            format_amount(signal.previous_month),
            format_amount(signal.current_month),
            format_percent(percent),
        ),
    })
}

/// TREND: fires on a strictly-greater-than-20% deviation above the
/// historical average. A zero average does not fire, same decision as the
/// comparison rule.
fn check_trend(signal: &SpendingSignal) -> Option<Firing> {
    if signal.historical_average == 0.0 {
        return None;
    }
    let deviation = signal.current_month - signal.historical_average;
    if deviation * 100.0 <= GROWTH_THRESHOLD_PERCENT * signal.historical_average {
        return None;
    }
    let percent = deviation / signal.historical_average * 100.0;
    Some(Firing {
        trigger_type: TriggerType::Trend,
        trigger_value: format_percent(percent),
        title: format!(
            "{} spending {}% above trend",
            signal.category,
            format_percent(percent),
        ),
        description: format!(
            "Your {} spending this month is {}, {}% above your historical average of {}.",
            signal.category,
            format_amount(signal.current_month),
            format_percent(percent),
            format_amount(signal.historical_average),
        ),
    })
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
    use whaletrace_store::MemoryStore;

    fn arb_signal() -> impl Strategy<Value = SpendingSignal> {
        (
            "[A-Z]{2,5}",
            0.0f64..1.0e9,
            0.0f64..1.0e9,
            0.0f64..1.0e9,
            proptest::option::of(0.0f64..1.0e9),
        )
            .prop_map(|(category, current, previous, average, threshold)| SpendingSignal {
                user_id: 1,
                category,
                current_month: current,
                previous_month: previous,
                historical_average: average,
                threshold,
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(128))]

        /// Dedup invariant: evaluating twice with unchanged data creates
        /// zero new notifications on the second pass.
        #[test]
        fn prop_second_pass_creates_nothing(signals in prop::collection::vec(arb_signal(), 0..8)) {
            let store = std::sync::Arc::new(MemoryStore::new());
            store.signals_set(signals).unwrap();
            let engine = RuleEngine::new(store);

            let _ = engine.evaluate(1).unwrap();
            let second = engine.evaluate(1).unwrap();
            prop_assert!(second.created.is_empty());
        }

        /// At most one unacknowledged notification per (category, trigger)
        /// after any number of passes.
        #[test]
        fn prop_at_most_one_pending_per_tuple(signals in prop::collection::vec(arb_signal(), 0..8)) {
            let store = std::sync::Arc::new(MemoryStore::new());
            store.signals_set(signals.clone()).unwrap();
            let engine = RuleEngine::new(store.clone());

            let _ = engine.evaluate(1).unwrap();
            let _ = engine.evaluate(1).unwrap();

            for signal in &signals {
                for trigger in TriggerType::ALL {
                    let pending = store
                        .notification_find_pending(1, &signal.category, trigger)
                        .unwrap();
                    prop_assert!(pending.len() <= 1);
                }
            }
        }

        /// Created notifications always belong to the evaluated user and
        /// start unacknowledged.
        #[test]
        fn prop_created_notifications_are_well_formed(signals in prop::collection::vec(arb_signal(), 0..8)) {
            let store = std::sync::Arc::new(MemoryStore::new());
            store.signals_set(signals).unwrap();
            let engine = RuleEngine::new(store);

            let report = engine.evaluate(1).unwrap();
            for n in &report.created {
                prop_assert_eq!(n.user_id, 1);
                prop_assert!(!n.acknowledged);
                prop_assert!(!n.title.is_empty());
                prop_assert!(!n.trigger_value.is_empty());
            }
        }
    }
}
