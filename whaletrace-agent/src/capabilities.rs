//! Built-in assistant capabilities
//!
//! Each capability wraps a store query and formats the result as a short
//! conversational reply. Registration order (market, wallet, transactions,
//! insights) doubles as routing priority.

use crate::capability::{Capability, CapabilityArgs, CapabilityRegistry};
use crate::extract;
use std::sync::Arc;
use whaletrace_core::{format_amount, format_percent, AgentError, WhaletraceResult};
use whaletrace_store::Store;

/// Number of insights surfaced in an assistant reply.
const INSIGHT_REPLY_LIMIT: usize = 3;

/// Build the default registry with all built-in capabilities.
pub fn default_registry(store: Arc<dyn Store>) -> Result<CapabilityRegistry, AgentError> {
    let mut registry = CapabilityRegistry::new();
    registry.register(Arc::new(MarketTrendsCapability::new(store.clone())))?;
    registry.register(Arc::new(WalletLookupCapability::new(store.clone())))?;
    registry.register(Arc::new(WhaleTransactionsCapability::new(store.clone())))?;
    registry.register(Arc::new(InsightsCapability::new(store)))?;
    Ok(registry)
}

// ============================================================================
// MARKET TRENDS
// ============================================================================

/// Summarizes the current market snapshot.
pub struct MarketTrendsCapability {
    store: Arc<dyn Store>,
}

impl MarketTrendsCapability {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }
}

impl Capability for MarketTrendsCapability {
    fn name(&self) -> &str {
        "market_trends"
    }

    fn description(&self) -> &str {
        "Current market overview: token prices and 24h moves"
    }

    fn input_schema(&self) -> serde_json::Value {
        serde_json::json!({ "type": "object", "properties": {} })
    }

    fn keywords(&self) -> &[&str] {
        &["market", "trend", "price"]
    }

    fn extract(&self, _message: &str) -> CapabilityArgs {
        CapabilityArgs::None
    }

    fn run(&self, _args: &CapabilityArgs) -> WhaletraceResult<String> {
        let snapshot = self.store.market_snapshot()?;
        if snapshot.quotes.is_empty() {
            return Ok("No market data is available right now.".to_string());
        }
        let mut reply = String::from("Here's the current market overview:\n");
        for quote in &snapshot.quotes {
            let direction = if quote.change_24h >= 0.0 { "up" } else { "down" };
            reply.push_str(&format!(
                "- {}: ${} ({} {}% over 24h)\n",
                quote.symbol,
                format_amount(quote.price_usd),
                direction,
                format_percent(quote.change_24h.abs()),
            ));
        }
        Ok(reply.trim_end().to_string())
    }
}

// ============================================================================
// WALLET LOOKUP
// ============================================================================

/// Looks up a tracked wallet by address, or lists the top wallets when the
/// message doesn't mention one.
pub struct WalletLookupCapability {
    store: Arc<dyn Store>,
}

impl WalletLookupCapability {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }
}

impl Capability for WalletLookupCapability {
    fn name(&self) -> &str {
        "wallet_lookup"
    }

    fn description(&self) -> &str {
        "Details for a tracked whale wallet, by 0x address"
    }

    fn input_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "address": { "type": "string", "description": "0x-prefixed hex address" }
            }
        })
    }

    fn keywords(&self) -> &[&str] {
        &["wallet", "address", "0x"]
    }

    fn extract(&self, message: &str) -> CapabilityArgs {
        CapabilityArgs::Wallet {
            address: extract::extract_wallet_address(message),
        }
    }

    fn run(&self, args: &CapabilityArgs) -> WhaletraceResult<String> {
        let address = match args {
            CapabilityArgs::Wallet { address } => address.as_deref(),
            _ => None,
        };

        match address {
            Some(address) => match self.store.wallet_get(address)? {
                Some(wallet) => {
                    let label = wallet.label.as_deref().unwrap_or("unlabeled");
                    Ok(format!(
                        "Wallet {} ({}) on {} holds {} {}. Last active {}.",
                        wallet.address,
                        label,
                        wallet.chain,
                        format_amount(wallet.balance),
                        wallet.token,
                        wallet.last_active.format("%Y-%m-%d %H:%M UTC"),
                    ))
                }
                None => Ok(format!(
                    "I'm not tracking wallet {}. It may not be on the whale watchlist.",
                    address
                )),
            },
            None => {
                let wallets = self.store.wallet_list()?;
                if wallets.is_empty() {
                    return Ok("No wallets are being tracked right now.".to_string());
                }
                let mut reply = String::from("Top tracked whale wallets by balance:\n");
                for wallet in wallets.iter().take(5) {
                    let label = wallet.label.as_deref().unwrap_or("unlabeled");
                    reply.push_str(&format!(
                        "- {} ({}): {} {}\n",
                        wallet.address,
                        label,
                        format_amount(wallet.balance),
                        wallet.token,
                    ));
                }
                Ok(reply.trim_end().to_string())
            }
        }
    }
}

// ============================================================================
// WHALE TRANSACTIONS
// ============================================================================

/// Lists recent large transfers. "recent"/"latest" wording shortens the list.
pub struct WhaleTransactionsCapability {
    store: Arc<dyn Store>,
}

impl WhaleTransactionsCapability {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }
}

impl Capability for WhaleTransactionsCapability {
    fn name(&self) -> &str {
        "whale_transactions"
    }

    fn description(&self) -> &str {
        "Recent large on-chain transfers"
    }

    fn input_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "limit": { "type": "integer", "minimum": 1 }
            }
        })
    }

    fn keywords(&self) -> &[&str] {
        &["transaction", "transfer", "moved", "movement"]
    }

    fn extract(&self, message: &str) -> CapabilityArgs {
        CapabilityArgs::Transactions {
            limit: extract::transaction_limit(message),
        }
    }

    fn run(&self, args: &CapabilityArgs) -> WhaletraceResult<String> {
        let limit = match args {
            CapabilityArgs::Transactions { limit } => *limit,
            _ => extract::DEFAULT_TRANSACTION_LIMIT,
        };

        let transactions = self.store.transaction_list_recent(limit)?;
        if transactions.is_empty() {
            return Ok("No whale transactions on record yet.".to_string());
        }
        let mut reply = format!("Last {} whale transactions:\n", transactions.len());
        for tx in &transactions {
            reply.push_str(&format!(
                "- {} {} from {} to {} ({})\n",
                format_amount(tx.amount),
                tx.token,
                tx.from_address,
                tx.to_address,
                tx.timestamp.format("%Y-%m-%d %H:%M UTC"),
            ));
        }
        Ok(reply.trim_end().to_string())
    }
}

// ============================================================================
// INSIGHTS
// ============================================================================

/// Surfaces the latest editorial market insights.
pub struct InsightsCapability {
    store: Arc<dyn Store>,
}

impl InsightsCapability {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }
}

impl Capability for InsightsCapability {
    fn name(&self) -> &str {
        "insights"
    }

    fn description(&self) -> &str {
        "Latest market insights from the analysis feed"
    }

    fn input_schema(&self) -> serde_json::Value {
        serde_json::json!({ "type": "object", "properties": {} })
    }

    fn keywords(&self) -> &[&str] {
        &["insight", "analysis", "summary", "happening"]
    }

    fn extract(&self, message: &str) -> CapabilityArgs {
        CapabilityArgs::Insights {
            mentions: extract::insight_mentions(message),
        }
    }

    fn run(&self, _args: &CapabilityArgs) -> WhaletraceResult<String> {
        let insights = self.store.insight_list_recent(INSIGHT_REPLY_LIMIT)?;
        if insights.is_empty() {
            return Ok("No market insights have been published yet.".to_string());
        }
        let mut reply = String::from("Latest market insights:\n");
        for insight in &insights {
            reply.push_str(&format!(
                "- [{}] {}: {}\n",
                insight.sentiment, insight.title, insight.body
            ));
        }
        Ok(reply.trim_end().to_string())
    }
}

// ============================================================================
// UNIT TESTS
// ============================================================================
