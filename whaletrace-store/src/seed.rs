//! Demo dataset seeded into the store at startup
//!
//! There is no blockchain indexer behind this backend; everything the
//! dashboard shows comes from this routine. Restarting the process
//! regenerates the data.

use crate::MemoryStore;
use chrono::{Duration, Utc};
use whaletrace_core::{
    Chain, MarketInsight, MarketSnapshot, Sentiment, SpendingSignal, TokenQuote, User, Wallet,
    WhaleTransaction,
};

/// Id of the seeded demo user. API handlers fall back to this user when no
/// `user_id` is supplied.
pub const DEMO_USER_ID: i64 = 1;

/// Populate `store` with the demo dataset.
pub fn seed_demo_data(store: &MemoryStore) {
    let now = Utc::now();

    store
        .user_insert(User {
            user_id: DEMO_USER_ID,
            username: "whale_watcher".to_string(),
            created_at: now - Duration::days(90),
        })
        .expect("seeding a fresh store cannot fail");

    // Spending signals for the demo user. The BTC row intentionally trips
    // all three rules on the first evaluation; the SOL row has a zero
    // previous month to exercise the documented non-firing decision.
    store
        .signals_set(vec![
            SpendingSignal {
                user_id: DEMO_USER_ID,
                category: "BTC".to_string(),
                current_month: 15_000.0,
                previous_month: 8_200.0,
                historical_average: 9_500.0,
                threshold: Some(15_000.0),
            },
            SpendingSignal {
                user_id: DEMO_USER_ID,
                category: "ETH".to_string(),
                current_month: 4_200.0,
                previous_month: 4_100.0,
                historical_average: 3_950.0,
                threshold: Some(6_000.0),
            },
            SpendingSignal {
                user_id: DEMO_USER_ID,
                category: "SOL".to_string(),
                current_month: 900.0,
                previous_month: 0.0,
                historical_average: 850.0,
                threshold: None,
            },
            SpendingSignal {
                user_id: DEMO_USER_ID,
                category: "USDC".to_string(),
                current_month: 2_000.0,
                previous_month: 2_050.0,
                historical_average: 2_010.0,
                threshold: None,
            },
        ])
        .expect("seeding a fresh store cannot fail");

    let wallets = [
        ("0x742d35cc6634c0532925a3b844bc454e4438f44e", "Bitfinex cold", Chain::Ethereum, 450_120.5, "ETH"),
        ("0x28c6c06298d514db089934071355e5743bf21d60", "Binance 14", Chain::Ethereum, 312_844.0, "ETH"),
        ("0x8eb8a3b98659cce290402893d0123abb75e3ab28", "Avalanche bridge", Chain::Ethereum, 120_050.75, "ETH"),
        ("0xdc76cd25977e0a5ae17155770273ad58648900d3", "Huobi 34", Chain::Ethereum, 98_431.2, "ETH"),
    ];
    for (i, (address, label, chain, balance, token)) in wallets.into_iter().enumerate() {
        store
            .wallet_insert(Wallet {
                address: address.to_string(),
                label: Some(label.to_string()),
                chain,
                balance,
                token: token.to_string(),
                last_active: now - Duration::hours(i as i64 * 7 + 2),
            })
            .expect("seeding a fresh store cannot fail");
    }

    let transfers = [
        ("0xa1b2", "0x742d35cc6634c0532925a3b844bc454e4438f44e", "0x28c6c06298d514db089934071355e5743bf21d60", 12_500.0, "ETH", 1),
        ("0xc3d4", "0x28c6c06298d514db089934071355e5743bf21d60", "0x8eb8a3b98659cce290402893d0123abb75e3ab28", 8_900.0, "ETH", 3),
        ("0xe5f6", "0xdc76cd25977e0a5ae17155770273ad58648900d3", "0x742d35cc6634c0532925a3b844bc454e4438f44e", 30_000.0, "ETH", 6),
        ("0x0718", "0x8eb8a3b98659cce290402893d0123abb75e3ab28", "0xdc76cd25977e0a5ae17155770273ad58648900d3", 5_250.5, "ETH", 12),
        ("0x293a", "0x742d35cc6634c0532925a3b844bc454e4438f44e", "0xdc76cd25977e0a5ae17155770273ad58648900d3", 18_765.25, "ETH", 20),
        ("0x4b5c", "0x28c6c06298d514db089934071355e5743bf21d60", "0x742d35cc6634c0532925a3b844bc454e4438f44e", 9_100.0, "ETH", 27),
        ("0x6d7e", "0xdc76cd25977e0a5ae17155770273ad58648900d3", "0x8eb8a3b98659cce290402893d0123abb75e3ab28", 44_020.0, "ETH", 33),
    ];
    for (i, (hash, from, to, amount, token, hours_ago)) in transfers.into_iter().enumerate() {
        store
            .transaction_insert(WhaleTransaction {
                id: i as i64 + 1,
                hash: format!("{}{:06x}", hash, i),
                from_address: from.to_string(),
                to_address: to.to_string(),
                amount,
                token: token.to_string(),
                timestamp: now - Duration::hours(hours_ago),
            })
            .expect("seeding a fresh store cannot fail");
    }

    let insights = [
        ("Exchange inflows accelerating", "Net whale inflows to exchanges rose 14% this week, often a distribution signal.", Sentiment::Bearish, 2),
        ("Dormant wallet wakes up", "A wallet inactive since 2019 moved 30,000 ETH to a fresh address.", Sentiment::Neutral, 8),
        ("Accumulation trend intact", "Addresses holding 10k+ ETH added to positions for the fifth straight week.", Sentiment::Bullish, 26),
        ("Stablecoin reserves climbing", "Whale stablecoin balances hit a 3-month high, dry powder for dips.", Sentiment::Bullish, 50),
    ];
    for (i, (title, body, sentiment, hours_ago)) in insights.into_iter().enumerate() {
        store
            .insight_insert(MarketInsight {
                id: i as i64 + 1,
                title: title.to_string(),
                body: body.to_string(),
                sentiment,
                created_at: now - Duration::hours(hours_ago),
            })
            .expect("seeding a fresh store cannot fail");
    }

    store
        .market_set(MarketSnapshot {
            quotes: vec![
                TokenQuote {
                    symbol: "BTC".to_string(),
                    price_usd: 67_240.0,
                    change_24h: 2.4,
                },
                TokenQuote {
                    symbol: "ETH".to_string(),
                    price_usd: 3_180.5,
                    change_24h: -1.1,
                },
                TokenQuote {
                    symbol: "SOL".to_string(),
                    price_usd: 148.2,
                    change_24h: 5.7,
                },
                TokenQuote {
                    symbol: "USDC".to_string(),
                    price_usd: 1.0,
                    change_24h: 0.0,
                },
            ],
            as_of: now,
        })
        .expect("seeding a fresh store cannot fail");
}
