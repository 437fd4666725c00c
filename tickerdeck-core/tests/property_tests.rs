//! Property tests for ledger and accounting invariants.
//!
//! Uses proptest to verify:
//! 1. Cash and net shares never go negative under any call sequence
//! 2. Rejections occur exactly when they must, with no partial mutation
//! 3. Buy-then-sell at the same terms is balance-neutral
//! 4. net_pnl is order-invariant over valid interleavings and satisfies
//!    the algebraic identity against the replayed cash flow

use chrono::{TimeZone, Utc};
use proptest::prelude::*;

use tickerdeck_core::domain::{TradeRecord, TradeSide};
use tickerdeck_core::ledger::{Ledger, LedgerError};
use tickerdeck_core::pnl::net_pnl;

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_quantity() -> impl Strategy<Value = u32> {
    1u32..200
}

fn arb_price() -> impl Strategy<Value = f64> {
    (1.0..500.0_f64).prop_map(|p| (p * 100.0).round() / 100.0)
}

#[derive(Debug, Clone)]
enum Action {
    Buy(u32, f64),
    Sell(u32, f64),
}

fn arb_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        (arb_quantity(), arb_price()).prop_map(|(q, p)| Action::Buy(q, p)),
        (arb_quantity(), arb_price()).prop_map(|(q, p)| Action::Sell(q, p)),
    ]
}

fn ts(i: usize) -> chrono::DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + i as i64, 0).unwrap()
}

// ── 1 & 2. Invariants under arbitrary call sequences ─────────────────

proptest! {
    /// Whatever sequence of buys and sells arrives, the ledger never goes
    /// insolvent and never goes short, and every rejection happens for
    /// exactly the reason the pre-state demands.
    #[test]
    fn cash_and_shares_never_negative(
        starting in 100.0..50_000.0_f64,
        actions in prop::collection::vec(arb_action(), 1..40),
    ) {
        let mut ledger = Ledger::new(starting);

        for (i, action) in actions.iter().enumerate() {
            let cash_before = ledger.cash();
            let shares_before = ledger.net_shares();
            let trades_before = ledger.trades().len();

            match *action {
                Action::Buy(qty, price) => {
                    let cost = f64::from(qty) * price;
                    let result = ledger.buy(qty, price, ts(i));
                    if cost > cash_before {
                        prop_assert!(matches!(result, Err(LedgerError::InsufficientFunds { .. })), "expected InsufficientFunds");
                        prop_assert_eq!(ledger.cash(), cash_before);
                        prop_assert_eq!(ledger.trades().len(), trades_before);
                    } else {
                        prop_assert!(result.is_ok());
                        prop_assert_eq!(ledger.trades().len(), trades_before + 1);
                    }
                }
                Action::Sell(qty, price) => {
                    let result = ledger.sell(qty, price, ts(i));
                    if i64::from(qty) > shares_before {
                        prop_assert!(matches!(result, Err(LedgerError::InsufficientShares { .. })), "expected InsufficientShares");
                        prop_assert_eq!(ledger.cash(), cash_before);
                        prop_assert_eq!(ledger.trades().len(), trades_before);
                    } else {
                        prop_assert!(result.is_ok());
                        prop_assert_eq!(ledger.trades().len(), trades_before + 1);
                    }
                }
            }

            prop_assert!(ledger.cash() >= 0.0);
            prop_assert!(ledger.net_shares() >= 0);
        }
    }

    /// A buy immediately reversed at the same quantity and price restores
    /// the pre-buy balance exactly (the cash deltas are the same product).
    #[test]
    fn buy_then_sell_is_balance_neutral(
        starting in 1_000.0..100_000.0_f64,
        qty in arb_quantity(),
        price in arb_price(),
    ) {
        let mut ledger = Ledger::new(starting);
        prop_assume!(f64::from(qty) * price <= starting);

        ledger.buy(qty, price, ts(0)).unwrap();
        ledger.sell(qty, price, ts(1)).unwrap();

        // The same product is subtracted and re-added; allow for the one
        // rounding step the intermediate subtraction can introduce.
        prop_assert!((ledger.cash() - starting).abs() < 1e-6);
        prop_assert_eq!(ledger.net_shares(), 0);
    }
}

// ── 4. net_pnl algebra ───────────────────────────────────────────────

fn record(side: TradeSide, quantity: u32, price: f64, i: usize) -> TradeRecord {
    TradeRecord {
        side,
        quantity,
        price,
        timestamp: ts(i),
    }
}

proptest! {
    /// net_pnl equals final_shares * current_price minus net cash spent,
    /// computed independently of the replay.
    #[test]
    fn net_pnl_matches_algebraic_identity(
        buys in prop::collection::vec((arb_quantity(), arb_price()), 1..10),
        current in arb_price(),
    ) {
        let trades: Vec<TradeRecord> = buys
            .iter()
            .enumerate()
            .map(|(i, &(q, p))| record(TradeSide::Buy, q, p, i))
            .collect();

        let shares: i64 = buys.iter().map(|&(q, _)| i64::from(q)).sum();
        let spent: f64 = buys.iter().map(|&(q, p)| f64::from(q) * p).sum();

        let expected = shares as f64 * current - spent;
        let actual = net_pnl(&trades, current);
        prop_assert!((actual - expected).abs() < 1e-6);
    }

    /// Replayed P/L only depends on the multiset of trades, not their
    /// order, as long as every prefix keeps the position non-negative.
    /// Buys-then-sells reordered as interleaved pairs is one such case.
    #[test]
    fn net_pnl_is_order_invariant_for_valid_reorderings(
        pairs in prop::collection::vec((arb_quantity(), arb_price(), arb_price()), 1..8),
        current in arb_price(),
    ) {
        // Ordering A: all buys first, then the matching sells.
        let mut all_buys_first = Vec::new();
        for (i, &(q, buy_p, _)) in pairs.iter().enumerate() {
            all_buys_first.push(record(TradeSide::Buy, q, buy_p, i));
        }
        for (i, &(q, _, sell_p)) in pairs.iter().enumerate() {
            all_buys_first.push(record(TradeSide::Sell, q, sell_p, pairs.len() + i));
        }

        // Ordering B: each buy immediately followed by its sell.
        let mut interleaved = Vec::new();
        for (i, &(q, buy_p, sell_p)) in pairs.iter().enumerate() {
            interleaved.push(record(TradeSide::Buy, q, buy_p, 2 * i));
            interleaved.push(record(TradeSide::Sell, q, sell_p, 2 * i + 1));
        }

        let a = net_pnl(&all_buys_first, current);
        let b = net_pnl(&interleaved, current);
        prop_assert!((a - b).abs() < 1e-6);
    }
}

// ── Scenario tests (fixed values from the product walkthrough) ───────

#[test]
fn documented_trading_scenario() {
    let mut ledger = Ledger::new(100_000.0);

    ledger.buy(10, 100.0, ts(0)).unwrap();
    assert_eq!(ledger.cash(), 99_000.0);
    assert_eq!(ledger.trades().len(), 1);

    ledger.sell(5, 120.0, ts(1)).unwrap();
    assert_eq!(ledger.cash(), 99_600.0);
    assert_eq!(ledger.net_shares(), 5);

    // Replay at 120: -1000 (buy) + 600 (sell) + 5 * 120 = 200
    let pnl = net_pnl(ledger.trades(), 120.0);
    assert_eq!(pnl, 200.0);
    assert_eq!(
        tickerdeck_core::evaluation::judge_position(pnl),
        tickerdeck_core::evaluation::Verdict::Good
    );
}
