//! Position accounting — pure P/L functions over a ledger snapshot.
//!
//! Nothing here mutates the ledger; both functions take the trade log and
//! a supplied current price and are recomputed on every call. The log is
//! small and mutations are rare relative to refresh ticks, so there is no
//! incremental cache to invalidate.

use crate::domain::{TradeRecord, TradeSide};

/// Per-trade "what if I reversed this trade now" P/L.
///
/// `current - entry` for a Buy, `entry - current` for a Sell. This is a
/// display metric, not a cash-flow reconciliation.
pub fn trade_pnl(trade: &TradeRecord, current_price: f64) -> f64 {
    match trade.side {
        TradeSide::Buy => current_price - trade.price,
        TradeSide::Sell => trade.price - current_price,
    }
}

/// Realized-plus-unrealized total from a flat starting position.
///
/// Replays the full trade sequence: buys spend cash and accumulate shares,
/// sells release both, then the remaining position is marked to
/// `current_price`.
pub fn net_pnl(trades: &[TradeRecord], current_price: f64) -> f64 {
    let mut profit = 0.0;
    let mut qty_owned: i64 = 0;
    for trade in trades {
        match trade.side {
            TradeSide::Buy => {
                profit -= trade.notional();
                qty_owned += i64::from(trade.quantity);
            }
            TradeSide::Sell => {
                profit += trade.notional();
                qty_owned -= i64::from(trade.quantity);
            }
        }
    }
    profit + qty_owned as f64 * current_price
}
