//! Ledger — sole owner of the simulated cash balance and trade log.
//!
//! Both invariants are enforced at the mutation boundary:
//! - cash never goes negative (a buy that would overdraw is rejected)
//! - net shares never go negative (a sell of unowned shares is rejected)
//!
//! Rejected mutations leave the ledger untouched.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::{TradeRecord, TradeSide};

/// Mutation rejections. All recoverable; surfaced as a user-visible message.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("insufficient funds: cost {cost:.2} exceeds balance {cash:.2}")]
    InsufficientFunds { cost: f64, cash: f64 },

    #[error("not enough shares to sell: requested {requested}, owned {owned}")]
    InsufficientShares { requested: u32, owned: i64 },

    #[error("quantity must be positive")]
    InvalidQuantity,

    #[error("price must be positive")]
    InvalidPrice,
}

/// Cash balance plus append-only trade history.
///
/// Created once per session with a fixed starting balance and discarded
/// when the session ends. The trade log and the balance mutate together,
/// only through [`buy`](Ledger::buy) and [`sell`](Ledger::sell).
#[derive(Debug, Clone)]
pub struct Ledger {
    cash: f64,
    trades: Vec<TradeRecord>,
}

impl Ledger {
    pub fn new(starting_cash: f64) -> Self {
        Self {
            cash: starting_cash,
            trades: Vec::new(),
        }
    }

    pub fn cash(&self) -> f64 {
        self.cash
    }

    pub fn trades(&self) -> &[TradeRecord] {
        &self.trades
    }

    /// Cumulative Buy quantity minus cumulative Sell quantity.
    ///
    /// Never negative by construction, but typed as i64 so the replay in
    /// [`crate::pnl`] can share the arithmetic.
    pub fn net_shares(&self) -> i64 {
        self.trades
            .iter()
            .map(|t| match t.side {
                TradeSide::Buy => i64::from(t.quantity),
                TradeSide::Sell => -i64::from(t.quantity),
            })
            .sum()
    }

    /// Buy `quantity` shares at `price`.
    ///
    /// Fails with `InsufficientFunds` when the cost exceeds the balance.
    /// The boundary is inclusive: a buy that lands the balance exactly at
    /// zero succeeds.
    pub fn buy(
        &mut self,
        quantity: u32,
        price: f64,
        timestamp: DateTime<Utc>,
    ) -> Result<(), LedgerError> {
        Self::validate(quantity, price)?;
        let cost = f64::from(quantity) * price;
        if cost > self.cash {
            return Err(LedgerError::InsufficientFunds {
                cost,
                cash: self.cash,
            });
        }
        self.cash -= cost;
        self.trades.push(TradeRecord {
            side: TradeSide::Buy,
            quantity,
            price,
            timestamp,
        });
        Ok(())
    }

    /// Sell `quantity` shares at `price`.
    ///
    /// Fails with `InsufficientShares` when the quantity exceeds the net
    /// position.
    pub fn sell(
        &mut self,
        quantity: u32,
        price: f64,
        timestamp: DateTime<Utc>,
    ) -> Result<(), LedgerError> {
        Self::validate(quantity, price)?;
        let owned = self.net_shares();
        if i64::from(quantity) > owned {
            return Err(LedgerError::InsufficientShares {
                requested: quantity,
                owned,
            });
        }
        self.cash += f64::from(quantity) * price;
        self.trades.push(TradeRecord {
            side: TradeSide::Sell,
            quantity,
            price,
            timestamp,
        });
        Ok(())
    }

    fn validate(quantity: u32, price: f64) -> Result<(), LedgerError> {
        if quantity == 0 {
            return Err(LedgerError::InvalidQuantity);
        }
        if !(price > 0.0) {
            return Err(LedgerError::InvalidPrice);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    #[test]
    fn buy_debits_cash_and_records_trade() {
        let mut ledger = Ledger::new(100_000.0);
        ledger.buy(10, 100.0, now()).unwrap();
        assert_eq!(ledger.cash(), 99_000.0);
        assert_eq!(ledger.trades().len(), 1);
        assert_eq!(ledger.net_shares(), 10);
    }

    #[test]
    fn overdraw_is_rejected_without_mutation() {
        let mut ledger = Ledger::new(500.0);
        let err = ledger.buy(10, 100.0, now()).unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientFunds { .. }));
        assert_eq!(ledger.cash(), 500.0);
        assert!(ledger.trades().is_empty());
    }

    #[test]
    fn buy_at_exact_balance_succeeds() {
        // Boundary is inclusive: cost == cash is allowed.
        let mut ledger = Ledger::new(100.0);
        ledger.buy(1, 100.0, now()).unwrap();
        assert_eq!(ledger.cash(), 0.0);
        assert_eq!(ledger.net_shares(), 1);
    }

    #[test]
    fn sell_on_empty_ledger_is_rejected() {
        let mut ledger = Ledger::new(100_000.0);
        let err = ledger.sell(1, 100.0, now()).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::InsufficientShares {
                requested: 1,
                owned: 0
            }
        ));
        assert_eq!(ledger.cash(), 100_000.0);
        assert!(ledger.trades().is_empty());
    }

    #[test]
    fn sell_credits_cash() {
        let mut ledger = Ledger::new(100_000.0);
        ledger.buy(10, 100.0, now()).unwrap();
        ledger.sell(5, 120.0, now()).unwrap();
        assert_eq!(ledger.cash(), 99_600.0);
        assert_eq!(ledger.net_shares(), 5);
    }

    #[test]
    fn buy_then_sell_same_terms_is_balance_neutral() {
        let mut ledger = Ledger::new(42_000.0);
        ledger.buy(7, 312.5, now()).unwrap();
        ledger.sell(7, 312.5, now()).unwrap();
        assert_eq!(ledger.cash(), 42_000.0);
        assert_eq!(ledger.net_shares(), 0);
    }

    #[test]
    fn zero_quantity_and_bad_price_are_rejected() {
        let mut ledger = Ledger::new(1_000.0);
        assert!(matches!(
            ledger.buy(0, 100.0, now()),
            Err(LedgerError::InvalidQuantity)
        ));
        assert!(matches!(
            ledger.buy(1, 0.0, now()),
            Err(LedgerError::InvalidPrice)
        ));
        assert!(matches!(
            ledger.sell(1, -5.0, now()),
            Err(LedgerError::InvalidPrice)
        ));
        assert!(ledger.trades().is_empty());
    }
}
