//! TradeRecord — one entry in the append-only paper-trading log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Trade direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeSide {
    Buy,
    Sell,
}

impl TradeSide {
    pub fn label(self) -> &'static str {
        match self {
            TradeSide::Buy => "Buy",
            TradeSide::Sell => "Sell",
        }
    }
}

/// A single simulated trade.
///
/// Created exclusively by [`crate::ledger::Ledger`] mutations, immutable
/// afterwards, never deleted. Insertion order is chronological because
/// trades are only ever appended at "now".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeRecord {
    pub side: TradeSide,
    pub quantity: u32,
    pub price: f64,
    pub timestamp: DateTime<Utc>,
}

impl TradeRecord {
    /// Cash moved by this trade.
    pub fn notional(&self) -> f64 {
        f64::from(self.quantity) * self.price
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notional_is_quantity_times_price() {
        let t = TradeRecord {
            side: TradeSide::Buy,
            quantity: 10,
            price: 101.5,
            timestamp: Utc::now(),
        };
        assert_eq!(t.notional(), 1015.0);
    }

    #[test]
    fn side_labels() {
        assert_eq!(TradeSide::Buy.label(), "Buy");
        assert_eq!(TradeSide::Sell.label(), "Sell");
    }

    #[test]
    fn trade_serialization_roundtrip() {
        let t = TradeRecord {
            side: TradeSide::Sell,
            quantity: 5,
            price: 120.0,
            timestamp: Utc::now(),
        };
        let json = serde_json::to_string(&t).unwrap();
        let deser: TradeRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(deser.side, TradeSide::Sell);
        assert_eq!(deser.quantity, 5);
        assert_eq!(deser.price, 120.0);
    }
}
