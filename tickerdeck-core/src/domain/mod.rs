//! Domain types for TickerDeck.

pub mod quote;
pub mod trade;

pub use quote::{Quote, QuoteMeta, QuoteSeries};
pub use trade::{TradeRecord, TradeSide};

/// Symbol type alias
pub type Symbol = String;
