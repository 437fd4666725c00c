//! Quote — a single price observation, and the series the chart API returns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One close-price sample at a timestamp.
///
/// Immutable once returned by the provider; held only for the current
/// session, never persisted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Quote {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
}

/// Instrument metadata from the chart API `meta` block.
///
/// All fields are optional: Yahoo omits them for some instruments and the
/// display layer degrades to USD/unknown.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuoteMeta {
    pub symbol: String,
    pub currency: Option<String>,
    pub exchange: Option<String>,
    pub market_state: Option<String>,
}

impl QuoteMeta {
    /// Currency sigil for price display. INR instruments render with ₹.
    pub fn currency_sigil(&self) -> &'static str {
        match self.currency.as_deref() {
            Some("INR") => "₹",
            _ => "$",
        }
    }
}

/// Time-ordered close series for one symbol over one range.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuoteSeries {
    pub meta: QuoteMeta,
    pub quotes: Vec<Quote>,
}

impl QuoteSeries {
    /// An empty series is "no data", not an error.
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    /// Most recent close — the "current price" for trading and P/L.
    pub fn last_price(&self) -> Option<f64> {
        self.quotes.last().map(|q| q.price)
    }

    pub fn first_price(&self) -> Option<f64> {
        self.quotes.first().map(|q| q.price)
    }

    /// Percent change of the last close against the first close of the range.
    pub fn percent_change(&self) -> Option<f64> {
        let first = self.first_price()?;
        let last = self.last_price()?;
        if first == 0.0 {
            return None;
        }
        Some((last - first) / first * 100.0)
    }

    /// Close values only, for charting.
    pub fn closes(&self) -> Vec<f64> {
        self.quotes.iter().map(|q| q.price).collect()
    }
}
