//! Quote provider trait and structured error types.
//!
//! The trait abstracts the market-data source so the UI and tests can swap
//! in mocks. An empty [`QuoteSeries`](crate::domain::QuoteSeries) is a
//! valid success ("no data for this range"), not an error; `DataError` is
//! reserved for actual failures.

use thiserror::Error;

use crate::domain::QuoteSeries;
use crate::range::TimeRange;

/// Failures talking to a market-data source. All recoverable: the caller
/// shows a warning and skips dependent sections, or (in the comparison
/// view) moves on to the next symbol.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    Network(String),

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("response format changed: {0}")]
    BadResponse(String),
}

/// A source of historical close-price series.
pub trait QuoteProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch the close series for a symbol over a time range.
    ///
    /// Blocking, no internal retry: a transient failure surfaces
    /// immediately as a `DataError`.
    fn fetch(&self, symbol: &str, range: TimeRange) -> Result<QuoteSeries, DataError>;

    /// Cheap existence check used by regional symbol resolution: does this
    /// symbol have any recent data?
    fn probe(&self, symbol: &str) -> bool {
        matches!(self.fetch(symbol, TimeRange::Day), Ok(series) if !series.is_empty())
    }
}
