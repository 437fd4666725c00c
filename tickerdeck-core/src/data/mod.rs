//! Market data — provider trait, Yahoo Finance client, TTL cache.

pub mod cache;
pub mod provider;
pub mod yahoo;

pub use cache::CachedQuotes;
pub use provider::{DataError, QuoteProvider};
pub use yahoo::YahooQuotes;
