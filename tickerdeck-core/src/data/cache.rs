//! In-memory TTL cache over a quote provider.
//!
//! The chart auto-refreshes every 5 seconds but upstream data barely moves
//! at intraday granularity, so repeats within the TTL are served from
//! memory. Entries live for 30 seconds; nothing touches disk.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use super::provider::{DataError, QuoteProvider};
use crate::domain::QuoteSeries;
use crate::range::TimeRange;

pub const DEFAULT_TTL: Duration = Duration::from_secs(30);

struct Entry {
    fetched_at: Instant,
    series: QuoteSeries,
}

/// Caching wrapper. Errors are never cached — only successful fetches,
/// including empty series.
pub struct CachedQuotes<P> {
    inner: P,
    ttl: Duration,
    entries: Mutex<HashMap<(String, TimeRange), Entry>>,
}

impl<P: QuoteProvider> CachedQuotes<P> {
    pub fn new(inner: P) -> Self {
        Self::with_ttl(inner, DEFAULT_TTL)
    }

    pub fn with_ttl(inner: P, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl<P: QuoteProvider> QuoteProvider for CachedQuotes<P> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn fetch(&self, symbol: &str, range: TimeRange) -> Result<QuoteSeries, DataError> {
        let key = (symbol.to_string(), range);

        if let Some(entry) = self.entries.lock().unwrap().get(&key) {
            if entry.fetched_at.elapsed() < self.ttl {
                return Ok(entry.series.clone());
            }
        }

        let series = self.inner.fetch(symbol, range)?;
        self.entries.lock().unwrap().insert(
            key,
            Entry {
                fetched_at: Instant::now(),
                series: series.clone(),
            },
        );
        Ok(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Quote, QuoteMeta};
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingProvider {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingProvider {
        fn new(fail: bool) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail,
            }
        }
    }

    impl QuoteProvider for CountingProvider {
        fn name(&self) -> &str {
            "counting"
        }

        fn fetch(&self, symbol: &str, _range: TimeRange) -> Result<QuoteSeries, DataError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(DataError::Network("down".into()));
            }
            Ok(QuoteSeries {
                meta: QuoteMeta {
                    symbol: symbol.to_string(),
                    ..QuoteMeta::default()
                },
                quotes: vec![Quote {
                    timestamp: Utc::now(),
                    price: 100.0,
                }],
            })
        }
    }

    #[test]
    fn repeat_fetch_within_ttl_hits_cache() {
        let cache = CachedQuotes::new(CountingProvider::new(false));
        cache.fetch("AAPL", TimeRange::Day).unwrap();
        cache.fetch("AAPL", TimeRange::Day).unwrap();
        assert_eq!(cache.inner.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn distinct_ranges_are_distinct_entries() {
        let cache = CachedQuotes::new(CountingProvider::new(false));
        cache.fetch("AAPL", TimeRange::Day).unwrap();
        cache.fetch("AAPL", TimeRange::Month).unwrap();
        assert_eq!(cache.inner.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn expired_entry_is_refetched() {
        let cache = CachedQuotes::with_ttl(CountingProvider::new(false), Duration::ZERO);
        cache.fetch("AAPL", TimeRange::Day).unwrap();
        cache.fetch("AAPL", TimeRange::Day).unwrap();
        assert_eq!(cache.inner.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn errors_are_not_cached() {
        let cache = CachedQuotes::new(CountingProvider::new(true));
        assert!(cache.fetch("AAPL", TimeRange::Day).is_err());
        assert!(cache.fetch("AAPL", TimeRange::Day).is_err());
        assert_eq!(cache.inner.calls.load(Ordering::SeqCst), 2);
    }
}
