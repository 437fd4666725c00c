//! Yahoo Finance quote provider.
//!
//! Fetches close series from Yahoo's v8 chart API using the range/interval
//! pairs each [`TimeRange`] implies. Yahoo has no official API and rejects
//! the default reqwest user agent, so the client sends a browser string.
//!
//! Per the resource model there is no internal retry: one request per
//! call, and any failure maps straight to a [`DataError`].

use std::time::Duration;

use chrono::DateTime;
use serde::Deserialize;

use super::provider::{DataError, QuoteProvider};
use crate::domain::{Quote, QuoteMeta, QuoteSeries};
use crate::range::TimeRange;

/// Yahoo Finance v8 chart API response.
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartOuter,
}

#[derive(Debug, Deserialize)]
struct ChartOuter {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartApiError>,
}

#[derive(Debug, Deserialize)]
struct ChartApiError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: Option<ChartMeta>,
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct ChartMeta {
    currency: Option<String>,
    #[serde(rename = "exchangeName")]
    exchange_name: Option<String>,
    #[serde(rename = "marketState")]
    market_state: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteBlock>,
}

#[derive(Debug, Deserialize)]
struct QuoteBlock {
    close: Vec<Option<f64>>,
}

/// Yahoo Finance quote provider.
pub struct YahooQuotes {
    client: reqwest::blocking::Client,
}

impl YahooQuotes {
    pub fn new() -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .expect("failed to build HTTP client");
        Self { client }
    }

    fn chart_url(symbol: &str, range: TimeRange) -> String {
        format!(
            "https://query1.finance.yahoo.com/v8/finance/chart/{symbol}\
             ?range={}&interval={}",
            range.period(),
            range.interval()
        )
    }

    /// Parse the chart response into a series, skipping null closes
    /// (holidays, halts, padding at the end of partial sessions).
    fn parse_response(symbol: &str, resp: ChartResponse) -> Result<QuoteSeries, DataError> {
        let result = resp.chart.result.ok_or_else(|| {
            if let Some(err) = resp.chart.error {
                if err.code == "Not Found" {
                    DataError::SymbolNotFound {
                        symbol: symbol.to_string(),
                    }
                } else {
                    DataError::BadResponse(format!("{}: {}", err.code, err.description))
                }
            } else {
                DataError::BadResponse("empty result with no error".into())
            }
        })?;

        let data = result
            .into_iter()
            .next()
            .ok_or_else(|| DataError::BadResponse("result array is empty".into()))?;

        let meta = QuoteMeta {
            symbol: symbol.to_string(),
            currency: data.meta.as_ref().and_then(|m| m.currency.clone()),
            exchange: data.meta.as_ref().and_then(|m| m.exchange_name.clone()),
            market_state: data.meta.as_ref().and_then(|m| m.market_state.clone()),
        };

        // No timestamps at all means the symbol exists but has no samples
        // in this window. That is "no data", not an error.
        let timestamps = match data.timestamp {
            Some(ts) => ts,
            None => return Ok(QuoteSeries { meta, quotes: Vec::new() }),
        };

        let closes = data
            .indicators
            .quote
            .into_iter()
            .next()
            .ok_or_else(|| DataError::BadResponse("no quote data".into()))?
            .close;

        let mut quotes = Vec::with_capacity(timestamps.len());
        for (i, &ts) in timestamps.iter().enumerate() {
            let Some(price) = closes.get(i).copied().flatten() else {
                continue;
            };
            let timestamp = DateTime::from_timestamp(ts, 0)
                .ok_or_else(|| DataError::BadResponse(format!("invalid timestamp: {ts}")))?;
            quotes.push(Quote { timestamp, price });
        }

        Ok(QuoteSeries { meta, quotes })
    }
}

impl Default for YahooQuotes {
    fn default() -> Self {
        Self::new()
    }
}

impl QuoteProvider for YahooQuotes {
    fn name(&self) -> &str {
        "yahoo_finance"
    }

    fn fetch(&self, symbol: &str, range: TimeRange) -> Result<QuoteSeries, DataError> {
        let url = Self::chart_url(symbol, range);

        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| DataError::Network(e.to_string()))?;

        let status = resp.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = resp
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(60);
            return Err(DataError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        }

        if !status.is_success() {
            return Err(DataError::Network(format!("HTTP {status} for {symbol}")));
        }

        let chart: ChartResponse = resp.json().map_err(|e| {
            DataError::BadResponse(format!("failed to parse response for {symbol}: {e}"))
        })?;

        Self::parse_response(symbol, chart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(symbol: &str, json: &str) -> Result<QuoteSeries, DataError> {
        let resp: ChartResponse = serde_json::from_str(json).unwrap();
        YahooQuotes::parse_response(symbol, resp)
    }

    #[test]
    fn parses_closes_and_meta() {
        let json = r#"{
            "chart": {
                "result": [{
                    "meta": {"currency": "INR", "exchangeName": "NSI", "marketState": "CLOSED"},
                    "timestamp": [1700000000, 1700000300, 1700000600],
                    "indicators": {"quote": [{"close": [100.0, 101.5, 99.75]}]}
                }],
                "error": null
            }
        }"#;
        let series = parse("RELIANCE.NS", json).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.last_price(), Some(99.75));
        assert_eq!(series.meta.currency.as_deref(), Some("INR"));
        assert_eq!(series.meta.currency_sigil(), "₹");
    }

    #[test]
    fn null_closes_are_skipped() {
        let json = r#"{
            "chart": {
                "result": [{
                    "meta": {"currency": "USD"},
                    "timestamp": [1, 2, 3, 4],
                    "indicators": {"quote": [{"close": [100.0, null, 102.0, null]}]}
                }],
                "error": null
            }
        }"#;
        let series = parse("AAPL", json).unwrap();
        assert_eq!(series.closes(), vec![100.0, 102.0]);
    }

    #[test]
    fn missing_timestamps_is_empty_series_not_error() {
        let json = r#"{
            "chart": {
                "result": [{
                    "meta": {"currency": "USD"},
                    "indicators": {"quote": [{"close": []}]}
                }],
                "error": null
            }
        }"#;
        let series = parse("AAPL", json).unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn not_found_error_maps_to_symbol_not_found() {
        let json = r#"{
            "chart": {
                "result": null,
                "error": {"code": "Not Found", "description": "No data found"}
            }
        }"#;
        let err = parse("NOPE", json).unwrap_err();
        assert!(matches!(err, DataError::SymbolNotFound { symbol } if symbol == "NOPE"));
    }

    #[test]
    fn other_api_error_is_bad_response() {
        let json = r#"{
            "chart": {
                "result": null,
                "error": {"code": "Bad Request", "description": "Invalid interval"}
            }
        }"#;
        assert!(matches!(
            parse("AAPL", json).unwrap_err(),
            DataError::BadResponse(_)
        ));
    }

    #[test]
    fn chart_url_uses_range_mapping() {
        let url = YahooQuotes::chart_url("TSLA", TimeRange::FiveDays);
        assert!(url.contains("/v8/finance/chart/TSLA"));
        assert!(url.contains("range=5d"));
        assert!(url.contains("interval=15m"));
    }
}
