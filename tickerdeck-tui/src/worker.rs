//! Background worker thread — all network fetches run here.
//!
//! Communication with the TUI main thread is via `mpsc` channels. The
//! provider calls themselves stay blocking and sequential; the comparison
//! loop in particular is deliberately one symbol at a time so a failure
//! stays isolated to that symbol.

use std::collections::HashMap;
use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};

use tickerdeck_core::data::{CachedQuotes, QuoteProvider, YahooQuotes};
use tickerdeck_core::domain::QuoteSeries;
use tickerdeck_core::news::{NewsApi, NewsError, NewsSource};
use tickerdeck_core::range::TimeRange;
use tickerdeck_core::sentiment::{self, HeadlineSentiment};
use tickerdeck_core::symbol;

/// Comparison curves always use the five-day window.
pub const COMPARISON_RANGE: TimeRange = TimeRange::FiveDays;

/// Commands sent from the TUI to the worker.
#[derive(Debug)]
pub enum WorkerCommand {
    /// Resolve user input (clean → alias → regional probe) and fetch.
    ResolveAndFetch {
        input: String,
        range: TimeRange,
        aliases: HashMap<String, String>,
    },
    /// Refresh an already-resolved symbol.
    FetchQuote { symbol: String, range: TimeRange },
    FetchNews {
        symbol: String,
        api_key: Option<String>,
    },
    FetchComparison {
        symbols: Vec<String>,
        with_sentiment: bool,
        api_key: Option<String>,
    },
    Shutdown,
}

/// Responses sent from the worker back to the TUI.
#[derive(Debug)]
pub enum WorkerResponse {
    QuoteReady {
        symbol: String,
        range: TimeRange,
        series: QuoteSeries,
        resolved_from: Option<String>,
    },
    QuoteFailed {
        symbol: String,
        error: String,
    },

    NewsReady {
        symbol: String,
        headlines: Vec<String>,
        sentiment: Vec<HeadlineSentiment>,
    },
    NewsFailed {
        symbol: String,
        error: String,
    },

    ComparisonSeries {
        symbol: String,
        series: QuoteSeries,
    },
    ComparisonFailed {
        symbol: String,
        error: String,
    },
    /// Aggregate sentiment for one comparison symbol; `None` = no news.
    ComparisonSentiment {
        symbol: String,
        score: Option<f64>,
    },
    ComparisonDone,
}

/// Spawn the background worker thread.
pub fn spawn_worker(
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let quotes = CachedQuotes::new(YahooQuotes::new());

        while let Ok(cmd) = rx.recv() {
            match cmd {
                WorkerCommand::ResolveAndFetch {
                    input,
                    range,
                    aliases,
                } => {
                    let resolution = symbol::resolve(&input, &aliases, &quotes);
                    fetch_quote(
                        &quotes,
                        &tx,
                        resolution.symbol,
                        range,
                        resolution.resolved_from,
                    );
                }
                WorkerCommand::FetchQuote { symbol, range } => {
                    fetch_quote(&quotes, &tx, symbol, range, None);
                }
                WorkerCommand::FetchNews { symbol, api_key } => {
                    let resp = fetch_news(&symbol, api_key.as_deref());
                    if tx.send(resp).is_err() {
                        break;
                    }
                }
                WorkerCommand::FetchComparison {
                    symbols,
                    with_sentiment,
                    api_key,
                } => {
                    for sym in &symbols {
                        let resp = match quotes.fetch(sym, COMPARISON_RANGE) {
                            Ok(series) => WorkerResponse::ComparisonSeries {
                                symbol: sym.clone(),
                                series,
                            },
                            Err(e) => WorkerResponse::ComparisonFailed {
                                symbol: sym.clone(),
                                error: e.to_string(),
                            },
                        };
                        if tx.send(resp).is_err() {
                            return;
                        }

                        if with_sentiment {
                            let resp = comparison_sentiment(sym, api_key.as_deref());
                            if tx.send(resp).is_err() {
                                return;
                            }
                        }
                    }
                    if tx.send(WorkerResponse::ComparisonDone).is_err() {
                        break;
                    }
                }
                WorkerCommand::Shutdown => break,
            }
        }
    })
}

fn fetch_quote(
    quotes: &impl QuoteProvider,
    tx: &Sender<WorkerResponse>,
    symbol: String,
    range: TimeRange,
    resolved_from: Option<String>,
) {
    let resp = match quotes.fetch(&symbol, range) {
        Ok(series) => WorkerResponse::QuoteReady {
            symbol,
            range,
            series,
            resolved_from,
        },
        Err(e) => WorkerResponse::QuoteFailed {
            symbol,
            error: e.to_string(),
        },
    };
    let _ = tx.send(resp);
}

fn fetch_news(symbol: &str, api_key: Option<&str>) -> WorkerResponse {
    let Some(key) = api_key else {
        return WorkerResponse::NewsFailed {
            symbol: symbol.to_string(),
            error: NewsError::MissingApiKey.to_string(),
        };
    };
    let api = NewsApi::new(key);
    match api.headlines(symbol::news_symbol(symbol)) {
        Ok(headlines) => {
            let sentiment = sentiment::analyze(&headlines);
            WorkerResponse::NewsReady {
                symbol: symbol.to_string(),
                headlines,
                sentiment,
            }
        }
        Err(e) => WorkerResponse::NewsFailed {
            symbol: symbol.to_string(),
            error: e.to_string(),
        },
    }
}

fn comparison_sentiment(symbol: &str, api_key: Option<&str>) -> WorkerResponse {
    let score = api_key.and_then(|key| {
        let api = NewsApi::new(key);
        match api.headlines(symbol::news_symbol(symbol)) {
            Ok(headlines) if !headlines.is_empty() => {
                let results = sentiment::analyze(&headlines);
                Some(sentiment::sentiment_score(&results))
            }
            _ => None,
        }
    });
    WorkerResponse::ComparisonSentiment {
        symbol: symbol.to_string(),
        score,
    }
}
