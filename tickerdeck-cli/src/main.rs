//! TickerDeck CLI — the dashboard's core without the dashboard.
//!
//! Commands:
//! - `quote` — resolve a symbol, fetch its close series, print the metric
//! - `news` — headlines with sentiment labels and the aggregate band
//! - `compare` — last price and change for several symbols at once
//! - `resolve` — show what a raw input resolves to

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use tickerdeck_core::config::Config;
use tickerdeck_core::data::{CachedQuotes, QuoteProvider, YahooQuotes};
use tickerdeck_core::news::{NewsApi, NewsSource};
use tickerdeck_core::range::TimeRange;
use tickerdeck_core::sentiment::{self, SentimentBand};
use tickerdeck_core::symbol;

#[derive(Parser)]
#[command(name = "tickerdeck", about = "TickerDeck CLI — stock quotes, news sentiment, comparisons")]
struct Cli {
    /// Config file. Defaults to <config-dir>/tickerdeck/config.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch and print a symbol's close series summary.
    Quote {
        /// Ticker or company name (e.g. AAPL, RELIANCE, apple).
        symbol: String,

        /// Time range: 1D, 5D, 1M, 6M, 1Y, 5Y or ALL.
        #[arg(long, default_value = "1D")]
        range: TimeRange,

        /// Skip alias and regional resolution; fetch the symbol verbatim.
        #[arg(long, default_value_t = false)]
        no_resolve: bool,
    },
    /// Fetch headlines and print per-headline sentiment plus the aggregate.
    News {
        symbol: String,
    },
    /// Compare several symbols: last price, percent change, optional sentiment.
    Compare {
        #[arg(required = true)]
        symbols: Vec<String>,

        /// Also fetch and score each symbol's headlines.
        #[arg(long, default_value_t = false)]
        sentiment: bool,
    },
    /// Show the alias/regional resolution for a raw input.
    Resolve {
        symbol: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let config = Config::load(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;

    match cli.command {
        Commands::Quote {
            symbol,
            range,
            no_resolve,
        } => run_quote(&config, &symbol, range, no_resolve),
        Commands::News { symbol } => run_news(&config, &symbol),
        Commands::Compare { symbols, sentiment } => run_compare(&config, &symbols, sentiment),
        Commands::Resolve { symbol } => run_resolve(&config, &symbol),
    }
}

fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tickerdeck")
        .join("config.toml")
}

fn run_quote(config: &Config, input: &str, range: TimeRange, no_resolve: bool) -> Result<()> {
    let quotes = CachedQuotes::new(YahooQuotes::new());

    let symbol = if no_resolve {
        symbol::clean(input)
    } else {
        let resolution = symbol::resolve(input, &config.alias_map(), &quotes);
        if let Some(from) = &resolution.resolved_from {
            println!("Resolved {from} to {}", resolution.symbol);
        }
        resolution.symbol
    };

    let series = quotes.fetch(&symbol, range)?;
    if series.is_empty() {
        println!("No data available for this time range or stock.");
        return Ok(());
    }

    let sigil = series.meta.currency_sigil();
    let last = series.last_price().unwrap_or(f64::NAN);
    println!("{symbol} ({})", range.label());
    println!("  Price:   {sigil}{last:.2}");
    if let Some(pct) = series.percent_change() {
        println!("  Change:  {pct:+.2}%");
    }
    if let Some(exchange) = &series.meta.exchange {
        println!("  Exchange: {exchange}");
    }
    println!("  Samples: {}", series.len());
    println!("  {}", sparkline(&series.closes(), 60));

    Ok(())
}

fn run_news(config: &Config, input: &str) -> Result<()> {
    let Some(api_key) = config.news_api_key() else {
        bail!(
            "no NewsAPI key configured — set news_api_key in the config file \
             or the TICKERDECK_NEWS_API_KEY environment variable"
        );
    };

    let symbol = symbol::clean(input);
    let api = NewsApi::new(api_key);
    let headlines = api.headlines(symbol::news_symbol(&symbol))?;

    if headlines.is_empty() {
        println!("No news found for {symbol}.");
        return Ok(());
    }

    let results = sentiment::analyze(&headlines);
    println!("News for {symbol}:");
    for r in &results {
        println!("  [{:<8}] ({:+.2}) {}", r.label.label(), r.score, r.headline);
    }

    let avg = sentiment::sentiment_score(&results);
    let band = SentimentBand::from_score(avg);
    println!("\nAvg sentiment score: {avg:.2} — {}", band.label());

    Ok(())
}

fn run_compare(config: &Config, symbols: &[String], with_sentiment: bool) -> Result<()> {
    let quotes = CachedQuotes::new(YahooQuotes::new());
    let api_key = config.news_api_key();

    println!("{:<16} {:>12} {:>9}", "SYMBOL", "PRICE", "CHANGE");

    for input in symbols {
        let symbol = symbol::clean(input);
        // One symbol failing must not abort the rest of the loop.
        let series = match quotes.fetch(&symbol, TimeRange::FiveDays) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("warning: failed to load {symbol}: {e}");
                continue;
            }
        };

        if series.is_empty() {
            println!("{symbol:<16} {:>12} {:>9}", "no data", "-");
            continue;
        }

        let sigil = series.meta.currency_sigil();
        let last = series.last_price().unwrap_or(f64::NAN);
        let pct = series
            .percent_change()
            .map(|p| format!("{p:+.2}%"))
            .unwrap_or_else(|| "-".into());
        print!("{symbol:<16} {:>12} {pct:>9}", format!("{sigil}{last:.2}"));

        if with_sentiment {
            match &api_key {
                Some(key) => {
                    let api = NewsApi::new(key.clone());
                    match api.headlines(symbol::news_symbol(&symbol)) {
                        Ok(headlines) if !headlines.is_empty() => {
                            let score =
                                sentiment::sentiment_score(&sentiment::analyze(&headlines));
                            print!("  sentiment {score:+.2}");
                        }
                        Ok(_) => print!("  no news"),
                        Err(e) => print!("  sentiment unavailable ({e})"),
                    }
                }
                None => print!("  sentiment unavailable (no API key)"),
            }
        }
        println!();
    }

    Ok(())
}

fn run_resolve(config: &Config, input: &str) -> Result<()> {
    let quotes = YahooQuotes::new();
    let resolution = symbol::resolve(input, &config.alias_map(), &quotes);
    match resolution.resolved_from {
        Some(from) => println!("{from} -> {}", resolution.symbol),
        None => println!("{}", resolution.symbol),
    }
    Ok(())
}

/// Compact close-series sparkline using the eight block glyphs.
fn sparkline(closes: &[f64], max_width: usize) -> String {
    const BLOCKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

    if closes.is_empty() || max_width == 0 {
        return String::new();
    }

    // Downsample evenly when the series is wider than the budget.
    let step = (closes.len() as f64 / max_width as f64).max(1.0);
    let sampled: Vec<f64> = (0..closes.len().min(max_width))
        .map(|i| closes[(i as f64 * step) as usize])
        .collect();

    let min = sampled.iter().copied().fold(f64::INFINITY, f64::min);
    let max = sampled.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;

    sampled
        .iter()
        .map(|&v| {
            let level = if span == 0.0 {
                0
            } else {
                (((v - min) / span) * 7.0).round() as usize
            };
            BLOCKS[level.min(7)]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparkline_spans_min_to_max() {
        let s = sparkline(&[1.0, 2.0, 3.0, 4.0], 10);
        assert_eq!(s.chars().count(), 4);
        assert!(s.starts_with('▁'));
        assert!(s.ends_with('█'));
    }

    #[test]
    fn sparkline_flat_series_stays_low() {
        let s = sparkline(&[5.0, 5.0, 5.0], 10);
        assert!(s.chars().all(|c| c == '▁'));
    }

    #[test]
    fn sparkline_downsamples_to_width() {
        let closes: Vec<f64> = (0..500).map(|i| i as f64).collect();
        let s = sparkline(&closes, 60);
        assert!(s.chars().count() <= 60);
    }

    #[test]
    fn sparkline_empty_is_empty() {
        assert!(sparkline(&[], 60).is_empty());
    }
}
