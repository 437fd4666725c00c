//! Symbol cleanup, aliases, and regional resolution.
//!
//! A bare alphabetic input like `RELIANCE` is probed against the Indian
//! exchanges first (`.NS`, then `.BO`); the first variant with data wins,
//! otherwise the input passes through unchanged. Company-name aliases are
//! applied before probing.

use std::collections::HashMap;

use crate::data::provider::QuoteProvider;

/// Built-in company-name → ticker aliases. Extended from config.
pub const BUILTIN_ALIASES: &[(&str, &str)] = &[
    ("APPLE", "AAPL"),
    ("GOOGLE", "GOOG"),
    ("TESLA", "TSLA"),
    ("NVIDIA", "NVDA"),
    ("MICROSOFT", "MSFT"),
    ("RELIANCE", "RELIANCE"),
    ("RAYMOND", "RAYMOND"),
];

/// Regional suffixes probed for bare alphabetic symbols, in order.
const REGIONAL_SUFFIXES: &[&str] = &[".NS", ".BO"];

/// Outcome of symbol resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The symbol to fetch with.
    pub symbol: String,
    /// Set when a regional variant was substituted for the input.
    pub resolved_from: Option<String>,
}

/// Trim whitespace, strip `$` prefixes, uppercase.
pub fn clean(input: &str) -> String {
    input.trim().replace('$', "").to_ascii_uppercase()
}

pub fn builtin_alias_map() -> HashMap<String, String> {
    BUILTIN_ALIASES
        .iter()
        .map(|(name, ticker)| (name.to_string(), ticker.to_string()))
        .collect()
}

pub fn apply_alias(symbol: &str, aliases: &HashMap<String, String>) -> String {
    aliases
        .get(symbol)
        .cloned()
        .unwrap_or_else(|| symbol.to_string())
}

/// Probe `.NS`/`.BO` variants of a bare alphabetic symbol.
///
/// Inputs that already carry a suffix (or any non-alphabetic character)
/// are returned unchanged without touching the provider.
pub fn resolve_regional(symbol: &str, provider: &dyn QuoteProvider) -> Resolution {
    let is_bare = !symbol.is_empty() && symbol.chars().all(|c| c.is_ascii_alphabetic());
    if is_bare {
        for suffix in REGIONAL_SUFFIXES {
            let candidate = format!("{symbol}{suffix}");
            if provider.probe(&candidate) {
                return Resolution {
                    symbol: candidate,
                    resolved_from: Some(symbol.to_string()),
                };
            }
        }
    }
    Resolution {
        symbol: symbol.to_string(),
        resolved_from: None,
    }
}

/// Full pipeline: clean → alias → regional probe.
pub fn resolve(
    input: &str,
    aliases: &HashMap<String, String>,
    provider: &dyn QuoteProvider,
) -> Resolution {
    let cleaned = apply_alias(&clean(input), aliases);
    resolve_regional(&cleaned, provider)
}

/// Strip a regional suffix before querying news: headlines are indexed by
/// the bare company symbol.
pub fn news_symbol(symbol: &str) -> &str {
    symbol
        .strip_suffix(".NS")
        .or_else(|| symbol.strip_suffix(".BO"))
        .unwrap_or(symbol)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::provider::DataError;
    use crate::domain::QuoteSeries;
    use crate::range::TimeRange;

    /// Provider that knows a fixed set of symbols.
    struct FixedProvider {
        known: Vec<&'static str>,
    }

    impl QuoteProvider for FixedProvider {
        fn name(&self) -> &str {
            "fixed"
        }

        fn fetch(&self, symbol: &str, _range: TimeRange) -> Result<QuoteSeries, DataError> {
            if self.known.contains(&symbol) {
                Ok(QuoteSeries {
                    quotes: vec![crate::domain::Quote {
                        timestamp: chrono::Utc::now(),
                        price: 1.0,
                    }],
                    ..QuoteSeries::default()
                })
            } else {
                Err(DataError::SymbolNotFound {
                    symbol: symbol.to_string(),
                })
            }
        }
    }

    #[test]
    fn clean_strips_dollar_and_uppercases() {
        assert_eq!(clean("  $aapl "), "AAPL");
        assert_eq!(clean("reliance"), "RELIANCE");
    }

    #[test]
    fn alias_lookup() {
        let aliases = builtin_alias_map();
        assert_eq!(apply_alias("APPLE", &aliases), "AAPL");
        assert_eq!(apply_alias("ZZZ", &aliases), "ZZZ");
    }

    #[test]
    fn bare_symbol_resolves_to_nse_first() {
        let provider = FixedProvider {
            known: vec!["GLENMARK.NS", "GLENMARK.BO"],
        };
        let r = resolve_regional("GLENMARK", &provider);
        assert_eq!(r.symbol, "GLENMARK.NS");
        assert_eq!(r.resolved_from.as_deref(), Some("GLENMARK"));
    }

    #[test]
    fn falls_back_to_bse_then_input() {
        let bse_only = FixedProvider {
            known: vec!["RAYMOND.BO"],
        };
        assert_eq!(resolve_regional("RAYMOND", &bse_only).symbol, "RAYMOND.BO");

        let nothing = FixedProvider { known: vec![] };
        let r = resolve_regional("AAPL", &nothing);
        assert_eq!(r.symbol, "AAPL");
        assert!(r.resolved_from.is_none());
    }

    #[test]
    fn suffixed_input_is_not_probed() {
        let nothing = FixedProvider { known: vec![] };
        assert_eq!(
            resolve_regional("TCS.NS", &nothing).symbol,
            "TCS.NS"
        );
    }

    #[test]
    fn full_pipeline_applies_alias_before_probe() {
        let provider = FixedProvider { known: vec![] };
        let r = resolve(" $apple ", &builtin_alias_map(), &provider);
        assert_eq!(r.symbol, "AAPL");
    }

    #[test]
    fn news_symbol_strips_one_regional_suffix() {
        assert_eq!(news_symbol("RELIANCE.NS"), "RELIANCE");
        assert_eq!(news_symbol("RAYMOND.BO"), "RAYMOND");
        assert_eq!(news_symbol("AAPL"), "AAPL");
    }
}
