//! User configuration — TOML file, environment overrides, defaults.
//!
//! A missing file yields the defaults; a malformed file is an error the
//! binary reports at startup rather than silently masking.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::symbol;

/// Environment variable that overrides the configured NewsAPI key.
pub const NEWS_API_KEY_ENV: &str = "TICKERDECK_NEWS_API_KEY";

pub const DEFAULT_STARTING_CASH: f64 = 100_000.0;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Paper-trading balance each session starts with.
    pub starting_cash: f64,

    /// Symbols offered in the comparison multi-select.
    pub comparison_symbols: Vec<String>,

    /// Comparison symbols selected by default.
    pub default_comparison: Vec<String>,

    /// NewsAPI key. The `TICKERDECK_NEWS_API_KEY` env var wins over this.
    pub news_api_key: Option<String>,

    /// Extra company-name → ticker aliases, merged over the built-ins.
    pub aliases: BTreeMap<String, String>,

    /// Login users. Empty means open access (no login screen).
    pub users: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            starting_cash: DEFAULT_STARTING_CASH,
            comparison_symbols: [
                "RELIANCE.NS",
                "TCS.NS",
                "INFY.NS",
                "AAPL",
                "TSLA",
                "GOOG",
                "NIFTYBEES.NS",
            ]
            .map(String::from)
            .to_vec(),
            default_comparison: ["RELIANCE.NS", "TCS.NS"].map(String::from).to_vec(),
            news_api_key: None,
            aliases: BTreeMap::new(),
            users: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Load from a TOML file. Missing file → defaults; malformed → error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(ConfigError::Io {
                    path: path.display().to_string(),
                    source: e,
                });
            }
        };
        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// NewsAPI key with the env override applied.
    pub fn news_api_key(&self) -> Option<String> {
        std::env::var(NEWS_API_KEY_ENV)
            .ok()
            .filter(|v| !v.is_empty())
            .or_else(|| self.news_api_key.clone())
    }

    /// Built-in aliases with config entries merged over them.
    pub fn alias_map(&self) -> HashMap<String, String> {
        let mut map = symbol::builtin_alias_map();
        for (name, ticker) in &self.aliases {
            map.insert(
                name.to_ascii_uppercase(),
                ticker.to_ascii_uppercase(),
            );
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let cfg = Config::load(Path::new("/nonexistent/tickerdeck/config.toml")).unwrap();
        assert_eq!(cfg.starting_cash, DEFAULT_STARTING_CASH);
        assert!(cfg.users.is_empty());
        assert!(cfg.comparison_symbols.contains(&"AAPL".to_string()));
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let cfg: Config = toml::from_str("starting_cash = 5000.0").unwrap();
        assert_eq!(cfg.starting_cash, 5000.0);
        assert_eq!(cfg.default_comparison.len(), 2);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = std::env::temp_dir().join("tickerdeck_config_malformed");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "starting_cash = [not toml").unwrap();

        assert!(matches!(
            Config::load(&path),
            Err(ConfigError::Parse { .. })
        ));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn config_aliases_merge_over_builtins() {
        let cfg: Config = toml::from_str(
            r#"
            [aliases]
            infosys = "INFY"
            apple = "APPL_OVERRIDE"
            "#,
        )
        .unwrap();
        let map = cfg.alias_map();
        assert_eq!(map.get("INFOSYS").map(String::as_str), Some("INFY"));
        assert_eq!(map.get("APPLE").map(String::as_str), Some("APPL_OVERRIDE"));
        assert_eq!(map.get("TESLA").map(String::as_str), Some("TSLA"));
    }

    #[test]
    fn users_table_parses() {
        let cfg: Config = toml::from_str(
            r#"
            [users]
            devansh = "1234"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.users.get("devansh").map(String::as_str), Some("1234"));
    }
}
