//! News source trait and the NewsAPI client.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Failures fetching headlines. Recoverable: the news section is skipped.
#[derive(Debug, Error)]
pub enum NewsError {
    #[error("network unreachable: {0}")]
    Network(String),

    #[error("news API key not configured (set news_api_key in config.toml or TICKERDECK_NEWS_API_KEY)")]
    MissingApiKey,

    #[error("news provider error: {0}")]
    Api(String),

    #[error("response format changed: {0}")]
    BadResponse(String),
}

/// A source of recent headlines for a symbol. May legitimately return an
/// empty list ("no news found").
pub trait NewsSource: Send + Sync {
    fn headlines(&self, symbol: &str) -> Result<Vec<String>, NewsError>;
}

// ── NewsAPI ──────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct EverythingResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
struct Article {
    title: Option<String>,
}

/// NewsAPI `/v2/everything` client. Queries `"<symbol> stock"`, English,
/// newest first, five articles.
pub struct NewsApi {
    client: reqwest::blocking::Client,
    api_key: String,
}

impl NewsApi {
    const ENDPOINT: &'static str = "https://newsapi.org/v2/everything";
    const PAGE_SIZE: u32 = 5;

    pub fn new(api_key: impl Into<String>) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to build HTTP client");
        Self {
            client,
            api_key: api_key.into(),
        }
    }

    fn parse_response(resp: EverythingResponse) -> Result<Vec<String>, NewsError> {
        if resp.status != "ok" {
            return Err(NewsError::Api(
                resp.message.unwrap_or_else(|| resp.status.clone()),
            ));
        }
        Ok(resp
            .articles
            .into_iter()
            .filter_map(|a| a.title)
            .collect())
    }
}

impl NewsSource for NewsApi {
    fn headlines(&self, symbol: &str) -> Result<Vec<String>, NewsError> {
        let query = format!("{symbol} stock");
        let page_size = Self::PAGE_SIZE.to_string();
        let resp = self
            .client
            .get(Self::ENDPOINT)
            .query(&[
                ("q", query.as_str()),
                ("language", "en"),
                ("sortBy", "publishedAt"),
                ("pageSize", page_size.as_str()),
                ("apiKey", self.api_key.as_str()),
            ])
            .send()
            .map_err(|e| NewsError::Network(e.to_string()))?;

        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(NewsError::Api("invalid API key".into()));
        }
        if !status.is_success() {
            return Err(NewsError::Api(format!("HTTP {status}")));
        }

        let body: EverythingResponse = resp
            .json()
            .map_err(|e| NewsError::BadResponse(e.to_string()))?;
        Self::parse_response(body)
    }
}
