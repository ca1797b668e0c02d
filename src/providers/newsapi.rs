//! NewsAPI client (<https://newsapi.org>), the preferred provider.
//!
//! Uses the `everything` endpoint sorted by popularity, so the provider's
//! own ranking carries through to the final list.

use serde::Deserialize;
use tracing::{debug, instrument};

use super::{Provider, RawRecord, http_client};
use crate::error::ProviderError;

const ENDPOINT: &str = "https://newsapi.org/v2/everything";
const PAGE_SIZE: &str = "10";

/// Envelope around the article list; `status != "ok"` signals an
/// application-level error even under HTTP 200.
#[derive(Debug, Deserialize)]
struct NewsApiResponse {
    status: String,
    articles: Option<Vec<NewsApiArticle>>,
    message: Option<String>,
}

/// One article in NewsAPI's native shape.
#[derive(Debug, Clone, Deserialize)]
pub struct NewsApiArticle {
    pub source: Option<NewsApiSource>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "urlToImage")]
    pub url_to_image: Option<String>,
    #[serde(rename = "publishedAt")]
    pub published_at: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewsApiSource {
    pub name: Option<String>,
}

/// Keyed REST client for NewsAPI.
pub struct NewsApiClient {
    client: reqwest::Client,
    api_key: Option<String>,
}

impl NewsApiClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: http_client(),
            api_key,
        }
    }
}

impl Provider for NewsApiClient {
    fn name(&self) -> &'static str {
        "newsapi"
    }

    #[instrument(level = "debug", skip_all, fields(query = %query))]
    async fn fetch(&self, query: &str) -> Result<Vec<RawRecord>, ProviderError> {
        let Some(api_key) = self.api_key.as_deref() else {
            debug!("no NewsAPI key configured; skipping");
            return Ok(Vec::new());
        };

        let response = self
            .client
            .get(ENDPOINT)
            .query(&[
                ("q", query),
                ("pageSize", PAGE_SIZE),
                ("sortBy", "popularity"),
                ("language", "en"),
                ("apiKey", api_key),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                provider: self.name(),
                status: status.as_u16(),
            });
        }

        let body: NewsApiResponse = response.json().await?;
        if body.status != "ok" {
            return Err(ProviderError::Api {
                provider: self.name(),
                message: body.message.unwrap_or_else(|| "unknown error".to_string()),
            });
        }

        let records = body.articles.unwrap_or_default();
        debug!(count = records.len(), "NewsAPI returned articles");
        Ok(records.into_iter().map(RawRecord::NewsApi).collect())
    }
}
