//! GNews client (<https://gnews.io>), the second provider in the chain.

use serde::Deserialize;
use tracing::{debug, instrument};

use super::{Provider, RawRecord, http_client};
use crate::error::ProviderError;

const ENDPOINT: &str = "https://gnews.io/api/v4/search";
const MAX_RESULTS: &str = "10";

#[derive(Debug, Deserialize)]
struct GNewsResponse {
    articles: Option<Vec<GNewsArticle>>,
}

/// One article in GNews's native shape. Unlike NewsAPI, the image field is
/// just `image` and the source carries its own url.
#[derive(Debug, Clone, Deserialize)]
pub struct GNewsArticle {
    pub title: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub url: Option<String>,
    pub image: Option<String>,
    #[serde(rename = "publishedAt")]
    pub published_at: Option<String>,
    pub source: Option<GNewsSource>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GNewsSource {
    pub name: Option<String>,
}

/// Keyed REST client for GNews.
pub struct GNewsClient {
    client: reqwest::Client,
    api_key: Option<String>,
}

impl GNewsClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: http_client(),
            api_key,
        }
    }
}

impl Provider for GNewsClient {
    fn name(&self) -> &'static str {
        "gnews"
    }

    #[instrument(level = "debug", skip_all, fields(query = %query))]
    async fn fetch(&self, query: &str) -> Result<Vec<RawRecord>, ProviderError> {
        let Some(api_key) = self.api_key.as_deref() else {
            debug!("no GNews key configured; skipping");
            return Ok(Vec::new());
        };

        let response = self
            .client
            .get(ENDPOINT)
            .query(&[
                ("q", query),
                ("lang", "en"),
                ("max", MAX_RESULTS),
                ("token", api_key),
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

        let body: GNewsResponse = response.json().await?;
        let records = body.articles.unwrap_or_default();
        debug!(count = records.len(), "GNews returned articles");
        Ok(records.into_iter().map(RawRecord::GNews).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_key_short_circuits_to_empty() {
        let client = GNewsClient::new(None);
        let records = client.fetch("jamshedpur").await.unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_parses_native_article_shape() {
        let json = r#"{
            "title": "Steel city update",
            "description": "Short summary",
            "content": "Longer body text",
            "url": "https://example.com/steel",
            "image": "https://example.com/steel.jpg",
            "publishedAt": "2025-08-25T10:00:00Z",
            "source": {"name": "Hindustan Times", "url": "https://hindustantimes.com"}
        }"#;

        let article: GNewsArticle = serde_json::from_str(json).unwrap();
        assert_eq!(article.title.as_deref(), Some("Steel city update"));
        assert_eq!(article.image.as_deref(), Some("https://example.com/steel.jpg"));
        assert_eq!(
            article.source.unwrap().name.as_deref(),
            Some("Hindustan Times")
        );
    }
}
