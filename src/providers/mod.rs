//! Provider clients for fetching raw news records.
//!
//! Three providers are supported, tried by the pipeline in this order:
//!
//! | Provider | Module | Auth | Notes |
//! |----------|--------|------|-------|
//! | NewsAPI | [`newsapi`] | API key | `everything` endpoint, popularity order |
//! | GNews | [`gnews`] | API key | `search` endpoint |
//! | Google News RSS | [`google_rss`] | none | search feed, last resort |
//!
//! Each client exposes `fetch(query) -> Result<Vec<RawRecord>, ProviderError>`
//! through the [`Provider`] trait and owns its own request timeout, so the
//! worst case for a full fallback pass is bounded by the sum of the three
//! timeouts. A keyed client with no key configured returns `Ok(vec![])`
//! rather than an error, letting the fallback chain move on transparently.
//!
//! Clients return records under provider-native field names; translation to
//! the canonical [`Article`](crate::models::Article) happens only in
//! [`normalize`](crate::normalize).

use std::time::Duration;

use crate::error::ProviderError;

pub mod gnews;
pub mod google_rss;
pub mod newsapi;

/// Per-request timeout shared by all provider clients.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(8);

/// Generic browser user-agent; some feed endpoints refuse default clients.
pub const USER_AGENT: &str = "Mozilla/5.0 (compatible; jamshedpur_news/0.1)";

/// A raw record as returned by one provider, before normalization.
///
/// One typed variant per provider; the normalizer pattern-matches on the
/// variant instead of poking at loosely typed fields.
#[derive(Debug, Clone)]
pub enum RawRecord {
    NewsApi(newsapi::NewsApiArticle),
    GNews(gnews::GNewsArticle),
    GoogleRss(google_rss::FeedItem),
}

/// A source of raw news records for a topic query.
pub trait Provider {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Fetch raw records for `query`.
    ///
    /// Returns `Ok(vec![])` both for genuinely empty result sets and for
    /// keyed providers with no key configured.
    async fn fetch(&self, query: &str) -> Result<Vec<RawRecord>, ProviderError>;
}

/// Build the HTTP client every provider uses: bounded timeout, browser-ish
/// user-agent.
pub(crate) fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(USER_AGENT)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}
