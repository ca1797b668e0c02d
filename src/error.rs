//! Error kinds for the pipeline stages.
//!
//! Nothing here escapes to the library caller from the core path: the
//! orchestrator recovers from every [`ProviderError`] by moving to the next
//! provider, and the enricher recovers from every [`EnrichmentError`] by
//! returning the article unchanged. The enums exist so each stage reports a
//! typed failure for the caller above it to match on, instead of relying on
//! catch-all suppression.

use thiserror::Error;

/// A single provider attempt failed.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Transport-level failure: connect, timeout, or body read.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-success HTTP status.
    #[error("{provider} returned HTTP {status}")]
    Status { provider: &'static str, status: u16 },

    /// The provider answered 200 but reported an application-level error.
    #[error("{provider} rejected the request: {message}")]
    Api { provider: &'static str, message: String },

    /// The feed body could not be parsed as RSS.
    #[error("malformed feed: {0}")]
    Feed(String),
}

/// A best-effort full-text fetch for one article failed.
#[derive(Debug, Error)]
pub enum EnrichmentError {
    /// The article carries no usable url to fetch.
    #[error("article has no usable url: {0}")]
    InvalidUrl(String),

    /// Transport-level failure fetching the live page.
    #[error("page fetch failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The live page answered with a non-success HTTP status.
    #[error("page fetch returned HTTP {0}")]
    Status(u16),

    /// The page parsed, but no selector produced readable text.
    #[error("no readable content found")]
    NoContent,
}
