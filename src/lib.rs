//! # Jamshedpur News
//!
//! A news-aggregation pipeline for a fixed topic. Articles are fetched from
//! three independent providers, normalized into one canonical shape,
//! deduplicated, capped, and cached, and a single selected article can be
//! upgraded with full text scraped from its source page.
//!
//! ## Providers
//!
//! Tried strictly in preference order, first non-empty result wins:
//!
//! 1. **NewsAPI**: keyed REST API, popularity-ranked
//! 2. **GNews**: keyed REST API
//! 3. **Google News RSS**: unauthenticated search feed, last resort
//!
//! A provider outage or an empty result set falls through to the next
//! provider; `get_articles` never fails for provider-level reasons.
//!
//! ## Architecture
//!
//! 1. **Fetch**: [`pipeline::NewsPipeline::get_articles`] checks the TTL
//!    cache, then walks the provider chain
//! 2. **Normalize**: [`normalize::normalize`] maps provider-native records
//!    into [`models::Article`], hashing a stable id
//! 3. **Dedup & cap**: duplicate stories collapse on a url/title prefix
//!    key, the list is capped at ten and cached for five minutes
//! 4. **Enrich**: [`enrich::ContentEnricher`] upgrades one article's body
//!    and lead image on demand, best effort
//!
//! The web routing and page rendering layer lives elsewhere and consumes
//! this crate's surface: `get_articles`, `get_article_content`, and
//! [`search::search`].

pub mod cache;
pub mod cli;
pub mod enrich;
pub mod error;
pub mod models;
pub mod normalize;
pub mod pipeline;
pub mod providers;
pub mod search;
pub mod utils;

pub use error::{EnrichmentError, ProviderError};
pub use models::Article;
pub use pipeline::{DEFAULT_QUERY, MAX_ARTICLES, NewsPipeline, PipelineConfig, selection_token};
pub use search::{SearchHit, search};
