//! Data model for normalized news articles.
//!
//! Every provider-specific record is flattened into one [`Article`] shape by
//! the normalizer. Fields serialize in camelCase to match the JSON the
//! upstream APIs speak (`publishedAt`, not `published_at`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::strip_html;

/// How many characters of the url/title participate in the dedup key.
///
/// Long near-identical URLs are treated as the same story past this bound;
/// URLs that differ only in a long tail of tracking parameters may still
/// dedup apart. Known limitation, inherited deliberately.
pub const DEDUP_KEY_LEN: usize = 180;

/// A news story normalized from any of the three providers.
///
/// Articles are flat, self-contained values. They are created by
/// [`normalize`](crate::normalize::normalize), may have `content`/`image`
/// upgraded later by the enricher, and die with the cache entry that holds
/// them; nothing is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Stable id: SHA-256 of the canonical url, or of the title when the
    /// provider gave no url. Equal urls always hash to equal ids, which is
    /// what lets dedup and cross-call lookups recognize the same story.
    pub id: String,
    /// Display headline. Providers that omit it still pass through.
    pub title: String,
    /// Human-readable publisher name, when the provider reports one.
    pub source: Option<String>,
    /// Canonical link to the original story.
    pub url: Option<String>,
    /// Lead image URL, if any.
    pub image: Option<String>,
    /// Provider-supplied timestamp, preserved verbatim for display.
    pub published_at: Option<String>,
    /// Parsed form of `published_at`, defaulting to "now" when the provider
    /// string is absent or unparseable. Never used to re-sort.
    #[serde(default = "Utc::now")]
    pub published_at_parsed: DateTime<Utc>,
    /// Best available body text. May be a short snippet until enrichment runs.
    pub content: String,
    /// Short summary, independent of `content`.
    pub description: String,
}

impl Article {
    /// The string that decides whether two articles are the same story:
    /// the first [`DEDUP_KEY_LEN`] characters of the url, or of the title
    /// when there is no url.
    pub fn dedup_key(&self) -> String {
        let basis = self
            .url
            .as_deref()
            .filter(|u| !u.is_empty())
            .unwrap_or(&self.title);
        basis.chars().take(DEDUP_KEY_LEN).collect()
    }

    /// Rough reading-time estimate over the plain-text content, at 200 wpm.
    pub fn reading_time(&self) -> String {
        let words = strip_html(&self.content).split_whitespace().count();
        let mins = std::cmp::max(1, words / 200);
        format!("{mins} min read")
    }
}
