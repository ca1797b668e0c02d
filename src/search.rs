//! Local search over an already-fetched article list.

use serde::Serialize;

use crate::models::Article;
use crate::pipeline::MAX_ARTICLES;
use crate::utils::safe_excerpt;

/// Display excerpts are cut around this many characters, at a word boundary.
const EXCERPT_LEN: usize = 200;

/// An article matched by [`search`], carrying a short display excerpt.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    #[serde(flatten)]
    pub article: Article,
    pub excerpt: String,
}

/// Case-insensitive substring filter over title and description.
///
/// Returns at most ten hits in input order, each with a plain-text excerpt
/// derived from the description (or the content when the description is
/// empty). An empty or whitespace query matches nothing.
pub fn search(query: &str, articles: &[Article]) -> Vec<SearchHit> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    articles
        .iter()
        .filter(|a| {
            a.title.to_lowercase().contains(&needle)
                || a.description.to_lowercase().contains(&needle)
        })
        .take(MAX_ARTICLES)
        .map(|a| {
            let basis = if a.description.is_empty() {
                &a.content
            } else {
                &a.description
            };
            SearchHit {
                excerpt: safe_excerpt(basis, EXCERPT_LEN),
                article: a.clone(),
            }
        })
        .collect()
}
