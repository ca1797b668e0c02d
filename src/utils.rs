//! Helpers for HTML stripping, excerpts, and display-date formatting.

use chrono::DateTime;
use scraper::Html;

/// Decode an HTML fragment to plain text.
///
/// Provider snippets routinely arrive wrapped in markup (`<a>`, `<b>`,
/// entity escapes); anything that measures or displays text goes through
/// this first.
pub fn strip_html(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    fragment.root_element().text().collect::<String>()
}

/// Build a short display excerpt from an HTML or plain-text snippet.
///
/// The text is stripped of markup, cut at `length` characters, backed up to
/// the last word boundary, and given a trailing ellipsis. Text already
/// within the limit is returned whole, without the ellipsis.
pub fn safe_excerpt(text: &str, length: usize) -> String {
    let plain = strip_html(text);
    if plain.chars().count() <= length {
        return plain;
    }
    let head: String = plain.chars().take(length).collect();
    let cut = head.rfind(' ').unwrap_or(head.len());
    format!("{}...", &head[..cut])
}

/// Format a provider timestamp for display, e.g. `Aug 25, 2025 06:19 PM`.
///
/// Accepts RFC 3339 (the REST providers) and RFC 2822 (the feed provider);
/// anything else is shown verbatim rather than dropped.
pub fn format_published(raw: &str) -> String {
    let parsed = DateTime::parse_from_rfc3339(raw).or_else(|_| DateTime::parse_from_rfc2822(raw));
    match parsed {
        Ok(dt) => dt.format("%b %d, %Y %I:%M %p").to_string(),
        Err(_) => raw.to_string(),
    }
}
