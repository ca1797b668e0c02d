//! Normalization of provider-native records into canonical [`Article`]s.
//!
//! Normalization never fails: a malformed field degrades to empty/optional,
//! an unparseable date degrades to "now". One bad record must never drop
//! the batch.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

use crate::models::Article;
use crate::providers::RawRecord;

/// Map one raw provider record into the canonical article shape.
pub fn normalize(raw: RawRecord) -> Article {
    match raw {
        RawRecord::NewsApi(a) => {
            let title = a.title.unwrap_or_default();
            let description = a.description.unwrap_or_default();
            // Prefer the full-body field, fall back to the summary.
            let content = a
                .content
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| description.clone());
            Article {
                id: article_id(a.url.as_deref(), &title),
                published_at_parsed: parse_published(a.published_at.as_deref()),
                title,
                source: a.source.and_then(|s| s.name),
                url: a.url,
                image: a.url_to_image,
                published_at: a.published_at,
                content,
                description,
            }
        }
        RawRecord::GNews(a) => {
            let title = a.title.unwrap_or_default();
            let description = a.description.unwrap_or_default();
            let content = a
                .content
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| description.clone());
            Article {
                id: article_id(a.url.as_deref(), &title),
                published_at_parsed: parse_published(a.published_at.as_deref()),
                title,
                source: a.source.and_then(|s| s.name),
                url: a.url,
                image: a.image,
                published_at: a.published_at,
                content,
                description,
            }
        }
        RawRecord::GoogleRss(item) => {
            // Feed entries carry one summary string that serves as both body
            // and description, and never an image.
            let url = (!item.link.is_empty()).then_some(item.link);
            Article {
                id: article_id(url.as_deref(), &item.title),
                published_at_parsed: parse_published(item.pub_date.as_deref()),
                title: item.title,
                source: item.source,
                url,
                image: None,
                published_at: item.pub_date,
                content: item.description.clone(),
                description: item.description,
            }
        }
    }
}

/// Stable article id: SHA-256 hex of the url, or of the title when the url
/// is absent or empty. Equal inputs always produce equal ids.
fn article_id(url: Option<&str>, title: &str) -> String {
    let basis = match url {
        Some(u) if !u.is_empty() => u,
        _ => title,
    };
    format!("{:x}", Sha256::digest(basis.as_bytes()))
}

/// Parse a provider timestamp leniently.
///
/// RFC 3339 first (`Z` treated as UTC), then RFC 2822 for feed dates, else
/// the current time. Never an error.
pub fn parse_published(raw: Option<&str>) -> DateTime<Utc> {
    let Some(raw) = raw else {
        return Utc::now();
    };
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Utc);
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return dt.with_timezone(&Utc);
    }
    Utc::now()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::gnews::GNewsArticle;
    use crate::providers::google_rss::FeedItem;
    use crate::providers::newsapi::{NewsApiArticle, NewsApiSource};
    use chrono::TimeZone;

    fn newsapi_record(url: Option<&str>, title: &str) -> RawRecord {
        RawRecord::NewsApi(NewsApiArticle {
            source: Some(NewsApiSource {
                name: Some("The Telegraph".to_string()),
            }),
            title: Some(title.to_string()),
            description: Some("summary".to_string()),
            url: url.map(str::to_string),
            url_to_image: None,
            published_at: Some("2025-08-25T18:19:00Z".to_string()),
            content: Some("full body".to_string()),
        })
    }

    #[test]
    fn test_id_is_deterministic_for_equal_urls() {
        let a = normalize(newsapi_record(Some("https://x/a"), "first title"));
        let b = normalize(newsapi_record(Some("https://x/a"), "other title"));
        assert_eq!(a.id, b.id);
    }

    #[test]
    fn test_id_differs_for_different_urls() {
        let a = normalize(newsapi_record(Some("https://x/a"), "t"));
        let b = normalize(newsapi_record(Some("https://x/b"), "t"));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_id_falls_back_to_title() {
        let a = normalize(newsapi_record(None, "same title"));
        let b = normalize(newsapi_record(Some(""), "same title"));
        assert_eq!(a.id, b.id);
    }

    #[test]
    fn test_same_url_hashes_equal_across_providers() {
        let api = normalize(newsapi_record(Some("https://x/a"), "from api"));
        let feed = normalize(RawRecord::GoogleRss(FeedItem {
            title: "from feed".to_string(),
            link: "https://x/a".to_string(),
            ..FeedItem::default()
        }));
        assert_eq!(api.id, feed.id);
    }

    #[test]
    fn test_content_falls_back_to_description() {
        let record = RawRecord::GNews(GNewsArticle {
            title: Some("t".to_string()),
            description: Some("only the summary".to_string()),
            content: None,
            url: Some("https://x/a".to_string()),
            image: None,
            published_at: None,
            source: None,
        });
        let article = normalize(record);
        assert_eq!(article.content, "only the summary");
        assert_eq!(article.description, "only the summary");
    }

    #[test]
    fn test_fully_empty_record_still_normalizes() {
        let article = normalize(RawRecord::GoogleRss(FeedItem::default()));
        assert!(article.title.is_empty());
        assert!(article.url.is_none());
        assert!(!article.id.is_empty());
    }

    #[test]
    fn test_parse_published_rfc3339_z() {
        let expected = Utc.with_ymd_and_hms(2025, 8, 25, 18, 19, 0).unwrap();
        assert_eq!(parse_published(Some("2025-08-25T18:19:00Z")), expected);
    }

    #[test]
    fn test_parse_published_rfc2822() {
        let expected = Utc.with_ymd_and_hms(2025, 8, 25, 6, 19, 0).unwrap();
        assert_eq!(
            parse_published(Some("Mon, 25 Aug 2025 06:19:00 GMT")),
            expected
        );
    }

    #[test]
    fn test_parse_published_degrades_to_now() {
        let before = Utc::now();
        let parsed = parse_published(Some("not a date"));
        let after = Utc::now();
        assert!(parsed >= before && parsed <= after);

        let parsed = parse_published(None);
        assert!(parsed >= before);
    }

    #[test]
    fn test_feed_record_keeps_raw_date_verbatim() {
        let article = normalize(RawRecord::GoogleRss(FeedItem {
            title: "t".to_string(),
            link: "https://x/a".to_string(),
            pub_date: Some("Mon, 25 Aug 2025 06:19:00 GMT".to_string()),
            ..FeedItem::default()
        }));
        assert_eq!(
            article.published_at.as_deref(),
            Some("Mon, 25 Aug 2025 06:19:00 GMT")
        );
    }
}
