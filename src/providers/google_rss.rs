//! Google News search-RSS client, the unauthenticated last-resort provider.
//!
//! Builds a search feed URL for the India region and parses the RSS body
//! with a streaming `quick-xml` reader. Feed entries have no image and use
//! RFC 2822 `pubDate` strings; both are handled downstream by the
//! normalizer.

use quick_xml::Reader;
use quick_xml::events::Event;
use tracing::{debug, instrument};

use super::{Provider, RawRecord, http_client};
use crate::error::ProviderError;

/// At most this many entries are taken from one feed; search feeds can run
/// long and everything past this is cut by the pipeline cap anyway.
const MAX_FEED_ITEMS: usize = 15;

/// One `<item>` from the search feed, fields verbatim.
#[derive(Debug, Clone, Default)]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    pub description: String,
    /// RFC 2822 date string from `<pubDate>`, when present.
    pub pub_date: Option<String>,
    /// Publisher name from the `<source>` element, when present.
    pub source: Option<String>,
}

/// Unauthenticated client for the Google News search feed.
pub struct GoogleRssClient {
    client: reqwest::Client,
}

impl GoogleRssClient {
    pub fn new() -> Self {
        Self {
            client: http_client(),
        }
    }
}

impl Default for GoogleRssClient {
    fn default() -> Self {
        Self::new()
    }
}

impl Provider for GoogleRssClient {
    fn name(&self) -> &'static str {
        "google_rss"
    }

    #[instrument(level = "debug", skip_all, fields(query = %query))]
    async fn fetch(&self, query: &str) -> Result<Vec<RawRecord>, ProviderError> {
        let feed_url = format!(
            "https://news.google.com/rss/search?q={}&hl=en-IN&gl=IN&ceid=IN:en",
            urlencoding::encode(query)
        );

        let response = self.client.get(&feed_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                provider: self.name(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let items = parse_feed(&body)?;
        debug!(count = items.len(), "Google News feed returned items");
        Ok(items.into_iter().map(RawRecord::GoogleRss).collect())
    }
}

/// Which `<item>` child element the reader is currently inside.
enum Field {
    Title,
    Link,
    Description,
    PubDate,
    Source,
}

/// Parse an RSS 2.0 body into feed items.
///
/// Channel-level `<title>`/`<description>` elements are ignored by only
/// recording text while inside an `<item>`.
fn parse_feed(xml: &str) -> Result<Vec<FeedItem>, ProviderError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut items: Vec<FeedItem> = Vec::new();
    let mut current: Option<FeedItem> = None;
    let mut field: Option<Field> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                field = match e.name().as_ref() {
                    b"item" => {
                        current = Some(FeedItem::default());
                        None
                    }
                    b"title" => Some(Field::Title),
                    b"link" => Some(Field::Link),
                    b"description" => Some(Field::Description),
                    b"pubDate" => Some(Field::PubDate),
                    b"source" => Some(Field::Source),
                    _ => None,
                };
            }
            Ok(Event::Text(t)) => {
                let text = t.xml_content().map(|c| c.into_owned()).unwrap_or_default();
                record_text(&mut current, &field, &text);
            }
            Ok(Event::CData(t)) => {
                let text = String::from_utf8_lossy(&t.into_inner()).into_owned();
                record_text(&mut current, &field, &text);
            }
            Ok(Event::End(e)) => {
                if e.name().as_ref() == b"item" {
                    if let Some(item) = current.take() {
                        items.push(item);
                        if items.len() >= MAX_FEED_ITEMS {
                            break;
                        }
                    }
                }
                field = None;
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ProviderError::Feed(e.to_string())),
            Ok(_) => {}
        }
    }

    Ok(items)
}

/// Append text to the field the reader is inside, if it is inside an item.
fn record_text(current: &mut Option<FeedItem>, field: &Option<Field>, text: &str) {
    let (Some(item), Some(field)) = (current.as_mut(), field.as_ref()) else {
        return;
    };
    match field {
        Field::Title => item.title.push_str(text),
        Field::Link => item.link.push_str(text),
        Field::Description => item.description.push_str(text),
        Field::PubDate => item.pub_date = Some(text.to_string()),
        Field::Source => item.source = Some(text.to_string()),
    }
}
