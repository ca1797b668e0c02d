//! Best-effort full-text enrichment of a single article.
//!
//! Articles arrive from the providers with snippets, not bodies. When a
//! reader opens one, the enricher fetches the live source page and extracts
//! the main readable text and a lead image. Every failure mode degrades to
//! the text we already had; enrichment is never fatal.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::{debug, instrument};
use url::Url;

use crate::error::EnrichmentError;
use crate::models::Article;
use crate::providers::http_client;
use crate::utils::strip_html;

/// Articles whose plain-text content is already longer than this are left
/// alone; the snippet is substantive enough to render.
const MIN_CONTENT_LEN: usize = 80;

/// Extracted text is capped here to bound memory and render cost.
const MAX_CONTENT_LEN: usize = 4000;

static ARTICLE_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("article").unwrap());
static WRAPPER_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("div.article-body").unwrap());
static PAGE_BODY_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("body").unwrap());
static META_IMAGE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"meta[property="og:image"], meta[name="twitter:image"]"#).unwrap()
});

struct Extraction {
    text: String,
    image: Option<String>,
}

/// Fetches and extracts full article text from live source pages.
pub struct ContentEnricher {
    client: reqwest::Client,
}

impl ContentEnricher {
    pub fn new() -> Self {
        Self {
            client: http_client(),
        }
    }

    /// Upgrade `content` (and possibly `image`) from the article's live page.
    ///
    /// Skips articles whose existing content is already substantive. On any
    /// failure the input article comes back untouched.
    #[instrument(level = "debug", skip_all, fields(id = %article.id))]
    pub async fn enrich(&self, mut article: Article) -> Article {
        if strip_html(&article.content).chars().count() > MIN_CONTENT_LEN {
            debug!("existing content is substantive; skipping enrichment");
            return article;
        }

        match self.fetch_page(&article).await {
            Ok(extraction) => {
                debug!(bytes = extraction.text.len(), "enriched article content");
                article.content = extraction.text;
                if let Some(image) = extraction.image {
                    article.image = Some(image);
                }
            }
            Err(e) => {
                debug!(error = %e, "enrichment failed; keeping prior content");
            }
        }
        article
    }

    async fn fetch_page(&self, article: &Article) -> Result<Extraction, EnrichmentError> {
        let raw_url = article.url.as_deref().unwrap_or_default();
        let url = Url::parse(raw_url)
            .map_err(|_| EnrichmentError::InvalidUrl(raw_url.to_string()))?;

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(EnrichmentError::Status(status.as_u16()));
        }

        let html = response.text().await?;
        extract_page(&html).ok_or(EnrichmentError::NoContent)
    }
}

impl Default for ContentEnricher {
    fn default() -> Self {
        Self::new()
    }
}

/// Pull readable text and a lead image out of a fetched page.
///
/// Containers are tried from most to least semantic: `<article>`, then the
/// common `div.article-body` wrapper, then the whole `<body>` as a last
/// resort. Returns `None` when nothing yields text.
fn extract_page(html: &str) -> Option<Extraction> {
    let document = Html::parse_document(html);

    let mut text = String::new();
    for selector in [&*ARTICLE_SELECTOR, &*WRAPPER_SELECTOR, &*PAGE_BODY_SELECTOR] {
        if let Some(element) = document.select(selector).next() {
            text = element.text().collect::<Vec<_>>().join("\n\n").trim().to_string();
            if !text.is_empty() {
                break;
            }
        }
    }
    if text.is_empty() {
        return None;
    }
    if text.chars().count() > MAX_CONTENT_LEN {
        text = text.chars().take(MAX_CONTENT_LEN).collect();
    }

    let image = document
        .select(&META_IMAGE_SELECTOR)
        .find_map(|meta| meta.value().attr("content"))
        .map(str::to_string);

    Some(Extraction { text, image })
}
