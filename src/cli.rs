//! Command-line interface definitions.
//!
//! All options can be passed as flags or picked up from the environment,
//! matching how the service reads its secrets in deployment
//! (`NEWSAPI_KEY`, `GNEWS_KEY`, `CACHE_TTL_SEC`).

use clap::Parser;

use crate::pipeline::DEFAULT_QUERY;

/// Fetch, search, and read aggregated Jamshedpur news.
///
/// # Examples
///
/// ```sh
/// # Print the current article list as JSON
/// jamshedpur_news
///
/// # Filter the list locally
/// jamshedpur_news --search floods
///
/// # Enrich and print the second article
/// jamshedpur_news --article 1
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Topic query sent to the providers
    #[arg(short, long, default_value = DEFAULT_QUERY)]
    pub query: String,

    /// NewsAPI key; the provider is skipped when absent
    #[arg(long, env = "NEWSAPI_KEY")]
    pub newsapi_key: Option<String>,

    /// GNews key; the provider is skipped when absent
    #[arg(long, env = "GNEWS_KEY")]
    pub gnews_key: Option<String>,

    /// Cache time-to-live in seconds
    #[arg(long, env = "CACHE_TTL_SEC", default_value_t = 300)]
    pub cache_ttl_sec: u64,

    /// Filter the fetched list by a case-insensitive substring
    #[arg(short, long)]
    pub search: Option<String>,

    /// Enrich and print the article at this list index
    #[arg(short, long)]
    pub article: Option<usize>,
}
