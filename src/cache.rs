//! In-memory TTL cache for computed article lists.
//!
//! One entry per topic key. Staleness is checked lazily on read; expired
//! entries are treated as absent and simply overwritten by the next `set`.
//! The map lives behind an async `RwLock` so concurrent requests on a
//! multi-threaded runtime cannot lose an update. Concurrent misses on the
//! same key may each refresh independently; the last write wins.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use tracing::debug;

use crate::models::Article;

/// Default time-to-live for a cached article list: five minutes.
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

struct CacheEntry {
    articles: Vec<Article>,
    stored_at: Instant,
}

/// Memoizes article lists per topic for a bounded duration.
pub struct TtlCache {
    ttl: Duration,
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl TtlCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Return the cached list for `key` if it is still fresh and non-empty.
    ///
    /// An entry is servable iff `now - stored_at <= ttl`. Stale entries are
    /// left in place; there is no active eviction. An empty list also reads
    /// as a miss: a run where every provider came up dry must not suppress
    /// retries for a whole TTL window.
    pub async fn get(&self, key: &str) -> Option<Vec<Article>> {
        let entries = self.entries.read().await;
        let entry = entries.get(key)?;
        if entry.stored_at.elapsed() > self.ttl {
            debug!(%key, "cache entry is stale");
            return None;
        }
        if entry.articles.is_empty() {
            debug!(%key, "cached list is empty; treating as a miss");
            return None;
        }
        Some(entry.articles.clone())
    }

    /// Store a freshly computed list under `key`, resetting its age.
    pub async fn set(&self, key: &str, articles: Vec<Article>) {
        let mut entries = self.entries.write().await;
        entries.insert(
            key.to_string(),
            CacheEntry {
                articles,
                stored_at: Instant::now(),
            },
        );
    }
}

impl Default for TtlCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}
