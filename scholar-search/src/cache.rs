//! In-memory TTL cache in front of a [`SearchProvider`].
//!
//! Caches successful pages keyed by the exact (query, start, num) triple.
//! Uses [`moka`] for async-friendly caching with TTL and automatic
//! eviction. Failed fetches are never cached, so clicking search again
//! after an outage reaches the provider.

use std::time::Duration;

use moka::future::Cache;

use crate::engine::SearchProvider;
use crate::error::SearchError;
use crate::types::SearchPage;

/// Maximum number of cached pages.
const MAX_CACHE_ENTRIES: u64 = 256;

/// Cache key for one provider page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageKey {
    query: String,
    start: u32,
    num: u32,
}

impl PageKey {
    /// Build the key for a page request. The query is kept verbatim.
    pub fn new(query: &str, start: u32, num: u32) -> Self {
        Self {
            query: query.to_owned(),
            start,
            num,
        }
    }
}

/// A provider wrapper that serves repeated page requests from memory.
pub struct CachedProvider<P> {
    inner: P,
    cache: Option<Cache<PageKey, SearchPage>>,
}

impl<P: SearchProvider> CachedProvider<P> {
    /// Wrap `inner` with a cache whose entries live for `ttl_seconds`.
    ///
    /// A TTL of 0 disables caching; every call goes to `inner`.
    pub fn new(inner: P, ttl_seconds: u64) -> Self {
        let cache = (ttl_seconds > 0).then(|| {
            Cache::builder()
                .max_capacity(MAX_CACHE_ENTRIES)
                .time_to_live(Duration::from_secs(ttl_seconds))
                .build()
        });
        Self { inner, cache }
    }

    /// The wrapped provider.
    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Whether caching is active.
    pub fn is_enabled(&self) -> bool {
        self.cache.is_some()
    }
}

impl<P: SearchProvider> SearchProvider for CachedProvider<P> {
    async fn fetch_page(
        &self,
        query: &str,
        start: u32,
        num: u32,
    ) -> Result<SearchPage, SearchError> {
        let Some(cache) = &self.cache else {
            return self.inner.fetch_page(query, start, num).await;
        };

        let key = PageKey::new(query, start, num);
        if let Some(page) = cache.get(&key).await {
            tracing::debug!(start, num, "page cache hit");
            return Ok(page);
        }

        let page = self.inner.fetch_page(query, start, num).await?;
        cache.insert(key, page.clone()).await;
        Ok(page)
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::types::RawHit;

    /// Counts calls and fails while `fail` is set.
    struct CountingProvider {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingProvider {
        fn new(fail: bool) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail,
            }
        }
    }

    impl SearchProvider for CountingProvider {
        async fn fetch_page(
            &self,
            query: &str,
            start: u32,
            _num: u32,
        ) -> Result<SearchPage, SearchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(SearchError::Http("503".into()));
            }
            Ok(SearchPage {
                hits: vec![RawHit {
                    title: format!("{query} @ {start}"),
                    link: format!("https://p{start}.edu/"),
                    ..Default::default()
                }],
                total_results: 100,
            })
        }

        fn name(&self) -> &'static str {
            "counting"
        }
    }

    #[test]
    fn page_key_distinguishes_offsets() {
        assert_eq!(PageKey::new("q", 1, 6), PageKey::new("q", 1, 6));
        assert_ne!(PageKey::new("q", 1, 6), PageKey::new("q", 7, 6));
        assert_ne!(PageKey::new("q", 1, 6), PageKey::new("Q", 1, 6));
    }

    #[tokio::test]
    async fn repeated_request_served_from_cache() {
        let provider = CachedProvider::new(CountingProvider::new(false), 600);
        let first = provider.fetch_page("physics", 1, 6).await.expect("first");
        let second = provider.fetch_page("physics", 1, 6).await.expect("second");
        assert_eq!(first, second);
        assert_eq!(provider.inner().calls.load(Ordering::SeqCst), 1);

        provider.fetch_page("physics", 7, 6).await.expect("next page");
        assert_eq!(provider.inner().calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn zero_ttl_disables_cache() {
        let provider = CachedProvider::new(CountingProvider::new(false), 0);
        assert!(!provider.is_enabled());
        provider.fetch_page("physics", 1, 6).await.expect("first");
        provider.fetch_page("physics", 1, 6).await.expect("second");
        assert_eq!(provider.inner().calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failures_are_not_cached() {
        let provider = CachedProvider::new(CountingProvider::new(true), 600);
        assert!(provider.fetch_page("physics", 1, 6).await.is_err());
        assert!(provider.fetch_page("physics", 1, 6).await.is_err());
        assert_eq!(provider.inner().calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn name_delegates_to_inner() {
        let provider = CachedProvider::new(CountingProvider::new(false), 600);
        assert_eq!(provider.name(), "counting");
    }
}
