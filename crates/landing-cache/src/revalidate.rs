//! Read-through cache that refetches documents older than a TTL.

use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::backend::{CacheBackend, CachedEntry};

/// How a document was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheStatus {
    /// Served from a fresh cache entry.
    Hit,
    /// Fetched from upstream (no entry, or the entry was stale).
    Miss,
}

impl std::fmt::Display for CacheStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hit => write!(f, "HIT"),
            Self::Miss => write!(f, "MISS"),
        }
    }
}

/// Result of a cache lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheOutcome {
    /// The document body.
    pub body: String,
    /// Whether it came from the cache.
    pub status: CacheStatus,
    /// Age of the body in seconds.
    pub age_secs: u64,
    /// Backend failure that was tolerated (read treated as miss, or write skipped).
    pub backend_error: Option<String>,
}

/// Current time in seconds since the Unix epoch.
pub fn unix_now() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

/// Read-through cache with a fixed revalidation interval.
///
/// Stale entries are refetched before responding; a failed fetch is
/// returned to the caller even when a stale entry exists.
pub struct RevalidatingCache<B: CacheBackend> {
    backend: B,
    ttl: Duration,
    clock: fn() -> u64,
}

impl<B: CacheBackend> RevalidatingCache<B> {
    /// Create a cache with the given revalidation interval.
    pub fn new(backend: B, ttl: Duration) -> Self {
        Self {
            backend,
            ttl,
            clock: unix_now,
        }
    }

    /// Replace the time source.
    pub fn with_clock(mut self, clock: fn() -> u64) -> Self {
        self.clock = clock;
        self
    }

    /// Revalidation interval.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Get the backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Return the cached body for `key` if fresh, otherwise fetch and store it.
    pub async fn get_or_fetch<F, Fut, E>(&self, key: &str, fetch: F) -> Result<CacheOutcome, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String, E>>,
    {
        self.get_or_fetch_with(key, fetch, |_| true).await
    }

    /// Like `get_or_fetch`, but a fetched body is only stored when
    /// `cacheable` accepts it. A rejected body is still returned.
    pub async fn get_or_fetch_with<F, Fut, E, C>(
        &self,
        key: &str,
        fetch: F,
        cacheable: C,
    ) -> Result<CacheOutcome, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String, E>>,
        C: FnOnce(&str) -> bool,
    {
        let now = (self.clock)();
        let ttl_secs = self.ttl.as_secs();
        let mut backend_error = None;

        match self.backend.get(key).await {
            Ok(Some(entry)) if entry.is_fresh(now, ttl_secs) => {
                return Ok(CacheOutcome {
                    age_secs: entry.age(now),
                    body: entry.body,
                    status: CacheStatus::Hit,
                    backend_error: None,
                });
            }
            Ok(_) => {}
            Err(e) => backend_error = Some(e.to_string()),
        }

        let body = fetch().await?;

        if ttl_secs > 0 && cacheable(&body) {
            if let Err(e) = self.backend.set(key, CachedEntry::new(body.clone(), now)).await {
                backend_error = Some(e.to_string());
            }
        }

        Ok(CacheOutcome {
            body,
            status: CacheStatus::Miss,
            age_secs: 0,
            backend_error,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{CacheError, CacheResult, InMemoryBackend};
    use async_trait::async_trait;
    use futures::executor::block_on;
    use std::cell::Cell;

    const KEY: &str = "product:ielts-course:en";

    fn at_1000() -> u64 {
        1_000
    }

    fn at_1059() -> u64 {
        1_059
    }

    fn at_1060() -> u64 {
        1_060
    }

    fn seeded(clock: fn() -> u64) -> RevalidatingCache<InMemoryBackend> {
        let backend = InMemoryBackend::new();
        block_on(backend.set(KEY, CachedEntry::new("cached", 1_000))).unwrap();
        RevalidatingCache::new(backend, Duration::from_secs(60)).with_clock(clock)
    }

    #[test]
    fn test_miss_fetches_and_stores() {
        let cache =
            RevalidatingCache::new(InMemoryBackend::new(), Duration::from_secs(60)).with_clock(at_1000);

        let outcome = block_on(cache.get_or_fetch(KEY, || async {
            Ok::<_, String>("fresh".to_string())
        }))
        .unwrap();

        assert_eq!(outcome.status, CacheStatus::Miss);
        assert_eq!(outcome.body, "fresh");
        assert_eq!(
            block_on(cache.backend().get(KEY)).unwrap(),
            Some(CachedEntry::new("fresh", 1_000))
        );
    }

    #[test]
    fn test_fresh_entry_is_a_hit_without_fetching() {
        let cache = seeded(at_1059);
        let calls = Cell::new(0);
        let counter = &calls;

        let outcome = block_on(cache.get_or_fetch(KEY, move || async move {
            counter.set(counter.get() + 1);
            Ok::<_, String>("fresh".to_string())
        }))
        .unwrap();

        assert_eq!(outcome.status, CacheStatus::Hit);
        assert_eq!(outcome.body, "cached");
        assert_eq!(outcome.age_secs, 59);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_entry_at_ttl_is_refetched() {
        let cache = seeded(at_1060);

        let outcome = block_on(cache.get_or_fetch(KEY, || async {
            Ok::<_, String>("refreshed".to_string())
        }))
        .unwrap();

        assert_eq!(outcome.status, CacheStatus::Miss);
        assert_eq!(outcome.body, "refreshed");
        assert_eq!(
            block_on(cache.backend().get(KEY)).unwrap().unwrap().fetched_at,
            1_060
        );
    }

    #[test]
    fn test_fetch_error_propagates_over_stale_entry() {
        let cache = seeded(at_1060);

        let result = block_on(cache.get_or_fetch(KEY, || async {
            Err::<String, _>("upstream down".to_string())
        }));

        assert_eq!(result.unwrap_err(), "upstream down");
        // The stale entry is left untouched
        assert_eq!(
            block_on(cache.backend().get(KEY)).unwrap().unwrap().body,
            "cached"
        );
    }

    #[test]
    fn test_rejected_body_is_returned_but_not_stored() {
        let cache = seeded(at_1060);

        let outcome = block_on(cache.get_or_fetch_with(
            KEY,
            || async { Ok::<_, String>("{broken".to_string()) },
            |body| body.starts_with('{') && body.ends_with('}'),
        ))
        .unwrap();

        assert_eq!(outcome.status, CacheStatus::Miss);
        assert_eq!(outcome.body, "{broken");
        assert_eq!(
            block_on(cache.backend().get(KEY)).unwrap().unwrap(),
            CachedEntry::new("cached", 1_000)
        );
    }

    #[test]
    fn test_zero_ttl_never_stores() {
        let cache = RevalidatingCache::new(InMemoryBackend::new(), Duration::ZERO);

        let outcome = block_on(cache.get_or_fetch(KEY, || async {
            Ok::<_, String>("body".to_string())
        }))
        .unwrap();

        assert_eq!(outcome.status, CacheStatus::Miss);
        assert!(cache.backend().is_empty());
    }

    struct BrokenBackend;

    #[async_trait(?Send)]
    impl CacheBackend for BrokenBackend {
        async fn get(&self, _key: &str) -> CacheResult<Option<CachedEntry>> {
            Err(CacheError::Storage("store unavailable".to_string()))
        }

        async fn set(&self, _key: &str, _entry: CachedEntry) -> CacheResult<()> {
            Err(CacheError::Storage("store unavailable".to_string()))
        }
    }

    #[test]
    fn test_backend_failure_falls_through_to_fetch() {
        let cache = RevalidatingCache::new(BrokenBackend, Duration::from_secs(60));

        let outcome = block_on(cache.get_or_fetch(KEY, || async {
            Ok::<_, String>("body".to_string())
        }))
        .unwrap();

        assert_eq!(outcome.body, "body");
        assert_eq!(outcome.status, CacheStatus::Miss);
        assert!(outcome.backend_error.unwrap().contains("store unavailable"));
    }
}
