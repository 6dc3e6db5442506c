//! In-memory cache of the last fetched release list.

use crate::error::{Error, Result};
use crate::model::ReleaseRecord;
use chrono::{DateTime, Duration, Utc};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

#[derive(Debug, Clone)]
pub struct CachedReleases {
    pub records: Vec<ReleaseRecord>,
    pub fetched_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct ReleaseCache {
    entry: Arc<RwLock<Option<CachedReleases>>>,
    /// Held while a refresh is in flight.
    refresh: Arc<Mutex<()>>,
    pub cache_duration: Duration,
}

impl ReleaseCache {
    pub fn new(cache_minutes: i64) -> Result<Self> {
        let cache_duration = Duration::try_minutes(cache_minutes)
            .filter(|d| *d >= Duration::zero())
            .ok_or(Error::InvalidCacheWindow(cache_minutes))?;
        Ok(Self {
            entry: Arc::new(RwLock::new(None)),
            refresh: Arc::new(Mutex::new(())),
            cache_duration,
        })
    }

    /// The cached list, unless it has expired.
    pub async fn get(&self) -> Option<CachedReleases> {
        let entry = self.entry.read().await;
        entry
            .as_ref()
            .filter(|cached| !self.is_expired(cached.fetched_at))
            .cloned()
    }

    pub async fn store(&self, records: Vec<ReleaseRecord>) -> CachedReleases {
        let cached = CachedReleases {
            records,
            fetched_at: Utc::now(),
        };
        *self.entry.write().await = Some(cached.clone());
        cached
    }

    /// The cached list, or a fresh one from `fetch` when it has expired.
    ///
    /// Concurrent callers share one refresh: the first one fetches, the
    /// others wait for it and reuse its result.
    pub async fn get_or_fetch<F, Fut>(&self, fetch: F) -> Result<CachedReleases>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<ReleaseRecord>>>,
    {
        if let Some(cached) = self.get().await {
            return Ok(cached);
        }

        let _refresh = self.refresh.lock().await;
        if let Some(cached) = self.get().await {
            return Ok(cached);
        }

        let records = fetch().await?;
        Ok(self.store(records).await)
    }

    pub fn is_expired(&self, cached_at: DateTime<Utc>) -> bool {
        let now = Utc::now();
        now - cached_at > self.cache_duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_cache() {
        let cache = ReleaseCache::new(60).unwrap();
        assert!(cache.get().await.is_none());
    }

    #[tokio::test]
    async fn test_store_then_get() {
        let cache = ReleaseCache::new(60).unwrap();
        let stored = cache.store(Vec::new()).await;
        let cached = cache.get().await.unwrap();
        assert_eq!(cached.fetched_at, stored.fetched_at);
    }

    #[tokio::test]
    async fn test_expired_entry_is_dropped() {
        let cache = ReleaseCache::new(0).unwrap();
        cache.store(Vec::new()).await;
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        assert!(cache.get().await.is_none());
    }

    #[test]
    fn test_rejects_out_of_range_window() {
        assert!(matches!(
            ReleaseCache::new(i64::MAX),
            Err(Error::InvalidCacheWindow(i64::MAX))
        ));
        assert!(ReleaseCache::new(-1).is_err());
        assert!(ReleaseCache::new(0).is_ok());
    }

    #[tokio::test]
    async fn test_concurrent_refresh_fetches_once() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let cache = ReleaseCache::new(60).unwrap();
        let fetches = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = cache.clone();
                let fetches = fetches.clone();
                tokio::spawn(async move {
                    cache
                        .get_or_fetch(|| async move {
                            fetches.fetch_add(1, Ordering::SeqCst);
                            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
                            Ok(Vec::new())
                        })
                        .await
                })
            })
            .collect();

        for handle in handles {
            assert!(handle.await.unwrap().is_ok());
        }
        assert_eq!(fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_fetch_is_not_cached() {
        let cache = ReleaseCache::new(60).unwrap();
        let result = cache.get_or_fetch(|| async { Err(Error::NoReleases) }).await;
        assert!(result.is_err());
        assert!(cache.get().await.is_none());
    }

    #[test]
    fn test_is_expired() {
        let cache = ReleaseCache::new(60).unwrap();
        assert!(!cache.is_expired(Utc::now()));
        assert!(cache.is_expired(Utc::now() - Duration::minutes(61)));
    }
}
