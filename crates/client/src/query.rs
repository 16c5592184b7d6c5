//! Stale-time read cache for query-style endpoints.
//!
//! Applies the process-wide read-caching defaults (5 minute stale time,
//! 10 minute lifetime, one retry) through an explicitly constructed
//! [`QueryClient`] passed down next to the HTTP client -- there is no global
//! cache. Values are stored as JSON so one cache serves every payload type.

use std::future::Future;
use std::time::{Duration, Instant};

use moka::future::Cache;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use userhub_core::error::ApiError;

/// Upper bound on cached entries; far above what the endpoint surface can
/// produce, it only guards against unbounded keys.
const MAX_ENTRIES: u64 = 1024;

/// Hierarchical cache key: a resource scope plus an optional item id, e.g.
/// `users` for the list and `users/7` for one user.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    scope: &'static str,
    id: Option<String>,
}

impl QueryKey {
    /// Key for a whole resource collection.
    pub fn scope(scope: &'static str) -> Self {
        Self { scope, id: None }
    }

    /// Key for a single item within a scope.
    pub fn item(scope: &'static str, id: impl ToString) -> Self {
        Self {
            scope,
            id: Some(id.to_string()),
        }
    }
}

/// Tuning knobs for the query cache.
#[derive(Debug, Clone)]
pub struct QueryConfig {
    /// Age under which a cached value is served without refetching.
    pub stale_time: Duration,
    /// Lifetime after which an entry is dropped outright.
    pub gc_time: Duration,
    /// Additional fetch attempts after a failure.
    pub retry: u32,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            stale_time: Duration::from_secs(5 * 60),
            gc_time: Duration::from_secs(10 * 60),
            retry: 1,
        }
    }
}

#[derive(Clone)]
struct CachedEntry {
    fetched_at: Instant,
    value: Value,
}

/// Read cache with stale-time semantics and bounded retry.
pub struct QueryClient {
    cache: Cache<QueryKey, CachedEntry>,
    config: QueryConfig,
}

impl QueryClient {
    pub fn new(config: QueryConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(MAX_ENTRIES)
            .time_to_live(config.gc_time)
            .build();
        Self { cache, config }
    }

    /// Cache with the process-wide defaults.
    pub fn with_defaults() -> Self {
        Self::new(QueryConfig::default())
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// Serve `key` from cache when fresher than the stale time; otherwise
    /// run `fetcher` (retrying up to `retry` extra times on failure), cache
    /// the result, and return it. Failures are never cached.
    pub async fn fetch<T, F, Fut>(&self, key: QueryKey, fetcher: F) -> Result<T, ApiError>
    where
        T: Serialize + DeserializeOwned,
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        if let Some(entry) = self.cache.get(&key).await {
            if entry.fetched_at.elapsed() < self.config.stale_time {
                if let Ok(value) = serde_json::from_value(entry.value.clone()) {
                    return Ok(value);
                }
                // The cached JSON does not fit the requested type (the key
                // was reused across types); fall through and refetch.
            }
        }

        let mut attempts_left = self.config.retry;
        let value = loop {
            match fetcher().await {
                Ok(value) => break value,
                Err(err) if attempts_left > 0 => {
                    attempts_left -= 1;
                    tracing::debug!(?key, error = %err, "query fetch failed, retrying");
                }
                Err(err) => return Err(err),
            }
        };

        match serde_json::to_value(&value) {
            Ok(json) => {
                self.cache
                    .insert(
                        key,
                        CachedEntry {
                            fetched_at: Instant::now(),
                            value: json,
                        },
                    )
                    .await;
            }
            Err(err) => {
                tracing::debug!(error = %err, "query result not representable as JSON, not cached");
            }
        }

        Ok(value)
    }

    /// Drop the entry for `key` so the next fetch goes to the network.
    pub async fn invalidate(&self, key: &QueryKey) {
        self.cache.invalidate(key).await;
    }
}
