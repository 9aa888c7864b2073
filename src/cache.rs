//! Time-to-live memoization of provider responses
//!
//! Entries are keyed by endpoint plus query parameters. The cache is an
//! ordinary value owned by whoever makes the requests; there is no global.

use std::collections::HashMap;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Endpoint and query parameters identifying one provider request.
///
/// Parameters are sorted so insertion order never changes the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    endpoint: String,
    params: Vec<(String, String)>,
}

impl CacheKey {
    pub fn new<E, I, K, V>(endpoint: E, params: I) -> Self
    where
        E: Into<String>,
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut params: Vec<(String, String)> = params
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        params.sort();
        Self {
            endpoint: endpoint.into(),
            params,
        }
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[derive(Debug, Clone)]
struct StoredEntry<T> {
    value: T,
    expires_at: u64, // Unix timestamp (seconds)
}

fn unix_seconds(at: SystemTime) -> u64 {
    at.duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0)
}

#[derive(Debug)]
pub struct TtlCache<T> {
    entries: HashMap<CacheKey, StoredEntry<T>>,
}

impl<T> Default for TtlCache<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<T: Clone> TtlCache<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a value with a time-to-live (TTL).
    pub fn put(&mut self, key: CacheKey, value: T, ttl: Duration) {
        self.put_at(key, value, ttl, SystemTime::now());
    }

    /// Stores a value as if inserted at `now`.
    pub fn put_at(&mut self, key: CacheKey, value: T, ttl: Duration, now: SystemTime) {
        let expires_at = unix_seconds(now).saturating_add(ttl.as_secs());
        tracing::debug!(endpoint = key.endpoint(), expires_at, "Caching response");
        self.entries.insert(key, StoredEntry { value, expires_at });
    }

    /// Retrieves a value if it exists and has not expired.
    /// Returns `None` for cache misses or expired entries.
    pub fn get(&mut self, key: &CacheKey) -> Option<T> {
        self.get_at(key, SystemTime::now())
    }

    /// Retrieves a value as seen at `now`, evicting it if expired.
    pub fn get_at(&mut self, key: &CacheKey, now: SystemTime) -> Option<T> {
        let now = unix_seconds(now);
        match self.entries.get(key) {
            Some(entry) if now < entry.expires_at => {
                tracing::debug!(endpoint = key.endpoint(), "Key found and still fresh");
                Some(entry.value.clone())
            }
            Some(_) => {
                tracing::debug!(endpoint = key.endpoint(), "Key found but expired");
                self.entries.remove(key);
                None
            }
            None => {
                tracing::debug!(endpoint = key.endpoint(), "Key not found");
                None
            }
        }
    }

    /// Manually removes a key from the cache.
    pub fn remove(&mut self, key: &CacheKey) {
        self.entries.remove(key);
    }

    /// Drops every expired entry.
    pub fn purge_expired(&mut self, now: SystemTime) {
        let now = unix_seconds(now);
        self.entries.retain(|_, entry| now < entry.expires_at);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> CacheKey {
        CacheKey::new("weather", [("q", "London"), ("units", "metric")])
    }

    #[test]
    fn test_fresh_entry_is_returned() {
        let mut cache = TtlCache::new();
        let now = SystemTime::now();
        cache.put_at(key(), "body".to_string(), Duration::from_secs(600), now);
        assert_eq!(cache.get_at(&key(), now + Duration::from_secs(599)).as_deref(), Some("body"));
    }

    #[test]
    fn test_expired_entry_is_evicted() {
        let mut cache = TtlCache::new();
        let now = SystemTime::now();
        cache.put_at(key(), 1_u32, Duration::from_secs(600), now);
        assert_eq!(cache.get_at(&key(), now + Duration::from_secs(600)), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_param_order_does_not_matter() {
        let a = CacheKey::new("weather", [("units", "metric"), ("q", "London")]);
        assert_eq!(a, key());
        let other = CacheKey::new("forecast", [("q", "London"), ("units", "metric")]);
        assert_ne!(other, key());
    }

    #[test]
    fn test_different_params_are_separate_entries() {
        let mut cache = TtlCache::new();
        cache.put(key(), "metric", Duration::from_secs(60));
        let imperial = CacheKey::new("weather", [("q", "London"), ("units", "imperial")]);
        assert!(cache.get(&imperial).is_none());
        assert_eq!(cache.get(&key()), Some("metric"));
    }

    #[test]
    fn test_remove_and_purge() {
        let mut cache = TtlCache::new();
        let now = SystemTime::now();
        cache.put_at(key(), 1, Duration::from_secs(10), now);
        cache.put_at(CacheKey::new("uv", [("lat", "1")]), 2, Duration::from_secs(3600), now);
        cache.purge_expired(now + Duration::from_secs(20));
        assert_eq!(cache.len(), 1);
        cache.remove(&CacheKey::new("uv", [("lat", "1")]));
        assert!(cache.is_empty());
    }
}
