//! In-memory TTL cache for sub-request payloads.
//!
//! Owned by a single [`crate::store::PollingStore`]; nothing is shared across
//! store instances and nothing survives the process. The TTL is injected at
//! construction.

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;

/// One cached sub-response payload.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    payload: serde_json::Value,
    fetched_at: Instant,
}

/// Endpoint-keyed cache with a fixed time-to-live.
#[derive(Debug)]
pub struct TtlCache {
    entries: HashMap<String, CacheEntry>,
    ttl: Duration,
}

impl TtlCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
        }
    }

    /// Return the payload for `key` if it is still within its TTL window.
    pub fn get(&self, key: &str) -> Option<serde_json::Value> {
        let entry = self.entries.get(key)?;
        if entry.fetched_at.elapsed() > self.ttl {
            return None;
        }
        Some(entry.payload.clone())
    }

    /// Store a payload for `key`, replacing any previous entry.
    pub fn insert(&mut self, key: &str, payload: serde_json::Value) {
        self.entries.insert(
            key.to_string(),
            CacheEntry {
                payload,
                fetched_at: Instant::now(),
            },
        );
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of entries still within their TTL window.
    pub fn valid_len(&self) -> usize {
        self.entries
            .values()
            .filter(|e| e.fetched_at.elapsed() <= self.ttl)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_fresh_entry_is_returned() {
        let mut cache = TtlCache::new(Duration::from_secs(30));
        cache.insert("/admin/dashboard", serde_json::json!({"total_users": 5}));

        let value = cache.get("/admin/dashboard").expect("entry should be fresh");
        assert_eq!(value["total_users"], 5);
        assert_eq!(cache.valid_len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_expires_after_ttl() {
        let mut cache = TtlCache::new(Duration::from_secs(30));
        cache.insert("/admin/dashboard", serde_json::json!(1));

        tokio::time::advance(Duration::from_secs(31)).await;

        assert!(cache.get("/admin/dashboard").is_none());
        assert_eq!(cache.valid_len(), 0);
        // The expired entry is still present until cleared or replaced.
        assert!(!cache.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_valid_on_ttl_boundary() {
        let mut cache = TtlCache::new(Duration::from_secs(30));
        cache.insert("/admin/alerts", serde_json::json!([]));

        tokio::time::advance(Duration::from_secs(30)).await;

        assert!(cache.get("/admin/alerts").is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_drops_everything() {
        let mut cache = TtlCache::new(Duration::from_secs(30));
        cache.insert("a", serde_json::json!(1));
        cache.insert("b", serde_json::json!(2));

        cache.clear();

        assert!(cache.is_empty());
        assert_eq!(cache.valid_len(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_insert_refreshes_timestamp() {
        let mut cache = TtlCache::new(Duration::from_secs(30));
        cache.insert("k", serde_json::json!("old"));

        tokio::time::advance(Duration::from_secs(25)).await;
        cache.insert("k", serde_json::json!("new"));
        tokio::time::advance(Duration::from_secs(10)).await;

        let value = cache.get("k").expect("replaced entry should still be fresh");
        assert_eq!(value, "new");
    }
}
