use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::debug;

use super::{CacheError, SessionCache};
use crate::shared::utils::{DateTime, DateUtil};

#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub value: Value,
    pub expires_at: DateTime,
}

impl CacheEntry {
    pub fn is_expired(&self) -> bool {
        DateUtil::is_past(&self.expires_at)
    }
}

/// In-process session cache. Expired entries are dropped lazily on read
/// and in bulk by [`spawn_purge_task`].
#[derive(Default)]
pub struct InMemorySessionCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl InMemorySessionCache {
    pub fn new() -> Self {
        Self::default()
    }

    // Remove every expired entry, returning how many were dropped
    pub async fn purge_expired(&self) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired());
        before - entries.len()
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[async_trait]
impl SessionCache for InMemorySessionCache {
    async fn set_value(&self, key: &str, value: Value, ttl: Duration) -> Result<(), CacheError> {
        if ttl.is_zero() {
            return Err(CacheError::InvalidTtl(ttl));
        }

        let ttl_signed =
            DateUtil::from_std(ttl).map_err(|e| CacheError::Backend(e.to_string()))?;
        let expires_at = DateUtil::add_duration(&DateUtil::now(), ttl_signed)
            .map_err(|e| CacheError::Backend(e.to_string()))?;

        self.entries
            .write()
            .await
            .insert(key.to_string(), CacheEntry { value, expires_at });
        Ok(())
    }

    async fn get_value(&self, key: &str) -> Result<Option<Value>, CacheError> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                None => return Ok(None),
                Some(entry) if !entry.is_expired() => return Ok(Some(entry.value.clone())),
                Some(_) => {}
            }
        }

        // Expired: evict unless a writer refreshed it in the meantime
        let mut entries = self.entries.write().await;
        if entries.get(key).is_some_and(CacheEntry::is_expired) {
            entries.remove(key);
        }
        Ok(None)
    }
}

/// Periodically purge expired entries until the runtime shuts down.
pub fn spawn_purge_task(cache: Arc<InMemorySessionCache>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        loop {
            ticker.tick().await;
            let purged = cache.purge_expired().await;
            if purged > 0 {
                debug!(purged, "purged expired session entries");
            }
        }
    })
}
