//! Read cache for the manual ad listing.
//!
//! One key, one value: the unfiltered newest-first listing. Reads within the
//! TTL return the cached rows; every successful store invalidates the entry
//! before the write returns, so the worst-case staleness is one TTL. The
//! caller passes `now` in, which keeps expiry testable without sleeping.

use std::time::{Duration, Instant};

use adsmith_db::ManualAdRow;
use tokio::sync::Mutex;

struct CacheEntry {
    stored_at: Instant,
    items: Vec<ManualAdRow>,
}

/// TTL cache over the manual ad listing.
pub struct ListingCache {
    ttl: Duration,
    entry: Mutex<Option<CacheEntry>>,
}

impl ListingCache {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entry: Mutex::new(None),
        }
    }

    /// Cache sized from the service configuration.
    #[must_use]
    pub fn from_app_config(config: &adsmith_core::AppConfig) -> Self {
        Self::new(Duration::from_secs(config.cache_ttl_secs))
    }

    /// Returns the cached listing if one is present and younger than the
    /// TTL. An expired entry is dropped on the way out.
    pub async fn get(&self, now: Instant) -> Option<Vec<ManualAdRow>> {
        let mut slot = self.entry.lock().await;
        match slot.as_ref() {
            Some(entry) if now.duration_since(entry.stored_at) < self.ttl => {
                Some(entry.items.clone())
            }
            Some(_) => {
                *slot = None;
                None
            }
            None => None,
        }
    }

    /// Replaces the cached listing, timestamped at `now`.
    pub async fn put(&self, now: Instant, items: Vec<ManualAdRow>) {
        let mut slot = self.entry.lock().await;
        *slot = Some(CacheEntry {
            stored_at: now,
            items,
        });
    }

    /// Drops the cached listing so the next read re-queries the store.
    pub async fn invalidate(&self) {
        let mut slot = self.entry.lock().await;
        *slot = None;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
