use chrono::Utc;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use tokio::sync::Mutex;
use tokio::time::{Duration, Instant};

use crate::types::token::TokenStats;

/// Memory of which token ids have already been admitted.
///
/// Every mutation goes through one lock, so marking an id as consumed is a
/// single test-and-insert and sweeps never interleave with it.
pub(crate) struct ConsumedTokens {
    ttl: Duration,
    sweep_interval: Duration,
    inner: Mutex<Inner>,
}

struct Inner {
    consumed: HashMap<String, Instant>,
    last_eviction: Instant,
    last_eviction_timestamp: i64,
}

impl ConsumedTokens {
    pub(crate) fn new(ttl: Duration, sweep_interval: Duration) -> Self {
        Self {
            ttl,
            sweep_interval,
            inner: Mutex::new(Inner {
                consumed: HashMap::new(),
                last_eviction: Instant::now(),
                last_eviction_timestamp: Utc::now().timestamp(),
            }),
        }
    }

    /// Records `id` as consumed. Returns `false` when it was already present.
    ///
    /// A successful insert also gives the lazy eviction sweep a chance to run.
    pub(crate) async fn consume(&self, id: &str) -> bool {
        let mut inner = self.inner.lock().await;
        let now = Instant::now();

        match inner.consumed.entry(id.to_owned()) {
            Entry::Occupied(_) => return false,
            Entry::Vacant(entry) => {
                entry.insert(now);
            }
        }

        inner.evict_expired(now, self.ttl, self.sweep_interval);

        true
    }

    #[cfg(test)]
    pub(crate) async fn evict_expired(&self) -> usize {
        let mut inner = self.inner.lock().await;
        inner.evict_expired(Instant::now(), self.ttl, self.sweep_interval)
    }

    pub(crate) async fn stats(&self) -> TokenStats {
        let inner = self.inner.lock().await;

        TokenStats {
            used_count: inner.consumed.len(),
            last_eviction_timestamp: inner.last_eviction_timestamp,
            ttl_seconds: self.ttl.as_secs(),
        }
    }
}

impl Inner {
    fn evict_expired(&mut self, now: Instant, ttl: Duration, sweep_interval: Duration) -> usize {
        if now.duration_since(self.last_eviction) < sweep_interval {
            return 0;
        }

        let before = self.consumed.len();
        self.consumed
            .retain(|_, consumed_at| now.duration_since(*consumed_at) <= ttl);
        let evicted = before - self.consumed.len();

        self.last_eviction = now;
        self.last_eviction_timestamp = Utc::now().timestamp();

        if evicted > 0 {
            tracing::info!(evicted, remaining = self.consumed.len(), "evicted consumed tokens");
        } else {
            tracing::debug!(remaining = self.consumed.len(), "eviction sweep found nothing");
        }

        evicted
    }
}
