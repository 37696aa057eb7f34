// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Read-through cache with a fixed time-to-live.
//!
//! Entries are served until `ttl` has elapsed since they were stored, then
//! refetched on the next read. Writers clear entries explicitly with
//! [`TtlCache::invalidate`] or [`TtlCache::invalidate_all`].
//!
//! Time comes from `tokio::time`, so tests can pause and advance it.

use std::{collections::HashMap, future::Future, hash::Hash, time::Duration};

use tokio::{sync::Mutex, time::Instant};

/// TTL of the list caches: ten seconds.
pub const DEFAULT_TTL: Duration = Duration::from_secs(10);

#[derive(Debug)]
struct Entry<V> {
    stored_at: Instant,
    value:     V
}

/// Keyed cache whose entries expire `ttl` after insertion.
#[derive(Debug)]
pub struct TtlCache<K, V> {
    ttl:     Duration,
    entries: Mutex<HashMap<K, Entry<V>>>
}

impl<K, V> Default for TtlCache<K, V> {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl<K, V> TtlCache<K, V> {
    /// Empty cache with the given time-to-live.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new())
        }
    }

    /// Configured time-to-live.
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Drop every entry.
    pub async fn invalidate_all(&self) {
        self.entries.lock().await.clear();
    }
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash,
    V: Clone
{
    /// Fresh value for `key`, if any.
    pub async fn get(&self, key: &K) -> Option<V> {
        let entries = self.entries.lock().await;
        entries
            .get(key)
            .filter(|e| e.stored_at.elapsed() < self.ttl)
            .map(|e| e.value.clone())
    }

    /// Store `value` under `key`, restarting its TTL.
    pub async fn insert(&self, key: K, value: V) {
        self.entries.lock().await.insert(
            key,
            Entry {
                stored_at: Instant::now(),
                value
            }
        );
    }

    /// Drop the entry for `key`.
    pub async fn invalidate(&self, key: &K) {
        self.entries.lock().await.remove(key);
    }

    /// Return the fresh value for `key`, or run `fetch` and store its
    /// result.
    ///
    /// The lock is held while fetching, so concurrent readers of a cold key
    /// wait for one fetch instead of issuing their own. Errors are returned
    /// as is and nothing is stored.
    ///
    /// # Errors
    ///
    /// Whatever `fetch` returns.
    pub async fn get_or_try_insert_with<F, Fut, E>(&self, key: K, fetch: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>
    {
        let mut entries = self.entries.lock().await;
        if let Some(entry) = entries.get(&key)
            && entry.stored_at.elapsed() < self.ttl
        {
            return Ok(entry.value.clone());
        }
        let value = fetch().await?;
        entries.insert(
            key,
            Entry {
                stored_at: Instant::now(),
                value:     value.clone()
            }
        );
        Ok(value)
    }
}
