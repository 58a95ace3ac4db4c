//! Cache Store Module
//!
//! Main cache engine: a bounded HashMap keyed by strings, with lazy TTL
//! expiry, oldest-first batch eviction, and read-through fetching that
//! coalesces concurrent requests for the same key into one underlying fetch.

use std::collections::HashMap;
use std::future::Future;

use regex::Regex;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, trace};

use crate::cache::entry::{current_timestamp_ms, CacheEntry};
use crate::cache::pending::PendingRequest;
use crate::cache::stats::{CacheCounters, CacheSnapshot};
use crate::cache::{DEFAULT_MAX_ENTRIES, DEFAULT_TTL_MS, EVICT_FRACTION};
use crate::error::{CacheError, Result};

// == Inner State ==
/// Mutable state guarded by one lock, so the check-fresh / join-pending /
/// register-pending decision in `get_or_fetch` is a single atomic section.
#[derive(Debug)]
struct Inner<T> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<T>>,
    /// In-flight fetches, sharing the key namespace with `entries`
    pending: HashMap<String, PendingRequest<T>>,
    /// Running performance counters
    counters: CacheCounters,
    /// Sequence source for entry ordering and pending-request ids
    seq: u64,
}

impl<T: Clone> Inner<T> {
    fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    /// Stores an entry, evicting the oldest batch first when the store is
    /// at capacity and the key is new.
    fn insert_entry(&mut self, key: &str, data: T, ttl_ms: u64, max_entries: usize) {
        if !self.entries.contains_key(key) && self.entries.len() >= max_entries {
            self.evict_oldest();
        }
        let seq = self.next_seq();
        self.entries
            .insert(key.to_string(), CacheEntry::new(data, ttl_ms, seq));
    }

    /// Removes the oldest ~20% of entries by insertion timestamp.
    ///
    /// Coarse batch eviction rather than strict single-slot LRU: each pass
    /// restores headroom so eviction runs infrequently under sustained
    /// insert pressure. Ordering is by insertion/refresh time, not last
    /// access.
    fn evict_oldest(&mut self) {
        let to_remove = (self.entries.len() as f64 * EVICT_FRACTION).ceil() as usize;
        if to_remove == 0 {
            return;
        }

        let mut order: Vec<(u64, u64, String)> = self
            .entries
            .iter()
            .map(|(key, entry)| (entry.inserted_at, entry.seq, key.clone()))
            .collect();
        order.sort_unstable();

        for (_, _, key) in order.into_iter().take(to_remove) {
            self.entries.remove(&key);
        }

        self.counters.record_evictions(to_remove as u64);
        trace!(evicted = to_remove, "evicted oldest cache entries");
    }
}

// == Cache Store ==
/// Read-through cache with TTL expiry, bounded capacity, and request
/// coalescing.
///
/// Internally synchronized; share via `Arc` and call through `&self`.
/// Constructed explicitly and passed to callers rather than living in a
/// process-wide global, so tests get isolated instances.
#[derive(Debug)]
pub struct CacheStore<T> {
    inner: RwLock<Inner<T>>,
    /// Maximum number of entries allowed
    max_entries: usize,
    /// Default TTL in milliseconds for entries without an explicit TTL
    default_ttl_ms: u64,
}

impl<T: Clone> CacheStore<T> {
    // == Constructor ==
    /// Creates a new CacheStore with the given capacity and default TTL.
    pub fn new(max_entries: usize, default_ttl_ms: u64) -> Self {
        Self {
            inner: RwLock::new(Inner {
                entries: HashMap::new(),
                pending: HashMap::new(),
                counters: CacheCounters::new(),
                seq: 0,
            }),
            max_entries,
            default_ttl_ms,
        }
    }

    /// Creates a CacheStore with the standard capacity (100) and default
    /// TTL (5 minutes).
    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_MAX_ENTRIES, DEFAULT_TTL_MS)
    }

    // == Set ==
    /// Stores `data` under `key`, expiring `ttl_ms` (or the default TTL)
    /// from now. Existing entries are replaced wholesale and their TTL
    /// reset. Best-effort memory cache: always succeeds.
    pub async fn set(&self, key: &str, data: T, ttl_ms: Option<u64>) {
        let ttl = ttl_ms.unwrap_or(self.default_ttl_ms);
        let mut inner = self.inner.write().await;
        inner.insert_entry(key, data, ttl, self.max_entries);
    }

    // == Get ==
    /// Returns the cached value if present and fresh.
    ///
    /// Lazy expiry: an expired entry is deleted as a side effect of the
    /// read and reported as absent.
    pub async fn get(&self, key: &str) -> Option<T> {
        let mut inner = self.inner.write().await;

        if let Some(entry) = inner.entries.get(key) {
            if !entry.is_expired() {
                let data = entry.data.clone();
                inner.counters.record_hit();
                return Some(data);
            }
            inner.entries.remove(key);
        }

        inner.counters.record_miss();
        None
    }

    // == Delete ==
    /// Removes a key unconditionally. Returns whether an entry was present.
    pub async fn delete(&self, key: &str) -> bool {
        let mut inner = self.inner.write().await;
        inner.entries.remove(key).is_some()
    }

    // == Clear ==
    /// Removes all entries.
    pub async fn clear(&self) {
        let mut inner = self.inner.write().await;
        inner.entries.clear();
        debug!("cleared cache");
    }

    // == Clear By Pattern ==
    /// Removes every key matching a simple wildcard pattern, where `*`
    /// matches zero or more characters and everything else is literal.
    /// Used to invalidate a family of related keys after a write.
    ///
    /// Returns the number of entries removed.
    pub async fn clear_by_pattern(&self, pattern: &str) -> usize {
        let Some(re) = glob_to_regex(pattern) else {
            return 0;
        };

        let mut inner = self.inner.write().await;
        let before = inner.entries.len();
        inner.entries.retain(|key, _| !re.is_match(key));
        let removed = before - inner.entries.len();

        if removed > 0 {
            debug!(pattern, removed, "invalidated cache entries by pattern");
        }
        removed
    }

    // == Clean Expired ==
    /// Hygiene sweep: removes every expired entry and every pending
    /// request older than the 30-second staleness ceiling.
    ///
    /// Returns `(entries_removed, pending_removed)`. Lazy expiry on read is
    /// the correctness mechanism; this exists to reclaim memory between
    /// reads and is run on an interval (and manually from the monitor).
    pub async fn clean_expired(&self) -> (usize, usize) {
        self.clean_expired_at(current_timestamp_ms()).await
    }

    /// Sweep against an explicit clock reading.
    async fn clean_expired_at(&self, now_ms: u64) -> (usize, usize) {
        let mut inner = self.inner.write().await;

        let entries_before = inner.entries.len();
        inner.entries.retain(|_, entry| !entry.is_expired_at(now_ms));
        let entries_removed = entries_before - inner.entries.len();

        // Stale pending removal drops bookkeeping only; the underlying
        // fetch future keeps running and its eventual result is discarded.
        let pending_before = inner.pending.len();
        inner.pending.retain(|_, pending| !pending.is_stale_at(now_ms));
        let pending_removed = pending_before - inner.pending.len();

        if entries_removed > 0 || pending_removed > 0 {
            debug!(entries_removed, pending_removed, "sweep removed stale state");
        }
        (entries_removed, pending_removed)
    }

    // == Get Or Fetch ==
    /// Read-through with request coalescing.
    ///
    /// A fresh cached value is returned without invoking `fetch_fn`. If a
    /// fetch for `key` is already in flight, this call joins it and
    /// receives the same settled result; `fetch_fn` is not invoked. Only
    /// when neither holds does this caller become the leader: it registers
    /// a pending entry, runs `fetch_fn`, caches the value on success, and
    /// fans the result (value or error, unchanged) out to every joiner.
    ///
    /// At most one underlying fetch runs per key regardless of how many
    /// callers race on it. A failed fetch caches nothing and clears the
    /// pending entry, so the next call retries fresh.
    pub async fn get_or_fetch<F, Fut>(&self, key: &str, fetch_fn: F, ttl_ms: Option<u64>) -> Result<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = anyhow::Result<T>>,
    {
        // Decide this caller's role in one atomic section; only the fetch
        // itself (and joiners' recv) suspend outside the lock.
        let (tx, id) = {
            let mut inner = self.inner.write().await;

            if let Some(entry) = inner.entries.get(key) {
                if !entry.is_expired() {
                    let data = entry.data.clone();
                    inner.counters.record_hit();
                    return Ok(data);
                }
                inner.entries.remove(key);
            }
            inner.counters.record_miss();

            if let Some(pending) = inner.pending.get(key) {
                let mut rx = pending.subscribe();
                inner.counters.record_coalesced();
                drop(inner);

                trace!(key, "joined in-flight fetch");
                return match rx.recv().await {
                    Ok(result) => result,
                    // Leader dropped without settling (cancelled mid-fetch)
                    Err(_) => Err(CacheError::FetchAbandoned(key.to_string())),
                };
            }

            let id = inner.next_seq();
            let (pending, tx) = PendingRequest::new(id);
            inner.pending.insert(key.to_string(), pending);
            (tx, id)
        };

        trace!(key, "leading fetch");
        let result = match fetch_fn().await {
            Ok(data) => Ok(data),
            Err(err) => Err(CacheError::fetch(err)),
        };

        {
            let mut inner = self.inner.write().await;
            // Only remove our own registration: a staleness sweep may have
            // dropped it and a newer leader registered under the same key.
            if inner.pending.get(key).is_some_and(|p| p.id == id) {
                inner.pending.remove(key);
            }
            if let Ok(data) = &result {
                let ttl = ttl_ms.unwrap_or(self.default_ttl_ms);
                inner.insert_entry(key, data.clone(), ttl, self.max_entries);
            }
        }

        // Joiners subscribed while our registration existed; a send with no
        // receivers just means nobody joined.
        let _ = tx.send(result.clone());
        result
    }

    // == Length ==
    /// Current number of entries, expired or not.
    pub async fn len(&self) -> usize {
        self.inner.read().await.entries.len()
    }

    /// Returns true if the cache holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.entries.is_empty()
    }

    /// Current number of registered in-flight fetches.
    pub async fn pending_len(&self) -> usize {
        self.inner.read().await.pending.len()
    }

    /// Copy of the running counters.
    pub async fn counters(&self) -> CacheCounters {
        self.inner.read().await.counters.clone()
    }
}

impl<T: Clone + Serialize> CacheStore<T> {
    // == Snapshot ==
    /// Diagnostic snapshot for the cache monitor. Never fails; payloads
    /// that cannot be serialized are skipped in the size estimate.
    pub async fn snapshot(&self) -> CacheSnapshot {
        let inner = self.inner.read().await;
        let now = current_timestamp_ms();

        let keys: Vec<String> = inner.entries.keys().cloned().collect();
        let expired_entries = inner
            .entries
            .values()
            .filter(|entry| entry.is_expired_at(now))
            .count();
        let valid_entries = inner.entries.len() - expired_entries;

        let mut total_bytes = 0usize;
        for entry in inner.entries.values() {
            if let Ok(bytes) = serde_json::to_vec(&entry.data) {
                total_bytes += bytes.len();
            }
        }
        let estimated_kb = (total_bytes as f64 / 1024.0 * 100.0).round() / 100.0;

        let utilization_pct = if self.max_entries == 0 {
            0
        } else {
            ((inner.entries.len() as f64 / self.max_entries as f64) * 100.0).round() as u32
        };

        CacheSnapshot {
            total_entries: inner.entries.len(),
            keys,
            valid_entries,
            expired_entries,
            pending_requests: inner.pending.len(),
            max_entries: self.max_entries,
            utilization_pct,
            estimated_kb,
            hit_rate: inner.counters.hit_rate(),
            counters: inner.counters.clone(),
        }
    }
}

// == Pattern Translation ==
/// Translates a wildcard pattern into an anchored regex: `*` becomes `.*`,
/// everything else is escaped and matched literally.
fn glob_to_regex(pattern: &str) -> Option<Regex> {
    let mut source = String::with_capacity(pattern.len() + 4);
    source.push('^');
    for ch in pattern.chars() {
        if ch == '*' {
            source.push_str(".*");
        } else {
            let mut buf = [0u8; 4];
            source.push_str(&regex::escape(ch.encode_utf8(&mut buf)));
        }
    }
    source.push('$');
    Regex::new(&source).ok()
}
