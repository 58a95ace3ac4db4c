//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{SystemTime, UNIX_EPOCH};

// == Cache Entry ==
/// A single cache entry: an owned payload plus expiry metadata.
///
/// Callers receive clones of `data`; the entry owns its payload exclusively
/// once stored and is only ever replaced wholesale, never partially updated.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    /// The stored payload
    pub data: T,
    /// Insertion/refresh timestamp (Unix milliseconds), used to pick
    /// eviction candidates (oldest first)
    pub inserted_at: u64,
    /// Absolute expiry timestamp (Unix milliseconds)
    pub expires_at: u64,
    /// Insertion sequence number; breaks ties between entries inserted
    /// within the same millisecond
    pub seq: u64,
}

impl<T> CacheEntry<T> {
    // == Constructor ==
    /// Creates a new cache entry expiring `ttl_ms` after now.
    pub fn new(data: T, ttl_ms: u64, seq: u64) -> Self {
        let now = current_timestamp_ms();
        Self {
            data,
            inserted_at: now,
            expires_at: now.saturating_add(ttl_ms),
            seq,
        }
    }

    // == Is Expired ==
    /// Checks whether the entry has expired.
    ///
    /// Boundary condition: an entry is expired once the current time is
    /// greater than or equal to `expires_at`.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(current_timestamp_ms())
    }

    /// Expiry check against an explicit clock reading, so sweeps and tests
    /// can evaluate a whole batch against one consistent instant.
    pub fn is_expired_at(&self, now_ms: u64) -> bool {
        now_ms >= self.expires_at
    }

    // == Time To Live ==
    /// Returns remaining TTL in milliseconds; zero once expired.
    pub fn ttl_remaining_ms(&self) -> u64 {
        self.expires_at.saturating_sub(current_timestamp_ms())
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}
