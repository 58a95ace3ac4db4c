//! Cache Statistics Module
//!
//! Running performance counters plus the diagnostic snapshot served to the
//! cache monitor.

use serde::Serialize;

// == Cache Counters ==
/// Running cache performance counters.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheCounters {
    /// Number of reads served from a fresh cached entry
    pub hits: u64,
    /// Number of reads that found nothing fresh (absent or expired)
    pub misses: u64,
    /// Number of entries removed by capacity eviction
    pub evictions: u64,
    /// Number of callers that joined an already in-flight fetch instead of
    /// starting their own
    pub coalesced: u64,
}

impl CacheCounters {
    /// Creates counters with everything at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// hits / (hits + misses), or 0.0 before any read.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_evictions(&mut self, count: u64) {
        self.evictions += count;
    }

    pub fn record_coalesced(&mut self) {
        self.coalesced += 1;
    }
}

// == Cache Snapshot ==
/// Point-in-time diagnostic snapshot of the whole store.
///
/// Built by `CacheStore::snapshot`; polled by the operator-facing monitor.
/// Producing it never fails: values that cannot be serialized are simply
/// skipped in the size estimate.
#[derive(Debug, Clone, Serialize)]
pub struct CacheSnapshot {
    /// Total entries currently held, expired or not
    pub total_entries: usize,
    /// Every key currently held
    pub keys: Vec<String>,
    /// Entries that are still fresh
    pub valid_entries: usize,
    /// Entries past their expiry but not yet swept
    pub expired_entries: usize,
    /// In-flight fetches currently registered
    pub pending_requests: usize,
    /// Configured capacity
    pub max_entries: usize,
    /// total_entries / max_entries * 100, rounded
    pub utilization_pct: u32,
    /// Best-effort serialized size of all payloads, in kilobytes
    pub estimated_kb: f64,
    /// Running counters at snapshot time
    #[serde(flatten)]
    pub counters: CacheCounters,
    /// hits / (hits + misses)
    pub hit_rate: f64,
}
