//! Cache Module
//!
//! Provides bounded in-memory caching with lazy TTL expiry, oldest-first
//! batch eviction, and read-through fetching with request coalescing.

mod analysis;
mod entry;
mod pending;
mod stats;
mod store;


// Re-export public types
pub use analysis::AnalysisCache;
pub use entry::CacheEntry;
pub use stats::{CacheCounters, CacheSnapshot};
pub use store::CacheStore;

// == Public Constants ==
/// Maximum number of entries the cache holds by default
pub const DEFAULT_MAX_ENTRIES: usize = 100;

/// Default TTL in milliseconds (5 minutes)
pub const DEFAULT_TTL_MS: u64 = 5 * 60 * 1000;

/// Fraction of entries reclaimed per eviction pass
pub const EVICT_FRACTION: f64 = 0.2;

/// Age in milliseconds after which an unsettled pending request is
/// considered abandoned and its bookkeeping removed
pub const PENDING_MAX_AGE_MS: u64 = 30_000;

/// Default hygiene sweep interval in seconds (10 minutes)
pub const SWEEP_INTERVAL_SECS: u64 = 600;

/// TTL for cached analysis lists (5 minutes)
pub const ANALYSES_TTL_MS: u64 = 5 * 60 * 1000;

/// TTL for cached aggregate statistics (10 minutes)
pub const STATS_TTL_MS: u64 = 10 * 60 * 1000;

/// TTL for cached per-user data (15 minutes)
pub const USER_TTL_MS: u64 = 15 * 60 * 1000;
