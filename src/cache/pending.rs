//! Pending Request Module
//!
//! Bookkeeping for in-flight fetches, used to coalesce concurrent
//! read-through requests for the same key.

use tokio::sync::broadcast;

use crate::cache::entry::current_timestamp_ms;
use crate::cache::PENDING_MAX_AGE_MS;
use crate::error::CacheError;

/// One in-flight fetch for a key.
///
/// The first caller to miss on a key becomes the leader and registers a
/// `PendingRequest`; every caller that arrives while it exists subscribes to
/// `tx` and receives the leader's settled result (value or error) instead of
/// starting a duplicate fetch.
#[derive(Debug)]
pub struct PendingRequest<T> {
    /// Fan-out channel for the settled fetch result
    pub tx: broadcast::Sender<Result<T, CacheError>>,
    /// Fetch start time (Unix milliseconds), used to garbage-collect
    /// abandoned entries
    pub started_at: u64,
    /// Registration sequence number; a completing leader only removes the
    /// pending entry if the id still matches, so it cannot delete a newer
    /// registration made after a staleness sweep
    pub id: u64,
}

impl<T: Clone> PendingRequest<T> {
    /// Registers a new pending fetch, returning it alongside the leader's
    /// send handle.
    pub fn new(id: u64) -> (Self, broadcast::Sender<Result<T, CacheError>>) {
        let (tx, _rx) = broadcast::channel(1);
        let pending = Self {
            tx: tx.clone(),
            started_at: current_timestamp_ms(),
            id,
        };
        (pending, tx)
    }

    /// Subscribes a coalesced caller to the eventual result.
    pub fn subscribe(&self) -> broadcast::Receiver<Result<T, CacheError>> {
        self.tx.subscribe()
    }

    /// True once the entry is older than the staleness ceiling. Removing a
    /// stale entry drops bookkeeping only; the underlying fetch future is
    /// not cancelled.
    pub fn is_stale_at(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.started_at) > PENDING_MAX_AGE_MS
    }
}
