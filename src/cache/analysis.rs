//! Analysis Namespaces Module
//!
//! Thin wrappers around the cache store with fixed key prefixes and TTLs
//! for the platform's data shapes: analysis lists, aggregate statistics,
//! and per-user blobs.

use std::future::Future;
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::cache::{CacheStore, ANALYSES_TTL_MS, STATS_TTL_MS, USER_TTL_MS};
use crate::error::Result;

// == Key Builders ==
fn analyses_key(content_type: &str) -> String {
    format!("analyses:{content_type}")
}

fn user_key(user_id: &str) -> String {
    format!("user:{user_id}")
}

/// Key for the single aggregate-statistics blob.
const STATS_KEY: &str = "stats:analysis";

// == Analysis Cache ==
/// Namespaced front for the shared cache store.
///
/// Payloads are open JSON values; each namespace carries its own TTL:
/// 5 minutes for analysis lists, 10 for aggregate stats, 15 for user data.
#[derive(Debug, Clone)]
pub struct AnalysisCache {
    store: Arc<CacheStore<Value>>,
}

impl AnalysisCache {
    /// Wraps a shared store.
    pub fn new(store: Arc<CacheStore<Value>>) -> Self {
        Self { store }
    }

    /// The underlying store, for diagnostics and direct key access.
    pub fn store(&self) -> &Arc<CacheStore<Value>> {
        &self.store
    }

    // == Analysis Lists ==
    /// Read-through fetch of the analysis list for one content type.
    pub async fn analyses<F, Fut>(&self, content_type: &str, fetch_fn: F) -> Result<Value>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = anyhow::Result<Value>>,
    {
        self.store
            .get_or_fetch(&analyses_key(content_type), fetch_fn, Some(ANALYSES_TTL_MS))
            .await
    }

    pub async fn get_analyses(&self, content_type: &str) -> Option<Value> {
        self.store.get(&analyses_key(content_type)).await
    }

    pub async fn set_analyses(&self, content_type: &str, data: Value) {
        self.store
            .set(&analyses_key(content_type), data, Some(ANALYSES_TTL_MS))
            .await;
    }

    // == Aggregate Statistics ==
    /// Read-through fetch of the aggregate statistics blob.
    pub async fn stats<F, Fut>(&self, fetch_fn: F) -> Result<Value>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = anyhow::Result<Value>>,
    {
        self.store
            .get_or_fetch(STATS_KEY, fetch_fn, Some(STATS_TTL_MS))
            .await
    }

    pub async fn get_stats(&self) -> Option<Value> {
        self.store.get(STATS_KEY).await
    }

    pub async fn set_stats(&self, data: Value) {
        self.store.set(STATS_KEY, data, Some(STATS_TTL_MS)).await;
    }

    // == Per-User Data ==
    /// Read-through fetch of one user's blob.
    pub async fn user_data<F, Fut>(&self, user_id: &str, fetch_fn: F) -> Result<Value>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = anyhow::Result<Value>>,
    {
        self.store
            .get_or_fetch(&user_key(user_id), fetch_fn, Some(USER_TTL_MS))
            .await
    }

    pub async fn get_user_data(&self, user_id: &str) -> Option<Value> {
        self.store.get(&user_key(user_id)).await
    }

    pub async fn set_user_data(&self, user_id: &str, data: Value) {
        self.store
            .set(&user_key(user_id), data, Some(USER_TTL_MS))
            .await;
    }

    // == Invalidation ==
    /// Clears the analysis-list and statistics namespaces.
    ///
    /// Called after any write that changes the underlying analysis data,
    /// so stale reads are not served past the next population cycle.
    /// Returns the number of entries removed.
    pub async fn invalidate(&self) -> usize {
        let removed = self.store.clear_by_pattern("analyses:*").await
            + self.store.clear_by_pattern("stats:*").await;
        debug!(removed, "invalidated analysis namespaces");
        removed
    }
}
