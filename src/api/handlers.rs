//! API Handlers
//!
//! HTTP request handlers for each cache monitor endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use crate::cache::{AnalysisCache, CacheSnapshot, CacheStore};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    CleanResponse, DeleteResponse, EntryResponse, HealthResponse, InvalidateRequest,
    InvalidateResponse, MessageResponse, SetEntryRequest, SetEntryResponse,
};

/// Application state shared across all handlers.
///
/// Holds the namespaced cache front; the underlying store is reached
/// through it for raw key operations and diagnostics.
#[derive(Clone)]
pub struct AppState {
    pub cache: AnalysisCache,
}

impl AppState {
    /// Creates a new AppState around the given store.
    pub fn new(store: Arc<CacheStore<Value>>) -> Self {
        Self {
            cache: AnalysisCache::new(store),
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(Arc::new(CacheStore::new(
            config.max_entries,
            config.default_ttl_ms,
        )))
    }
}

/// Handler for GET /cache/stats
///
/// Returns the diagnostic snapshot polled by the monitor UI.
pub async fn stats_handler(State(state): State<AppState>) -> Json<CacheSnapshot> {
    Json(state.cache.store().snapshot().await)
}

/// Handler for POST /cache/clean
///
/// Manual hygiene sweep; the monitor's "clean expired" action.
pub async fn clean_handler(State(state): State<AppState>) -> Json<CleanResponse> {
    let (entries_removed, pending_removed) = state.cache.store().clean_expired().await;
    Json(CleanResponse {
        entries_removed,
        pending_removed,
    })
}

/// Handler for POST /cache/clear
///
/// The monitor's "clear all" action.
pub async fn clear_handler(State(state): State<AppState>) -> Json<MessageResponse> {
    state.cache.store().clear().await;
    Json(MessageResponse::new("Cache cleared"))
}

/// Handler for PUT /cache/entries
pub async fn set_entry_handler(
    State(state): State<AppState>,
    Json(req): Json<SetEntryRequest>,
) -> Result<Json<SetEntryResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    state.cache.store().set(&req.key, req.value, req.ttl_ms).await;
    Ok(Json(SetEntryResponse::new(req.key)))
}

/// Handler for GET /cache/entries/:key
pub async fn get_entry_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<EntryResponse>> {
    match state.cache.store().get(&key).await {
        Some(value) => Ok(Json(EntryResponse::new(key, value))),
        None => Err(CacheError::NotFound(key)),
    }
}

/// Handler for DELETE /cache/entries/:key
pub async fn delete_entry_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    if state.cache.store().delete(&key).await {
        Ok(Json(DeleteResponse::new(key)))
    } else {
        Err(CacheError::NotFound(key))
    }
}

/// Handler for POST /cache/invalidate
///
/// Removes every key matching the supplied wildcard pattern.
pub async fn invalidate_handler(
    State(state): State<AppState>,
    Json(req): Json<InvalidateRequest>,
) -> Result<Json<InvalidateResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let removed = state.cache.store().clear_by_pattern(&req.pattern).await;
    Ok(Json(InvalidateResponse {
        pattern: req.pattern,
        removed,
    }))
}

/// Handler for POST /cache/invalidate/analysis
///
/// Clears the analysis-list and statistics namespaces after a content
/// write.
pub async fn invalidate_analysis_handler(
    State(state): State<AppState>,
) -> Json<InvalidateResponse> {
    let removed = state.cache.invalidate().await;
    Json(InvalidateResponse {
        pattern: "analyses:*, stats:*".to_string(),
        removed,
    })
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
