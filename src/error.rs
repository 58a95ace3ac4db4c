//! Error types for the analysis cache
//!
//! Provides unified error handling using thiserror.

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
/// Unified error type for the analysis cache and its monitor API.
///
/// The cache itself raises no errors for normal operations; the only
/// library-level failure is `Fetch`, which carries the wrapped fetch
/// function's error unchanged to every caller awaiting that key. The
/// remaining variants exist for the HTTP monitor surface.
///
/// Variants are `Clone` because a settled fetch result is fanned out to
/// every coalesced caller through a broadcast channel.
#[derive(Error, Debug, Clone)]
pub enum CacheError {
    /// The caller-supplied fetch function failed
    #[error("fetch failed: {0}")]
    Fetch(Arc<anyhow::Error>),

    /// The in-flight fetch was abandoned before settling
    #[error("in-flight fetch for key '{0}' was abandoned")]
    FetchAbandoned(String),

    /// Key not found in cache (monitor API)
    #[error("key not found: {0}")]
    NotFound(String),

    /// Invalid request data (monitor API)
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl CacheError {
    /// Wraps a fetch function's error for fan-out to coalesced callers.
    pub fn fetch(err: anyhow::Error) -> Self {
        CacheError::Fetch(Arc::new(err))
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::Fetch(_) | CacheError::FetchAbandoned(_) => StatusCode::BAD_GATEWAY,
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the analysis cache.
pub type Result<T> = std::result::Result<T, CacheError>;
