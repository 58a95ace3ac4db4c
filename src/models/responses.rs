//! Response DTOs for the cache monitor API
//!
//! Defines the structure of outgoing HTTP response bodies. The stats
//! endpoint serializes `CacheSnapshot` directly.

use serde::Serialize;
use serde_json::Value;

/// Response body for a raw entry read (GET /cache/entries/:key)
#[derive(Debug, Clone, Serialize)]
pub struct EntryResponse {
    /// The requested key
    pub key: String,
    /// The stored payload
    pub value: Value,
}

impl EntryResponse {
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Response body for the manual set operation (PUT /cache/entries)
#[derive(Debug, Clone, Serialize)]
pub struct SetEntryResponse {
    /// Success message
    pub message: String,
    /// The key that was set
    pub key: String,
}

impl SetEntryResponse {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' set successfully", key),
            key,
        }
    }
}

/// Response body for the delete operation (DELETE /cache/entries/:key)
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Success message
    pub message: String,
    /// The key that was deleted
    pub key: String,
}

impl DeleteResponse {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' deleted successfully", key),
            key,
        }
    }
}

/// Response body for the manual sweep action (POST /cache/clean)
#[derive(Debug, Clone, Serialize)]
pub struct CleanResponse {
    /// Expired entries removed by the sweep
    pub entries_removed: usize,
    /// Stale pending requests removed by the sweep
    pub pending_removed: usize,
}

/// Response body for pattern invalidation (POST /cache/invalidate)
#[derive(Debug, Clone, Serialize)]
pub struct InvalidateResponse {
    /// The pattern that was applied
    pub pattern: String,
    /// Entries removed
    pub removed: usize,
}

/// Generic success message (POST /cache/clear and friends)
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with the current timestamp.
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
