//! Request DTOs for the cache monitor API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;
use serde_json::Value;

/// Request body for the manual set operation (PUT /cache/entries)
#[derive(Debug, Clone, Deserialize)]
pub struct SetEntryRequest {
    /// The cache key
    pub key: String,
    /// The JSON payload to store
    pub value: Value,
    /// Optional TTL in milliseconds (uses the default when absent)
    #[serde(default)]
    pub ttl_ms: Option<u64>,
}

impl SetEntryRequest {
    /// Validates the request data.
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.key.is_empty() {
            return Some("Key cannot be empty".to_string());
        }
        if self.key.len() > 256 {
            return Some("Key exceeds maximum length of 256 characters".to_string());
        }
        None
    }
}

/// Request body for pattern invalidation (POST /cache/invalidate)
#[derive(Debug, Clone, Deserialize)]
pub struct InvalidateRequest {
    /// Wildcard pattern; `*` matches zero or more characters
    pub pattern: String,
}

impl InvalidateRequest {
    pub fn validate(&self) -> Option<String> {
        if self.pattern.is_empty() {
            return Some("Pattern cannot be empty".to_string());
        }
        None
    }
}
