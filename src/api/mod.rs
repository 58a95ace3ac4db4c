//! API Module
//!
//! HTTP handlers and routing for the cache monitor REST API.
//!
//! # Endpoints
//! - `GET /health` - Health check endpoint
//! - `GET /cache/stats` - Diagnostic snapshot of the store
//! - `POST /cache/clean` - Manual hygiene sweep
//! - `POST /cache/clear` - Remove all entries
//! - `PUT /cache/entries` - Store a key and JSON payload
//! - `GET /cache/entries/:key` - Retrieve a raw payload by key
//! - `DELETE /cache/entries/:key` - Delete a key
//! - `POST /cache/invalidate` - Remove keys matching a wildcard pattern
//! - `POST /cache/invalidate/analysis` - Clear the analysis namespaces

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
