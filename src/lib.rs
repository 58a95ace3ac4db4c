//! Analysis Cache - a read-through TTL cache with request coalescing
//!
//! Provides bounded in-memory caching with lazy expiry, oldest-first batch
//! eviction, and at-most-one concurrent fetch per key.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{AnalysisCache, CacheSnapshot, CacheStore};
pub use config::Config;
pub use error::CacheError;
pub use tasks::spawn_sweep_task;
