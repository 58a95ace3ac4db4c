//! Request and Response models for the cache monitor API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{InvalidateRequest, SetEntryRequest};
pub use responses::{
    CleanResponse, DeleteResponse, EntryResponse, ErrorResponse, HealthResponse,
    InvalidateResponse, MessageResponse, SetEntryResponse,
};
