//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Hygiene sweep: purges expired entries and stale pending requests at
//!   configured intervals

mod sweep;

pub use sweep::spawn_sweep_task;
