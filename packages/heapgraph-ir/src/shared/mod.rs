//! Shared module - Common types
//!
//! Records produced by the snapshot decoder and consumed by every other
//! feature. No feature-specific logic lives here.

pub mod models;

// Re-exports for convenience
pub use models::*;
