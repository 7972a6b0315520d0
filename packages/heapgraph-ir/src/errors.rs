//! Error types for heapgraph-ir
//!
//! Provides unified error handling across the crate.

use thiserror::Error;

use crate::config::ConfigError;
use crate::features::snapshot_decoding::SnapshotError;

/// Main error type for heapgraph-ir operations
#[derive(Debug, Error)]
pub enum HeapGraphError {
    /// Snapshot decoding error (always fatal for the decode call)
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl HeapGraphError {
    /// True when the error came out of the snapshot decoder
    pub fn is_decode_error(&self) -> bool {
        matches!(self, HeapGraphError::Snapshot(_))
    }
}

/// Result type alias for heapgraph operations
pub type Result<T> = std::result::Result<T, HeapGraphError>;
