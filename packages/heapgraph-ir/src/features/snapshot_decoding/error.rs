//! Error types for snapshot decoding

use std::fmt;
use thiserror::Error;

/// Which flat array a record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Node,
    Edge,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Node => "node",
            RecordKind::Edge => "edge",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Decode failures. All of them abort the decode; no partial graph is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("Missing required snapshot section: {0}")]
    MissingSection(&'static str),

    #[error("Malformed snapshot schema: {0}")]
    MalformedSchema(String),

    #[error("Truncated {section} array: schema requires at least {required} values, found {actual}")]
    Truncated {
        section: &'static str,
        required: usize,
        actual: usize,
    },

    #[error("{record} {record_index}: type ordinal {value} out of range (table has {table_len} entries)")]
    TypeOutOfRange {
        record: RecordKind,
        record_index: u64,
        value: u64,
        table_len: usize,
    },

    #[error("{record} {record_index}: string index {value} out of range (table has {table_len} entries)")]
    StringOutOfRange {
        record: RecordKind,
        record_index: u64,
        value: u64,
        table_len: usize,
    },
}

impl SnapshotError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        SnapshotError::MalformedSchema(msg.into())
    }
}

pub type SnapshotResult<T> = Result<T, SnapshotError>;
