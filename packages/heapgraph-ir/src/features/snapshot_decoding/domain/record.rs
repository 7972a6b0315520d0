//! Raw snapshot record as handed over by the loader
//!
//! Every section is optional at the serde level so that a missing section is
//! reported as [`SnapshotError::MissingSection`] by the decoder instead of an
//! opaque deserialization failure. Unknown top-level keys (`samples`,
//! `locations`, `trace_tree`, ...) are ignored.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::features::snapshot_decoding::error::{SnapshotError, SnapshotResult};

/// Already-deserialized heap snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<SnapshotHeader>,

    /// Flat node field values (`node_count * node_fields.len()` entries)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nodes: Option<Vec<u64>>,

    /// Flat edge field values, laid out node after node
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edges: Option<Vec<u64>>,

    /// Shared string table
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strings: Option<Vec<String>>,
}

/// `snapshot` block: schema metadata plus counts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotHeader {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<SnapshotMeta>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_count: Option<usize>,

    /// Informational only; edge decoding is driven by per-node `edge_count`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge_count: Option<usize>,
}

/// Field schemas and enumeration tables
///
/// Kept as JSON values because their shape is validated by the decoder
/// (a wrong shape is a malformed-schema error, not a parse error).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_fields: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_types: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge_fields: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge_types: Option<Value>,
}

impl RawSnapshot {
    /// Parse a `.heapsnapshot` JSON document
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Parse from any reader (file, socket, decompressor)
    pub fn from_reader<R: std::io::Read>(reader: R) -> serde_json::Result<Self> {
        serde_json::from_reader(reader)
    }

    pub(crate) fn header(&self) -> SnapshotResult<&SnapshotHeader> {
        self.snapshot
            .as_ref()
            .ok_or(SnapshotError::MissingSection("snapshot"))
    }

    pub(crate) fn meta(&self) -> SnapshotResult<&SnapshotMeta> {
        self.header()?
            .meta
            .as_ref()
            .ok_or(SnapshotError::MissingSection("snapshot.meta"))
    }

    pub(crate) fn node_count(&self) -> SnapshotResult<usize> {
        self.header()?
            .node_count
            .ok_or(SnapshotError::MissingSection("snapshot.node_count"))
    }

    pub(crate) fn node_values(&self) -> SnapshotResult<&[u64]> {
        self.nodes
            .as_deref()
            .ok_or(SnapshotError::MissingSection("nodes"))
    }

    pub(crate) fn edge_values(&self) -> SnapshotResult<&[u64]> {
        self.edges
            .as_deref()
            .ok_or(SnapshotError::MissingSection("edges"))
    }

    pub(crate) fn string_table(&self) -> SnapshotResult<&[String]> {
        self.strings
            .as_deref()
            .ok_or(SnapshotError::MissingSection("strings"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_sections_are_ignored() {
        let raw = RawSnapshot::from_json_str(
            r#"{"snapshot":{"node_count":0},"nodes":[],"edges":[],"strings":[],"samples":[1,2]}"#,
        )
        .unwrap();
        assert_eq!(raw.node_count().unwrap(), 0);
        assert!(raw.meta().is_err());
    }

    #[test]
    fn test_missing_strings_reported_by_name() {
        let raw = RawSnapshot::from_json_str(r#"{"nodes":[]}"#).unwrap();
        assert_eq!(
            raw.string_table().unwrap_err(),
            SnapshotError::MissingSection("strings")
        );
    }
}
