//! Validated field schema
//!
//! The snapshot declares node and edge layouts as ordered field-name lists.
//! They are turned into a fixed position → attribute mapping once per decode,
//! so per-record decoding never looks at field names again.
//!
//! Position rules (identical for nodes and edges):
//! - position 0: ordinal into the first sub-list of the type enumeration
//! - position 1: ordinal into the shared string table
//! - every other position: raw value, routed to a named attribute when the
//!   field is one the decoder understands, otherwise kept as a scalar

use serde_json::Value;
use std::sync::Arc;

use crate::features::snapshot_decoding::domain::record::RawSnapshot;
use crate::features::snapshot_decoding::error::{RecordKind, SnapshotError, SnapshotResult};
use crate::shared::models::InternedString;

pub const SELF_SIZE_FIELD: &str = "self_size";
pub const EDGE_COUNT_FIELD: &str = "edge_count";
pub const TO_NODE_FIELD: &str = "to_node";

/// Attribute a field position maps to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSlot {
    /// Position 0
    Type,
    /// Position 1
    Name,
    SelfSize,
    EdgeCount,
    ToNode,
    /// Copied verbatim under its schema name
    Scalar(InternedString),
}

/// Layout of one record kind (node or edge)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordLayout {
    kind: RecordKind,
    field_names: Vec<InternedString>,
    slots: Vec<FieldSlot>,
    types: Vec<InternedString>,
}

impl RecordLayout {
    /// Build and validate a layout from the declared field names and the
    /// first sub-list of the type enumeration.
    pub fn new(kind: RecordKind, fields: Vec<String>, types: Vec<String>) -> SnapshotResult<Self> {
        let required: &[&str] = match kind {
            RecordKind::Node => &[SELF_SIZE_FIELD, EDGE_COUNT_FIELD],
            RecordKind::Edge => &[TO_NODE_FIELD],
        };

        for (pos, name) in fields.iter().enumerate() {
            if fields[..pos].contains(name) {
                return Err(SnapshotError::malformed(format!(
                    "duplicate {} field '{}'",
                    kind, name
                )));
            }
        }

        for name in required {
            match fields.iter().position(|f| f == name) {
                None => {
                    return Err(SnapshotError::malformed(format!(
                        "{} fields do not declare '{}'",
                        kind, name
                    )))
                }
                Some(pos) if pos < 2 => {
                    return Err(SnapshotError::malformed(format!(
                        "{} field '{}' at position {} collides with the type/name positions",
                        kind, name, pos
                    )))
                }
                Some(_) => {}
            }
        }

        let field_names: Vec<InternedString> = fields.iter().map(|f| Arc::from(f.as_str())).collect();
        let slots = field_names
            .iter()
            .enumerate()
            .map(|(pos, name)| match (pos, kind, &**name) {
                (0, _, _) => FieldSlot::Type,
                (1, _, _) => FieldSlot::Name,
                (_, RecordKind::Node, SELF_SIZE_FIELD) => FieldSlot::SelfSize,
                (_, RecordKind::Node, EDGE_COUNT_FIELD) => FieldSlot::EdgeCount,
                (_, RecordKind::Edge, TO_NODE_FIELD) => FieldSlot::ToNode,
                _ => FieldSlot::Scalar(Arc::clone(name)),
            })
            .collect();

        Ok(Self {
            kind,
            field_names,
            slots,
            types: types.iter().map(|t| Arc::from(t.as_str())).collect(),
        })
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    /// Number of consecutive flat-array slots per record
    pub fn field_len(&self) -> usize {
        self.slots.len()
    }

    pub fn slots(&self) -> &[FieldSlot] {
        &self.slots
    }

    pub fn field_names(&self) -> &[InternedString] {
        &self.field_names
    }

    /// Type enumeration (first sub-list only)
    pub fn types(&self) -> &[InternedString] {
        &self.types
    }

    /// Ordinal of a type label, if the enumeration declares it
    pub fn type_ordinal(&self, label: &str) -> Option<u64> {
        self.types
            .iter()
            .position(|t| &**t == label)
            .map(|p| p as u64)
    }

    /// Resolve a position-0 value against the type enumeration
    pub fn resolve_type(&self, value: u64, record_index: u64) -> SnapshotResult<InternedString> {
        usize::try_from(value)
            .ok()
            .and_then(|i| self.types.get(i))
            .cloned()
            .ok_or(SnapshotError::TypeOutOfRange {
                record: self.kind,
                record_index,
                value,
                table_len: self.types.len(),
            })
    }
}

/// Everything the decoder needs besides the flat arrays
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotSchema {
    pub nodes: RecordLayout,
    pub edges: RecordLayout,
    pub node_count: usize,
    strings: Vec<InternedString>,
}

impl SnapshotSchema {
    /// Validate the metadata block of `raw` and build the layouts.
    ///
    /// Checks presence of every required section (including the flat arrays
    /// and string table), so a successful load means decoding can only fail
    /// on truncation or out-of-range references.
    pub fn from_raw(raw: &RawSnapshot) -> SnapshotResult<Self> {
        let meta = raw.meta()?;

        let node_fields = meta
            .node_fields
            .as_ref()
            .ok_or(SnapshotError::MissingSection("snapshot.meta.node_fields"))?;
        let edge_fields = meta
            .edge_fields
            .as_ref()
            .ok_or(SnapshotError::MissingSection("snapshot.meta.edge_fields"))?;
        let node_types = meta
            .node_types
            .as_ref()
            .ok_or(SnapshotError::MissingSection("snapshot.meta.node_types"))?;
        let edge_types = meta
            .edge_types
            .as_ref()
            .ok_or(SnapshotError::MissingSection("snapshot.meta.edge_types"))?;

        let strings = raw.string_table()?;
        raw.node_values()?;
        raw.edge_values()?;
        let node_count = raw.node_count()?;

        let nodes = RecordLayout::new(
            RecordKind::Node,
            string_list(node_fields, "node_fields")?,
            first_enumeration(node_types, "node_types")?,
        )?;
        let edges = RecordLayout::new(
            RecordKind::Edge,
            string_list(edge_fields, "edge_fields")?,
            first_enumeration(edge_types, "edge_types")?,
        )?;

        Ok(Self {
            nodes,
            edges,
            node_count,
            strings: strings.iter().map(|s| Arc::from(s.as_str())).collect(),
        })
    }

    pub fn strings(&self) -> &[InternedString] {
        &self.strings
    }

    /// Resolve a position-1 value against the string table
    pub fn resolve_string(
        &self,
        value: u64,
        record: RecordKind,
        record_index: u64,
    ) -> SnapshotResult<InternedString> {
        usize::try_from(value)
            .ok()
            .and_then(|i| self.strings.get(i))
            .cloned()
            .ok_or(SnapshotError::StringOutOfRange {
                record,
                record_index,
                value,
                table_len: self.strings.len(),
            })
    }
}

/// `["type", "name", ...]` → owned names
fn string_list(value: &Value, section: &str) -> SnapshotResult<Vec<String>> {
    let items = value
        .as_array()
        .ok_or_else(|| SnapshotError::malformed(format!("{} is not an array", section)))?;

    items
        .iter()
        .map(|item| {
            item.as_str().map(str::to_owned).ok_or_else(|| {
                SnapshotError::malformed(format!("{} contains a non-string entry: {}", section, item))
            })
        })
        .collect()
}

/// `[["hidden", "array", ...], "string", "number", ...]` → first sub-list.
/// Alternative enumerations after the first are not consulted.
fn first_enumeration(value: &Value, section: &str) -> SnapshotResult<Vec<String>> {
    let first = value
        .as_array()
        .and_then(|outer| outer.first())
        .ok_or_else(|| SnapshotError::malformed(format!("{} has no enumeration table", section)))?;
    string_list(first, section)
}
