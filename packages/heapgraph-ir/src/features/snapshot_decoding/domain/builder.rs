//! Synthetic snapshot construction
//!
//! Produces a [`RawSnapshot`] in the V8 layout from a node/edge description.
//! Used by tests and benchmarks, and handy for callers that want to run the
//! analysis over graphs that did not come from a profiler.

use rustc_hash::FxHashMap;
use serde_json::{json, Value};
use tracing::warn;

use crate::features::snapshot_decoding::domain::record::{RawSnapshot, SnapshotHeader, SnapshotMeta};
use crate::shared::models::NodeIndex;

/// V8 node field layout
pub const V8_NODE_FIELDS: [&str; 7] = [
    "type",
    "name",
    "id",
    "self_size",
    "edge_count",
    "trace_node_id",
    "detachedness",
];

/// V8 node type enumeration (first sub-list)
pub const V8_NODE_TYPES: [&str; 14] = [
    "hidden",
    "array",
    "string",
    "object",
    "code",
    "closure",
    "regexp",
    "number",
    "native",
    "synthetic",
    "concatenated string",
    "sliced string",
    "symbol",
    "bigint",
];

/// V8 edge field layout
pub const V8_EDGE_FIELDS: [&str; 3] = ["type", "name_or_index", "to_node"];

/// V8 edge type enumeration (first sub-list)
pub const V8_EDGE_TYPES: [&str; 7] = [
    "context", "element", "property", "internal", "hidden", "shortcut", "weak",
];

#[derive(Debug, Clone)]
enum PendingLabel {
    Name(u64),
    Index(u64),
}

#[derive(Debug, Clone)]
struct PendingEdge {
    edge_type: u64,
    label: PendingLabel,
    to_node: NodeIndex,
}

#[derive(Debug, Clone)]
struct PendingNode {
    node_type: u64,
    name: u64,
    self_size: u64,
    edges: Vec<PendingEdge>,
}

/// Builder for V8-layout snapshot records
///
/// Node indexes are assigned in insertion order. Edges may point at indexes
/// that are never added, which yields dangling references.
#[derive(Debug, Clone)]
pub struct SnapshotRecordBuilder {
    node_types: Vec<String>,
    edge_types: Vec<String>,
    strings: Vec<String>,
    string_ids: FxHashMap<String, u64>,
    nodes: Vec<PendingNode>,
    declared_node_count: Option<usize>,
}

impl Default for SnapshotRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotRecordBuilder {
    pub fn new() -> Self {
        Self {
            node_types: V8_NODE_TYPES.iter().map(|s| s.to_string()).collect(),
            edge_types: V8_EDGE_TYPES.iter().map(|s| s.to_string()).collect(),
            strings: Vec::new(),
            string_ids: FxHashMap::default(),
            nodes: Vec::new(),
            declared_node_count: None,
        }
    }

    /// Add an `object` node and return its index
    pub fn add_object(&mut self, name: &str, self_size: u64) -> NodeIndex {
        self.add_node("object", name, self_size)
    }

    /// Add a node of any type; unknown type labels extend the enumeration
    pub fn add_node(&mut self, node_type: &str, name: &str, self_size: u64) -> NodeIndex {
        let node_type = intern_label(&mut self.node_types, node_type);
        let name = self.intern(name);
        self.nodes.push(PendingNode {
            node_type,
            name,
            self_size,
            edges: Vec::new(),
        });
        (self.nodes.len() - 1) as NodeIndex
    }

    /// Add a `property` edge from `from` to `to`
    ///
    /// `to` may be anything, so dangling targets can be built on purpose.
    /// `from` must be an index returned by this builder: an edge from any
    /// other index is discarded with a warning and `false` is returned.
    pub fn add_property(&mut self, from: NodeIndex, name: &str, to: NodeIndex) -> bool {
        self.add_named_edge(from, "property", name, to)
    }

    /// Add an edge whose name goes through the string table
    ///
    /// Same `from` rule as [`add_property`](Self::add_property).
    pub fn add_named_edge(&mut self, from: NodeIndex, edge_type: &str, name: &str, to: NodeIndex) -> bool {
        let label = PendingLabel::Name(self.intern(name));
        self.push_edge(from, edge_type, label, to)
    }

    /// Add an `element` edge carrying a raw element index
    ///
    /// Same `from` rule as [`add_property`](Self::add_property).
    pub fn add_element(&mut self, from: NodeIndex, element: u64, to: NodeIndex) -> bool {
        self.push_edge(from, "element", PendingLabel::Index(element), to)
    }

    /// Chainable form of [`add_object`](Self::add_object)
    pub fn object(mut self, name: &str, self_size: u64) -> Self {
        self.add_object(name, self_size);
        self
    }

    /// Chainable form of [`add_property`](Self::add_property)
    pub fn property(mut self, from: NodeIndex, name: &str, to: NodeIndex) -> Self {
        self.add_property(from, name, to);
        self
    }

    /// Override the declared `node_count` (to fabricate truncated records)
    pub fn declared_node_count(mut self, count: usize) -> Self {
        self.declared_node_count = Some(count);
        self
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Assemble the flat record
    pub fn build(&self) -> RawSnapshot {
        let node_field_len = V8_NODE_FIELDS.len();
        let mut nodes = Vec::with_capacity(self.nodes.len() * node_field_len);
        let mut edges = Vec::new();

        for (i, node) in self.nodes.iter().enumerate() {
            nodes.extend_from_slice(&[
                node.node_type,
                node.name,
                (i as u64) * 2 + 1,
                node.self_size,
                node.edges.len() as u64,
                0,
                0,
            ]);
            for edge in &node.edges {
                let label = match edge.label {
                    PendingLabel::Name(id) | PendingLabel::Index(id) => id,
                };
                edges.extend_from_slice(&[edge.edge_type, label, edge.to_node]);
            }
        }

        let edge_count = edges.len() / V8_EDGE_FIELDS.len();

        RawSnapshot {
            snapshot: Some(SnapshotHeader {
                meta: Some(SnapshotMeta {
                    node_fields: Some(json!(V8_NODE_FIELDS)),
                    node_types: Some(Value::Array(vec![
                        json!(self.node_types),
                        json!("string"),
                        json!("number"),
                        json!("number"),
                        json!("number"),
                        json!("number"),
                        json!("number"),
                    ])),
                    edge_fields: Some(json!(V8_EDGE_FIELDS)),
                    edge_types: Some(Value::Array(vec![
                        json!(self.edge_types),
                        json!("string_or_number"),
                        json!("node"),
                    ])),
                }),
                node_count: Some(self.declared_node_count.unwrap_or(self.nodes.len())),
                edge_count: Some(edge_count),
            }),
            nodes: Some(nodes),
            edges: Some(edges),
            strings: Some(self.strings.clone()),
        }
    }

    fn push_edge(&mut self, from: NodeIndex, edge_type: &str, label: PendingLabel, to: NodeIndex) -> bool {
        let known = self.nodes.len();
        let Some(node) = usize::try_from(from).ok().and_then(|i| self.nodes.get_mut(i)) else {
            warn!(from, to, known, "Edge source was never added; discarding edge");
            return false;
        };
        let edge_type = intern_label(&mut self.edge_types, edge_type);
        node.edges.push(PendingEdge {
            edge_type,
            label,
            to_node: to,
        });
        true
    }

    fn intern(&mut self, s: &str) -> u64 {
        if let Some(id) = self.string_ids.get(s) {
            return *id;
        }
        let id = self.strings.len() as u64;
        self.strings.push(s.to_string());
        self.string_ids.insert(s.to_string(), id);
        id
    }
}

fn intern_label(table: &mut Vec<String>, label: &str) -> u64 {
    match table.iter().position(|t| t == label) {
        Some(pos) => pos as u64,
        None => {
            table.push(label.to_string());
            (table.len() - 1) as u64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_flat_layout() {
        let mut builder = SnapshotRecordBuilder::new();
        let a = builder.add_object("A", 10);
        let b = builder.add_object("B", 20);
        builder.add_property(a, "next", b);

        let raw = builder.build();
        let nodes = raw.nodes.unwrap();
        let edges = raw.edges.unwrap();
        let strings = raw.strings.unwrap();

        assert_eq!(nodes.len(), 2 * V8_NODE_FIELDS.len());
        // A: object, "A", id 1, 10 bytes, 1 edge
        assert_eq!(&nodes[..5], &[3, 0, 1, 10, 1]);
        assert_eq!(edges, vec![2, 2, 1]);
        assert_eq!(strings, vec!["A", "B", "next"]);
    }

    #[test]
    fn test_builder_extends_type_table() {
        let mut builder = SnapshotRecordBuilder::new();
        builder.add_node("wasm object", "w", 1);
        let raw = builder.build();
        let meta = raw.snapshot.unwrap().meta.unwrap();
        let types = meta.node_types.unwrap();
        assert_eq!(types[0][V8_NODE_TYPES.len()], "wasm object");
    }

    #[test]
    fn test_edge_from_unknown_node_is_dropped() {
        let mut builder = SnapshotRecordBuilder::new();
        assert!(!builder.add_property(5, "x", 0));
        assert!(!builder.add_element(5, 0, 0));
        assert!(builder.build().edges.unwrap().is_empty());
    }

    #[test]
    fn test_edge_to_unknown_node_is_kept() {
        let mut builder = SnapshotRecordBuilder::new();
        let a = builder.add_object("A", 1);
        assert!(builder.add_property(a, "ghost", 99));
        // property, "ghost", raw target index
        assert_eq!(builder.build().edges.unwrap(), vec![2, 1, 99]);
    }
}
