//! Heap node record

use serde::Serialize;

use super::{HeapEdge, InternedString, NodeIndex};

/// Additional scalar field copied verbatim from the flat node/edge array
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScalarField {
    /// Field name as declared by the snapshot schema
    pub name: InternedString,
    /// Raw value
    pub value: u64,
}

/// One heap object from the captured graph
///
/// Built once by the decoder and read-only afterwards. Owns its outgoing
/// edges exclusively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeapNode {
    /// Position in the decoded node sequence (identity key)
    pub index: NodeIndex,

    /// Resolved from the node-type enumeration table
    pub node_type: InternedString,

    /// Resolved from the shared string table
    pub name: InternedString,

    /// Object's own byte size
    pub self_size: u64,

    /// Declared outgoing edge count (drives edge decoding)
    pub edge_count: u64,

    /// Remaining schema fields in schema order (`id`, `trace_node_id`, ...)
    pub scalars: Vec<ScalarField>,

    /// Outgoing edges in snapshot order
    pub edges: Vec<HeapEdge>,

    /// Raw ordinals kept for re-encoding
    #[serde(skip)]
    pub(crate) type_ordinal: u64,
    #[serde(skip)]
    pub(crate) name_ordinal: u64,
}

impl HeapNode {
    /// Look up an additional scalar field by schema name
    pub fn scalar(&self, name: &str) -> Option<u64> {
        self.scalars
            .iter()
            .find(|f| &*f.name == name)
            .map(|f| f.value)
    }

    /// Snapshot object id (V8 `id` field), when the schema declares one
    pub fn id(&self) -> Option<u64> {
        self.scalar("id")
    }

    /// True when the node has no outgoing edges
    pub fn is_leaf(&self) -> bool {
        self.edges.is_empty()
    }

    /// Targets of all outgoing edges, in edge order
    pub fn targets(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.edges.iter().map(|e| e.to_node)
    }
}
