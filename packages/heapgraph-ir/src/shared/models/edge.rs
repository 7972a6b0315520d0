//! Heap edge record

use serde::Serialize;

use super::{InternedString, NodeIndex, ScalarField};

/// Value stored in an edge's position-1 field
///
/// Most edge kinds name a property through the string table; element and
/// hidden edges carry a plain ordinal instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum EdgeName {
    /// Resolved through the shared string table
    Named {
        #[serde(skip)]
        ordinal: u64,
        value: InternedString,
    },
    /// Raw element/hidden index
    Index(u64),
}

impl EdgeName {
    /// Raw value as it appears in the flat edge array
    pub fn raw(&self) -> u64 {
        match self {
            EdgeName::Named { ordinal, .. } => *ordinal,
            EdgeName::Index(i) => *i,
        }
    }

    /// Resolved string, if this edge name went through the string table
    pub fn as_str(&self) -> Option<&str> {
        match self {
            EdgeName::Named { value, .. } => Some(value),
            EdgeName::Index(_) => None,
        }
    }
}

/// One outgoing reference from a node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeapEdge {
    /// Global cursor position stamped while decoding (monotonic across the graph)
    pub index: u64,

    /// Resolved from the edge-type enumeration table
    pub edge_type: InternedString,

    /// Property name or element index
    pub name_or_index: EdgeName,

    /// `index` of the target node (not an array position)
    pub to_node: NodeIndex,

    /// Remaining schema fields in schema order
    pub scalars: Vec<ScalarField>,

    #[serde(skip)]
    pub(crate) type_ordinal: u64,
}

impl HeapEdge {
    /// Look up an additional scalar field by schema name
    pub fn scalar(&self, name: &str) -> Option<u64> {
        self.scalars
            .iter()
            .find(|f| &*f.name == name)
            .map(|f| f.value)
    }
}
