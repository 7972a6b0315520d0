//! Decoded node graph with index lookup

use rustc_hash::FxHashMap;

use crate::shared::models::{HeapNode, NodeIndex};

/// Read-only node graph
///
/// Edge targets are snapshot-defined node indexes, not array positions, so
/// they are resolved through an index → position map built once. When two
/// nodes share an index the first one wins.
#[derive(Debug, Clone, Default)]
pub struct HeapGraph {
    nodes: Vec<HeapNode>,
    positions: FxHashMap<NodeIndex, usize>,
}

impl HeapGraph {
    pub fn new(nodes: Vec<HeapNode>) -> Self {
        let mut positions = FxHashMap::with_capacity_and_hasher(nodes.len(), Default::default());
        for (pos, node) in nodes.iter().enumerate() {
            positions.entry(node.index).or_insert(pos);
        }
        Self { nodes, positions }
    }

    pub fn nodes(&self) -> &[HeapNode] {
        &self.nodes
    }

    pub fn into_nodes(self) -> Vec<HeapNode> {
        self.nodes
    }

    /// Node whose `index` equals `index`
    pub fn node(&self, index: NodeIndex) -> Option<&HeapNode> {
        self.position(index).map(|pos| &self.nodes[pos])
    }

    pub(crate) fn position(&self, index: NodeIndex) -> Option<usize> {
        self.positions.get(&index).copied()
    }

    pub(crate) fn at(&self, pos: usize) -> &HeapNode {
        &self.nodes[pos]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.edges.len()).sum()
    }

    /// Edges whose target matches no node
    pub fn dangling_edge_count(&self) -> usize {
        self.nodes
            .iter()
            .flat_map(|n| n.targets())
            .filter(|t| !self.positions.contains_key(t))
            .count()
    }
}

impl From<Vec<HeapNode>> for HeapGraph {
    fn from(nodes: Vec<HeapNode>) -> Self {
        Self::new(nodes)
    }
}
