//! Serializable analysis results

use serde::Serialize;
use std::collections::BTreeMap;

use crate::features::branch_enumeration::{HeapGraph, Truncation};
use crate::features::retained_size::{AggregationStrategy, RetainedSize};
use crate::shared::models::{HeapNode, InternedString, NodeIndex};

/// Retained size of one node, with enough context to print it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RetainedSizeEntry {
    pub index: NodeIndex,
    pub name: InternedString,
    pub node_type: InternedString,
    pub self_size: u64,
    pub retained: RetainedSize,
}

impl RetainedSizeEntry {
    pub fn new(node: &HeapNode, retained: RetainedSize) -> Self {
        Self {
            index: node.index,
            name: node.name.clone(),
            node_type: node.node_type.clone(),
            self_size: node.self_size,
            retained,
        }
    }
}

/// Output of one analyze call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RetainedSizeReport {
    pub strategy: AggregationStrategy,

    /// One entry per analyzed node, in graph or request order
    pub entries: Vec<RetainedSizeEntry>,

    /// Size of the branch set the entries were computed from
    pub branch_count: usize,

    /// Set when enumeration was cut short; sizes are then lower bounds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub truncation: Option<Truncation>,

    /// Requested indexes that matched no node
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped_starts: Vec<NodeIndex>,
}

impl RetainedSizeReport {
    pub fn entry(&self, index: NodeIndex) -> Option<&RetainedSizeEntry> {
        self.entries.iter().find(|e| e.index == index)
    }

    /// Largest retained size first. Indeterminate sizes rank by self_size;
    /// ties keep their previous order.
    pub fn sort_descending(&mut self) {
        self.entries
            .sort_by(|a, b| b.retained.lower_bound().cmp(&a.retained.lower_bound()));
    }

    /// Keep the first `n` entries
    pub fn truncate(&mut self, n: usize) {
        self.entries.truncate(n);
    }

    pub fn is_complete(&self) -> bool {
        self.truncation.is_none()
    }
}

/// Per-type totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TypeStats {
    pub count: usize,
    pub self_size: u64,
}

/// Shape of a decoded graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphSummary {
    pub node_count: usize,
    pub edge_count: usize,
    pub dangling_edges: usize,
    pub leaf_count: usize,
    pub total_self_size: u64,
    pub types: BTreeMap<String, TypeStats>,
}

impl GraphSummary {
    pub fn of(graph: &HeapGraph) -> Self {
        let mut types: BTreeMap<String, TypeStats> = BTreeMap::new();
        let mut total_self_size = 0u64;
        let mut leaf_count = 0;

        for node in graph.nodes() {
            let stats = types.entry(node.node_type.to_string()).or_default();
            stats.count += 1;
            stats.self_size = stats.self_size.saturating_add(node.self_size);
            total_self_size = total_self_size.saturating_add(node.self_size);
            if node.is_leaf() {
                leaf_count += 1;
            }
        }

        Self {
            node_count: graph.len(),
            edge_count: graph.edge_count(),
            dangling_edges: graph.dangling_edge_count(),
            leaf_count,
            total_self_size,
            types,
        }
    }
}
