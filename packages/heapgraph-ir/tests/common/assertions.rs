//! Custom assertions for heap graph tests

use heapgraph_ir::{Branch, EnumerationOutcome, HeapGraph, NodeIndex};
use std::collections::HashSet;

/// Branch node indexes, in branch order
pub fn paths(outcome: &EnumerationOutcome) -> Vec<Vec<NodeIndex>> {
    outcome.branches.iter().map(|b| b.indices().collect()).collect()
}

/// No node index appears twice within a branch
pub fn assert_simple(branch: &Branch) {
    let mut seen = HashSet::new();
    for index in branch.indices() {
        assert!(
            seen.insert(index),
            "Node {index} repeats in branch {:?}",
            branch.indices().collect::<Vec<_>>()
        );
    }
}

/// The terminal node is a leaf, or every edge it has points at a node that
/// is already on the branch or does not exist
pub fn assert_terminal_exhausted(graph: &HeapGraph, branch: &Branch) {
    let last = graph
        .node(branch.terminal().index)
        .expect("terminal step resolves to a node");
    for target in last.targets() {
        assert!(
            graph.node(target).is_none() || branch.contains(target),
            "Branch {:?} ends at {} but edge to {} is still unvisited",
            branch.indices().collect::<Vec<_>>(),
            last.index,
            target
        );
    }
}

/// Every branch references existing nodes only
pub fn assert_no_dangling_steps(graph: &HeapGraph, outcome: &EnumerationOutcome) {
    for branch in &outcome.branches {
        for index in branch.indices() {
            assert!(graph.node(index).is_some(), "Branch step {index} matches no node");
        }
    }
}
