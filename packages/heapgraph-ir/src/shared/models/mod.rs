//! Shared models

mod branch;
mod edge;
mod node;

pub use branch::{Branch, BranchStep, EmptyBranchError};
pub use edge::{EdgeName, HeapEdge};
pub use node::{HeapNode, ScalarField};

/// Interned string shared between records decoded from the same snapshot
pub type InternedString = std::sync::Arc<str>;

/// Snapshot-defined node identifier (dense `0..node_count` after a full decode)
pub type NodeIndex = u64;
