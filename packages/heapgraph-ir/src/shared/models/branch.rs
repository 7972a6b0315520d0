//! Branch records produced by the enumerator

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{HeapNode, NodeIndex};

/// Lightweight node summary stored in a branch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BranchStep {
    pub index: NodeIndex,
    pub self_size: u64,
}

impl From<&HeapNode> for BranchStep {
    fn from(node: &HeapNode) -> Self {
        Self {
            index: node.index,
            self_size: node.self_size,
        }
    }
}

/// One simple path through the graph
///
/// Never empty: it always holds at least the starting node. Serialized as
/// the bare step list; deserializing `[]` fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<BranchStep>", into = "Vec<BranchStep>")]
pub struct Branch {
    steps: Vec<BranchStep>,
}

/// Rejected attempt to build a branch without steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("branch must hold at least its starting node")]
pub struct EmptyBranchError;

impl TryFrom<Vec<BranchStep>> for Branch {
    type Error = EmptyBranchError;

    fn try_from(steps: Vec<BranchStep>) -> Result<Self, Self::Error> {
        Branch::from_steps(steps).ok_or(EmptyBranchError)
    }
}

impl From<Branch> for Vec<BranchStep> {
    fn from(branch: Branch) -> Self {
        branch.steps
    }
}

#[allow(clippy::len_without_is_empty)]
impl Branch {
    /// Branch holding only its starting node
    pub fn start(step: BranchStep) -> Self {
        Self { steps: vec![step] }
    }

    /// Build from an explicit step list; `None` when `steps` is empty
    pub fn from_steps(steps: Vec<BranchStep>) -> Option<Self> {
        if steps.is_empty() {
            None
        } else {
            Some(Self { steps })
        }
    }

    /// First step (the node the branch starts at)
    pub fn first(&self) -> &BranchStep {
        &self.steps[0]
    }

    /// Terminal step (leaf or dead end)
    pub fn terminal(&self) -> &BranchStep {
        &self.steps[self.steps.len() - 1]
    }

    pub fn steps(&self) -> &[BranchStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// True when `index` appears anywhere in the path
    pub fn contains(&self, index: NodeIndex) -> bool {
        self.steps.iter().any(|s| s.index == index)
    }

    /// Node indexes along the path
    pub fn indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.steps.iter().map(|s| s.index)
    }

    /// Sum of `self_size` over every step after the first
    pub fn reached_self_size(&self) -> u64 {
        self.steps
            .iter()
            .skip(1)
            .fold(0u64, |acc, s| acc.saturating_add(s.self_size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(index: NodeIndex, self_size: u64) -> BranchStep {
        BranchStep { index, self_size }
    }

    #[test]
    fn test_branch_rejects_empty_steps() {
        assert!(Branch::from_steps(Vec::new()).is_none());
    }

    #[test]
    fn test_branch_first_and_terminal() {
        let branch = Branch::from_steps(vec![step(0, 10), step(1, 20), step(2, 30)]).unwrap();
        assert_eq!(branch.first().index, 0);
        assert_eq!(branch.terminal().index, 2);
        assert_eq!(branch.len(), 3);
        assert!(branch.contains(1));
        assert!(!branch.contains(7));
    }

    #[test]
    fn test_reached_self_size_excludes_start() {
        let branch = Branch::from_steps(vec![step(0, 10), step(1, 20), step(2, 30)]).unwrap();
        assert_eq!(branch.reached_self_size(), 50);
        assert_eq!(Branch::start(step(4, 99)).reached_self_size(), 0);
    }

    #[test]
    fn test_branch_serializes_as_step_list() {
        let branch = Branch::from_steps(vec![step(3, 8)]).unwrap();
        let json = serde_json::to_string(&branch).unwrap();
        assert_eq!(json, r#"[{"index":3,"self_size":8}]"#);

        let back: Branch = serde_json::from_str(&json).unwrap();
        assert_eq!(back, branch);
    }

    #[test]
    fn test_deserialize_rejects_empty_list() {
        let err = serde_json::from_str::<Branch>("[]").unwrap_err();
        assert!(err.to_string().contains("at least its starting node"));
        assert_eq!(Branch::try_from(Vec::new()), Err(EmptyBranchError));
    }
}
