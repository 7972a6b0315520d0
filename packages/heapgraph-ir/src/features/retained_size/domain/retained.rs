//! Retained-size values

use serde::Serialize;

/// What a single branch adds to its start node's retained size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contribution {
    Size(u64),
    /// The branch has no numeric size under the active strategy
    Undefined,
}

/// Retained size of one node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RetainedSize {
    /// `self_size` plus every branch contribution
    Exact(u64),

    /// At least one qualifying branch had no numeric contribution, so only
    /// the node's own size is known
    Indeterminate {
        self_size: u64,
        undefined_contributions: usize,
    },
}

impl RetainedSize {
    /// Numeric value, when defined
    pub fn value(&self) -> Option<u64> {
        match self {
            RetainedSize::Exact(v) => Some(*v),
            RetainedSize::Indeterminate { .. } => None,
        }
    }

    /// Smallest value the retained size can have
    pub fn lower_bound(&self) -> u64 {
        match self {
            RetainedSize::Exact(v) => *v,
            RetainedSize::Indeterminate { self_size, .. } => *self_size,
        }
    }

    pub fn is_exact(&self) -> bool {
        matches!(self, RetainedSize::Exact(_))
    }
}

/// Running fold over the branches of one start node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContributionSum {
    pub total: u64,
    pub undefined: usize,
    pub branches: usize,
}

impl ContributionSum {
    pub fn add(&mut self, contribution: Contribution) {
        self.branches += 1;
        match contribution {
            Contribution::Size(size) => self.total = self.total.saturating_add(size),
            Contribution::Undefined => self.undefined += 1,
        }
    }

    /// Combine with the node's own size
    pub fn finish(&self, self_size: u64) -> RetainedSize {
        if self.undefined > 0 {
            RetainedSize::Indeterminate {
                self_size,
                undefined_contributions: self.undefined,
            }
        } else {
            RetainedSize::Exact(self_size.saturating_add(self.total))
        }
    }
}
