//! Enumeration results

use serde::Serialize;

use crate::shared::models::{Branch, NodeIndex};

/// Why an enumeration stopped short of the full branch set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Truncation {
    /// `max_branches` reached; enumeration stopped
    BranchLimit,
    /// Some paths hit `max_depth` and were emitted unexpanded
    DepthLimit,
    /// Wall-clock budget exhausted; enumeration stopped
    TimeBudget,
}

impl Truncation {
    /// True when the enumeration stopped outright rather than shortening paths
    pub fn is_hard_stop(&self) -> bool {
        matches!(self, Truncation::BranchLimit | Truncation::TimeBudget)
    }
}

/// Branches produced by one enumeration request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EnumerationOutcome {
    /// Flattened branch set, in start-node then depth-first edge order
    pub branches: Vec<Branch>,

    /// Set when a cap cut the enumeration short
    pub truncation: Option<Truncation>,

    /// Requested start indexes that matched no node (subset enumeration)
    pub skipped_starts: Vec<NodeIndex>,
}

impl EnumerationOutcome {
    /// True when every branch of the request was produced
    pub fn is_complete(&self) -> bool {
        self.truncation.is_none()
    }

    pub fn len(&self) -> usize {
        self.branches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }

    /// Branches starting at `index`
    pub fn starting_at(&self, index: NodeIndex) -> impl Iterator<Item = &Branch> + '_ {
        self.branches.iter().filter(move |b| b.first().index == index)
    }

    /// Record a truncation; hard stops take precedence over depth truncation
    pub(crate) fn mark(&mut self, truncation: Truncation) {
        match self.truncation {
            Some(existing) if existing.is_hard_stop() => {}
            _ => self.truncation = Some(truncation),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hard_stop_wins_over_depth_limit() {
        let mut outcome = EnumerationOutcome::default();
        outcome.mark(Truncation::DepthLimit);
        outcome.mark(Truncation::TimeBudget);
        assert_eq!(outcome.truncation, Some(Truncation::TimeBudget));

        outcome.mark(Truncation::DepthLimit);
        assert_eq!(outcome.truncation, Some(Truncation::TimeBudget));
    }
}
