//! One aggregator per [`AggregationStrategy`]

use crate::features::retained_size::domain::{AggregationStrategy, Contribution};
use crate::features::retained_size::ports::BranchAggregatorPort;
use crate::shared::models::Branch;

/// Terminal node's self_size
#[derive(Debug, Clone, Copy, Default)]
pub struct LeafSelfSizeAggregator;

impl BranchAggregatorPort for LeafSelfSizeAggregator {
    fn contribution(&self, branch: &Branch) -> Contribution {
        // a branch holding only its start node reaches nothing
        if branch.len() < 2 {
            return Contribution::Size(0);
        }
        Contribution::Size(branch.terminal().self_size)
    }

    fn name(&self) -> &'static str {
        "leaf_self_size"
    }
}

/// self_size summed over every step past the start node
#[derive(Debug, Clone, Copy, Default)]
pub struct PathSelfSizeAggregator;

impl BranchAggregatorPort for PathSelfSizeAggregator {
    fn contribution(&self, branch: &Branch) -> Contribution {
        Contribution::Size(branch.reached_self_size())
    }

    fn name(&self) -> &'static str {
        "path_self_size"
    }
}

/// Treats the branch sequence itself as the sized value. Sequences carry no
/// size, so every branch is undefined.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiteralAggregator;

impl BranchAggregatorPort for LiteralAggregator {
    fn contribution(&self, _branch: &Branch) -> Contribution {
        Contribution::Undefined
    }

    fn name(&self) -> &'static str {
        "literal"
    }
}

/// Aggregator implementing `strategy`
pub fn aggregator_for(strategy: AggregationStrategy) -> Box<dyn BranchAggregatorPort> {
    match strategy {
        AggregationStrategy::LeafSelfSize => Box::new(LeafSelfSizeAggregator),
        AggregationStrategy::PathSelfSize => Box::new(PathSelfSizeAggregator),
        AggregationStrategy::Literal => Box::new(LiteralAggregator),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::BranchStep;

    fn branch(sizes: &[u64]) -> Branch {
        let steps = sizes
            .iter()
            .enumerate()
            .map(|(i, &self_size)| BranchStep {
                index: i as u64,
                self_size,
            })
            .collect();
        Branch::from_steps(steps).unwrap()
    }

    #[test]
    fn test_leaf_uses_terminal_step() {
        assert_eq!(LeafSelfSizeAggregator.contribution(&branch(&[10, 20, 30])), Contribution::Size(30));
        assert_eq!(LeafSelfSizeAggregator.contribution(&branch(&[10])), Contribution::Size(0));
    }

    #[test]
    fn test_path_sums_reached_steps() {
        assert_eq!(PathSelfSizeAggregator.contribution(&branch(&[10, 20, 30])), Contribution::Size(50));
        assert_eq!(PathSelfSizeAggregator.contribution(&branch(&[10])), Contribution::Size(0));
    }

    #[test]
    fn test_literal_is_undefined() {
        assert_eq!(LiteralAggregator.contribution(&branch(&[1, 2])), Contribution::Undefined);
    }

    #[test]
    fn test_factory_matches_strategy_name() {
        for strategy in AggregationStrategy::ALL {
            assert_eq!(aggregator_for(strategy).name(), strategy.as_str());
        }
    }
}
