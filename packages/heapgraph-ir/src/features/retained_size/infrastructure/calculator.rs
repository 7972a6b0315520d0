//! Retained-size calculator
//!
//! `retained(node) = node.self_size + Σ contribution(branch)` over every
//! branch whose first step is `node`. Branches starting elsewhere are ignored
//! even when they pass through `node`.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::config::RetainedSizeConfig;
use crate::features::retained_size::domain::{AggregationStrategy, ContributionSum, RetainedSize};
use crate::features::retained_size::infrastructure::aggregators::aggregator_for;
use crate::features::retained_size::ports::BranchAggregatorPort;
use crate::shared::models::{Branch, HeapNode, NodeIndex};

pub struct RetainedSizeCalculator {
    aggregator: Box<dyn BranchAggregatorPort>,
}

impl RetainedSizeCalculator {
    pub fn new(strategy: AggregationStrategy) -> Self {
        Self {
            aggregator: aggregator_for(strategy),
        }
    }

    pub fn from_config(config: &RetainedSizeConfig) -> Self {
        Self::new(config.strategy)
    }

    /// Use a custom aggregator (builder pattern)
    pub fn with_aggregator(mut self, aggregator: Box<dyn BranchAggregatorPort>) -> Self {
        self.aggregator = aggregator;
        self
    }

    pub fn aggregator_name(&self) -> &'static str {
        self.aggregator.name()
    }

    /// Retained size of a single node. Scans the whole branch set.
    pub fn retained_size(&self, node: &HeapNode, branches: &[Branch]) -> RetainedSize {
        let mut sum = ContributionSum::default();
        for branch in branches.iter().filter(|b| b.first().index == node.index) {
            sum.add(self.aggregator.contribution(branch));
        }
        sum.finish(node.self_size)
    }

    /// Retained sizes for many nodes, in the order given.
    ///
    /// Branches are grouped by start index in one pass, so the cost is
    /// linear in the branch count regardless of how many nodes are asked for.
    pub fn retained_sizes<'a, I>(&self, nodes: I, branches: &[Branch]) -> Vec<RetainedSize>
    where
        I: IntoIterator<Item = &'a HeapNode>,
    {
        let mut sums: FxHashMap<NodeIndex, ContributionSum> = FxHashMap::default();
        for branch in branches {
            sums.entry(branch.first().index)
                .or_default()
                .add(self.aggregator.contribution(branch));
        }

        let sizes: Vec<RetainedSize> = nodes
            .into_iter()
            .map(|node| {
                sums.get(&node.index)
                    .copied()
                    .unwrap_or_default()
                    .finish(node.self_size)
            })
            .collect();

        debug!(
            aggregator = self.aggregator.name(),
            nodes = sizes.len(),
            branches = branches.len(),
            start_nodes = sums.len(),
            "Retained sizes computed"
        );
        sizes
    }
}

impl Default for RetainedSizeCalculator {
    fn default() -> Self {
        Self::new(AggregationStrategy::default())
    }
}

impl std::fmt::Debug for RetainedSizeCalculator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetainedSizeCalculator")
            .field("aggregator", &self.aggregator.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::retained_size::domain::Contribution;
    use crate::shared::models::BranchStep;
    use std::sync::Arc;

    fn node(index: NodeIndex, self_size: u64) -> HeapNode {
        HeapNode {
            index,
            node_type: Arc::from("object"),
            name: Arc::from("n"),
            self_size,
            edge_count: 0,
            scalars: Vec::new(),
            edges: Vec::new(),
            type_ordinal: 0,
            name_ordinal: 0,
        }
    }

    fn branch(steps: &[(NodeIndex, u64)]) -> Branch {
        Branch::from_steps(
            steps
                .iter()
                .map(|&(index, self_size)| BranchStep { index, self_size })
                .collect(),
        )
        .unwrap()
    }

    /// A(10) → B(20) → C(30)
    fn chain_branches() -> Vec<Branch> {
        vec![
            branch(&[(0, 10), (1, 20), (2, 30)]),
            branch(&[(1, 20), (2, 30)]),
            branch(&[(2, 30)]),
        ]
    }

    #[test]
    fn test_chain_leaf_strategy() {
        let calc = RetainedSizeCalculator::new(AggregationStrategy::LeafSelfSize);
        let branches = chain_branches();
        assert_eq!(calc.retained_size(&node(0, 10), &branches), RetainedSize::Exact(40));
        assert_eq!(calc.retained_size(&node(1, 20), &branches), RetainedSize::Exact(50));
        assert_eq!(calc.retained_size(&node(2, 30), &branches), RetainedSize::Exact(30));
    }

    #[test]
    fn test_chain_path_strategy() {
        let calc = RetainedSizeCalculator::new(AggregationStrategy::PathSelfSize);
        let branches = chain_branches();
        assert_eq!(calc.retained_size(&node(0, 10), &branches), RetainedSize::Exact(60));
        assert_eq!(calc.retained_size(&node(1, 20), &branches), RetainedSize::Exact(50));
    }

    #[test]
    fn test_chain_literal_strategy() {
        let calc = RetainedSizeCalculator::new(AggregationStrategy::Literal);
        assert_eq!(
            calc.retained_size(&node(0, 10), &chain_branches()),
            RetainedSize::Indeterminate {
                self_size: 10,
                undefined_contributions: 1
            }
        );
        // no qualifying branch: nothing undefined was added
        assert_eq!(calc.retained_size(&node(7, 5), &chain_branches()), RetainedSize::Exact(5));
    }

    #[test]
    fn test_batch_matches_single() {
        let branches = chain_branches();
        let nodes = [node(0, 10), node(1, 20), node(2, 30), node(9, 1)];
        for strategy in AggregationStrategy::ALL {
            let calc = RetainedSizeCalculator::new(strategy);
            let batch = calc.retained_sizes(&nodes, &branches);
            let single: Vec<_> = nodes.iter().map(|n| calc.retained_size(n, &branches)).collect();
            assert_eq!(batch, single, "strategy {}", strategy);
        }
    }

    #[test]
    fn test_only_branches_starting_at_node_count() {
        // B appears inside A's branch but does not start it
        let branches = vec![branch(&[(0, 1), (1, 100)])];
        let calc = RetainedSizeCalculator::default();
        assert_eq!(calc.retained_size(&node(1, 100), &branches), RetainedSize::Exact(100));
    }

    struct Constant(u64);

    impl BranchAggregatorPort for Constant {
        fn contribution(&self, _branch: &Branch) -> Contribution {
            Contribution::Size(self.0)
        }

        fn name(&self) -> &'static str {
            "constant"
        }
    }

    #[test]
    fn test_custom_aggregator() {
        let calc = RetainedSizeCalculator::default().with_aggregator(Box::new(Constant(3)));
        assert_eq!(calc.aggregator_name(), "constant");
        assert_eq!(calc.retained_size(&node(0, 10), &chain_branches()), RetainedSize::Exact(13));
    }
}
