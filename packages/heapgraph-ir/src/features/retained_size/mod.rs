//! Retained Size
//!
//! Per-node size metric aggregated over the branches that start at a node.
//! How a branch contributes is a swappable [`AggregationStrategy`]:
//!
//! | strategy         | contribution of one branch              |
//! |------------------|-----------------------------------------|
//! | `leaf_self_size` | terminal node's self_size (default)     |
//! | `path_self_size` | self_size of every node past the start  |
//! | `literal`        | undefined; result is `Indeterminate`    |
//!
//! This approximates retained size by path enumeration. It is not a
//! dominator-tree computation.

pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use domain::{AggregationStrategy, Contribution, ContributionSum, RetainedSize};
pub use infrastructure::{
    aggregator_for, LeafSelfSizeAggregator, LiteralAggregator, PathSelfSizeAggregator,
    RetainedSizeCalculator,
};
pub use ports::BranchAggregatorPort;
