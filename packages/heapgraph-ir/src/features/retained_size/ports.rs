//! Branch aggregator port

use crate::features::retained_size::domain::Contribution;
use crate::shared::models::Branch;

/// Maps one branch to what it adds to its start node's retained size
pub trait BranchAggregatorPort: Send + Sync {
    fn contribution(&self, branch: &Branch) -> Contribution;

    /// Aggregator name for logging
    fn name(&self) -> &'static str;
}
