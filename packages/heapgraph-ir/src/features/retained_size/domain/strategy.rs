//! Aggregation strategies

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a branch that starts at a node contributes to that node's retained size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationStrategy {
    /// self_size of the branch's terminal node; a single-node branch adds 0
    #[default]
    LeafSelfSize,

    /// Sum of self_size over every step after the start node
    PathSelfSize,

    /// The branch itself carries no size; every qualifying branch makes the
    /// result indeterminate
    Literal,
}

impl AggregationStrategy {
    pub const ALL: [AggregationStrategy; 3] = [
        AggregationStrategy::LeafSelfSize,
        AggregationStrategy::PathSelfSize,
        AggregationStrategy::Literal,
    ];

    /// Name as written in config files
    pub fn as_str(&self) -> &'static str {
        match self {
            AggregationStrategy::LeafSelfSize => "leaf_self_size",
            AggregationStrategy::PathSelfSize => "path_self_size",
            AggregationStrategy::Literal => "literal",
        }
    }
}

impl fmt::Display for AggregationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AggregationStrategy {
    type Err = String;

    /// Accepts both `leaf_self_size` and `leaf-self-size`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == normalized)
            .ok_or_else(|| {
                format!(
                    "unknown aggregation strategy '{}' (expected one of: leaf-self-size, path-self-size, literal)",
                    s
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_both_spellings() {
        assert_eq!(
            "leaf-self-size".parse::<AggregationStrategy>().unwrap(),
            AggregationStrategy::LeafSelfSize
        );
        assert_eq!(
            "path_self_size".parse::<AggregationStrategy>().unwrap(),
            AggregationStrategy::PathSelfSize
        );
        assert_eq!("LITERAL".parse::<AggregationStrategy>().unwrap(), AggregationStrategy::Literal);
        assert!("dominator".parse::<AggregationStrategy>().is_err());
    }

    #[test]
    fn test_default_is_leaf() {
        assert_eq!(AggregationStrategy::default(), AggregationStrategy::LeafSelfSize);
    }
}
