//! Retained-size infrastructure

pub mod aggregators;
pub mod calculator;

pub use aggregators::{aggregator_for, LeafSelfSizeAggregator, LiteralAggregator, PathSelfSizeAggregator};
pub use calculator::RetainedSizeCalculator;
