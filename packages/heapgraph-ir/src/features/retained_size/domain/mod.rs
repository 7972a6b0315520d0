//! Retained-size domain types

pub mod retained;
pub mod strategy;

pub use retained::{Contribution, ContributionSum, RetainedSize};
pub use strategy::AggregationStrategy;
