//! Branch enumeration domain

pub mod graph;
pub mod outcome;

pub use graph::HeapGraph;
pub use outcome::{EnumerationOutcome, Truncation};
