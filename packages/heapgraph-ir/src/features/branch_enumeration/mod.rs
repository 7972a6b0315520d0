//! Branch Enumeration
//!
//! Enumerates simple paths ("branches") through a decoded heap graph. A
//! branch starts at a chosen node and ends at a node without outgoing edges,
//! never visiting the same node twice.
//!
//! ## Layout
//! - domain/          - `HeapGraph` index lookup, `EnumerationOutcome`
//! - infrastructure/  - iterative depth-first `BranchEnumerator`
//!
//! ## Call patterns
//! - global: every node is a start node (`enumerate_all`)
//! - subset: only caller-supplied start nodes (`enumerate_subset`), with
//!   edges still resolved against the whole graph
//!
//! Both are exponential in the branching factor on dense graphs. The caps in
//! [`EnumerationConfig`](crate::config::EnumerationConfig) bound the cost and
//! report why an outcome is partial.

pub mod domain;
pub mod infrastructure;

pub use domain::{EnumerationOutcome, HeapGraph, Truncation};
pub use infrastructure::BranchEnumerator;
