//! Branch enumeration infrastructure

pub mod enumerator;

pub use enumerator::BranchEnumerator;
