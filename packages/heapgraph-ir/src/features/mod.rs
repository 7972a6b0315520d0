//! Feature modules
//!
//! Each feature follows the same layout:
//! - `domain/`: types and invariants
//! - `ports`: traits the pipeline depends on (where swappable)
//! - `infrastructure/`: implementations

pub mod branch_enumeration;
pub mod retained_size;
pub mod snapshot_decoding;
