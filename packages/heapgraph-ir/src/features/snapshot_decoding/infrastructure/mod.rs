//! Snapshot decoding infrastructure

pub mod decoder;
pub mod encoder;

pub use decoder::{DecodedSnapshot, SnapshotDecoder};
pub use encoder::{EncodedArrays, SnapshotEncoder};
