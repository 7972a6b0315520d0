//! Snapshot Decoding
//!
//! Turns the flat, positionally-encoded snapshot record into typed node
//! records that own their outgoing edges.
//!
//! ## Layout
//! - domain/          - raw record, validated schema, record builder
//! - ports            - `SnapshotDecoderPort`
//! - infrastructure/  - positional decoder and the inverse encoder
//!
//! ## Usage
//!
//! ```rust,ignore
//! use heapgraph_ir::features::snapshot_decoding::{RawSnapshot, SnapshotDecoder};
//!
//! let raw = RawSnapshot::from_json_str(&std::fs::read_to_string("app.heapsnapshot")?)?;
//! let nodes = SnapshotDecoder::default().decode_snapshot(&raw)?.nodes;
//! ```

pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ports;

pub use domain::{
    FieldSlot, RawSnapshot, RecordLayout, SnapshotHeader, SnapshotMeta, SnapshotRecordBuilder,
    SnapshotSchema,
};
pub use error::{RecordKind, SnapshotError, SnapshotResult};
pub use infrastructure::{DecodedSnapshot, EncodedArrays, SnapshotDecoder, SnapshotEncoder};
pub use ports::SnapshotDecoderPort;
