//! Snapshot decoding domain: raw record, validated schema, record builder

pub mod builder;
pub mod record;
pub mod schema;

pub use builder::SnapshotRecordBuilder;
pub use record::{RawSnapshot, SnapshotHeader, SnapshotMeta};
pub use schema::{FieldSlot, RecordLayout, SnapshotSchema};
