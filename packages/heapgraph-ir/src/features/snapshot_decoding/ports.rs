//! Snapshot decoder port
//!
//! The pipeline depends on this trait rather than on the concrete decoder so
//! alternative front ends (streaming decoders, pre-filtered subsets) can be
//! plugged in.

use crate::features::snapshot_decoding::domain::RawSnapshot;
use crate::features::snapshot_decoding::error::SnapshotResult;
use crate::shared::models::HeapNode;

pub trait SnapshotDecoderPort: Send + Sync {
    /// Decode the full node sequence (with owned edges)
    ///
    /// Must either return every node or fail; partial graphs are never
    /// returned.
    fn decode(&self, raw: &RawSnapshot) -> SnapshotResult<Vec<HeapNode>>;

    /// Decoder name for logging
    fn name(&self) -> &'static str;
}
