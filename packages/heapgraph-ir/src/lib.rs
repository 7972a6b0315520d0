/*
 * Heapgraph IR - Heap Snapshot Graph Analysis
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Common models (HeapNode, HeapEdge, Branch)
 * - features/    : Vertical slices (snapshot_decoding → branch_enumeration → retained_size)
 * - pipeline/    : Orchestration
 * - config/      : Presets, validation, YAML
 *
 * Execution:
 * - Single-threaded and synchronous
 * - Iterative traversal, no recursion on graph depth
 */

// Crate-level lint configuration
#![allow(clippy::module_inception)] // Module naming intentional
#![allow(clippy::new_without_default)] // Default impl not always needed
#![allow(clippy::len_without_is_empty)] // Branch is never empty

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Shared models
pub mod shared;

/// Feature modules (decode → enumerate → size)
pub mod features;

/// Pipeline orchestration
pub mod pipeline;

/// Configuration system
pub mod config;

/// Error types
pub mod errors;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use config::{HeapGraphConfig, Preset};
pub use errors::{HeapGraphError, Result};
pub use features::branch_enumeration::{BranchEnumerator, EnumerationOutcome, HeapGraph, Truncation};
pub use features::retained_size::{AggregationStrategy, RetainedSize, RetainedSizeCalculator};
pub use features::snapshot_decoding::{RawSnapshot, SnapshotDecoder, SnapshotError, SnapshotRecordBuilder};
pub use pipeline::{GraphSummary, HeapGraphService, RetainedSizeReport};
pub use shared::models::{Branch, BranchStep, EmptyBranchError, HeapEdge, HeapNode, NodeIndex};
