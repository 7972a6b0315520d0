//! Positional snapshot decoder
//!
//! Walks the flat node array record by record and, for every node, consumes
//! `edge_count` edge records from the flat edge array. Edges are laid out
//! contiguously across the whole graph, so one cursor spans all nodes and is
//! never reset.

use std::sync::Arc;
use tracing::debug;

use crate::config::DecoderConfig;
use crate::features::snapshot_decoding::domain::{FieldSlot, RawSnapshot, RecordLayout, SnapshotSchema};
use crate::features::snapshot_decoding::error::{RecordKind, SnapshotError, SnapshotResult};
use crate::features::snapshot_decoding::ports::SnapshotDecoderPort;
use crate::shared::models::{EdgeName, HeapEdge, HeapNode, InternedString, ScalarField};

/// Result of a full decode: the validated schema plus the node sequence
#[derive(Debug, Clone)]
pub struct DecodedSnapshot {
    pub schema: SnapshotSchema,
    pub nodes: Vec<HeapNode>,
}

impl DecodedSnapshot {
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.edges.len()).sum()
    }
}

/// Running slot cursor over the flat edge array
///
/// Owned by a single decode call. Advances once per field consumed.
#[derive(Debug, Default)]
struct EdgeCursor {
    slot: usize,
    edges_read: u64,
}

impl EdgeCursor {
    /// Take the next record of `len` fields.
    ///
    /// Returns the stamped edge index (the cursor value of the record's last
    /// field) together with the record's values.
    fn take<'a>(&mut self, flat: &'a [u64], len: usize) -> SnapshotResult<(u64, &'a [u64])> {
        let end = self.slot.saturating_add(len);
        let values = flat.get(self.slot..end).ok_or(SnapshotError::Truncated {
            section: "edges",
            required: end,
            actual: flat.len(),
        })?;
        let stamped = end.saturating_sub(1) as u64;
        self.slot = end;
        self.edges_read += 1;
        Ok((stamped, values))
    }
}

/// Fields of one record after the position rules have been applied
#[derive(Debug, Default)]
struct RecordFields {
    type_ordinal: u64,
    record_type: Option<InternedString>,
    name_raw: u64,
    self_size: u64,
    edge_count: u64,
    to_node: u64,
    scalars: Vec<ScalarField>,
}

fn read_record(
    layout: &RecordLayout,
    values: &[u64],
    record_index: u64,
) -> SnapshotResult<RecordFields> {
    let mut fields = RecordFields::default();

    for (slot, &value) in layout.slots().iter().zip(values) {
        match slot {
            FieldSlot::Type => {
                fields.type_ordinal = value;
                fields.record_type = Some(layout.resolve_type(value, record_index)?);
            }
            FieldSlot::Name => fields.name_raw = value,
            FieldSlot::SelfSize => fields.self_size = value,
            FieldSlot::EdgeCount => fields.edge_count = value,
            FieldSlot::ToNode => fields.to_node = value,
            FieldSlot::Scalar(name) => fields.scalars.push(ScalarField {
                name: Arc::clone(name),
                value,
            }),
        }
    }

    Ok(fields)
}

/// Decoder for V8-style positional heap snapshots
#[derive(Debug, Clone, Default)]
pub struct SnapshotDecoder {
    config: DecoderConfig,
}

impl SnapshotDecoder {
    pub fn new(config: DecoderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decode into nodes, keeping the validated schema for re-encoding
    pub fn decode_snapshot(&self, raw: &RawSnapshot) -> SnapshotResult<DecodedSnapshot> {
        let schema = SnapshotSchema::from_raw(raw)?;
        let node_values = raw.node_values()?;
        let edge_values = raw.edge_values()?;

        let node_len = schema.nodes.field_len();
        let edge_len = schema.edges.field_len();

        let required = schema.node_count.saturating_mul(node_len);
        if node_values.len() < required {
            return Err(SnapshotError::Truncated {
                section: "nodes",
                required,
                actual: node_values.len(),
            });
        }

        let numeric_names = self.numeric_name_mask(&schema.edges);
        let mut cursor = EdgeCursor::default();
        let mut nodes = Vec::with_capacity(schema.node_count);

        for (i, values) in node_values[..required].chunks_exact(node_len).enumerate() {
            let index = i as u64;
            let fields = read_record(&schema.nodes, values, index)?;
            let name = schema.resolve_string(fields.name_raw, RecordKind::Node, index)?;

            // bound the reservation by what the edge array can still hold
            let remaining = edge_values.len().saturating_sub(cursor.slot) / edge_len;
            let capacity = usize::try_from(fields.edge_count)
                .unwrap_or(usize::MAX)
                .min(remaining);
            let mut edges = Vec::with_capacity(capacity);

            for _ in 0..fields.edge_count {
                let edge_index = cursor.edges_read;
                let (stamped, edge_fields) = cursor.take(edge_values, edge_len)?;
                edges.push(Self::decode_edge(
                    &schema,
                    edge_fields,
                    edge_index,
                    stamped,
                    &numeric_names,
                )?);
            }

            nodes.push(HeapNode {
                index,
                node_type: fields.record_type.unwrap_or_else(|| Arc::from("")),
                name,
                self_size: fields.self_size,
                edge_count: fields.edge_count,
                scalars: fields.scalars,
                edges,
                type_ordinal: fields.type_ordinal,
                name_ordinal: fields.name_raw,
            });
        }

        debug!(
            nodes = nodes.len(),
            edges = cursor.edges_read,
            edge_slots = cursor.slot,
            "Decoded heap snapshot"
        );

        Ok(DecodedSnapshot { schema, nodes })
    }

    fn decode_edge(
        schema: &SnapshotSchema,
        values: &[u64],
        edge_index: u64,
        stamped: u64,
        numeric_names: &[bool],
    ) -> SnapshotResult<HeapEdge> {
        let fields = read_record(&schema.edges, values, edge_index)?;

        let numeric = usize::try_from(fields.type_ordinal)
            .ok()
            .and_then(|t| numeric_names.get(t))
            .copied()
            .unwrap_or(false);
        let name_or_index = if numeric {
            EdgeName::Index(fields.name_raw)
        } else {
            EdgeName::Named {
                ordinal: fields.name_raw,
                value: schema.resolve_string(fields.name_raw, RecordKind::Edge, edge_index)?,
            }
        };

        Ok(HeapEdge {
            index: stamped,
            edge_type: fields.record_type.unwrap_or_else(|| Arc::from("")),
            name_or_index,
            to_node: fields.to_node,
            scalars: fields.scalars,
            type_ordinal: fields.type_ordinal,
        })
    }

    /// Per edge-type ordinal: does position 1 hold a raw ordinal?
    fn numeric_name_mask(&self, edges: &RecordLayout) -> Vec<bool> {
        edges
            .types()
            .iter()
            .map(|t| self.config.numeric_name_edge_types.iter().any(|n| **n == **t))
            .collect()
    }
}

impl SnapshotDecoderPort for SnapshotDecoder {
    fn decode(&self, raw: &RawSnapshot) -> SnapshotResult<Vec<HeapNode>> {
        self.decode_snapshot(raw).map(|decoded| decoded.nodes)
    }

    fn name(&self) -> &'static str {
        "positional"
    }
}
