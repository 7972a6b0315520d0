//! Flat-array encoder
//!
//! Inverse of the decoder: rebuilds the flat node and edge arrays from
//! decoded records using the schema they were decoded with. Type and name
//! fields are written back from the ordinals preserved at decode time, so
//! duplicate string-table entries survive the round trip.

use serde::Serialize;

use crate::features::snapshot_decoding::domain::{FieldSlot, SnapshotSchema};
use crate::shared::models::{HeapEdge, HeapNode, ScalarField};

/// Flat arrays in snapshot layout
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EncodedArrays {
    pub nodes: Vec<u64>,
    pub edges: Vec<u64>,
}

pub struct SnapshotEncoder;

impl SnapshotEncoder {
    /// Re-derive the flat arrays field by field.
    ///
    /// Node `edge_count` is written as decoded; it matches the edges
    /// written only when the caller has not modified the node.
    pub fn encode(schema: &SnapshotSchema, nodes: &[HeapNode]) -> EncodedArrays {
        let mut out = EncodedArrays {
            nodes: Vec::with_capacity(nodes.len() * schema.nodes.field_len()),
            edges: Vec::new(),
        };

        for node in nodes {
            let mut scalars = node.scalars.iter();
            for slot in schema.nodes.slots() {
                out.nodes.push(match slot {
                    FieldSlot::Type => node.type_ordinal,
                    FieldSlot::Name => node.name_ordinal,
                    FieldSlot::SelfSize => node.self_size,
                    FieldSlot::EdgeCount => node.edge_count,
                    FieldSlot::ToNode => 0,
                    FieldSlot::Scalar(_) => next_scalar(&mut scalars),
                });
            }

            for edge in &node.edges {
                Self::encode_edge(schema, edge, &mut out.edges);
            }
        }

        out
    }

    fn encode_edge(schema: &SnapshotSchema, edge: &HeapEdge, out: &mut Vec<u64>) {
        let mut scalars = edge.scalars.iter();
        for slot in schema.edges.slots() {
            out.push(match slot {
                FieldSlot::Type => edge.type_ordinal,
                FieldSlot::Name => edge.name_or_index.raw(),
                FieldSlot::ToNode => edge.to_node,
                FieldSlot::SelfSize | FieldSlot::EdgeCount => 0,
                FieldSlot::Scalar(_) => next_scalar(&mut scalars),
            });
        }
    }
}

fn next_scalar<'a>(scalars: &mut impl Iterator<Item = &'a ScalarField>) -> u64 {
    scalars.next().map(|f| f.value).unwrap_or(0)
}
