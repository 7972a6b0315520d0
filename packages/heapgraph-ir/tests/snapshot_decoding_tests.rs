//! Integration tests for snapshot decoding

mod common;

use common::*;
use heapgraph_ir::config::DecoderConfig;
use heapgraph_ir::features::snapshot_decoding::{
    RecordKind, SnapshotDecoder, SnapshotEncoder, SnapshotError, SnapshotRecordBuilder,
};
use heapgraph_ir::shared::models::EdgeName;
use pretty_assertions::assert_eq;

#[test]
fn test_chain_decodes_three_nodes() {
    let decoded = SnapshotDecoder::default().decode_snapshot(&fixture_chain()).unwrap();
    let nodes = &decoded.nodes;

    assert_eq!(nodes.len(), 3);
    assert_eq!(nodes.iter().map(|n| n.index).collect::<Vec<_>>(), vec![0, 1, 2]);
    assert_eq!(nodes.iter().map(|n| n.self_size).collect::<Vec<_>>(), vec![10, 20, 30]);
    assert_eq!(nodes[0].edges.len(), 1);
    assert_eq!(nodes[0].edges[0].to_node, 1);
    assert_eq!(nodes[1].edges.len(), 1);
    assert_eq!(nodes[1].edges[0].to_node, 2);
    assert!(nodes[2].edges.is_empty());
}

#[test]
fn test_v8_document_decodes() {
    let decoded = SnapshotDecoder::default().decode_snapshot(&fixture_v8_json()).unwrap();
    let nodes = &decoded.nodes;

    assert_eq!(nodes.len(), 5);
    assert_eq!(&*nodes[0].node_type, "closure");
    assert_eq!(&*nodes[0].name, "makeList");
    assert_eq!(nodes[0].id(), Some(1));
    assert_eq!(nodes[4].scalar("detachedness"), Some(0));
    assert_eq!(&*nodes[4].node_type, "native");

    let items = &nodes[0].edges[0];
    assert_eq!(&*items.edge_type, "property");
    assert_eq!(items.name_or_index.as_str(), Some("items"));

    let hidden = &nodes[0].edges[1];
    assert_eq!(&*hidden.edge_type, "hidden");
    assert_eq!(hidden.name_or_index, EdgeName::Index(0));

    let elements: Vec<_> = nodes[1].edges.iter().map(|e| e.name_or_index.raw()).collect();
    assert_eq!(elements, vec![0, 1]);
    assert_eq!(decoded.edge_count(), 4);
}

#[test]
fn test_edge_index_is_last_field_slot() {
    let decoded = SnapshotDecoder::default().decode_snapshot(&fixture_v8_json()).unwrap();
    let indexes: Vec<u64> = decoded
        .nodes
        .iter()
        .flat_map(|n| n.edges.iter().map(|e| e.index))
        .collect();
    assert_eq!(indexes, vec![2, 5, 8, 11]);
}

#[test]
fn test_literal_name_rule_without_numeric_types() {
    // "element" edges in the fixture carry 0 and 1, both valid string indexes
    let decoder = SnapshotDecoder::new(
        DecoderConfig::default().numeric_name_edge_types(Vec::<String>::new()),
    );
    let decoded = decoder.decode_snapshot(&fixture_v8_json()).unwrap();
    assert_eq!(decoded.nodes[1].edges[0].name_or_index.as_str(), Some("makeList"));
    assert_eq!(decoded.nodes[1].edges[1].name_or_index.as_str(), Some("(array)"));
}

#[test]
fn test_json_with_missing_strings() {
    let json = V8_SNAPSHOT_JSON.replace("\"strings\"", "\"unused_strings\"");
    let raw = heapgraph_ir::RawSnapshot::from_json_str(&json).unwrap();
    assert_eq!(
        SnapshotDecoder::default().decode_snapshot(&raw).unwrap_err(),
        SnapshotError::MissingSection("strings")
    );
}

#[test]
fn test_truncated_nodes_abort_decode() {
    let raw = SnapshotRecordBuilder::new()
        .object("A", 1)
        .declared_node_count(3)
        .build();
    let err = SnapshotDecoder::default().decode_snapshot(&raw).unwrap_err();
    assert_eq!(
        err,
        SnapshotError::Truncated {
            section: "nodes",
            required: 21,
            actual: 7,
        }
    );
}

#[test]
fn test_truncated_edges_abort_decode() {
    let mut raw = fixture_chain();
    if let Some(edges) = raw.edges.as_mut() {
        edges.pop();
    }
    let err = SnapshotDecoder::default().decode_snapshot(&raw).unwrap_err();
    assert!(matches!(err, SnapshotError::Truncated { section: "edges", .. }));
}

#[test]
fn test_string_index_out_of_range() {
    let mut raw = fixture_chain();
    if let Some(nodes) = raw.nodes.as_mut() {
        nodes[1] = 500;
    }
    let err = SnapshotDecoder::default().decode_snapshot(&raw).unwrap_err();
    assert_eq!(
        err,
        SnapshotError::StringOutOfRange {
            record: RecordKind::Node,
            record_index: 0,
            value: 500,
            table_len: 5,
        }
    );
}

#[test]
fn test_round_trip_reproduces_arrays() {
    for raw in [fixture_chain(), fixture_diamond(), fixture_dangling(), fixture_v8_json()] {
        let decoded = SnapshotDecoder::default().decode_snapshot(&raw).unwrap();
        let encoded = SnapshotEncoder::encode(&decoded.schema, &decoded.nodes);
        assert_eq!(Some(encoded.nodes), raw.nodes);
        assert_eq!(Some(encoded.edges), raw.edges);
    }
}
