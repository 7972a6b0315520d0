//! Snapshot fixtures
//!
//! Small graphs built with the public record builder, plus one hand-written
//! V8 document to exercise JSON loading.

use heapgraph_ir::features::snapshot_decoding::{RawSnapshot, SnapshotDecoder, SnapshotRecordBuilder};
use heapgraph_ir::HeapGraph;

/// A(10) → B(20) → C(30)
pub fn fixture_chain() -> RawSnapshot {
    let mut b = SnapshotRecordBuilder::new();
    let a = b.add_object("A", 10);
    let bb = b.add_object("B", 20);
    let c = b.add_object("C", 30);
    b.add_property(a, "b", bb);
    b.add_property(bb, "c", c);
    b.build()
}

/// A(10) → B(20) → A
pub fn fixture_cycle() -> RawSnapshot {
    let mut b = SnapshotRecordBuilder::new();
    let a = b.add_object("A", 10);
    let bb = b.add_object("B", 20);
    b.add_property(a, "b", bb);
    b.add_property(bb, "a", a);
    b.build()
}

/// A(10) → ghost (no such node), A → C(30)
pub fn fixture_dangling() -> RawSnapshot {
    let mut b = SnapshotRecordBuilder::new();
    let a = b.add_object("A", 10);
    let c = b.add_object("C", 30);
    b.add_property(a, "ghost", 404);
    b.add_property(a, "c", c);
    b.build()
}

/// root(1) → left(2) → leaf(4), root → right(3) → leaf
pub fn fixture_diamond() -> RawSnapshot {
    let mut b = SnapshotRecordBuilder::new();
    let root = b.add_object("root", 1);
    let left = b.add_object("left", 2);
    let right = b.add_object("right", 3);
    let leaf = b.add_object("leaf", 4);
    b.add_property(root, "l", left);
    b.add_property(root, "r", right);
    b.add_property(left, "x", leaf);
    b.add_property(right, "x", leaf);
    b.build()
}

/// `layers` layers of `width` nodes, every node linked to every node of the
/// next layer. Branch count from a first-layer node is `width^(layers-1)`.
pub fn fixture_layered(layers: usize, width: usize) -> RawSnapshot {
    let mut b = SnapshotRecordBuilder::new();
    let mut previous: Vec<u64> = Vec::new();
    for layer in 0..layers {
        let current: Vec<u64> = (0..width)
            .map(|i| b.add_object(&format!("L{layer}N{i}"), (layer * width + i) as u64 + 1))
            .collect();
        for &from in &previous {
            for &to in &current {
                b.add_property(from, "next", to);
            }
        }
        previous = current;
    }
    b.build()
}

/// Hand-written V8 snapshot: a closure holding an array with two elements
/// and a hidden link to a native object. Extra top-level keys are ignored.
pub const V8_SNAPSHOT_JSON: &str = r#"{
  "snapshot": {
    "meta": {
      "node_fields": ["type","name","id","self_size","edge_count","trace_node_id","detachedness"],
      "node_types": [["hidden","array","string","object","code","closure","regexp","number","native","synthetic","concatenated string","sliced string","symbol","bigint"],"string","number","number","number","number","number"],
      "edge_fields": ["type","name_or_index","to_node"],
      "edge_types": [["context","element","property","internal","hidden","shortcut","weak"],"string_or_number","node"],
      "location_fields": ["object_index","script_id","line","column"]
    },
    "node_count": 5,
    "edge_count": 4,
    "trace_function_count": 0
  },
  "nodes": [
    5,0,1,32,2,0,0,
    1,1,3,16,2,0,0,
    3,2,5,24,0,0,0,
    3,2,7,24,0,0,0,
    8,3,9,100,0,0,0
  ],
  "edges": [
    2,4,1,
    4,0,4,
    1,0,2,
    1,1,3
  ],
  "trace_function_infos": [],
  "trace_tree": [],
  "samples": [],
  "locations": [],
  "strings": ["makeList","(array)","Item","native_buffer","items"]
}"#;

pub fn fixture_v8_json() -> RawSnapshot {
    RawSnapshot::from_json_str(V8_SNAPSHOT_JSON).expect("fixture JSON parses")
}

/// Decode with the default decoder and wrap in a graph
pub fn decode_graph(raw: &RawSnapshot) -> HeapGraph {
    let decoded = SnapshotDecoder::default()
        .decode_snapshot(raw)
        .expect("fixture decodes");
    HeapGraph::new(decoded.nodes)
}
