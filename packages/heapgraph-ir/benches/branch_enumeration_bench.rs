//! Branch enumeration benchmarks
//!
//! Layered graphs (every node linked to every node of the next layer) give a
//! branch count of `width^(layers-1)` per first-layer node, which makes the
//! exponential cost easy to dial in.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use heapgraph_ir::features::snapshot_decoding::{RawSnapshot, SnapshotDecoder, SnapshotRecordBuilder};
use heapgraph_ir::{AggregationStrategy, BranchEnumerator, HeapGraph, RetainedSizeCalculator};

fn layered(layers: usize, width: usize) -> RawSnapshot {
    let mut b = SnapshotRecordBuilder::new();
    let mut previous: Vec<u64> = Vec::new();
    for layer in 0..layers {
        let current: Vec<u64> = (0..width)
            .map(|i| b.add_object(&format!("L{layer}N{i}"), (i + 1) as u64))
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

fn graph(raw: &RawSnapshot) -> HeapGraph {
    match SnapshotDecoder::default().decode_snapshot(raw) {
        Ok(decoded) => HeapGraph::new(decoded.nodes),
        Err(e) => panic!("benchmark fixture failed to decode: {e}"),
    }
}

// ============================================================================
// Decoding
// ============================================================================

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    for width in [16, 64, 128] {
        let raw = layered(8, width);
        group.throughput(Throughput::Elements((8 * width) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(width), &raw, |b, raw| {
            b.iter(|| black_box(SnapshotDecoder::default().decode_snapshot(raw)))
        });
    }

    group.finish();
}

// ============================================================================
// Enumeration
// ============================================================================

fn bench_enumerate_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("enumerate_all");

    for (layers, width) in [(4, 4), (6, 4), (5, 6)] {
        let g = graph(&layered(layers, width));
        let enumerator = BranchEnumerator::unbounded();
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{layers}x{width}")),
            &g,
            |b, g| b.iter(|| black_box(enumerator.enumerate_all(g))),
        );
    }

    group.finish();
}

fn bench_deep_chain(c: &mut Criterion) {
    let g = graph(&layered(50_000, 1));
    let enumerator = BranchEnumerator::unbounded();
    c.bench_function("enumerate_deep_chain_head", |b| {
        b.iter(|| black_box(enumerator.enumerate_subset(&g, &[0])))
    });
}

// ============================================================================
// Retained size
// ============================================================================

fn bench_retained_sizes(c: &mut Criterion) {
    let g = graph(&layered(6, 4));
    let branches = BranchEnumerator::unbounded().enumerate_all(&g).branches;
    let mut group = c.benchmark_group("retained_sizes");
    group.throughput(Throughput::Elements(branches.len() as u64));

    for strategy in AggregationStrategy::ALL {
        let calculator = RetainedSizeCalculator::new(strategy);
        group.bench_function(strategy.as_str(), |b| {
            b.iter(|| black_box(calculator.retained_sizes(g.nodes(), &branches)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_decode,
    bench_enumerate_all,
    bench_deep_chain,
    bench_retained_sizes
);
criterion_main!(benches);
