// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use arbor_layout::{LayoutConfig, LayoutEngine, LayoutKind};
use arbor_tree::{Node, Theme};
use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};

/// Complete tree with `fanout` children per node, `depth` levels below the root.
fn balanced(fanout: usize, depth: usize) -> Node {
    fn build(id: &mut usize, fanout: usize, depth: usize) -> Node {
        let n = *id;
        *id += 1;
        let mut node = Node::new(format!("n{n}"), format!("Topic number {n}"));
        if depth > 0 {
            node.children = (0..fanout).map(|_| build(id, fanout, depth - 1)).collect();
        }
        node
    }
    build(&mut 0, fanout, depth)
}

fn bench_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout/strategy");
    let theme = Theme::default();

    for (fanout, depth) in [(4usize, 3usize), (4, 5), (8, 4)] {
        let tree = balanced(fanout, depth);
        let count = tree.count();
        group.throughput(Throughput::Elements(count as u64));

        for kind in [
            LayoutKind::TreeRight,
            LayoutKind::Mindmap,
            LayoutKind::Radial,
            LayoutKind::OrgChart,
        ] {
            let engine = LayoutEngine::new(LayoutConfig::new(kind));
            group.bench_with_input(
                BenchmarkId::new(format!("{kind:?}"), count),
                &tree,
                |b, tree| {
                    b.iter_batched(
                        || tree.clone(),
                        |mut root| {
                            engine.layout(&mut root, &theme);
                            black_box(root);
                        },
                        BatchSize::LargeInput,
                    );
                },
            );
        }
    }

    group.finish();
}

fn bench_preserved(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout/preserve_position");
    let theme = Theme::default();

    // A laid-out tree should short-circuit to sizing only.
    let config = LayoutConfig {
        preserve_position: true,
        ..LayoutConfig::new(LayoutKind::Mindmap)
    };
    let engine = LayoutEngine::new(config);
    let mut tree = balanced(4, 5);
    engine.layout(&mut tree, &theme);
    group.throughput(Throughput::Elements(tree.count() as u64));

    group.bench_function("relayout", |b| {
        b.iter_batched(
            || tree.clone(),
            |mut root| {
                engine.layout(&mut root, &theme);
                black_box(root);
            },
            BatchSize::LargeInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_strategies, bench_preserved);
criterion_main!(benches);
