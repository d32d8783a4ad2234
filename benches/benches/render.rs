// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use arbor_events::{INDICATOR_HIT_RADIUS, indicator_at, node_at};
use arbor_imaging::RecordingSurface;
use arbor_layout::{LayoutConfig, LayoutEngine, LayoutKind};
use arbor_render::RenderEngine;
use arbor_tree::{Node, Theme};
use arbor_view::ViewTransform;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size};

fn laid_out(fanout: usize, depth: usize, theme: &Theme) -> Node {
    fn build(id: &mut usize, fanout: usize, depth: usize) -> Node {
        let n = *id;
        *id += 1;
        let mut node = Node::new(format!("n{n}"), format!("Topic number {n} with some words"));
        if depth > 0 {
            node.children = (0..fanout).map(|_| build(id, fanout, depth - 1)).collect();
        }
        node
    }
    let mut root = build(&mut 0, fanout, depth);
    LayoutEngine::new(LayoutConfig::new(LayoutKind::Mindmap)).layout(&mut root, theme);
    root
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render/frame");
    let theme = Theme::default();
    let view = ViewTransform::new(Size::new(1280.0, 800.0));

    for (fanout, depth) in [(4usize, 3usize), (4, 5)] {
        let root = laid_out(fanout, depth, &theme);
        let count = root.count();
        group.throughput(Throughput::Elements(count as u64));

        // Warm: wrapped labels come from the cache after the first frame.
        let mut engine = RenderEngine::new();
        let mut surface = RecordingSurface::default();
        group.bench_with_input(BenchmarkId::new("warm", count), &root, |b, root| {
            b.iter(|| {
                surface.reset();
                engine.render(root, &theme, &view, &mut surface);
                black_box(surface.commands().len());
            });
        });

        group.bench_with_input(BenchmarkId::new("cold", count), &root, |b, root| {
            b.iter(|| {
                surface.reset();
                engine.invalidate_cache();
                engine.render(root, &theme, &view, &mut surface);
                black_box(surface.commands().len());
            });
        });
    }

    group.finish();
}

fn bench_hit_test(c: &mut Criterion) {
    let mut group = c.benchmark_group("render/hit_test");
    let theme = Theme::default();
    let root = laid_out(4, 5, &theme);
    let targets: Vec<Point> = root.descendants().iter().filter_map(|n| n.position()).collect();
    group.throughput(Throughput::Elements(targets.len() as u64));

    group.bench_function("node_at", |b| {
        b.iter(|| {
            for &p in &targets {
                black_box(node_at(&root, p));
            }
        });
    });
    group.bench_function("indicator_at", |b| {
        b.iter(|| {
            for &p in &targets {
                black_box(indicator_at(&root, p, INDICATOR_HIT_RADIUS));
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_render, bench_hit_test);
criterion_main!(benches);
