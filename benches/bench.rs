use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::StatefulWidget;
use tui_view_hierarchy::{snapshot, Element, Frame, Hierarchy, HierarchyState, TreeDataSource};

/// Every element has `width` children until `depth` is reached.
fn wide_tree(width: usize, depth: usize) -> Element {
    let frame = Frame::new(0.0, 0.0, 100.0, 100.0);
    let mut element = Element::new(format!("UIView depth {depth}"), frame);
    if depth > 0 {
        for _ in 0..width {
            element.add_child(wide_tree(width, depth - 1));
        }
    }
    element
}

fn deep_tree(depth: usize) -> Element {
    let frame = Frame::new(0.0, 0.0, 100.0, 100.0);
    let mut element = Element::new("UIView", frame);
    for _ in 0..depth {
        element = Element::new("UIView", frame).with_children(vec![element]);
    }
    element
}

fn init(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("init");

    let single = Element::new("UIWindow", Frame::default());
    group.bench_function("single", |bencher| {
        bencher.iter(|| black_box(TreeDataSource::new(black_box(&single))));
    });

    let wide = wide_tree(8, 4);
    group.throughput(Throughput::Elements(
        TreeDataSource::new(&wide).node_count() as u64,
    ));
    group.bench_function("wide", |bencher| {
        bencher.iter(|| black_box(TreeDataSource::new(black_box(&wide))));
    });

    let deep = deep_tree(2_000);
    group.throughput(Throughput::Elements(2_001));
    group.bench_function("deep", |bencher| {
        bencher.iter(|| black_box(TreeDataSource::new(black_box(&deep))));
    });

    group.finish();
}

fn toggle(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("toggle");
    group.throughput(Throughput::Elements(2));

    let wide = wide_tree(8, 4);
    let source = TreeDataSource::new(&wide);
    group.bench_function("collapse-expand-first-child", |bencher| {
        bencher.iter_batched(
            || source.clone(),
            |mut source| {
                source.toggle_collapsed(black_box(1)).unwrap();
                source.toggle_collapsed(black_box(1)).unwrap();
                source
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

fn renders(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("render");
    group.throughput(Throughput::Elements(1)); // Frames per second

    let buffer_size = Rect::new(0, 0, 100, 100);

    let wide = wide_tree(8, 4);
    let source = TreeDataSource::new(&wide);
    group.bench_function("wide", |bencher| {
        bencher.iter_batched(
            HierarchyState::default,
            |mut state| {
                let mut buffer = Buffer::empty(buffer_size);
                let widget = Hierarchy::new(black_box(&source), snapshot::row);
                widget.render(buffer_size, black_box(&mut buffer), &mut state);
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("wide-last-selected", |bencher| {
        bencher.iter_batched(
            || {
                let mut state = HierarchyState::default();
                state.select_last(&source);
                state
            },
            |mut state| {
                let mut buffer = Buffer::empty(buffer_size);
                let widget = Hierarchy::new(black_box(&source), snapshot::row);
                widget.render(buffer_size, black_box(&mut buffer), &mut state);
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

/// Create flamegraphs with `cargo bench --bench bench -- --profile-time=5`
#[cfg(unix)]
fn profiled() -> Criterion {
    use pprof::criterion::{Output, PProfProfiler};
    Criterion::default().with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)))
}
#[cfg(not(unix))]
fn profiled() -> Criterion {
    Criterion::default()
}

criterion_group! {
    name = benches;
    config = profiled();
    targets = init, toggle, renders
}
criterion_main!(benches);
