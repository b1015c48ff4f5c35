use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::StatefulWidget;
use tui_index_tree::{IndexTreeModel, Tree, TreeElement, TreeRow, TreeState, Visibility};

type Model = IndexTreeModel<u32, Vec<TreeRow<u32>>>;

/// `width` children per node, `depth` levels deep.
fn generated(depth: u32, width: u32, next: &mut u32) -> Vec<TreeElement<u32>> {
    (0..width)
        .map(|_| {
            let element = *next;
            *next += 1;
            let children = if depth > 1 {
                generated(depth - 1, width, next)
            } else {
                Vec::new()
            };
            TreeElement::new(element, children)
        })
        .collect()
}

fn example_items() -> Vec<TreeElement<u32>> {
    generated(3, 4, &mut 0)
}

fn large_items() -> Vec<TreeElement<u32>> {
    generated(4, 12, &mut 0)
}

fn build(items: Vec<TreeElement<u32>>) -> Model {
    let mut model = IndexTreeModel::new(Vec::new());
    model.splice(&[0], 0, items).unwrap();
    model
}

fn init(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("init");
    group.throughput(Throughput::Elements(1));

    group.bench_function("empty", |bencher| {
        bencher.iter(|| black_box(build(black_box(Vec::new()))));
    });

    group.bench_function("example-items", |bencher| {
        bencher.iter_batched(
            example_items,
            |items| black_box(build(black_box(items))),
            BatchSize::SmallInput,
        );
    });

    group.bench_function("large-items", |bencher| {
        bencher.iter_batched(
            large_items,
            |items| black_box(build(black_box(items))),
            BatchSize::LargeInput,
        );
    });

    group.finish();
}

fn mutations(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("mutate");
    group.throughput(Throughput::Elements(1));

    let mut model = build(large_items());
    group.bench_function("toggle-collapsed", |bencher| {
        bencher.iter(|| {
            model.toggle_collapsed(black_box(&[5, 3])).unwrap();
        });
    });

    group.bench_function("splice-leaf", |bencher| {
        bencher.iter(|| {
            model
                .splice(black_box(&[7, 2, 0]), 0, [TreeElement::new_leaf(0)])
                .unwrap();
            model.splice(black_box(&[7, 2, 0]), 1, []).unwrap();
        });
    });

    model.set_filter(|element: &u32| {
        if element % 7 == 0 {
            Visibility::Visible
        } else {
            Visibility::Recurse
        }
    });
    group.bench_function("refilter", |bencher| {
        bencher.iter(|| model.refilter());
    });

    group.finish();
}

fn renders(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("render");
    group.throughput(Throughput::Elements(1)); // Frames per second

    let buffer_size = Rect::new(0, 0, 100, 100);

    let model = build(Vec::new());
    group.bench_function("empty", |bencher| {
        bencher.iter_batched(
            TreeState::default,
            |mut state| {
                let mut buffer = Buffer::empty(buffer_size);
                black_box(Tree::new(model.sink())).render(
                    buffer_size,
                    black_box(&mut buffer),
                    &mut state,
                );
            },
            BatchSize::SmallInput,
        );
    });

    let model = build(large_items());
    group.bench_function("large-items", |bencher| {
        bencher.iter_batched(
            || {
                let mut state = TreeState::default();
                state.select(Some(500));
                state
            },
            |mut state| {
                let mut buffer = Buffer::empty(buffer_size);
                black_box(Tree::new(model.sink())).render(
                    buffer_size,
                    black_box(&mut buffer),
                    &mut state,
                );
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
    targets = init, mutations, renders
}
criterion_main!(benches);
