//! Benchmarks for navigation indexing and lookups.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use shelf_nav::{ExpandState, NavIndex, NavTree, NavigationNode, SlugResolver};

/// Build a tree with the given depth and breadth.
fn create_tree(depth: usize, breadth: usize) -> NavTree {
    fn create_level(
        prefix: &str,
        current_depth: usize,
        max_depth: usize,
        breadth: usize,
    ) -> Vec<NavigationNode> {
        (0..breadth)
            .map(|i| {
                let slug = format!("{prefix}/section-{i}");
                if current_depth == max_depth {
                    NavigationNode::page(format!("Page {i}"), format!("content/docs{slug}.mdx"))
                } else {
                    NavigationNode::group(
                        format!("Section {i}"),
                        create_level(&slug, current_depth + 1, max_depth, breadth),
                    )
                }
            })
            .collect()
    }

    NavTree::new(create_level("", 1, depth, breadth))
}

fn bench_index_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("nav_index_build");
    let resolver = SlugResolver::default();

    for (depth, breadth) in [(2, 10), (3, 10), (4, 6)] {
        let tree = create_tree(depth, breadth);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{depth}x{breadth}")),
            &tree,
            |b, tree| b.iter(|| NavIndex::new(tree, &resolver)),
        );
    }

    group.finish();
}

fn bench_lookups(c: &mut Criterion) {
    let index = NavIndex::new(&create_tree(4, 6), &SlugResolver::default());
    let path = "/docs/section-3/section-2/section-5/section-1";
    let expand = ExpandState::new();

    let mut group = c.benchmark_group("nav_lookup");

    group.bench_function("breadcrumbs", |b| b.iter(|| index.breadcrumbs(path)));
    group.bench_function("breadcrumbs_miss", |b| b.iter(|| index.breadcrumbs("/docs/missing")));
    group.bench_function("active", |b| b.iter(|| index.active(path, &expand)));
    group.bench_function("neighbors", |b| b.iter(|| index.neighbors(path)));

    group.finish();
}

criterion_group!(benches, bench_index_build, bench_lookups);
criterion_main!(benches);
