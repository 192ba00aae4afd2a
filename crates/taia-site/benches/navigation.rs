//! Benchmarks for page tree building and navigation rendering.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use taia_site::{AncestorTrail, FullTree, PageTree, SiteUrls, render_nav};
use taia_store::{Entry, RecordStore};

/// Create a hierarchy with specified depth and breadth below one master page.
fn create_entries(depth: usize, breadth: usize) -> Vec<Entry> {
    let mut entries = vec![Entry::new("Root")];
    let mut level = vec!["Root".to_owned()];

    for d in 1..=depth {
        let mut next = Vec::new();
        for parent in &level {
            for i in 0..breadth {
                let title = format!("{parent} {d}-{i}");
                entries.push(Entry::new(title.clone()).with_parent(parent.clone()));
                next.push(title);
            }
        }
        level = next;
    }

    entries
}

fn deepest(depth: usize) -> String {
    (1..=depth).fold("Root".to_owned(), |acc, d| format!("{acc} {d}-0"))
}

fn bench_tree_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_build");

    for (depth, breadth) in [(3, 5), (5, 3), (200, 1)] {
        let store = RecordStore::new(create_entries(depth, breadth)).unwrap();
        group.bench_with_input(
            BenchmarkId::new("depth_breadth", format!("{depth}x{breadth}")),
            &store,
            |b, store| b.iter(|| PageTree::build(store).unwrap()),
        );
    }

    group.finish();
}

fn bench_navigation(c: &mut Criterion) {
    let store = RecordStore::new(create_entries(5, 3)).unwrap();
    let tree = PageTree::build(&store).unwrap();
    let urls = SiteUrls::new(&store);
    let leaf = deepest(5);

    let mut group = c.benchmark_group("navigation");

    group.bench_function("trail_leaf", |b| {
        b.iter(|| render_nav(&tree, &urls, &AncestorTrail, Some(leaf.as_str())));
    });

    group.bench_function("trail_root", |b| {
        b.iter(|| render_nav(&tree, &urls, &AncestorTrail, Some("Root")));
    });

    group.bench_function("full_tree", |b| {
        b.iter(|| render_nav(&tree, &urls, &FullTree::default(), None));
    });

    group.finish();
}

criterion_group!(benches, bench_tree_build, bench_navigation);
criterion_main!(benches);
