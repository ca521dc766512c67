//! Benchmarks for navigation building and traversal.

#![allow(clippy::format_push_string)] // Benchmark setup code, performance not critical

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use docnav_navigation::{BuildOptions, MarkdownFileFactory, Navigation, NavigationBuilder};
use docnav_storage::MockStorage;
use docnav_toc::DiagnosticsCollector;

/// Create a documentation set with `sections` folders of `pages` files each.
///
/// Even sections list their children explicitly, odd sections are discovered.
fn create_docset(sections: usize, pages: usize) -> MockStorage {
    let mut docset = String::from("project: Bench\ntoc:\n  - file: index.md\n");
    let mut storage = MockStorage::new().with_file("index.md", "# Home");

    for s in 0..sections {
        docset.push_str(&format!("  - folder: section-{s}\n"));
        if s % 2 == 0 {
            docset.push_str("    children:\n");
        }
        storage = storage.with_file(format!("section-{s}/index.md"), format!("# Section {s}"));
        for p in 0..pages {
            if s % 2 == 0 {
                docset.push_str(&format!("      - file: page-{p}.md\n"));
            }
            storage = storage.with_file(
                format!("section-{s}/page-{p}.md"),
                format!("---\ntitle: Page {s}.{p}\n---\n\nContent."),
            );
        }
    }

    storage.with_file("docset.yml", docset)
}

fn build(storage: &MockStorage) -> Navigation {
    let factory = MarkdownFileFactory::new(storage, "bench");
    let mut diagnostics = DiagnosticsCollector::new();
    NavigationBuilder::new(storage, &factory, BuildOptions::default())
        .build(&mut diagnostics)
        .unwrap()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("navigation_build");

    for (sections, pages) in [(10, 10), (50, 20), (100, 50)] {
        let storage = create_docset(sections, pages);
        group.bench_with_input(
            BenchmarkId::new("docset", format!("{sections}s_{pages}p")),
            &storage,
            |b, storage| b.iter(|| build(storage)),
        );
    }

    group.finish();
}

fn bench_traversal(c: &mut Criterion) {
    let storage = create_docset(100, 50);
    let navigation = build(&storage);

    let mut group = c.benchmark_group("navigation_traversal");

    group.bench_function("lookup_hit", |b| {
        b.iter(|| navigation.lookup("bench://section-42/page-17.md"));
    });

    group.bench_function("lookup_miss", |b| {
        b.iter(|| navigation.lookup("bench://nonexistent.md"));
    });

    group.bench_function("next", |b| {
        b.iter(|| navigation.next("bench://section-42/page-17.md"));
    });

    group.bench_function("previous_across_section", |b| {
        b.iter(|| navigation.previous("bench://section-43/index.md"));
    });

    group.bench_function("breadcrumbs", |b| {
        b.iter(|| navigation.breadcrumbs("bench://section-99/page-49.md"));
    });

    group.bench_function("nav_tree", |b| b.iter(|| navigation.nav_tree()));

    group.finish();
}

criterion_group!(benches, bench_build, bench_traversal);
criterion_main!(benches);
