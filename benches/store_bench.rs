//! Benchmarks for store filters and submissions
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use request_pro::storage::{LineItem, MemoryBackend, Store, DEFAULT_STORAGE_KEY};
use request_pro::view::render_admin;

fn create_test_store(count: usize) -> Store {
    let mut store = Store::load(MemoryBackend::new(), DEFAULT_STORAGE_KEY).unwrap();
    for i in 0..count {
        store
            .submit_request(
                "Bench",
                vec![LineItem::new("Pen", "3"), LineItem::new("Paper", "10")],
                format!("user{}@corp.com", i % 50),
            )
            .unwrap();
    }
    store
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");

    for size in [100, 1000, 10000] {
        let store = create_test_store(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("search_requests_{}", size), |b| {
            b.iter(|| store.search_requests(black_box("USER7")).len())
        });

        group.bench_function(format!("render_admin_{}", size), |b| {
            b.iter(|| render_admin(&store, black_box("user7")).rows.len())
        });
    }

    group.finish();
}

fn bench_submit(c: &mut Criterion) {
    let mut group = c.benchmark_group("submit");

    group.bench_function("submit_request", |b| {
        let mut store = create_test_store(100);
        b.iter(|| {
            store
                .submit_request(
                    black_box("Bench"),
                    vec![LineItem::new("Pen", "1")],
                    "bench@corp.com",
                )
                .unwrap()
        });
    });

    group.finish();
}

criterion_group!(benches, bench_search, bench_submit);
criterion_main!(benches);
