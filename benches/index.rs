//! Trie lookup against a linear scan of the same rows.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use citycache::index::{CityIndex, CityTrie, LinearScan};
use citycache::key::{CityKey, normalize};

const QUERIES: usize = 1_000;

fn synthetic_rows(n: usize) -> Vec<(CityKey, String)> {
    let mut rng = SmallRng::seed_from_u64(42);
    (0..n)
        .map(|i| {
            let len = rng.random_range(4..12);
            let name: String = (0..len)
                .map(|_| char::from(b'a' + rng.random_range(0..26u8)))
                .collect();
            let country = format!("c{}", i % 200);
            (normalize(&format!("{name}{i}"), &country), (i * 37).to_string())
        })
        .collect()
}

fn build<I: CityIndex + Default>(rows: &[(CityKey, String)]) -> I {
    let mut index = I::default();
    for (key, pop) in rows {
        index.insert(key.clone(), pop.clone());
    }
    index
}

// =============================================================================
// Search
// =============================================================================

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_search");
    group.throughput(Throughput::Elements(QUERIES as u64));

    for rows in [1_000usize, 10_000, 100_000] {
        let data = synthetic_rows(rows);
        let mut rng = SmallRng::seed_from_u64(7);
        let queries: Vec<CityKey> = (0..QUERIES)
            .map(|_| data[rng.random_range(0..data.len())].0.clone())
            .collect();

        let trie: CityTrie = build(&data);
        group.bench_with_input(BenchmarkId::new("trie", rows), &queries, |b, qs| {
            b.iter(|| {
                for q in qs {
                    black_box(trie.search(q));
                }
            })
        });

        let scan: LinearScan = build(&data);
        group.bench_with_input(BenchmarkId::new("linear_scan", rows), &queries, |b, qs| {
            b.iter(|| {
                for q in qs {
                    black_box(scan.search(q));
                }
            })
        });
    }
    group.finish();
}

// =============================================================================
// Build
// =============================================================================

fn bench_build(c: &mut Criterion) {
    let data = synthetic_rows(10_000);
    c.bench_function("trie_build_10k", |b| {
        b.iter(|| black_box(build::<CityTrie>(&data).node_count()))
    });
}

criterion_group!(benches, bench_search, bench_build);
criterion_main!(benches);
