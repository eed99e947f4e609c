//! Single-key insert benchmarks.
//!
//! Covers the three cost regimes of `add`:
//!
//! 1. **First occurrence**: probe + arena copy (and occasional growth)
//! 2. **Repeat occurrence**: probe + counter bump, no allocation
//! 3. **Budget-limited**: the accounting overhead of a byte budget
//!
//! Latency targets on a modern x86-64 host: tens of nanoseconds per
//! repeat insert, well under 200ns per first occurrence away from growth
//! points.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tallycraft::WordTally;

mod common;
use common::*;

/// Insert latency while the unique-key population grows.
///
/// Cycling through a pre-generated word list means the first pass is all
/// first-occurrences and later passes are all repeats; the steady state
/// measures the repeat path over tables of different sizes.
fn bench_add_by_unique_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_by_unique_count");

    for &count in UNIQUE_COUNTS {
        let words = generate_words(count, 8);

        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            let mut tally = WordTally::new(0).unwrap();
            let mut idx = 0;

            b.iter(|| {
                tally.add(black_box(&words[idx % words.len()])).unwrap();
                idx += 1;
            });
        });
    }

    group.finish();
}

/// Pure repeat path: the same key inserted over and over.
fn bench_add_duplicate(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_duplicate");
    group.throughput(Throughput::Elements(1));

    group.bench_function("same_key", |b| {
        let mut tally = WordTally::new(0).unwrap();
        tally.add("hotkey").unwrap();

        b.iter(|| {
            tally.add(black_box("hotkey")).unwrap();
        });
    });

    group.finish();
}

/// Hashing and comparison cost scale with key length.
fn bench_add_by_key_len(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_by_key_len");

    for len in [4usize, 16, 64, 256] {
        let words = generate_words(10_000, len);

        group.throughput(Throughput::Bytes(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, &len| {
            let mut tally = WordTally::new(len).unwrap();
            let mut idx = 0;

            b.iter(|| {
                tally.add(black_box(&words[idx % words.len()])).unwrap();
                idx += 1;
            });
        });
    }

    group.finish();
}

/// Accounting overhead of running with a byte budget vs unlimited.
fn bench_add_with_budget(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_with_budget");
    group.throughput(Throughput::Elements(1));

    let words = generate_words(10_000, 8);

    group.bench_function("unlimited", |b| {
        let mut tally = WordTally::new(0).unwrap();
        let mut idx = 0;

        b.iter(|| {
            tally.add(black_box(&words[idx % words.len()])).unwrap();
            idx += 1;
        });
    });

    group.bench_function("budgeted", |b| {
        // Generous enough never to fail; measures the checks, not OOM.
        let mut tally = WordTally::builder().byte_budget(64 << 20).build().unwrap();
        let mut idx = 0;

        b.iter(|| {
            tally.add(black_box(&words[idx % words.len()])).unwrap();
            idx += 1;
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_add_by_unique_count,
    bench_add_duplicate,
    bench_add_by_key_len,
    bench_add_with_budget,
);

criterion_main!(benches);
