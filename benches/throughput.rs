//! Throughput Benchmark for Guppy
//!
//! This benchmark measures the cost of parsing lines and of processing
//! complete requests through the database.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use guppy::database::Database;
use guppy::protocol::parse_query;

/// Benchmark the parser alone
fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    group.throughput(Throughput::Elements(1));

    group.bench_function("parse_set", |b| {
        b.iter(|| black_box(parse_query(black_box("SET weather_2_pm cold_moscow_weather"))));
    });

    group.bench_function("parse_get_spaced", |b| {
        b.iter(|| black_box(parse_query(black_box("  GET    /etc/nginx/config   "))));
    });

    group.bench_function("parse_bad_symbol", |b| {
        b.iter(|| black_box(parse_query(black_box("GET a,b"))));
    });

    let long_value = format!("SET key {}", "x".repeat(4096));
    group.bench_function("parse_set_4k_value", |b| {
        b.iter(|| black_box(parse_query(black_box(&long_value))));
    });

    group.finish();
}

/// Benchmark SET requests end to end
fn bench_set(c: &mut Criterion) {
    let mut db = Database::in_memory();

    let mut group = c.benchmark_group("set");
    group.throughput(Throughput::Elements(1));

    group.bench_function("set_new_keys", |b| {
        let mut i = 0u64;
        b.iter(|| {
            let line = format!("SET key_{} value_{}", i, i);
            black_box(db.process(&line)).ok();
            i += 1;
        });
    });

    group.bench_function("set_same_key", |b| {
        b.iter(|| black_box(db.process("SET key value")).ok());
    });

    group.finish();
}

/// Benchmark GET requests end to end
fn bench_get(c: &mut Criterion) {
    let mut db = Database::in_memory();

    // Pre-populate with data
    for i in 0..100_000 {
        db.process(&format!("SET key_{} value_{}", i, i)).ok();
    }

    let mut group = c.benchmark_group("get");
    group.throughput(Throughput::Elements(1));

    group.bench_function("get_existing", |b| {
        let mut i = 0u64;
        b.iter(|| {
            let line = format!("GET key_{}", i % 100_000);
            black_box(db.process(&line)).ok();
            i += 1;
        });
    });

    group.bench_function("get_missing", |b| {
        let mut i = 0u64;
        b.iter(|| {
            let line = format!("GET missing_{}", i);
            black_box(db.process(&line)).ok();
            i += 1;
        });
    });

    group.finish();
}

/// Benchmark a mixed SET/GET/DEL workload
fn bench_mixed(c: &mut Criterion) {
    let mut db = Database::in_memory();

    c.bench_function("mixed_set_get_del", |b| {
        let mut i = 0u64;
        b.iter(|| {
            let key = format!("key_{}", i % 1000);
            black_box(db.process(&format!("SET {} value", key))).ok();
            black_box(db.process(&format!("GET {}", key))).ok();
            black_box(db.process(&format!("DEL {}", key))).ok();
            i += 1;
        });
    });
}

criterion_group!(benches, bench_parse, bench_set, bench_get, bench_mixed);
criterion_main!(benches);
