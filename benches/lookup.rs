//! Query benchmarks: full-record lookups against memory-mapped and fully
//! buffered handles, mirroring the two open paths.

use criterion::{criterion_group, criterion_main, Criterion};
use geobin::{Database, Fields};
use std::hint::black_box;
use std::io::Write;

#[path = "../tests/common/mod.rs"]
mod common;

fn bench_get_all(c: &mut Criterion) {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&common::db24(true)).unwrap();
    file.flush().unwrap();

    let mapped = Database::open(file.path()).unwrap();
    let buffered = Database::open_in_memory(file.path()).unwrap();

    let mut group = c.benchmark_group("get_all");
    group.bench_function("mmap", |b| {
        b.iter(|| black_box(mapped.query(black_box("8.8.8.8"), Fields::ALL).unwrap()));
    });
    group.bench_function("in_memory", |b| {
        b.iter(|| black_box(buffered.query(black_box("8.8.8.8"), Fields::ALL).unwrap()));
    });
    group.finish();
}

fn bench_query_shapes(c: &mut Criterion) {
    let db = Database::from_bytes(common::db24(true)).unwrap();

    let mut group = c.benchmark_group("query");
    group.bench_function("v4_single_field", |b| {
        b.iter(|| {
            black_box(
                db.query(black_box("8.8.8.8"), Fields::COUNTRY_SHORT)
                    .unwrap(),
            )
        });
    });
    group.bench_function("v6_all_fields", |b| {
        b.iter(|| {
            black_box(
                db.query(black_box("2001:4860:4860::8888"), Fields::ALL)
                    .unwrap(),
            )
        });
    });
    group.bench_function("v4_mapped_rewrite", |b| {
        b.iter(|| {
            black_box(
                db.query(black_box("::ffff:8.8.8.8"), Fields::COUNTRY_SHORT)
                    .unwrap(),
            )
        });
    });
    group.finish();
}

criterion_group!(benches, bench_get_all, bench_query_shapes);
criterion_main!(benches);
