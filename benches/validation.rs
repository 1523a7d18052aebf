//! Validation Performance Benchmarks
//!
//! Benchmarks the pre-flight validation helpers and connection-string
//! parsing. These run on every single operation, so they should stay
//! allocation-light and fast.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use cosmo::repository::validate;
use cosmo::transport::ConnectionString;

fn bench_container_name_validation(c: &mut Criterion) {
    c.bench_function("validate_container_name", |b| {
        b.iter(|| validate::container_name(black_box("products-2024")))
    });

    let long_name = "a".repeat(255);
    c.bench_function("validate_container_name_max_length", |b| {
        b.iter(|| validate::container_name(black_box(&long_name)))
    });
}

fn bench_partition_key_validation(c: &mut Criterion) {
    c.bench_function("validate_partition_key_path", |b| {
        b.iter(|| validate::partition_key_path(black_box("/category")))
    });
}

fn bench_connection_string_parse(c: &mut Criterion) {
    let raw = "AccountEndpoint=https://account.documents.azure.com:443/;AccountKey=dGVzdGtleQ==";
    c.bench_function("connection_string_parse", |b| {
        b.iter(|| ConnectionString::parse(black_box(raw)))
    });
}

criterion_group!(
    benches,
    bench_container_name_validation,
    bench_partition_key_validation,
    bench_connection_string_parse
);
criterion_main!(benches);
