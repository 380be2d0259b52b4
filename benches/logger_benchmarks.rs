//! Criterion benchmarks for yall

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use http::{HeaderName, HeaderValue, Method, Uri};
use yall::prelude::*;

// ============================================================================
// Derivation Benchmarks
// ============================================================================

fn bench_derivation(c: &mut Criterion) {
    let mut group = c.benchmark_group("derivation");
    group.throughput(Throughput::Elements(1));

    let small = Logger::disabled().with_field("service", "api");
    let mut large = Logger::disabled();
    for i in 0..32 {
        large = large.with_field(format!("field_{}", i), i);
    }

    group.bench_function("with_field_small", |b| {
        b.iter(|| black_box(small.with_field("k", black_box(1))));
    });

    group.bench_function("with_field_32_fields", |b| {
        b.iter(|| black_box(large.with_field("k", black_box(1))));
    });

    let request = RequestInfo::new(Method::GET, Uri::from_static("/"), "10.0.0.1:443").with_header(
        HeaderName::from_static("x-forwarded-for"),
        HeaderValue::from_static("1.1.1.1,2.2.2.2,3.3.3.3"),
    );
    let proxied = small.with_proxy_hops(1);
    group.bench_function("with_request", |b| {
        b.iter(|| black_box(proxied.with_request(black_box(&request))));
    });

    group.finish();
}

// ============================================================================
// Emission Benchmarks
// ============================================================================

fn bench_emission(c: &mut Criterion) {
    let mut group = c.benchmark_group("emission");
    group.throughput(Throughput::Elements(1));

    let log = Logger::new(ConsoleSink::new(std::io::sink(), Severity::Debug))
        .with_field("user_id", 42)
        .with_field("action", "login");

    group.bench_function("console_info", |b| {
        b.iter(|| log.info(black_box("User logged in")));
    });

    let filtered = Logger::new(ConsoleSink::new(std::io::sink(), Severity::Error));
    group.bench_function("console_filtered", |b| {
        b.iter(|| filtered.debug(black_box("Filtered out")));
    });

    let disabled = Logger::disabled();
    group.bench_function("disabled", |b| {
        b.iter(|| disabled.error(black_box("Nowhere")));
    });

    group.finish();
}

criterion_group!(benches, bench_derivation, bench_emission);
criterion_main!(benches);
