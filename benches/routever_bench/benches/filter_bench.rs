//! Version filtering benchmarks
//!
//! Measures per-request resolution and per-candidate predicate cost.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use routever::prelude::*;

fn request(method: Method, headers: &[(&str, &str)]) -> Request {
    let mut builder = routever::http::Request::builder()
        .method(method)
        .uri("/users/42?api-version=2");
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    Request::from(builder.body(()).unwrap())
}

fn filter() -> RouteVersionFilter {
    let config = RoutesVersioningConfig::enabled()
        .header(HeaderVersionResolverConfig::with_names(["X-API-Version", "X-Version"]))
        .parameter(ParameterVersionResolverConfig::default())
        .default_version("1");
    RouteVersionFilter::from_config(&config)
}

/// Benchmark building the predicate (resolution runs here)
fn bench_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolution");
    let filter = filter();

    let header = request(Method::GET, &[("X-API-Version", "2")]);
    group.bench_function("header", |b| {
        b.iter(|| filter.filter(black_box(&header)).resolved_version().is_some())
    });

    let query = request(Method::GET, &[]);
    group.bench_function("query_fallthrough", |b| {
        b.iter(|| filter.filter(black_box(&query)).resolved_version().is_some())
    });

    let preflight = request(Method::OPTIONS, &[
        ("Origin", "https://example.com"),
        ("Access-Control-Request-Method", "GET"),
        ("Access-Control-Request-Headers", "Content-Type, X-API-Version"),
    ]);
    group.bench_function("preflight_headers", |b| {
        b.iter(|| filter.filter(black_box(&preflight)).effective_version().is_some())
    });

    group.finish();
}

/// Benchmark applying the predicate over candidate sets
fn bench_candidates(c: &mut Criterion) {
    let mut group = c.benchmark_group("candidates");
    let filter = filter();
    let req = request(Method::GET, &[("X-API-Version", "5")]);

    for count in [2usize, 8, 32] {
        let candidates: Vec<RouteMatch<usize>> = (0..count)
            .map(|i| RouteMatch::new(i).with_version(i.to_string()))
            .collect();

        group.bench_function(format!("retain_{}", count), |b| {
            b.iter(|| {
                let predicate = filter.filter(&req);
                candidates
                    .iter()
                    .filter(|candidate| predicate.matches(*candidate))
                    .count()
            })
        });
    }

    let mut table = RouteTable::new();
    for version in 1..=8 {
        table
            .insert_versioned(Method::GET, "/users/{id}", version.to_string(), version)
            .unwrap();
    }
    group.bench_function("route_table", |b| {
        b.iter(|| table.route(black_box(&req), &filter).map(|m| **m.handler()))
    });

    group.finish();
}

criterion_group!(benches, bench_resolution, bench_candidates);
criterion_main!(benches);
