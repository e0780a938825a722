//! Criterion benchmarks for pairing URL handling.
//!
//! Run with:
//! ```bash
//! cargo bench --package relay-core --bench url_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use relay_core::{parse_address, ConnectionDescriptor};

const URLS: &[(&str, &str)] = &[
    ("hostname", "nvdaremote://relay.example.org?key=abc123&mode=master"),
    ("with_port", "nvdaremote://relay.example.org:7000?key=abc123&mode=slave&insecure=true"),
    ("ipv6", "nvdaremote://[2001:db8::1]:6837?key=abc123&mode=master"),
];

// ── Benchmarks: parsing ───────────────────────────────────────────────────────

fn bench_parse_url(c: &mut Criterion) {
    let mut group = c.benchmark_group("pairing_url");

    for (label, url) in URLS {
        group.bench_with_input(BenchmarkId::new("parse", label), url, |b, url| {
            b.iter(|| ConnectionDescriptor::parse(black_box(url)))
        });
    }

    group.finish();
}

fn bench_parse_address(c: &mut Criterion) {
    let mut group = c.benchmark_group("address");

    group.bench_function("host_port", |b| {
        b.iter(|| parse_address(black_box("relay.example.org:6837"), 6837))
    });
    group.bench_function("bracketed_ipv6", |b| {
        b.iter(|| parse_address(black_box("[2001:db8::1]:6837"), 6837))
    });

    group.finish();
}

// ── Benchmarks: rendering ─────────────────────────────────────────────────────

fn bench_render_urls(c: &mut Criterion) {
    let mut group = c.benchmark_group("pairing_url");
    let descriptor = match ConnectionDescriptor::parse(URLS[1].1) {
        Ok(descriptor) => descriptor,
        Err(e) => panic!("benchmark fixture must parse: {e}"),
    };

    group.bench_function("to_connection_url", |b| {
        b.iter(|| black_box(&descriptor).to_connection_url())
    });
    group.bench_function("to_invitation_url", |b| {
        b.iter(|| black_box(&descriptor).to_invitation_url())
    });

    group.finish();
}

criterion_group!(benches, bench_parse_url, bench_parse_address, bench_render_urls);
criterion_main!(benches);
