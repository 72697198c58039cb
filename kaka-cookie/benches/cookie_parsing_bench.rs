#[macro_use]
extern crate criterion;

use criterion::{black_box, Criterion};

use kaka_cookie::{CookieLimits, FilterMode, RequestId, RequestSlot};

// Typical analytics-heavy header as sent by browsers
const ANALYTICS_HEADER: &str = "__utma=21840418.36054577.1327330061.1333353182.1333370469.20; \
    __utmb=21840418.490.10.1333370469; __utmc=21840418; \
    __utmz=21840418.1327330061.1.1.utmcsr=google|utmccn=(organic)|utmcmd=organic|utmctr=foo";

fn wide_header(n: usize) -> String {
    (0..n)
        .map(|i| format!("cookie{i}=value{i}"))
        .collect::<Vec<_>>()
        .join("; ")
}

fn benchmark_parse(c: &mut Criterion) {
    let mut slot = RequestSlot::new(CookieLimits::default(), 64 * 1024);
    let mut id = 0;

    c.bench_function("parse_analytics_header", |b| {
        b.iter(|| {
            id += 1;
            let mut ctx = slot.acquire(RequestId(id));
            black_box(ctx.parse(Some(ANALYTICS_HEADER))).unwrap();
        })
    });
}

fn benchmark_parse_wide(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_wide_header");
    for n in [8, 32, 128] {
        let header = wide_header(n);
        let mut slot = RequestSlot::new(CookieLimits::default(), 64 * 1024);
        let mut id = 0;
        group.throughput(criterion::Throughput::Elements(n as u64));
        group.bench_function(format!("cookies_{n}"), |b| {
            b.iter(|| {
                id += 1;
                let mut ctx = slot.acquire(RequestId(id));
                black_box(ctx.parse(Some(header.as_str()))).unwrap();
            })
        });
    }
    group.finish();
}

fn benchmark_filter_and_render(c: &mut Criterion) {
    let header = wide_header(32);
    let mut slot = RequestSlot::new(CookieLimits::default(), 64 * 1024);
    let mut out = vec![0u8; 8192];
    let mut id = 0;

    c.bench_function("filter_and_render", |b| {
        b.iter(|| {
            id += 1;
            let mut ctx = slot.acquire(RequestId(id));
            ctx.parse(Some(header.as_str())).unwrap();
            ctx.filter("cookie1, cookie7, cookie31", FilterMode::KeepOnly);
            black_box(ctx.render(&mut out)).unwrap();
        })
    });
}

criterion_group!(
    benches,
    benchmark_parse,
    benchmark_parse_wide,
    benchmark_filter_and_render
);
criterion_main!(benches);
