use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use glint::{Attr, Handler, HandlerOptions, JsonHandler, Level, PrettyHandler, Record, ReplaceAttr};
use std::io;
use std::sync::Arc;

fn sample_record(attr_count: usize) -> Record {
    let mut record = Record::now(Level::Info, "processed request");
    record.add_attrs((0..attr_count).map(|i| Attr::new(format!("field{i}"), i as i64)));
    record
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("glint/render");

    let plain = PrettyHandler::new(HandlerOptions::default(), io::sink());

    let bare = sample_record(0);
    group.bench_function("line/bare", |b| {
        b.iter(|| black_box(plain.handle(&bare)));
    });

    let ten = sample_record(10);
    group.bench_function("line/ten_attrs", |b| {
        b.iter(|| black_box(plain.handle(&ten)));
    });

    let mut grouped = Record::now(Level::Warn, "upstream retry");
    grouped.add_attrs([Attr::group(
        "request",
        vec![
            Attr::string("id", "9f2c"),
            Attr::int("status", 503),
            Attr::group(
                "peer",
                vec![Attr::string("host", "10.0.0.7"), Attr::uint("port", 8443)],
            ),
        ],
    )]);
    group.bench_function("line/nested_groups", |b| {
        b.iter(|| black_box(plain.handle(&grouped)));
    });

    let rewriter: ReplaceAttr = Arc::new(|_groups: &[String], attr: Attr| {
        if attr.key == "field3" { None } else { Some(attr) }
    });
    let rewriting = PrettyHandler::new(
        HandlerOptions {
            replace_attr: Some(rewriter),
            ..HandlerOptions::default()
        },
        io::sink(),
    );
    group.bench_function("line/with_rewriter", |b| {
        b.iter(|| black_box(rewriting.handle(&ten)));
    });

    group.finish();
}

fn bench_json(c: &mut Criterion) {
    let mut group = c.benchmark_group("glint/json");

    let handler = JsonHandler::new(HandlerOptions::default());
    let record = sample_record(10);

    let mut encoded = Vec::new();
    handler.handle(&record, &mut encoded).unwrap();
    group.throughput(Throughput::Bytes(encoded.len() as u64));

    group.bench_function("encode/ten_attrs", |b| {
        b.iter(|| {
            let mut out = io::sink();
            black_box(handler.handle(&record, &mut out))
        });
    });

    let derived = handler
        .with_group("request")
        .with_attrs(vec![Attr::string("region", "us-east-1")]);
    group.bench_function("encode/derived_scope", |b| {
        b.iter(|| {
            let mut out = io::sink();
            black_box(derived.handle(&record, &mut out))
        });
    });

    group.finish();
}

criterion_group!(glint_benches, bench_render, bench_json);
criterion_main!(glint_benches);
