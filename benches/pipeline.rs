use criterion::{Criterion, criterion_group, criterion_main};
use sentinel::Sentinel;
use sentinel::output::{
    JsonArraySink, LineSerializer, LogRecord, PrettyJsonSerializer, Serializer, Sink, TextSink,
};
use serde_json::json;
use std::hint::black_box;
use tempfile::TempDir;

fn make_record() -> LogRecord {
    LogRecord::new(
        "bench",
        "info",
        "benchmark log message",
        Some(json!({ "user": "alice", "attempt": 3, "tags": ["a", "b"] })),
    )
}

fn bench_line_serializer(c: &mut Criterion) {
    let serializer = LineSerializer::new();
    let record = make_record();

    c.bench_function("LineSerializer::serialize", |b| {
        b.iter(|| serializer.serialize(black_box(&record)).expect("serialize failed"));
    });
}

fn bench_json_serializer(c: &mut Criterion) {
    let serializer = PrettyJsonSerializer::new();
    let record = make_record();

    c.bench_function("PrettyJsonSerializer::serialize", |b| {
        b.iter(|| serializer.serialize(black_box(&record)).expect("serialize failed"));
    });
}

fn bench_text_sink_write(c: &mut Criterion) {
    let tmp = TempDir::new().expect("failed to create temp dir");
    let sink = TextSink::open(tmp.path().join("bench.log"), 0o664, LineSerializer::new())
        .expect("open failed");
    let record = make_record();

    c.bench_function("TextSink::write", |b| {
        b.iter(|| sink.write(black_box(&record)).expect("write failed"));
    });
}

fn bench_json_sink_write(c: &mut Criterion) {
    let tmp = TempDir::new().expect("failed to create temp dir");
    let sink = JsonArraySink::new(tmp.path().join("bench.json"), PrettyJsonSerializer::new());
    let record = make_record();

    c.bench_function("JsonArraySink::write", |b| {
        b.iter(|| sink.write(black_box(&record)).expect("write failed"));
    });

    sink.close().expect("close failed");
}

fn bench_sentinel_log(c: &mut Criterion) {
    let tmp = TempDir::new().expect("failed to create temp dir");
    let sentinel = Sentinel::builder()
        .text(tmp.path().join("app.log"))
        .done()
        .json(tmp.path().join("app.json"))
        .done()
        .build()
        .expect("build failed");

    c.bench_function("Sentinel::log (text + json)", |b| {
        b.iter(|| {
            sentinel.log(
                Some(black_box("auth")),
                black_box("info"),
                black_box("login"),
                Some(json!({ "user": "alice" })),
            )
        });
    });

    sentinel.close();
}

criterion_group!(
    benches,
    bench_line_serializer,
    bench_json_serializer,
    bench_text_sink_write,
    bench_json_sink_write,
    bench_sentinel_log,
);
criterion_main!(benches);
