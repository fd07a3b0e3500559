use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::{json, Value};
use soil_dashboard::{ingest_records, project, ChartConfig, ChartPayload, RawLogRecord};

/// Build a raw log like the backend stores it: string values with occasional nulls.
fn raw_log(len: usize) -> Vec<Value> {
    (0..len)
        .map(|i| {
            let moisture = if i % 17 == 0 {
                Value::Null
            } else {
                Value::String(format!("{}", 20 + i % 60))
            };
            json!({
                "timestamp": format!("2024-01-01 {:02}:{:02}:{:02}", (i / 3600) % 24, (i / 60) % 60, i % 60),
                "soil_moisture": moisture,
            })
        })
        .collect()
}

/// Benchmark parsing the /logs body into raw records
fn bench_log_decoding(c: &mut Criterion) {
    let body = serde_json::to_string(&raw_log(10_000)).expect("Should serialize");

    c.bench_function("log_decoding_10k", |b| {
        b.iter(|| serde_json::from_str::<Vec<RawLogRecord>>(&body).expect("Should decode"))
    });
}

/// Benchmark filtering and coercion at several log sizes
fn bench_ingestion(c: &mut Criterion) {
    for size in [100, 1_000, 10_000].iter() {
        let records: Vec<RawLogRecord> = raw_log(*size).into_iter().map(RawLogRecord::from).collect();

        c.bench_with_input(BenchmarkId::new("ingest_records", size), &records, |b, records| {
            b.iter(|| ingest_records(records.clone()))
        });
    }
}

/// Benchmark series projection and chart payload construction
fn bench_projection(c: &mut Criterion) {
    let records: Vec<RawLogRecord> = raw_log(10_000).into_iter().map(RawLogRecord::from).collect();
    let entries = ingest_records(records);

    c.bench_function("project_10k", |b| b.iter(|| project(&entries)));

    let series = project(&entries);
    c.bench_function("chart_payload_10k", |b| {
        b.iter(|| ChartPayload::new(&series, ChartConfig::default()))
    });
}

criterion_group!(benches, bench_log_decoding, bench_ingestion, bench_projection);
criterion_main!(benches);
