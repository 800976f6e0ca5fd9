//! Benchmarks for record filtering
//!
//! Run with: cargo bench --package filter-engine
//!
//! Generates a synthetic observation file in memory and measures how fast
//! the pipeline streams it with the default breeding + date filters.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use filter_engine::FilterPipeline;
use std::io::Cursor;

const CODES: &[&str] = &["", "F", "H", "P", "FY", "NE", "true", "no"];

fn synthetic_input(rows: usize) -> String {
    let mut input = String::from("GLOBAL UNIQUE IDENTIFIER\tCOMMON NAME\tBREEDING CODE\tOBSERVATION DATE\n");
    for i in 0..rows {
        let year = 2017 + (i % 6);
        let month = 1 + (i % 12);
        let day = 1 + (i % 28);
        input.push_str(&format!(
            "URN:{}\tSpecies {}\t{}\t{}-{:02}-{:02}\n",
            i,
            i % 50,
            CODES[i % CODES.len()],
            year,
            month,
            day
        ));
    }
    input
}

fn default_pipeline() -> FilterPipeline {
    let mut pipeline = FilterPipeline::new();
    pipeline
        .use_filter::<&str>("breeding", &[])
        .expect("breeding filter")
        .use_filter("date", &["2019-01-01", "2020-12-31"])
        .expect("date filter");
    pipeline
}

fn bench_process_reader(c: &mut Criterion) {
    let input = synthetic_input(100_000);
    let pipeline = default_pipeline();

    c.bench_function("process_100k_records", |b| {
        b.iter(|| {
            let mut sink = Vec::with_capacity(input.len());
            let report = pipeline
                .process_reader(Cursor::new(black_box(input.as_bytes())), &mut sink)
                .unwrap();
            black_box(report)
        })
    });
}

fn bench_empty_pipeline(c: &mut Criterion) {
    let input = synthetic_input(100_000);
    let pipeline = FilterPipeline::new();

    c.bench_function("passthrough_100k_records", |b| {
        b.iter(|| {
            let mut sink = Vec::with_capacity(input.len());
            let report = pipeline
                .process_reader(Cursor::new(black_box(input.as_bytes())), &mut sink)
                .unwrap();
            black_box(report)
        })
    });
}

criterion_group!(benches, bench_process_reader, bench_empty_pipeline);
criterion_main!(benches);
