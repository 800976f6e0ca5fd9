//! Integration tests for the filter engine.
//!
//! These tests run registered filters over real files and check what
//! reaches the sink.

use filter_engine::{EngineError, FilterPipeline, MalformedPolicy, ProcessReport};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const HEADER: &str = "GLOBAL UNIQUE IDENTIFIER\tCOMMON NAME\tBREEDING CODE\tOBSERVATION DATE";

fn write_input(dir: &TempDir, name: &str, rows: &[&str]) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "{}", HEADER).unwrap();
    for row in rows {
        writeln!(file, "{}", row).unwrap();
    }
    path
}

fn run(pipeline: &FilterPipeline, path: &Path) -> (Vec<String>, ProcessReport) {
    let mut out = Vec::new();
    let report = pipeline.process(path, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some(HEADER));
    (lines.map(|s| s.to_string()).collect(), report)
}

fn breeding_pipeline() -> FilterPipeline {
    let mut pipeline = FilterPipeline::new();
    pipeline.use_filter::<&str>("breeding", &[]).unwrap();
    pipeline
}

fn date_pipeline() -> FilterPipeline {
    let mut pipeline = FilterPipeline::new();
    pipeline.use_filter("date", &["2019-01-01", "2020-12-31"]).unwrap();
    pipeline
}

fn combined_pipeline() -> FilterPipeline {
    let mut pipeline = FilterPipeline::new();
    pipeline
        .use_filter::<&str>("breeding", &[])
        .unwrap()
        .use_filter("date", &["2019-01-01", "2020-12-31"])
        .unwrap();
    pipeline
}

#[test]
fn test_breeding_filter_keeps_breeding_records() {
    let dir = TempDir::new().unwrap();
    let path = write_input(
        &dir,
        "obs.txt",
        &[
            "URN:1\tAmerican Robin\ttrue\t2019-05-01",
            "URN:2\tAmerican Robin\tfalse\t2019-05-02",
        ],
    );

    let (lines, report) = run(&breeding_pipeline(), &path);
    assert_eq!(lines, ["URN:1\tAmerican Robin\ttrue\t2019-05-01"]);
    assert_eq!(report.records_read, 2);
    assert_eq!(report.records_emitted, 1);
}

#[test]
fn test_date_filter_keeps_records_in_range() {
    let dir = TempDir::new().unwrap();
    let path = write_input(
        &dir,
        "obs.txt",
        &[
            "URN:1\tBlue Jay\t\t2018-12-31",
            "URN:2\tBlue Jay\t\t2019-06-15",
            "URN:3\tBlue Jay\t\t2021-01-01",
        ],
    );

    let (lines, _) = run(&date_pipeline(), &path);
    assert_eq!(lines, ["URN:2\tBlue Jay\t\t2019-06-15"]);
}

#[test]
fn test_breeding_and_date_filters_combined() {
    let dir = TempDir::new().unwrap();
    let path = write_input(
        &dir,
        "obs.txt",
        &[
            "URN:1\tSong Sparrow\ttrue\t2019-06-15",
            "URN:2\tSong Sparrow\ttrue\t2021-01-01",
        ],
    );

    let (lines, _) = run(&combined_pipeline(), &path);
    assert_eq!(lines, ["URN:1\tSong Sparrow\ttrue\t2019-06-15"]);
}

#[test]
fn test_missing_input_emits_nothing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.txt");

    let mut out = Vec::new();
    let err = combined_pipeline().process(&path, &mut out).unwrap_err();
    assert!(matches!(err, EngineError::InputNotFound { .. }));
    assert!(out.is_empty());
}

#[test]
fn test_conjunction_and_order() {
    let dir = TempDir::new().unwrap();
    let rows = [
        "URN:1\tWood Duck\tFY\t2020-05-10",
        "URN:2\tWood Duck\tF\t2020-05-11",
        "URN:3\tWood Duck\tNE\t2018-04-01",
        "URN:4\tMallard\tP\t2019-01-01",
        "URN:5\tMallard\t\t2019-07-07",
        "URN:6\tMallard\tH\t2020-12-31",
        "URN:7\tMallard\tCN\t2021-01-01",
    ];
    let path = write_input(&dir, "obs.txt", &rows);

    let (combined, _) = run(&combined_pipeline(), &path);
    let (breeding, _) = run(&breeding_pipeline(), &path);
    let (dated, _) = run(&date_pipeline(), &path);

    // Combined output is exactly the rows both single filters keep, in input order
    let expected: Vec<String> = rows
        .iter()
        .map(|s| s.to_string())
        .filter(|row| breeding.contains(row) && dated.contains(row))
        .collect();
    assert_eq!(combined, expected);
    assert_eq!(
        combined,
        [
            "URN:1\tWood Duck\tFY\t2020-05-10",
            "URN:4\tMallard\tP\t2019-01-01",
            "URN:6\tMallard\tH\t2020-12-31",
        ]
    );
}

#[test]
fn test_registration_order_does_not_change_result() {
    let dir = TempDir::new().unwrap();
    let path = write_input(
        &dir,
        "obs.txt",
        &[
            "URN:1\tOsprey\tON\t2019-03-01",
            "URN:2\tOsprey\tON\t2022-03-01",
            "URN:3\tOsprey\tF\t2019-03-01",
        ],
    );

    let mut reversed = FilterPipeline::new();
    reversed
        .use_filter("date", &["2019-01-01", "2020-12-31"])
        .unwrap()
        .use_filter::<&str>("breeding", &[])
        .unwrap();

    assert_eq!(run(&combined_pipeline(), &path), run(&reversed, &path));
}

#[test]
fn test_process_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let path = write_input(
        &dir,
        "obs.txt",
        &[
            "URN:1\tKilldeer\tDD\t2019-05-01",
            "URN:2\tKilldeer\tbad-code\t2019-05-01",
            "URN:3\tKilldeer\tNY\t2020-05-01",
        ],
    );
    let pipeline = combined_pipeline();

    let mut first = Vec::new();
    let mut second = Vec::new();
    let report_a = pipeline.process(&path, &mut first).unwrap();
    let report_b = pipeline.process(&path, &mut second).unwrap();

    assert_eq!(first, second);
    assert_eq!(report_a, report_b);
    assert_eq!(report_a.records_skipped, 1);
}

#[test]
fn test_single_day_range() {
    let dir = TempDir::new().unwrap();
    let path = write_input(
        &dir,
        "obs.txt",
        &[
            "URN:1\tBarn Swallow\t\t2019-06-14",
            "URN:2\tBarn Swallow\t\t2019-06-15",
            "URN:3\tBarn Swallow\t\t2019-06-16",
        ],
    );

    let mut pipeline = FilterPipeline::new();
    pipeline.use_filter("date", &["2019-06-15", "2019-06-15"]).unwrap();

    let (lines, _) = run(&pipeline, &path);
    assert_eq!(lines, ["URN:2\tBarn Swallow\t\t2019-06-15"]);
}

#[test]
fn test_strict_policy_aborts() {
    let dir = TempDir::new().unwrap();
    let path = write_input(
        &dir,
        "obs.txt",
        &["URN:1\tCommon Loon\tFY\t2019-06-15", "URN:2\tCommon Loon\tFY\t15/06/2019"],
    );

    let pipeline = FilterPipeline::new().with_policy(MalformedPolicy::Abort);
    let mut out = Vec::new();
    let err = pipeline.process(&path, &mut out).unwrap_err();
    assert!(matches!(err, EngineError::MalformedRecord(_)));
}

#[test]
fn test_process_batch_matches_sequential() {
    let dir = TempDir::new().unwrap();
    let a = write_input(
        &dir,
        "a.txt",
        &["URN:1\tGreat Egret\tNB\t2019-04-01", "URN:2\tGreat Egret\t\t2019-04-02"],
    );
    let b = write_input(&dir, "b.txt", &["URN:3\tGreen Heron\tCF\t2020-08-09"]);
    let missing = dir.path().join("missing.txt");
    let pipeline = combined_pipeline();

    let mut jobs: Vec<(PathBuf, Vec<u8>)> = vec![
        (a.clone(), Vec::new()),
        (missing, Vec::new()),
        (b.clone(), Vec::new()),
    ];
    let results = pipeline.process_batch(&mut jobs);

    assert_eq!(results.len(), 3);
    assert!(results[0].is_ok());
    assert!(matches!(results[1], Err(EngineError::InputNotFound { .. })));
    assert!(results[2].is_ok());

    let mut expected_a = Vec::new();
    pipeline.process(&a, &mut expected_a).unwrap();
    let mut expected_b = Vec::new();
    pipeline.process(&b, &mut expected_b).unwrap();

    assert_eq!(jobs[0].1, expected_a);
    assert!(jobs[1].1.is_empty());
    assert_eq!(jobs[2].1, expected_b);
}
