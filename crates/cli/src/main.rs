use anyhow::{anyhow, Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use colored::Colorize;
use filter_engine::{load_filter_config, EngineError, FilterPipeline, MalformedPolicy, ProcessReport};
use std::collections::HashSet;
use std::fs;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tempfile::NamedTempFile;

/// Filters applied when neither --filter nor --config is given.
const DEFAULT_FILTERS: &[(&str, &[&str])] = &[
    ("breeding", &[]),
    ("date", &["2019-01-01", "2020-12-31"]),
];

/// Exit code for configuration and filter errors.
const EXIT_CONFIG: u8 = 2;
/// Exit code for every other fatal error.
const EXIT_FAILURE: u8 = 1;

/// ebird-filter - keep the observations that pass every filter
#[derive(Parser)]
#[command(name = "ebird-filter")]
#[command(about = "Filter tab-separated bird observation records", long_about = None)]
struct Cli {
    /// Observation file(s) to filter
    #[arg(required = true, value_name = "PATH")]
    paths: Vec<PathBuf>,

    /// Filter to apply as NAME[,PARAM...], e.g. `breeding` or
    /// `date,2019-01-01,2020-12-31` (repeatable)
    #[arg(short, long = "filter", value_name = "SPEC")]
    filters: Vec<String>,

    /// JSON file holding a list of filters
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Abort on the first malformed record instead of skipping it
    #[arg(long)]
    strict: bool,

    /// Write matching records to FILE instead of stdout
    #[arg(short, long, value_name = "FILE", conflicts_with = "output_dir")]
    output: Option<PathBuf>,

    /// Write each input's matches to DIR/<file name> (required for several inputs)
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    // Initialize tracing; stdout carries data, so logs go to stderr
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    if cli.paths.len() > 1 && cli.output_dir.is_none() {
        Cli::command()
            .error(
                ErrorKind::MissingRequiredArgument,
                "--output-dir is required when more than one PATH is given",
            )
            .exit();
    }
    if let Err(msg) = check_outputs(&cli) {
        Cli::command().error(ErrorKind::ArgumentConflict, msg).exit();
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {:#}", "error:".red().bold(), err);
            ExitCode::from(exit_code(&err))
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let pipeline = build_pipeline(cli)?;
    tracing::debug!("Active filters: {:?}", pipeline.filter_names());

    match &cli.output_dir {
        Some(dir) => handle_batch(&pipeline, &cli.paths, dir),
        None => handle_single(&pipeline, &cli.paths[0], cli.output.as_deref()),
    }
}

/// Reject output locations that would clash with each other or with an input.
fn check_outputs(cli: &Cli) -> std::result::Result<(), String> {
    let inputs: HashSet<PathBuf> = cli.paths.iter().filter_map(|p| resolve(p)).collect();

    let outputs: Vec<PathBuf> = match (&cli.output, &cli.output_dir) {
        (Some(out), _) => vec![out.clone()],
        (None, Some(dir)) => {
            let mut outputs = Vec::with_capacity(cli.paths.len());
            let mut seen = HashSet::new();
            for path in &cli.paths {
                let name = path
                    .file_name()
                    .ok_or_else(|| format!("{} has no file name", path.display()))?;
                let out = dir.join(name);
                if !seen.insert(out.clone()) {
                    return Err(format!(
                        "several inputs would be written to {}",
                        out.display()
                    ));
                }
                outputs.push(out);
            }
            outputs
        }
        (None, None) => Vec::new(),
    };

    for out in &outputs {
        if resolve(out).is_some_and(|resolved| inputs.contains(&resolved)) {
            return Err(format!("output {} would overwrite an input", out.display()));
        }
    }
    Ok(())
}

/// Canonical form of a path that may not exist yet.
fn resolve(path: &Path) -> Option<PathBuf> {
    if let Ok(resolved) = fs::canonicalize(path) {
        return Some(resolved);
    }
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    Some(fs::canonicalize(parent).ok()?.join(path.file_name()?))
}

/// Temporary file next to `out`, renamed onto it once processing succeeds.
fn staging_file(out: &Path) -> Result<NamedTempFile> {
    let dir = match out.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    NamedTempFile::new_in(dir).with_context(|| format!("Failed to create a file in {}", dir.display()))
}

/// Move a finished staging file onto its final path.
fn commit(writer: BufWriter<NamedTempFile>, out: &Path) -> Result<()> {
    let staged = writer
        .into_inner()
        .map_err(|e| e.into_error())
        .with_context(|| format!("Failed to write {}", out.display()))?;
    staged
        .persist(out)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to write {}", out.display()))?;
    Ok(())
}

/// Register filters from --config, then --filter, or the defaults.
fn build_pipeline(cli: &Cli) -> Result<FilterPipeline> {
    let policy = if cli.strict {
        MalformedPolicy::Abort
    } else {
        MalformedPolicy::Skip
    };
    let mut pipeline = FilterPipeline::new().with_policy(policy);

    if let Some(config) = &cli.config {
        let specs = load_filter_config(config)
            .with_context(|| format!("Failed to load filter config {}", config.display()))?;
        for spec in specs {
            pipeline.register(spec)?;
        }
    }

    for raw in &cli.filters {
        let mut parts = raw.split(',').map(str::trim);
        let name = parts.next().unwrap_or_default();
        let params: Vec<&str> = parts.collect();
        pipeline
            .use_filter(name, params.as_slice())
            .with_context(|| format!("Invalid --filter {:?}", raw))?;
    }

    if cli.config.is_none() && cli.filters.is_empty() {
        for &(name, params) in DEFAULT_FILTERS {
            pipeline.use_filter(name, params)?;
        }
    }

    Ok(pipeline)
}

/// Handle a single input written to stdout or --output
fn handle_single(pipeline: &FilterPipeline, path: &Path, output: Option<&Path>) -> Result<()> {
    let report = match output {
        Some(out) => {
            // Nothing reaches `out` unless the whole run succeeds
            let mut writer = BufWriter::new(staging_file(out)?);
            let report = pipeline.process(path, &mut writer)?;
            commit(writer, out)?;
            report
        }
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            pipeline.process(path, &mut writer)?
        }
    };

    print_summary(path, &report);
    Ok(())
}

/// Handle several inputs in parallel, one output file each
fn handle_batch(pipeline: &FilterPipeline, paths: &[PathBuf], dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;

    let mut jobs = Vec::with_capacity(paths.len());
    let mut outputs = Vec::with_capacity(paths.len());
    for path in paths {
        let name = path
            .file_name()
            .ok_or_else(|| anyhow!("{} has no file name", path.display()))?;
        let out = dir.join(name);
        jobs.push((path.clone(), BufWriter::new(staging_file(&out)?)));
        outputs.push(out);
    }

    let results = pipeline.process_batch(&mut jobs);

    let mut first_error = None;
    let mut total = ProcessReport::default();
    for (((path, writer), out), result) in jobs.into_iter().zip(&outputs).zip(results) {
        match result {
            Ok(report) => {
                commit(writer, out)?;
                print_summary(&path, &report);
                total = total.merge(report);
            }
            Err(err) => {
                // The staging file is dropped, so failed inputs leave no output
                eprintln!("{} {}: {}", "✗".red(), path.display(), err);
                first_error.get_or_insert(err);
            }
        }
    }
    eprintln!("{} total: {}", "Σ".bold(), total);

    match first_error {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}

/// Print the per-input counts to stderr
fn print_summary(path: &Path, report: &ProcessReport) {
    eprintln!("{} {}: {}", "✓".green(), path.display(), report);
    if report.records_skipped > 0 {
        eprintln!(
            "  {} {} malformed record(s) skipped",
            "!".yellow().bold(),
            report.records_skipped
        );
    }
}

/// Map a failed run to the process exit code.
fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<EngineError>() {
        Some(e) if e.is_configuration() => EXIT_CONFIG,
        _ => EXIT_FAILURE,
    }
}
