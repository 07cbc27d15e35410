//! Slideshow assembly CLI.
//!
//! Reads one or more datasets, assembles a slideshow for each and writes it in
//! submission format:
//! - Structured JSON logging (or pretty output for local runs)
//! - Optional JSON-lines run report, one line per dataset
//! - Tunable policy loaded from a JSON file
//!
//! ## Configuration
//!
//! Environment variables:
//! - `SLIDESHOW_THREADS`: worker threads, 0 = all cores (default: 0)
//! - `RUST_LOG`: Log level filter (default: info)
//! - `LOG_FORMAT`: "json" for structured logs, "pretty" for development (default: json)
//!
//! ## Usage
//!
//! ```bash
//! LOG_FORMAT=pretty cargo run --release --bin slideshow -- data/*.txt --out-dir out --report runs.jsonl
//! ```

use std::fs::{File, OpenOptions};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, info_span, warn};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use slideshow_kernel::{
    read_dataset, write_output_file, AssemblyPolicy, DatasetReport, ScanMode, SlideAssembler,
    StageTimings,
};

#[derive(Parser, Debug)]
#[command(name = "slideshow", version, about = "Assemble slideshows from tagged photo datasets")]
struct Args {
    /// Dataset files, processed in order
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Directory for submission files (default: next to each input)
    #[arg(long = "out-dir")]
    out_dir: Option<PathBuf>,

    /// Worker threads, 0 uses every core
    #[arg(long, env = "SLIDESHOW_THREADS")]
    threads: Option<usize>,

    /// Scan candidates in order on one thread (deterministic output)
    #[arg(long)]
    sequential: bool,

    /// JSON policy file
    #[arg(long)]
    policy: Option<PathBuf>,

    /// Append one JSON report line per dataset to this file
    #[arg(long)]
    report: Option<PathBuf>,
}

/// Initialize the tracing subscriber with JSON or pretty format
fn init_tracing() {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "slideshow=info,slideshow_kernel=info".into());

    if log_format == "pretty" {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_current_span(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .flatten_event(true),
            )
            .init();
    }
}

fn main() {
    init_tracing();
    if let Err(e) = run() {
        tracing::error!(error = %e, "slideshow failed");
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();
    let policy = load_policy(&args)?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        datasets = args.inputs.len(),
        policy_id = policy.policy_id(),
        params_hash = %policy.params_hash(),
        scan = ?policy.scan,
        threads = policy.threads,
        "Starting slideshow assembly"
    );

    let assembler = SlideAssembler::new(policy).context("failed to create assembler")?;

    if let Some(dir) = &args.out_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create output directory {}", dir.display()))?;
    }

    let mut processed = 0;
    for input in &args.inputs {
        if !input.is_file() {
            warn!(path = %input.display(), "Input file not found, skipping");
            continue;
        }
        let output = output_path(input, args.out_dir.as_deref());
        let report = process_dataset(&assembler, input, &output)?;

        if let Some(path) = &args.report {
            append_report(path, &report)?;
        }
        processed += 1;
    }

    info!(processed, requested = args.inputs.len(), "All datasets processed");
    Ok(())
}

/// Resolve the policy from the optional file and the CLI overrides.
fn load_policy(args: &Args) -> Result<AssemblyPolicy> {
    let mut policy = match &args.policy {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read policy {}", path.display()))?;
            AssemblyPolicy::from_json(&json)
                .with_context(|| format!("invalid policy {}", path.display()))?
        }
        None => AssemblyPolicy::default(),
    };
    if let Some(threads) = args.threads {
        policy.threads = threads;
    }
    if args.sequential {
        policy.scan = ScanMode::Sequential;
    }
    Ok(policy)
}

/// `<out_dir or input dir>/<input stem>.out`
fn output_path(input: &Path, out_dir: Option<&Path>) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "dataset".to_string());
    let dir = match out_dir {
        Some(dir) => dir.to_path_buf(),
        None => input.parent().map(Path::to_path_buf).unwrap_or_default(),
    };
    dir.join(format!("{}.out", stem))
}

fn process_dataset(
    assembler: &SlideAssembler,
    input: &Path,
    output: &Path,
) -> Result<DatasetReport> {
    let dataset = input
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let span = info_span!("dataset", name = %dataset);
    let _guard = span.enter();

    let started = Instant::now();
    let registry =
        read_dataset(input).with_context(|| format!("failed to parse {}", input.display()))?;
    let parse_ms = started.elapsed().as_millis() as u64;
    info!(
        photos = registry.len(),
        horizontal = registry.horizontal_count(),
        vertical = registry.vertical_count(),
        latency_ms = parse_ms,
        "Dataset loaded"
    );

    let started = Instant::now();
    let assembly = assembler
        .assemble(&registry)
        .with_context(|| format!("assembly failed for {}", input.display()))?;
    let assemble_ms = started.elapsed().as_millis() as u64;

    let started = Instant::now();
    write_output_file(output, &assembly.slides)
        .with_context(|| format!("failed to write {}", output.display()))?;
    let write_ms = started.elapsed().as_millis() as u64;

    let timings = StageTimings {
        parse_ms,
        assemble_ms,
        write_ms,
    };
    let report = DatasetReport::new(dataset, &registry, assembler.policy(), &assembly, timings);

    info!(
        output = %output.display(),
        slides = report.slides,
        expected_slides = report.expected_slides,
        score = report.score,
        complete = report.is_complete(),
        fingerprint = %report.sequence_fingerprint,
        total_ms = timings.total_ms(),
        "Dataset finished"
    );

    Ok(report)
}

fn append_report(path: &Path, report: &DatasetReport) -> Result<()> {
    let file: File = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open report {}", path.display()))?;
    report
        .write_json_line(BufWriter::new(file))
        .with_context(|| format!("failed to write report {}", path.display()))
}
