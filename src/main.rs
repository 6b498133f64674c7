// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! `mhs`: enumerate the minimal hitting sets of a hypergraph file.
//!
//! The input has one edge per line, as whitespace-separated vertex indices.
//! Results are written in the same format, to stdout unless `--output` is
//! given. Logging goes to stderr.

use clap::{ArgAction, Parser};
use crossbeam_channel::RecvTimeoutError;
use mhs_search::engine::{EngineConfig, EngineKind, SearchReport, TransversalEngine};
use mhs_search::error::{MhsError, Result};
use mhs_search::family::{io, SetFamily};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{error, info, warn, Level};

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(name = "mhs")]
#[command(about = "Enumerate minimal hitting sets (hypergraph transversals)")]
struct Args {
    /// Hypergraph file, one edge per line
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Search algorithm: berge, mmcs, rs or greedy
    #[arg(short, long, default_value = "mmcs", value_parser = parse_engine)]
    engine: EngineKind,

    /// Largest hitting set to report (0 = unbounded)
    #[arg(short = 'k', long, default_value_t = 0)]
    max_cardinality: usize,

    /// Greedy only: stop after examining this many candidates (0 = no cap)
    #[arg(long, default_value_t = 0)]
    max_candidates: usize,

    /// MMCS and RS only: worker threads (0 = all cores)
    #[arg(short = 'j', long, default_value_t = 0)]
    threads: usize,

    /// Greedy only: file of `vertex weight` lines
    #[arg(short, long, value_name = "FILE")]
    weights: Option<PathBuf>,

    /// Write results here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Cancel the search after this many seconds and keep partial results
    #[arg(short, long, value_name = "SECS")]
    time_limit: Option<f64>,

    /// Only minimize the input family and write it out
    #[arg(long)]
    minimize_only: bool,

    /// Verbose logging (repeat for more)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn parse_engine(name: &str) -> std::result::Result<EngineKind, String> {
    name.to_ascii_lowercase()
        .parse()
        .map_err(|_| format!("unknown engine '{name}' (expected berge, mmcs, rs or greedy)"))
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let family = SetFamily::load(&args.input)?;
    info!(
        input = %args.input.display(),
        edges = family.num_edges(),
        verts = family.num_verts(),
        "loaded hypergraph"
    );

    if args.minimize_only {
        let minimized = family.minimization();
        info!(edges = minimized.num_edges(), "minimized");
        return write_family(&minimized, args);
    }

    let config = EngineConfig::new(args.engine)
        .with_max_cardinality(args.max_cardinality)
        .with_max_candidates(args.max_candidates)
        .with_threads(args.threads);
    let weights = args.weights.as_ref().map(io::load_weights).transpose()?;
    let engine = config.build(weights)?;
    info!("running {}", engine.description());

    let time_limit = args.time_limit.map(parse_time_limit).transpose()?;
    let report = run_with_time_limit(engine.as_ref(), &family, time_limit)?;
    if report.canceled {
        warn!(
            found = report.transversals.num_edges(),
            "time limit reached, results are partial"
        );
    }

    write_family(&report.transversals, args)
}

fn parse_time_limit(seconds: f64) -> Result<Duration> {
    Duration::try_from_secs_f64(seconds)
        .map_err(|_| MhsError::InvalidConfig(format!("invalid time limit {seconds}")))
}

/// Run the engine, canceling it if `limit` elapses first.
fn run_with_time_limit(
    engine: &dyn TransversalEngine,
    family: &SetFamily,
    limit: Option<Duration>,
) -> Result<SearchReport> {
    let Some(limit) = limit else {
        return engine.run(family);
    };

    let token = engine.cancel_token();
    let (done, finished) = crossbeam_channel::bounded::<()>(0);
    std::thread::scope(|s| {
        s.spawn(|| {
            if let Err(RecvTimeoutError::Timeout) = finished.recv_timeout(limit) {
                info!(seconds = limit.as_secs_f64(), "time limit reached, canceling");
                token.cancel();
            }
        });
        let report = engine.run(family);
        drop(done);
        report
    })
}

fn write_family(family: &SetFamily, args: &Args) -> Result<()> {
    match &args.output {
        Some(path) => family.save(path),
        None => family.write_to(std::io::stdout().lock()),
    }
}
