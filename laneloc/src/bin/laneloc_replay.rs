//! laneloc replay tool
//!
//! Runs the lane filter over a recorded JSON-lines log of wheel ticks and
//! detected segments and prints one estimate per cycle.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use laneloc::library::{LaneFilter, LaneFilterConfig};
use laneloc::replay::{self, CycleReport, DivergencePolicy};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "laneloc_replay")]
#[command(about = "Replay recorded detections through the lane filter", long_about = None)]
struct Args {
    /// JSON-lines log of cycles
    log: PathBuf,

    /// Filter config (YAML, TOML or JSON); defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// What to do when an update has no overlap with the belief
    #[arg(long, value_enum, default_value_t = OnDivergence::Keep)]
    on_divergence: OnDivergence,

    /// Print estimates as JSON lines instead of a table
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OnDivergence {
    Keep,
    Reset,
    Abort,
}

impl From<OnDivergence> for DivergencePolicy {
    fn from(value: OnDivergence) -> Self {
        match value {
            OnDivergence::Keep => DivergencePolicy::Keep,
            OnDivergence::Reset => DivergencePolicy::Reset,
            OnDivergence::Abort => DivergencePolicy::Abort,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let default_filter = if args.verbose {
        "laneloc=debug,laneloc_library=debug,info"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match &args.config {
        Some(path) => LaneFilterConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => LaneFilterConfig::default(),
    };
    let mut filter = LaneFilter::new(config).context("building lane filter")?;

    let file = File::open(&args.log).with_context(|| format!("opening {}", args.log.display()))?;
    let cycles = replay::read_cycles(BufReader::new(file))?;
    info!("Replaying {} cycles from {}", cycles.len(), args.log.display());

    let reports = replay::run(&mut filter, &cycles, args.on_divergence.into())?;

    if !args.json {
        println!("{:>6} {:>9} {:>9} {:>6}", "cycle", "d", "phi", "votes");
    }
    for report in &reports {
        print_report(report, args.json)?;
    }

    let diverged = reports.iter().filter(|r| r.diverged).count();
    info!("Done: {} cycles, {} diverged", reports.len(), diverged);
    Ok(())
}

fn print_report(report: &CycleReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(report)?);
    } else {
        let flag = if report.diverged { " !" } else { "" };
        println!(
            "{:>6} {:>9.4} {:>9.4} {:>6}{}",
            report.cycle, report.estimate.d, report.estimate.phi, report.votes, flag
        );
    }
    Ok(())
}
