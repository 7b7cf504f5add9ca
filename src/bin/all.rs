//! Generic CLI for running the dispatch benchmarks.
//!
//! Usage:
//!   dispatch-bench                    # Run all algorithms
//!   dispatch-bench --list             # List available algorithms
//!   dispatch-bench expr_visitor       # Run a specific algorithm
//!   dispatch-bench --help             # Show help

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use dispatch_bench::registry::{build_registry, AlgorithmRunner};
use dispatch_bench::utils::runner::{self, SizeResults};
use dispatch_bench::utils::{geometric_range, logging, PinStrategy, TimingConfig};
use dispatch_bench::{tui, Result};

#[derive(Clone, Copy, Debug)]
struct ParamRange {
    lo: usize,
    hi: usize,
}

fn parse_range(s: &str) -> std::result::Result<ParamRange, String> {
    let (lo, hi) = s
        .split_once("..")
        .ok_or_else(|| format!("expected LO..HI, got '{}'", s))?;
    let lo = lo.trim().parse().map_err(|e| format!("invalid lower bound '{}': {}", lo, e))?;
    let hi = hi.trim().parse().map_err(|e| format!("invalid upper bound '{}': {}", hi, e))?;
    Ok(ParamRange { lo, hi })
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PinArg {
    /// Pin once around the whole measurement
    Global,
    /// Pin around every sample
    PerExecution,
    /// Do not pin
    Off,
}

impl From<PinArg> for PinStrategy {
    fn from(arg: PinArg) -> Self {
        match arg {
            PinArg::Global => PinStrategy::Global,
            PinArg::PerExecution => PinStrategy::PerExecution,
            PinArg::Off => PinStrategy::Disabled,
        }
    }
}

#[derive(Parser)]
#[command(name = "dispatch-bench")]
#[command(about = "Micro-benchmarks comparing static and dynamic dispatch")]
#[command(after_help = "Examples:
  dispatch-bench                          # Run all algorithms
  dispatch-bench expr_visitor             # Run only the expression visitor
  dispatch-bench --sizes 128,512          # Custom sizes
  dispatch-bench --range 1..1024 --multiplier 4
  dispatch-bench --seed 12345             # Reproducible run
  dispatch-bench --csv data.csv           # Export raw timings to CSV")]
struct Cli {
    /// Name of a specific algorithm to run (omit for all)
    algorithm: Option<String>,

    /// List all available algorithms
    #[arg(short, long)]
    list: bool,

    /// Comma-separated sizes; overrides --range
    #[arg(long, value_delimiter = ',', conflicts_with_all = ["range", "multiplier"])]
    sizes: Option<Vec<usize>>,

    /// Size range expanded geometrically
    #[arg(long, value_parser = parse_range, default_value = "2..8192")]
    range: ParamRange,

    /// Step between successive sizes in --range
    #[arg(long, default_value_t = 16)]
    multiplier: usize,

    /// Number of measured runs per variant
    #[arg(short = 'r', long, default_value_t = 30)]
    runs: usize,

    /// Number of warmup runs per variant
    #[arg(long, default_value_t = 10)]
    warmup: usize,

    /// Random seed for reproducible benchmarks (default: fresh per run)
    #[arg(long)]
    seed: Option<u64>,

    /// Filter outliers (trim 1% extremes from measurements)
    #[arg(short, long)]
    filter: bool,

    /// CPU pinning strategy
    #[arg(long, value_enum, default_value = "per-execution")]
    pin: PinArg,

    /// Export raw timings to CSV
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Only check that all variants agree, without measuring
    #[arg(long)]
    verify: bool,
}

fn main() -> ExitCode {
    logging::init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let registry = build_registry();

    if cli.list {
        tui::print_available_algorithms(&registry);
        return Ok(());
    }

    let sizes = match cli.sizes {
        Some(sizes) => sizes,
        None => geometric_range(cli.range.lo, cli.range.hi, cli.multiplier)?,
    };

    let algorithms: Vec<&dyn AlgorithmRunner> = match &cli.algorithm {
        Some(name) => vec![registry.find(name)?],
        None => registry.all().iter().map(|a| a.as_ref()).collect(),
    };

    for algo in &algorithms {
        algo.verify()?;
    }

    if cli.verify {
        println!("All {} algorithm(s) verified.", algorithms.len());
        return Ok(());
    }

    let config = TimingConfig {
        runs_per_variant: cli.runs,
        warmup_iterations: cli.warmup,
        pin_strategy: cli.pin.into(),
        trim_outliers: cli.filter,
        seed: cli.seed,
    };

    tui::print_header();

    let (results, raw_data): (Vec<Vec<SizeResults>>, _) = match algorithms.as_slice() {
        [single] => {
            // Running a single algorithm - sizes in order
            let per_size = runner::run_algorithm(*single, &sizes, &config)?;
            let raw = runner::raw_rows(single.name(), &per_size);
            (vec![per_size], raw)
        }
        _ => {
            // Running all algorithms - randomized across algorithms and sizes
            let grouped = runner::run_all_algorithms_randomized(&algorithms, &sizes, &config)?;
            (grouped.results, grouped.raw_data)
        }
    };

    if let Some(path) = &cli.csv {
        match runner::export_csv(path, &raw_data) {
            Ok(()) => println!("  Raw data exported to: {}", path.display()),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "CSV export failed");
                eprintln!("  Warning: {}", e);
            }
        }
        println!();
    }

    for (algo, per_size) in algorithms.iter().zip(&results) {
        tui::print_algorithm_results(*algo, per_size, cli.filter);
    }

    println!("Note: Speedup is relative to the first variant of each algorithm.");
    Ok(())
}
