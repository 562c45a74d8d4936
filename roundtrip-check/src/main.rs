use std::path::PathBuf;

use clap::Parser;
use roundtrip_check::{run, RunConfig};

/// Round-trip a Gaussian matrix through the radix2d transforms and report the error.
#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// Side length of the square test matrix (power of two)
    #[arg(long, default_value_t = 1024)]
    size: usize,

    /// Seed for the random generator; entropy when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Mean of the generated samples
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    mean: f64,

    /// Standard deviation of the generated samples
    #[arg(long, default_value_t = 1.0)]
    std_dev: f64,

    /// Entries whose original magnitude is at or below this are skipped for relative error
    #[arg(long, default_value_t = radix2d::DEFAULT_RELATIVE_THRESHOLD)]
    threshold: f64,

    /// Side length of the half-spectrum reconstruction check
    #[arg(long, default_value_t = 8)]
    bonus_size: usize,

    /// Directory to write the matrices to as text files
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Also compare the forward spectrum against rustfft
    #[arg(long)]
    oracle: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::builder()
        .filter_level(level)
        .parse_default_env()
        .init();

    let config = RunConfig {
        size: args.size,
        seed: args.seed,
        mean: args.mean,
        std_dev: args.std_dev,
        threshold: args.threshold,
        bonus_size: args.bonus_size,
        output_dir: args.output_dir,
        oracle: args.oracle,
    };
    let summary = run(&config)?;
    print!("{}", summary);
    Ok(())
}
