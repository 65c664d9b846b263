//! HEXGRID CLI - Command-line interface
//!
//! Commands:
//! - path: Shortest path between two cells of a level
//! - range: Valid targets for an action
//! - locate: Convert between world positions and cells
//! - generate: Write a random level layout
//! - bench: Time path and range queries on a random level

mod benchmark;
mod generate;
mod locate;
mod path_cmd;
mod range_cmd;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hexgrid")]
#[command(about = "Hex-grid spatial index and path engine")]
#[command(version)]
struct Cli {
    /// RNG seed for commands that generate levels
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find a path between two cells
    Path(path_cmd::PathArgs),
    /// List valid targets for an action
    Range(range_cmd::RangeArgs),
    /// Convert a world position to a cell, or a cell to a world position
    Locate(locate::LocateArgs),
    /// Generate a random level layout
    Generate(generate::GenerateArgs),
    /// Benchmark path and range queries
    Bench(benchmark::BenchmarkArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Path(args) => path_cmd::run(args),
        Commands::Range(args) => range_cmd::run(args),
        Commands::Locate(args) => locate::run(args),
        Commands::Generate(args) => generate::run(args, cli.seed),
        Commands::Bench(args) => benchmark::run(args, cli.seed),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
