//! Benchmark command - time path and range queries
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_level(), run_benchmarks(), report_results()
//! - Level 3: benchmark_paths(), benchmark_planning(), benchmark_ranges()
//! - Level 4: timing utilities, formatting

use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Args;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use hexgrid_core::{ActionKind, GridConfig, GridCoordinate, Level, LevelLayout};

use crate::generate::create_rng;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct BenchmarkArgs {
    /// Grid width in cells
    #[arg(long, default_value = "32")]
    pub width: i32,

    /// Grid height in cells
    #[arg(long, default_value = "32")]
    pub height: i32,

    /// Probability that a cell is blocked
    #[arg(long, default_value = "0.2")]
    pub density: f64,

    /// Queries per benchmark
    #[arg(long, default_value = "200")]
    pub queries: usize,

    /// Budget for range queries
    #[arg(long, default_value = "3")]
    pub budget: i32,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Results of a single benchmark run
#[derive(Clone, Debug)]
struct BenchmarkResult {
    name: String,
    queries: usize,
    total_time: Duration,
    avg_time_per_query: Duration,
    queries_per_second: f64,
    notes: String,
}

/// All benchmark results
#[derive(Clone, Debug)]
struct AllResults {
    results: Vec<BenchmarkResult>,
    level_info: String,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run benchmark command
///
/// 1. Build a random level from the seed
/// 2. Time gameplay paths, planning paths and range queries
/// 3. Report all results
pub fn run(args: BenchmarkArgs, seed: Option<u64>) -> Result<()> {
    tracing::info!(
        "Starting benchmarks: {}x{} grid, {} queries",
        args.width,
        args.height,
        args.queries
    );

    let mut rng = create_rng(seed);
    let mut level = build_level(&args, &mut rng)?;

    let results = run_benchmarks(&mut level, &args, &mut rng);

    report_results(&results, &args);

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn build_level(args: &BenchmarkArgs, rng: &mut ChaCha8Rng) -> Result<Level> {
    let config = GridConfig::new(args.width, args.height, 2.0);
    config.validate()?;
    let layout = LevelLayout::random(rng, "bench", config, args.density);
    Ok(Level::from_layout(&layout)?)
}

fn run_benchmarks(level: &mut Level, args: &BenchmarkArgs, rng: &mut ChaCha8Rng) -> AllResults {
    let pairs: Vec<(GridCoordinate, GridCoordinate)> = (0..args.queries)
        .map(|_| (random_cell(level, rng), random_cell(level, rng)))
        .collect();
    let origins: Vec<GridCoordinate> = pairs.iter().map(|&(from, _)| from).collect();

    let results = vec![
        benchmark_paths(level, &pairs),
        benchmark_planning(level, &pairs),
        benchmark_ranges(level, &origins, ActionKind::Move, args.budget),
        benchmark_ranges(level, &origins, ActionKind::Grenade, args.budget),
    ];

    AllResults {
        results,
        level_info: format!(
            "{}x{} grid, density {:.2}, range budget {}",
            args.width, args.height, args.density, args.budget
        ),
    }
}

fn report_results(results: &AllResults, args: &BenchmarkArgs) {
    if args.json {
        print_json_results(results);
    } else {
        print_text_results(results);
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn benchmark_paths(level: &mut Level, pairs: &[(GridCoordinate, GridCoordinate)]) -> BenchmarkResult {
    let start = Instant::now();
    let mut found = 0;
    for &(from, to) in pairs {
        if level.find_path(from, to).is_some() {
            found += 1;
        }
    }
    make_result("Gameplay A*", pairs.len(), start.elapsed(), format!("{} paths found", found))
}

fn benchmark_planning(level: &mut Level, pairs: &[(GridCoordinate, GridCoordinate)]) -> BenchmarkResult {
    let start = Instant::now();
    let mut found = 0;
    for &(from, to) in pairs {
        if level.plan_path(from, to).is_some() {
            found += 1;
        }
    }
    make_result("Planning A*", pairs.len(), start.elapsed(), format!("{} paths found", found))
}

fn benchmark_ranges(level: &mut Level, origins: &[GridCoordinate], kind: ActionKind, budget: i32) -> BenchmarkResult {
    let start = Instant::now();
    let mut targets = 0;
    for &origin in origins {
        targets += level.valid_targets(origin, kind, Some(budget)).len();
    }
    let avg = if origins.is_empty() {
        0.0
    } else {
        targets as f64 / origins.len() as f64
    };
    make_result(
        &format!("Range {}", kind),
        origins.len(),
        start.elapsed(),
        format!("Avg targets: {:.1}", avg),
    )
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn random_cell(level: &Level, rng: &mut ChaCha8Rng) -> GridCoordinate {
    GridCoordinate::new(
        rng.gen_range(0..level.index.width()),
        rng.gen_range(0..level.index.height()),
    )
}

fn make_result(name: &str, queries: usize, total_time: Duration, notes: String) -> BenchmarkResult {
    let avg_time_per_query = if queries == 0 {
        Duration::ZERO
    } else {
        total_time.div_f64(queries as f64)
    };
    let secs = total_time.as_secs_f64();
    BenchmarkResult {
        name: name.to_string(),
        queries,
        total_time,
        avg_time_per_query,
        queries_per_second: if secs > 0.0 { queries as f64 / secs } else { 0.0 },
        notes,
    }
}

/// Format duration for display
fn format_duration(d: Duration) -> String {
    if d.as_secs() >= 60 {
        format!("{}m {:.1}s", d.as_secs() / 60, (d.as_secs() % 60) as f64 + d.subsec_millis() as f64 / 1000.0)
    } else if d.as_secs() >= 1 {
        format!("{:.2}s", d.as_secs_f64())
    } else if d.as_millis() >= 1 {
        format!("{:.1}ms", d.as_secs_f64() * 1000.0)
    } else {
        format!("{:.1}us", d.as_secs_f64() * 1_000_000.0)
    }
}

fn print_json_results(results: &AllResults) {
    #[derive(serde::Serialize)]
    struct JsonBenchmark {
        name: String,
        queries: usize,
        total_time_ms: f64,
        avg_time_us: f64,
        queries_per_second: f64,
        notes: String,
    }

    #[derive(serde::Serialize)]
    struct JsonOutput {
        level: String,
        benchmarks: Vec<JsonBenchmark>,
    }

    let output = JsonOutput {
        level: results.level_info.clone(),
        benchmarks: results
            .results
            .iter()
            .map(|r| JsonBenchmark {
                name: r.name.clone(),
                queries: r.queries,
                total_time_ms: r.total_time.as_secs_f64() * 1000.0,
                avg_time_us: r.avg_time_per_query.as_secs_f64() * 1_000_000.0,
                queries_per_second: r.queries_per_second,
                notes: r.notes.clone(),
            })
            .collect(),
    };

    match serde_json::to_string_pretty(&output) {
        Ok(json) => println!("{}", json),
        Err(e) => tracing::error!("Failed to serialise benchmark results: {}", e),
    }
}

fn print_text_results(results: &AllResults) {
    println!("\n=== HEXGRID Benchmark Results ===");
    println!("Level: {}\n", results.level_info);

    println!(
        "{:<16} {:>8} {:>12} {:>12} {:>12}  {}",
        "Benchmark", "Queries", "Total Time", "Avg/Query", "Queries/s", "Notes"
    );
    println!("{}", "-".repeat(84));

    for r in &results.results {
        println!(
            "{:<16} {:>8} {:>12} {:>12} {:>12.0}  {}",
            r.name,
            r.queries,
            format_duration(r.total_time),
            format_duration(r.avg_time_per_query),
            r.queries_per_second,
            r.notes
        );
    }
}
