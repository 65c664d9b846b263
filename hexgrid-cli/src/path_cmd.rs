//! Path command - shortest path between two cells of a level
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: load_level(), search(), report_path()
//! - Level 3: check_endpoints()
//! - Level 4: formatting utilities

use std::path::{Path as FsPath, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use hexgrid_core::{GridCoordinate, Level, LevelLayout, Path};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PathArgs {
    /// Level layout JSON file (default: open 10x10 level)
    #[arg(long, value_name = "FILE")]
    pub level: Option<PathBuf>,

    /// Start cell as "column,row"
    #[arg(long, allow_hyphen_values = true)]
    pub from: GridCoordinate,

    /// Goal cell as "column,row"
    #[arg(long, allow_hyphen_values = true)]
    pub to: GridCoordinate,

    /// Search the planning grid instead of the gameplay grid
    #[arg(long)]
    pub planning: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Outcome of one search
#[derive(Clone, Debug, Serialize)]
struct PathReport {
    level: String,
    from: GridCoordinate,
    to: GridCoordinate,
    grid: &'static str,
    path: Option<Path>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run path command
///
/// 1. Load the level
/// 2. Search the requested grid
/// 3. Report the path
pub fn run(args: PathArgs) -> Result<()> {
    let mut level = load_level(args.level.as_deref())?;

    let report = search(&mut level, &args)?;

    report_path(&report, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Load a level file, or an open default level when none is given
pub(crate) fn load_level(path: Option<&FsPath>) -> Result<Level> {
    let layout = match path {
        Some(path) => LevelLayout::load(path)
            .with_context(|| format!("Failed to load level layout: {}", path.display()))?,
        None => LevelLayout::default(),
    };

    let level = Level::from_layout(&layout).with_context(|| format!("Invalid level layout '{}'", layout.name))?;
    Ok(level)
}

fn search(level: &mut Level, args: &PathArgs) -> Result<PathReport> {
    check_endpoints(level, args.from, args.to)?;

    let (grid, path) = if args.planning {
        ("planning", level.plan_path(args.from, args.to))
    } else {
        ("gameplay", level.find_path(args.from, args.to))
    };

    match &path {
        Some(p) => tracing::info!("{} -> {}: {} steps, length {}", args.from, args.to, p.steps(), p.length),
        None => tracing::info!("{} -> {}: no path", args.from, args.to),
    }

    Ok(PathReport {
        level: level.name().to_string(),
        from: args.from,
        to: args.to,
        grid,
        path,
    })
}

fn report_path(report: &PathReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        println!("{}", format_report(report));
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn check_endpoints(level: &Level, from: GridCoordinate, to: GridCoordinate) -> Result<()> {
    level.index.checked(from).context("Start cell")?;
    level.index.checked(to).context("Goal cell")?;
    Ok(())
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn format_report(report: &PathReport) -> String {
    match &report.path {
        Some(path) => format!(
            "{} ({} grid): {} -> {}\n  length: {}\n  steps:  {}\n  cells:  {}",
            report.level,
            report.grid,
            report.from,
            report.to,
            path.length,
            path.steps(),
            format_cells(&path.coordinates)
        ),
        None => format!(
            "{} ({} grid): {} -> {}\n  no path",
            report.level, report.grid, report.from, report.to
        ),
    }
}

pub(crate) fn format_cells(cells: &[GridCoordinate]) -> String {
    cells.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(" ")
}
