//! Range command - valid targets for an action
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: collect_targets(), report_targets()
//! - Level 3: resolve_range()
//! - Level 4: formatting utilities

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use hexgrid_core::{highlight_color, ActionKind, GridCoordinate, HighlightColor, Level};

use crate::path_cmd::{format_cells, load_level};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct RangeArgs {
    /// Level layout JSON file (default: open 10x10 level)
    #[arg(long, value_name = "FILE")]
    pub level: Option<PathBuf>,

    /// Acting unit's cell as "column,row"
    #[arg(long, allow_hyphen_values = true)]
    pub origin: GridCoordinate,

    /// Action kind (move, spin, shoot, grenade, sword, interact, rock)
    #[arg(long, default_value = "move")]
    pub action: ActionKind,

    /// Range budget (default: the action's own range, else 0)
    #[arg(long)]
    pub budget: Option<i32>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Targets for one action
#[derive(Clone, Debug, Serialize)]
struct RangeReport {
    level: String,
    origin: GridCoordinate,
    action: ActionKind,
    budget: i32,
    highlight: HighlightColor,
    targets: Vec<GridCoordinate>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run range command
///
/// 1. Load the level
/// 2. Collect the action's targets
/// 3. Report them with the action's highlight colour
pub fn run(args: RangeArgs) -> Result<()> {
    let mut level = load_level(args.level.as_deref())?;

    let report = collect_targets(&mut level, &args)?;

    report_targets(&report, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn collect_targets(level: &mut Level, args: &RangeArgs) -> Result<RangeReport> {
    level.index.checked(args.origin).context("Origin cell")?;

    let budget = resolve_range(args.action, args.budget);
    let targets = level.valid_targets(args.origin, args.action, Some(budget));

    tracing::info!(
        "{} from {} with budget {}: {} targets",
        args.action,
        args.origin,
        budget,
        targets.len()
    );

    Ok(RangeReport {
        level: level.name().to_string(),
        origin: args.origin,
        action: args.action,
        budget,
        highlight: highlight_color(args.action),
        targets,
    })
}

fn report_targets(report: &RangeReport, json: bool) -> Result<()> {
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

fn resolve_range(kind: ActionKind, budget: Option<i32>) -> i32 {
    budget.or(kind.default_range()).unwrap_or(0)
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn format_report(report: &RangeReport) -> String {
    format!(
        "{}: {} from {} (budget {}, {:?})\n  {} targets: {}",
        report.level,
        report.action,
        report.origin,
        report.budget,
        report.highlight,
        report.targets.len(),
        format_cells(&report.targets)
    )
}
