//! Generate command - write a random level layout
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_layout(), write_layout()
//! - Level 3: count_reachable()
//! - Level 4: RNG utilities

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use hexgrid_core::{GridConfig, GridCoordinate, Level, LevelLayout};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct GenerateArgs {
    /// Grid width in cells
    #[arg(long, default_value = "10")]
    pub width: i32,

    /// Grid height in cells
    #[arg(long, default_value = "10")]
    pub height: i32,

    /// Cell size in world units
    #[arg(long, default_value = "2.0")]
    pub cell_size: f32,

    /// Probability that a cell is blocked
    #[arg(long, default_value = "0.2")]
    pub density: f64,

    /// Level name
    #[arg(long, default_value = "generated")]
    pub name: String,

    /// Output file (stdout when omitted)
    #[arg(long, short, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run generate command
///
/// 1. Build a random layout from the seed
/// 2. Write it out
pub fn run(args: GenerateArgs, seed: Option<u64>) -> Result<()> {
    let layout = build_layout(&args, seed)?;

    write_layout(&layout, &args)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn build_layout(args: &GenerateArgs, seed: Option<u64>) -> Result<LevelLayout> {
    let config = GridConfig::new(args.width, args.height, args.cell_size);
    config.validate()?;

    let mut rng = create_rng(seed);
    let layout = LevelLayout::random(&mut rng, &args.name, config, args.density);

    let reachable = count_reachable(&layout)?;
    tracing::info!(
        "generated '{}': {}x{}, {} blocked, {} cells reachable from (0, 0)",
        layout.name,
        config.width,
        config.height,
        layout.blocked.len(),
        reachable
    );

    Ok(layout)
}

fn write_layout(layout: &LevelLayout, args: &GenerateArgs) -> Result<()> {
    match &args.output {
        Some(path) => {
            layout
                .save(path)
                .with_context(|| format!("Failed to write level layout: {}", path.display()))?;
            tracing::info!("wrote {}", path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(layout)?),
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Cells with a path from the always-open corner
fn count_reachable(layout: &LevelLayout) -> Result<usize> {
    let mut level = Level::from_layout(layout)?;
    let origin = GridCoordinate::new(0, 0);
    let cells: Vec<GridCoordinate> = level.index.coordinates().collect();
    Ok(cells.into_iter().filter(|&c| level.has_path(origin, c)).count())
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Seeded RNG, or entropy when no seed is given
pub(crate) fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}
