//! Locate command - world position <-> cell conversion

use anyhow::{bail, Result};
use clap::Args;
use serde::Serialize;

use hexgrid_core::{GridConfig, GridCoordinate, WorldPosition};

#[derive(Args)]
pub struct LocateArgs {
    /// World x to convert to a cell
    #[arg(long, allow_hyphen_values = true, requires = "z")]
    pub x: Option<f32>,

    /// World z to convert to a cell
    #[arg(long, allow_hyphen_values = true, requires = "x")]
    pub z: Option<f32>,

    /// Cell as "column,row" to convert to a world position
    #[arg(long, allow_hyphen_values = true, conflicts_with_all = ["x", "z"])]
    pub cell: Option<GridCoordinate>,

    /// Cell size in world units
    #[arg(long, default_value = "2.0")]
    pub cell_size: f32,

    /// Grid width, for the bounds check
    #[arg(long, default_value = "10")]
    pub width: i32,

    /// Grid height, for the bounds check
    #[arg(long, default_value = "10")]
    pub height: i32,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Clone, Copy, Debug, Serialize)]
struct Location {
    cell: GridCoordinate,
    world: WorldPosition,
    in_bounds: bool,
}

/// Run locate command
pub fn run(args: LocateArgs) -> Result<()> {
    let location = locate(&args)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&location)?);
    } else {
        println!(
            "cell {} <-> world ({:.3}, {:.3}, {:.3}){}",
            location.cell,
            location.world.x,
            location.world.y,
            location.world.z,
            if location.in_bounds { "" } else { " [outside grid]" }
        );
    }
    Ok(())
}

fn locate(args: &LocateArgs) -> Result<Location> {
    let config = GridConfig::new(args.width, args.height, args.cell_size);
    config.validate()?;
    let layout = config.layout();

    let (cell, world) = match (args.cell, args.x, args.z) {
        (Some(cell), _, _) => (cell, layout.to_world(cell)),
        (None, Some(x), Some(z)) => {
            let world = WorldPosition::ground(x, z);
            (layout.to_grid(world), world)
        }
        _ => bail!("Give either --cell, or both --x and --z"),
    };

    let in_bounds = cell.column >= 0 && cell.row >= 0 && cell.column < config.width && cell.row < config.height;
    if !in_bounds {
        tracing::warn!("{} is outside the {}x{} grid", cell, config.width, config.height);
    }

    Ok(Location { cell, world, in_bounds })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> LocateArgs {
        LocateArgs {
            x: None,
            z: None,
            cell: None,
            cell_size: 2.0,
            width: 10,
            height: 10,
            json: false,
        }
    }

    #[test]
    fn test_cell_to_world() {
        let location = locate(&LocateArgs {
            cell: Some(GridCoordinate::new(2, 1)),
            ..args()
        })
        .unwrap();
        assert_eq!(location.world, WorldPosition::new(5.0, 0.0, 1.5));
        assert!(location.in_bounds);
    }

    #[test]
    fn test_world_to_cell() {
        let location = locate(&LocateArgs {
            x: Some(5.0),
            z: Some(1.5),
            ..args()
        })
        .unwrap();
        assert_eq!(location.cell, GridCoordinate::new(2, 1));
    }

    #[test]
    fn test_outside_grid_is_flagged() {
        let location = locate(&LocateArgs {
            x: Some(-20.0),
            z: Some(0.0),
            ..args()
        })
        .unwrap();
        assert!(!location.in_bounds);
    }

    #[test]
    fn test_missing_input() {
        assert!(locate(&args()).is_err());
        assert!(locate(&LocateArgs { cell_size: 0.0, cell: Some(GridCoordinate::new(0, 0)), ..args() }).is_err());
    }
}
