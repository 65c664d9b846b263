//! HEXGRID Core - Hex-grid spatial index and A* path engine
//!
//! This crate provides the spatial core for hex-grid tactics levels:
//! - Offset hex geometry (odd rows shifted by half a cell, rows packed at 0.75)
//! - Per-cell walkability, occupancy and interactables
//! - One generic A* engine shared by gameplay and planning grids
//! - Budget-bounded range queries for action target validation
//! - Level registry and JSON level layouts

pub mod cell;
pub mod config;
pub mod coord;
pub mod error;
pub mod grid;
pub mod highlight;
pub mod index;
pub mod layout;
pub mod level;
pub mod level_layout;
pub mod pathfinding;
pub mod planning;
pub mod range;

// Re-exports for convenient access
pub use cell::{Cell, EntityId, GridNode, InteractableId, PathScratch};
pub use config::GridConfig;
pub use coord::GridCoordinate;
pub use error::GridError;
pub use grid::HexGrid;
pub use highlight::{highlight_color, HighlightColor, MaterialPalette};
pub use index::SpatialIndex;
pub use layout::{HexLayout, WorldPosition, HEX_ROW_SPACING};
pub use level::{Level, LevelRegistry};
pub use level_layout::LevelLayout;
pub use pathfinding::{Path, PathEngine, PathGrid, LEVEL_MOVE_COST, PLANNING_MOVE_COST};
pub use planning::{PathNode, PlanningGrid};
pub use range::{cells_within_path_length, reachable_within, valid_targets, ActionKind, MAX_THROW_DISTANCE};
