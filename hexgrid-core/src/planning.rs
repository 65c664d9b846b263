//! Standalone planning grid
//!
//! Walkability-only nodes, independent of gameplay occupancy. Searched with
//! the same engine as the gameplay index, usually at
//! [`PLANNING_MOVE_COST`](crate::pathfinding::PLANNING_MOVE_COST).

use crate::cell::{GridNode, PathScratch};
use crate::config::GridConfig;
use crate::coord::GridCoordinate;
use crate::error::GridError;
use crate::grid::HexGrid;
use crate::layout::{HexLayout, WorldPosition};
use crate::pathfinding::PathGrid;

/// Planning node: walkability plus scratch
#[derive(Clone, Debug)]
pub struct PathNode {
    coordinate: GridCoordinate,
    walkable: bool,
    scratch: PathScratch,
}

impl PathNode {
    pub fn new(coordinate: GridCoordinate) -> Self {
        Self {
            coordinate,
            walkable: true,
            scratch: PathScratch::UNVISITED,
        }
    }

    pub fn set_walkable(&mut self, walkable: bool) {
        self.walkable = walkable;
    }
}

impl GridNode for PathNode {
    fn coordinate(&self) -> GridCoordinate {
        self.coordinate
    }

    fn is_walkable(&self) -> bool {
        self.walkable
    }

    fn scratch(&self) -> &PathScratch {
        &self.scratch
    }

    fn scratch_mut(&mut self) -> &mut PathScratch {
        &mut self.scratch
    }
}

/// Grid of [`PathNode`]s
#[derive(Clone, Debug)]
pub struct PlanningGrid {
    nodes: HexGrid<PathNode>,
}

impl PlanningGrid {
    /// All nodes walkable
    pub fn new(config: GridConfig) -> Result<Self, GridError> {
        Ok(Self {
            nodes: HexGrid::new(config, PathNode::new)?,
        })
    }

    /// Nodes for which `probe` reports geometry start unwalkable
    pub fn with_probe<F>(config: GridConfig, mut probe: F) -> Result<Self, GridError>
    where
        F: FnMut(WorldPosition) -> bool,
    {
        let layout = config.layout();
        let nodes = HexGrid::new(config, |coord| {
            let mut node = PathNode::new(coord);
            if probe(layout.to_world(coord)) {
                node.set_walkable(false);
            }
            node
        })?;

        let blocked = nodes.iter().filter(|n| !n.is_walkable()).count();
        tracing::debug!(
            "planning grid {}x{} built, {} blocked",
            config.width,
            config.height,
            blocked
        );

        Ok(Self { nodes })
    }

    pub fn config(&self) -> &GridConfig {
        self.nodes.config()
    }

    pub fn is_valid(&self, coord: GridCoordinate) -> bool {
        self.nodes.is_valid(coord)
    }

    /// # Panics
    ///
    /// Panics if `coord` is out of bounds.
    pub fn is_walkable(&self, coord: GridCoordinate) -> bool {
        self.nodes.node(coord).is_walkable()
    }

    /// # Panics
    ///
    /// Panics if `coord` is out of bounds.
    pub fn set_walkable(&mut self, coord: GridCoordinate, walkable: bool) {
        self.nodes.node_mut(coord).set_walkable(walkable);
    }

    /// Read a node's scratch state from the last search
    pub fn node(&self, coord: GridCoordinate) -> Option<&PathNode> {
        self.nodes.get(coord)
    }
}

impl PathGrid for PlanningGrid {
    fn width(&self) -> i32 {
        self.nodes.width()
    }

    fn height(&self) -> i32 {
        self.nodes.height()
    }

    fn layout(&self) -> &HexLayout {
        self.nodes.layout()
    }

    fn is_walkable(&self, coord: GridCoordinate) -> bool {
        self.nodes.node(coord).is_walkable()
    }

    fn scratch(&self, coord: GridCoordinate) -> &PathScratch {
        self.nodes.node(coord).scratch()
    }

    fn scratch_mut(&mut self, coord: GridCoordinate) -> &mut PathScratch {
        self.nodes.node_mut(coord).scratch_mut()
    }

    fn reset_scratch(&mut self) {
        PathGrid::reset_scratch(&mut self.nodes);
    }
}
