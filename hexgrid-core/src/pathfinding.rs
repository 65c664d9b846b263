//! A* path search over hex adjacency
//!
//! One algorithm, run over anything implementing [`PathGrid`]. The gameplay
//! [`SpatialIndex`](crate::index::SpatialIndex) and the standalone
//! [`PlanningGrid`](crate::planning::PlanningGrid) both plug in here, so
//! tie-breaking, heuristic and adjacency cannot drift apart between them.
//!
//! Scratch costs live on the grid's own nodes and are reset across the whole
//! grid at the start of every search: O(width * height) per call before any
//! expansion happens. The `&mut` borrow on the grid is what keeps two
//! searches from sharing that scratch at once.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::cell::{GridNode, PathScratch};
use crate::coord::GridCoordinate;
use crate::grid::HexGrid;
use crate::layout::{round_half_even, HexLayout};

/// Step cost on gameplay grids
pub const LEVEL_MOVE_COST: i32 = 1;

/// Step cost on planning grids
pub const PLANNING_MOVE_COST: i32 = 10;

// ============================================================================
// GRID CAPABILITY
// ============================================================================

/// What the engine needs from a grid
pub trait PathGrid {
    fn width(&self) -> i32;
    fn height(&self) -> i32;
    fn layout(&self) -> &HexLayout;
    fn is_walkable(&self, coord: GridCoordinate) -> bool;
    fn scratch(&self, coord: GridCoordinate) -> &PathScratch;
    fn scratch_mut(&mut self, coord: GridCoordinate) -> &mut PathScratch;

    /// Bounds check only
    fn contains(&self, coord: GridCoordinate) -> bool {
        coord.column >= 0 && coord.row >= 0 && coord.column < self.width() && coord.row < self.height()
    }

    /// Reset every node's scratch state
    fn reset_scratch(&mut self) {
        for column in 0..self.width() {
            for row in 0..self.height() {
                self.scratch_mut(GridCoordinate::new(column, row)).reset();
            }
        }
    }

    /// In-bounds hex neighbors
    ///
    /// Order: left, right, down, up, diagonal down, diagonal up.
    fn neighbors(&self, coord: GridCoordinate) -> Vec<GridCoordinate> {
        coord
            .hex_neighbors()
            .into_iter()
            .filter(|&n| self.contains(n))
            .collect()
    }
}

impl<T: GridNode> PathGrid for HexGrid<T> {
    fn width(&self) -> i32 {
        HexGrid::width(self)
    }

    fn height(&self) -> i32 {
        HexGrid::height(self)
    }

    fn layout(&self) -> &HexLayout {
        HexGrid::layout(self)
    }

    fn is_walkable(&self, coord: GridCoordinate) -> bool {
        self.node(coord).is_walkable()
    }

    fn scratch(&self, coord: GridCoordinate) -> &PathScratch {
        self.node(coord).scratch()
    }

    fn scratch_mut(&mut self, coord: GridCoordinate) -> &mut PathScratch {
        self.node_mut(coord).scratch_mut()
    }

    fn reset_scratch(&mut self) {
        for node in self.iter_mut() {
            node.scratch_mut().reset();
        }
    }
}

// ============================================================================
// RESULTS
// ============================================================================

/// A found path
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Path {
    /// Start to goal, inclusive
    pub coordinates: Vec<GridCoordinate>,
    /// Goal's final total cost
    pub length: i32,
}

impl Path {
    /// Number of moves (one less than the number of cells)
    pub fn steps(&self) -> usize {
        self.coordinates.len().saturating_sub(1)
    }

    pub fn start(&self) -> Option<GridCoordinate> {
        self.coordinates.first().copied()
    }

    pub fn goal(&self) -> Option<GridCoordinate> {
        self.coordinates.last().copied()
    }
}

// ============================================================================
// ENGINE
// ============================================================================

/// A* engine with a fixed per-step cost
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PathEngine {
    move_cost: i32,
}

impl Default for PathEngine {
    fn default() -> Self {
        Self::level()
    }
}

impl PathEngine {
    pub const fn new(move_cost: i32) -> Self {
        Self { move_cost }
    }

    /// Engine for gameplay grids (unit step cost)
    pub const fn level() -> Self {
        Self::new(LEVEL_MOVE_COST)
    }

    /// Engine for planning grids (step cost 10)
    pub const fn planning() -> Self {
        Self::new(PLANNING_MOVE_COST)
    }

    pub fn move_cost(&self) -> i32 {
        self.move_cost
    }

    /// Estimated cost between two cells
    ///
    /// World-space distance scaled by the step cost. Not a strict lower bound
    /// under the 0.75 row packing.
    pub fn heuristic<G: PathGrid + ?Sized>(&self, grid: &G, a: GridCoordinate, b: GridCoordinate) -> i32 {
        let layout = grid.layout();
        let distance = layout.to_world(a).distance(layout.to_world(b));
        round_half_even(self.move_cost as f32 * distance)
    }

    /// Shortest path from `start` to `goal`, or `None` if unreachable
    ///
    /// # Panics
    ///
    /// Panics if either endpoint is outside the grid.
    pub fn find_path<G: PathGrid + ?Sized>(
        &self,
        grid: &mut G,
        start: GridCoordinate,
        goal: GridCoordinate,
    ) -> Option<Path> {
        assert!(
            grid.contains(start) && grid.contains(goal),
            "path endpoints {} -> {} must lie inside the {}x{} grid",
            start,
            goal,
            grid.width(),
            grid.height()
        );

        grid.reset_scratch();

        let start_heuristic = self.heuristic(&*grid, start, goal);
        {
            let scratch = grid.scratch_mut(start);
            scratch.running_cost = 0;
            scratch.heuristic_cost = start_heuristic;
            scratch.update_total_cost();
        }

        let mut open: Vec<GridCoordinate> = vec![start];
        let mut open_set: FxHashSet<GridCoordinate> = FxHashSet::default();
        open_set.insert(start);
        let mut closed: FxHashSet<GridCoordinate> = FxHashSet::default();
        let mut expanded = 0usize;

        while let Some(index) = lowest_total_cost(&*grid, &open) {
            let current = open[index];

            if current == goal {
                let path = Path {
                    coordinates: reconstruct_path(&*grid, goal),
                    length: grid.scratch(goal).total_cost,
                };
                tracing::trace!(
                    "path {} -> {}: {} steps, length {}, {} expanded",
                    start,
                    goal,
                    path.steps(),
                    path.length,
                    expanded
                );
                return Some(path);
            }

            open.remove(index);
            open_set.remove(&current);
            closed.insert(current);
            expanded += 1;

            let current_cost = grid.scratch(current).running_cost;

            for neighbor in grid.neighbors(current) {
                if closed.contains(&neighbor) {
                    continue;
                }

                if !grid.is_walkable(neighbor) {
                    closed.insert(neighbor);
                    continue;
                }

                let tentative = current_cost.saturating_add(self.move_cost);
                if tentative < grid.scratch(neighbor).running_cost {
                    let heuristic = self.heuristic(&*grid, neighbor, goal);
                    let scratch = grid.scratch_mut(neighbor);
                    scratch.predecessor = Some(current);
                    scratch.running_cost = tentative;
                    scratch.heuristic_cost = heuristic;
                    scratch.update_total_cost();

                    if open_set.insert(neighbor) {
                        open.push(neighbor);
                    }
                }
            }
        }

        tracing::trace!("no path {} -> {} ({} expanded)", start, goal, expanded);
        None
    }

    /// Whether any path exists
    pub fn has_path<G: PathGrid + ?Sized>(&self, grid: &mut G, start: GridCoordinate, goal: GridCoordinate) -> bool {
        self.find_path(grid, start, goal).is_some()
    }

    /// Path length, 0 if unreachable
    pub fn path_length<G: PathGrid + ?Sized>(&self, grid: &mut G, start: GridCoordinate, goal: GridCoordinate) -> i32 {
        self.find_path(grid, start, goal).map_or(0, |path| path.length)
    }
}

// ============================================================================
// HELPERS
// ============================================================================

/// Index of the first open entry with minimal total cost
fn lowest_total_cost<G: PathGrid + ?Sized>(grid: &G, open: &[GridCoordinate]) -> Option<usize> {
    let mut best: Option<(usize, i32)> = None;
    for (i, &coord) in open.iter().enumerate() {
        let cost = grid.scratch(coord).total_cost;
        match best {
            Some((_, best_cost)) if cost >= best_cost => {}
            _ => best = Some((i, cost)),
        }
    }
    best.map(|(i, _)| i)
}

/// Follow predecessors back from the goal, then reverse
fn reconstruct_path<G: PathGrid + ?Sized>(grid: &G, goal: GridCoordinate) -> Vec<GridCoordinate> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(previous) = grid.scratch(current).predecessor {
        path.push(previous);
        current = previous;
    }
    path.reverse();
    path
}
