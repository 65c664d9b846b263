//! Gameplay spatial index
//!
//! Owns one [`Cell`] per coordinate for a level's lifetime and answers
//! world <-> grid conversion, bounds, walkability, occupancy and
//! interactable lookups. Cell accessors taking a coordinate panic when it is
//! out of bounds; callers gate on [`SpatialIndex::is_valid`] or use
//! [`SpatialIndex::checked`] for untrusted input.

use crate::cell::{Cell, EntityId, GridNode, InteractableId, PathScratch};
use crate::config::GridConfig;
use crate::coord::GridCoordinate;
use crate::error::GridError;
use crate::grid::HexGrid;
use crate::layout::{HexLayout, WorldPosition};
use crate::pathfinding::PathGrid;

/// Fixed-size table of gameplay cells
#[derive(Clone, Debug)]
pub struct SpatialIndex {
    cells: HexGrid<Cell>,
}

impl SpatialIndex {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// All cells walkable
    pub fn new(config: GridConfig) -> Result<Self, GridError> {
        Self::with_probe(config, |_| false)
    }

    /// Cells for which `probe` reports blocking geometry start unwalkable
    ///
    /// The probe receives each cell's world-space center.
    pub fn with_probe<F>(config: GridConfig, mut probe: F) -> Result<Self, GridError>
    where
        F: FnMut(WorldPosition) -> bool,
    {
        let layout = config.layout();
        let cells = HexGrid::new(config, |coord| {
            let mut cell = Cell::new(coord);
            if probe(layout.to_world(coord)) {
                cell.set_walkable(false);
            }
            cell
        })?;

        let blocked = cells.iter().filter(|c| !c.is_walkable()).count();
        tracing::debug!(
            "spatial index {}x{} (cell size {}) built, {} blocked",
            config.width,
            config.height,
            config.cell_size,
            blocked
        );

        Ok(Self { cells })
    }

    // ========================================================================
    // GEOMETRY
    // ========================================================================

    pub fn config(&self) -> &GridConfig {
        self.cells.config()
    }

    pub fn width(&self) -> i32 {
        self.cells.width()
    }

    pub fn height(&self) -> i32 {
        self.cells.height()
    }

    pub fn cell_size(&self) -> f32 {
        self.cells.layout().cell_size()
    }

    pub fn to_world(&self, coord: GridCoordinate) -> WorldPosition {
        self.cells.layout().to_world(coord)
    }

    pub fn to_grid(&self, position: WorldPosition) -> GridCoordinate {
        self.cells.layout().to_grid(position)
    }

    pub fn is_valid(&self, coord: GridCoordinate) -> bool {
        self.cells.is_valid(coord)
    }

    /// Validate an untrusted coordinate
    pub fn checked(&self, coord: GridCoordinate) -> Result<GridCoordinate, GridError> {
        self.cells.checked(coord)
    }

    /// Every coordinate, column-major
    pub fn coordinates(&self) -> impl Iterator<Item = GridCoordinate> {
        self.cells.coordinates()
    }

    // ========================================================================
    // CELL ACCESS
    // ========================================================================

    pub fn get(&self, coord: GridCoordinate) -> Option<&Cell> {
        self.cells.get(coord)
    }

    /// # Panics
    ///
    /// Panics if `coord` is out of bounds.
    pub fn cell(&self, coord: GridCoordinate) -> &Cell {
        self.cells.node(coord)
    }

    /// # Panics
    ///
    /// Panics if `coord` is out of bounds.
    pub fn cell_mut(&mut self, coord: GridCoordinate) -> &mut Cell {
        self.cells.node_mut(coord)
    }

    pub fn is_walkable(&self, coord: GridCoordinate) -> bool {
        self.cell(coord).is_walkable()
    }

    pub fn set_walkable(&mut self, coord: GridCoordinate, walkable: bool) {
        self.cell_mut(coord).set_walkable(walkable);
    }

    // ========================================================================
    // OCCUPANCY
    // ========================================================================

    /// Adding an entity already on the cell is a no-op
    pub fn add_occupant(&mut self, coord: GridCoordinate, entity: EntityId) {
        self.cell_mut(coord).add_occupant(entity);
    }

    /// Removing an entity not on the cell is a no-op
    pub fn remove_occupant(&mut self, coord: GridCoordinate, entity: EntityId) {
        self.cell_mut(coord).remove_occupant(entity);
    }

    pub fn occupants(&self, coord: GridCoordinate) -> &[EntityId] {
        self.cell(coord).occupants()
    }

    pub fn has_any_occupant(&self, coord: GridCoordinate) -> bool {
        self.cell(coord).has_any_occupant()
    }

    pub fn first_occupant(&self, coord: GridCoordinate) -> Option<EntityId> {
        self.cell(coord).first_occupant()
    }

    /// Move an entity between cells
    pub fn move_occupant(&mut self, entity: EntityId, from: GridCoordinate, to: GridCoordinate) {
        self.remove_occupant(from, entity);
        self.add_occupant(to, entity);
        tracing::trace!("{} moved {} -> {}", entity, from, to);
    }

    // ========================================================================
    // INTERACTABLES
    // ========================================================================

    pub fn interactable(&self, coord: GridCoordinate) -> Option<InteractableId> {
        self.cell(coord).interactable()
    }

    /// Overwrites any interactable already on the cell
    pub fn set_interactable(&mut self, coord: GridCoordinate, interactable: InteractableId) {
        self.cell_mut(coord).set_interactable(interactable);
    }

    pub fn clear_interactable(&mut self, coord: GridCoordinate) -> Option<InteractableId> {
        self.cell_mut(coord).clear_interactable()
    }
}

impl PathGrid for SpatialIndex {
    fn width(&self) -> i32 {
        self.cells.width()
    }

    fn height(&self) -> i32 {
        self.cells.height()
    }

    fn layout(&self) -> &HexLayout {
        self.cells.layout()
    }

    fn is_walkable(&self, coord: GridCoordinate) -> bool {
        self.cell(coord).is_walkable()
    }

    fn scratch(&self, coord: GridCoordinate) -> &PathScratch {
        self.cell(coord).scratch()
    }

    fn scratch_mut(&mut self, coord: GridCoordinate) -> &mut PathScratch {
        self.cell_mut(coord).scratch_mut()
    }

    fn reset_scratch(&mut self) {
        PathGrid::reset_scratch(&mut self.cells);
    }
}
