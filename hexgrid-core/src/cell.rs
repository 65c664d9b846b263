//! Per-coordinate cell records and pathfinding scratch state

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::coord::GridCoordinate;

/// Opaque handle to an entity standing on a cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Opaque handle to an interactable object (door, crate, switch...)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InteractableId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entity#{}", self.0)
    }
}

// ============================================================================
// SCRATCH STATE
// ============================================================================

/// A* working memory for the search currently running over a grid
///
/// Not part of a node's identity. Reset before every search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PathScratch {
    /// Cost from the start (g)
    pub running_cost: i32,
    /// Estimated cost to the goal (h)
    pub heuristic_cost: i32,
    /// g + h (f)
    pub total_cost: i32,
    /// Neighbor this node was reached from on the best known path
    pub predecessor: Option<GridCoordinate>,
}

impl PathScratch {
    /// State every node starts a search in
    pub const UNVISITED: PathScratch = PathScratch {
        running_cost: i32::MAX,
        heuristic_cost: 0,
        total_cost: i32::MAX,
        predecessor: None,
    };

    pub fn reset(&mut self) {
        *self = Self::UNVISITED;
    }

    /// Recompute f from g and h
    pub fn update_total_cost(&mut self) {
        self.total_cost = self.running_cost.saturating_add(self.heuristic_cost);
    }
}

impl Default for PathScratch {
    fn default() -> Self {
        Self::UNVISITED
    }
}

/// A node the path engine can search over
pub trait GridNode {
    fn coordinate(&self) -> GridCoordinate;
    fn is_walkable(&self) -> bool;
    fn scratch(&self) -> &PathScratch;
    fn scratch_mut(&mut self) -> &mut PathScratch;
}

// ============================================================================
// CELL
// ============================================================================

/// Gameplay cell: occupants, interactable, walkability, scratch
#[derive(Clone, Debug)]
pub struct Cell {
    coordinate: GridCoordinate,
    occupants: Vec<EntityId>,
    interactable: Option<InteractableId>,
    walkable: bool,
    scratch: PathScratch,
}

impl Cell {
    pub fn new(coordinate: GridCoordinate) -> Self {
        Self {
            coordinate,
            occupants: Vec::new(),
            interactable: None,
            walkable: true,
            scratch: PathScratch::UNVISITED,
        }
    }

    pub fn set_walkable(&mut self, walkable: bool) {
        self.walkable = walkable;
    }

    /// Add an occupant. Returns false if it was already present.
    pub fn add_occupant(&mut self, entity: EntityId) -> bool {
        if self.occupants.contains(&entity) {
            return false;
        }
        self.occupants.push(entity);
        true
    }

    /// Remove an occupant. Returns false if it was not present.
    pub fn remove_occupant(&mut self, entity: EntityId) -> bool {
        match self.occupants.iter().position(|&e| e == entity) {
            Some(i) => {
                self.occupants.remove(i);
                true
            }
            None => false,
        }
    }

    pub fn occupants(&self) -> &[EntityId] {
        &self.occupants
    }

    pub fn has_any_occupant(&self) -> bool {
        !self.occupants.is_empty()
    }

    pub fn first_occupant(&self) -> Option<EntityId> {
        self.occupants.first().copied()
    }

    pub fn interactable(&self) -> Option<InteractableId> {
        self.interactable
    }

    /// Overwrites any previous interactable
    pub fn set_interactable(&mut self, interactable: InteractableId) {
        self.interactable = Some(interactable);
    }

    pub fn clear_interactable(&mut self) -> Option<InteractableId> {
        self.interactable.take()
    }
}

impl GridNode for Cell {
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

/// Coordinate, then one occupant per line
impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.coordinate)?;
        for occupant in &self.occupants {
            writeln!(f, "{}", occupant)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cell_defaults() {
        let cell = Cell::new(GridCoordinate::new(1, 2));
        assert_eq!(cell.coordinate(), GridCoordinate::new(1, 2));
        assert!(cell.is_walkable());
        assert!(!cell.has_any_occupant());
        assert_eq!(cell.interactable(), None);
        assert_eq!(*cell.scratch(), PathScratch::UNVISITED);
    }

    #[test]
    fn test_occupants_idempotent() {
        let mut cell = Cell::new(GridCoordinate::new(0, 0));
        assert!(cell.add_occupant(EntityId(7)));
        assert!(!cell.add_occupant(EntityId(7)));
        assert_eq!(cell.occupants(), &[EntityId(7)]);

        assert!(cell.remove_occupant(EntityId(7)));
        assert!(!cell.remove_occupant(EntityId(7)));
        assert!(cell.occupants().is_empty());
    }

    #[test]
    fn test_first_occupant() {
        let mut cell = Cell::new(GridCoordinate::new(0, 0));
        assert_eq!(cell.first_occupant(), None);
        cell.add_occupant(EntityId(3));
        cell.add_occupant(EntityId(1));
        assert_eq!(cell.first_occupant(), Some(EntityId(3)));
    }

    #[test]
    fn test_interactable_overwrite() {
        let mut cell = Cell::new(GridCoordinate::new(0, 0));
        cell.set_interactable(InteractableId(1));
        cell.set_interactable(InteractableId(2));
        assert_eq!(cell.interactable(), Some(InteractableId(2)));
        assert_eq!(cell.clear_interactable(), Some(InteractableId(2)));
        assert_eq!(cell.interactable(), None);
    }

    #[test]
    fn test_scratch_reset() {
        let mut scratch = PathScratch {
            running_cost: 4,
            heuristic_cost: 3,
            total_cost: 7,
            predecessor: Some(GridCoordinate::new(1, 1)),
        };
        scratch.reset();
        assert_eq!(scratch, PathScratch::UNVISITED);
    }

    #[test]
    fn test_total_cost_saturates() {
        let mut scratch = PathScratch::UNVISITED;
        scratch.heuristic_cost = 12;
        scratch.update_total_cost();
        assert_eq!(scratch.total_cost, i32::MAX);
    }

    #[test]
    fn test_display_lists_occupants() {
        let mut cell = Cell::new(GridCoordinate::new(2, 3));
        cell.add_occupant(EntityId(5));
        assert_eq!(cell.to_string(), "(2, 3)\nentity#5\n");
    }
}
