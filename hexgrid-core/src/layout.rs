//! World <-> grid conversion for the brick-offset hex layout
//!
//! Rows are packed at 0.75 of the cell size and odd rows are shifted by half
//! a cell along x. The ground plane is x/z; y is carried but ignored by the
//! conversion output.

use serde::{Deserialize, Serialize};

use crate::coord::GridCoordinate;

/// Vertical packing factor between hex rows
pub const HEX_ROW_SPACING: f32 = 0.75;

/// A point in world space
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldPosition {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl WorldPosition {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Point on the ground plane
    pub const fn ground(x: f32, z: f32) -> Self {
        Self { x, y: 0.0, z }
    }

    /// Euclidean distance
    pub fn distance(&self, other: WorldPosition) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

/// Cell-size-scaled offset hex layout
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HexLayout {
    cell_size: f32,
}

impl HexLayout {
    pub const fn new(cell_size: f32) -> Self {
        Self { cell_size }
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Center of a cell in world space
    pub fn to_world(&self, coord: GridCoordinate) -> WorldPosition {
        let mut x = coord.column as f32 * self.cell_size;
        let z = coord.row as f32 * self.cell_size * HEX_ROW_SPACING;
        if coord.is_odd_row() {
            x += self.cell_size * 0.5;
        }
        WorldPosition::ground(x, z)
    }

    /// Cell whose center is closest to a world position
    ///
    /// Inverse-scales to a rough cell and then picks the nearest of the rough
    /// cell and its six neighbors (left, right, above, below, diagonal up,
    /// diagonal down). Earlier candidates win exact ties.
    pub fn to_grid(&self, position: WorldPosition) -> GridCoordinate {
        let rough = GridCoordinate::new(
            round_half_even(position.x / self.cell_size),
            round_half_even(position.z / (self.cell_size * HEX_ROW_SPACING)),
        );

        let mut closest = rough;
        let mut closest_distance = position.distance(self.to_world(rough));

        for candidate in lookup_candidates(rough) {
            let distance = position.distance(self.to_world(candidate));
            if distance < closest_distance {
                closest = candidate;
                closest_distance = distance;
            }
        }

        closest
    }
}

/// Neighbors tried by [`HexLayout::to_grid`]
///
/// Order: left, right, above, below, diagonal up, diagonal down. This is not
/// the search order of [`GridCoordinate::hex_neighbors`].
fn lookup_candidates(rough: GridCoordinate) -> [GridCoordinate; 6] {
    let diag = rough.diagonal_offset();
    [
        rough + GridCoordinate::new(-1, 0),
        rough + GridCoordinate::new(1, 0),
        rough + GridCoordinate::new(0, 1),
        rough + GridCoordinate::new(0, -1),
        rough + GridCoordinate::new(diag, 1),
        rough + GridCoordinate::new(diag, -1),
    ]
}

/// Round to nearest integer, halves to even
pub(crate) fn round_half_even(value: f32) -> i32 {
    value.round_ties_even() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_world_even_row() {
        let layout = HexLayout::new(2.0);
        let p = layout.to_world(GridCoordinate::new(3, 2));
        assert_eq!(p, WorldPosition::ground(6.0, 3.0));
    }

    #[test]
    fn test_to_world_odd_row_shift() {
        let layout = HexLayout::new(2.0);
        let p = layout.to_world(GridCoordinate::new(3, 1));
        assert_eq!(p, WorldPosition::ground(7.0, 1.5));
    }

    #[test]
    fn test_round_trip() {
        for cell_size in [1.0, 2.0, 2.5] {
            let layout = HexLayout::new(cell_size);
            for column in 0..12 {
                for row in 0..12 {
                    let c = GridCoordinate::new(column, row);
                    assert_eq!(layout.to_grid(layout.to_world(c)), c, "cell_size {}", cell_size);
                }
            }
        }
    }

    #[test]
    fn test_lookup_candidate_order() {
        let odd = GridCoordinate::new(2, 3);
        assert_eq!(
            lookup_candidates(odd),
            [
                GridCoordinate::new(1, 3),
                GridCoordinate::new(3, 3),
                GridCoordinate::new(2, 4),
                GridCoordinate::new(2, 2),
                GridCoordinate::new(3, 4),
                GridCoordinate::new(3, 2),
            ]
        );
        let even = GridCoordinate::new(2, 2);
        assert_eq!(lookup_candidates(even)[4], GridCoordinate::new(1, 3));
        assert_eq!(lookup_candidates(even)[5], GridCoordinate::new(1, 1));

        let mut sorted = lookup_candidates(odd).to_vec();
        sorted.sort();
        let mut neighbors = odd.hex_neighbors().to_vec();
        neighbors.sort();
        assert_eq!(sorted, neighbors);
    }

    #[test]
    fn test_to_grid_near_boundary() {
        let layout = HexLayout::new(2.0);
        // Between (0,0) at x=0 and (0,1) at x=1,z=1.5; nudged toward (0,1)
        let p = WorldPosition::ground(0.9, 1.3);
        assert_eq!(layout.to_grid(p), GridCoordinate::new(0, 1));
        // Rough cell is (1,1); its left neighbor is closer
        let p = WorldPosition::ground(1.1, 0.8);
        assert_eq!(layout.to_grid(p), GridCoordinate::new(0, 1));
    }

    #[test]
    fn test_to_grid_ignores_height_offset() {
        let layout = HexLayout::new(2.0);
        let c = GridCoordinate::new(4, 3);
        let mut p = layout.to_world(c);
        p.y = 5.0;
        assert_eq!(layout.to_grid(p), c);
    }

    #[test]
    fn test_round_half_even() {
        assert_eq!(round_half_even(0.5), 0);
        assert_eq!(round_half_even(1.5), 2);
        assert_eq!(round_half_even(2.5), 2);
        assert_eq!(round_half_even(2.6), 3);
        assert_eq!(round_half_even(-0.5), 0);
    }
}
