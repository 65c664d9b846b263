//! Grid coordinates and hex adjacency for the brick-offset layout

use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GridError;

/// Offset hex coordinates (odd rows shifted right by half a cell)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCoordinate {
    pub column: i32,
    pub row: i32,
}

impl GridCoordinate {
    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    /// Odd rows are the shifted ones. Negative rows count as even.
    pub fn is_odd_row(&self) -> bool {
        self.row % 2 == 1
    }

    /// Column offset of both diagonal neighbors for this row
    pub fn diagonal_offset(&self) -> i32 {
        if self.is_odd_row() {
            1
        } else {
            -1
        }
    }

    /// The six hex neighbors, unfiltered by any bounds
    ///
    /// Order: left, right, down, up, diagonal down, diagonal up.
    pub fn hex_neighbors(&self) -> [GridCoordinate; 6] {
        let diag = self.diagonal_offset();
        [
            *self + GridCoordinate::new(-1, 0),
            *self + GridCoordinate::new(1, 0),
            *self + GridCoordinate::new(0, -1),
            *self + GridCoordinate::new(0, 1),
            *self + GridCoordinate::new(diag, -1),
            *self + GridCoordinate::new(diag, 1),
        ]
    }

    /// Check whether `other` is one of the six hex neighbors
    pub fn is_neighbor_of(&self, other: GridCoordinate) -> bool {
        self.hex_neighbors().contains(&other)
    }
}

impl Add for GridCoordinate {
    type Output = GridCoordinate;

    fn add(self, rhs: GridCoordinate) -> GridCoordinate {
        GridCoordinate::new(self.column + rhs.column, self.row + rhs.row)
    }
}

impl Sub for GridCoordinate {
    type Output = GridCoordinate;

    fn sub(self, rhs: GridCoordinate) -> GridCoordinate {
        GridCoordinate::new(self.column - rhs.column, self.row - rhs.row)
    }
}

impl fmt::Display for GridCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

/// Parses `"column,row"`, with optional parentheses and whitespace
impl FromStr for GridCoordinate {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('(').trim_end_matches(')');
        let (column, row) = trimmed
            .split_once(',')
            .ok_or_else(|| GridError::InvalidCoordinate(s.to_string()))?;

        let column = column
            .trim()
            .parse::<i32>()
            .map_err(|_| GridError::InvalidCoordinate(s.to_string()))?;
        let row = row
            .trim()
            .parse::<i32>()
            .map_err(|_| GridError::InvalidCoordinate(s.to_string()))?;

        Ok(GridCoordinate::new(column, row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_sub() {
        let a = GridCoordinate::new(3, 4);
        let b = GridCoordinate::new(-1, 2);
        assert_eq!(a + b, GridCoordinate::new(2, 6));
        assert_eq!(a - b, GridCoordinate::new(4, 2));
    }

    #[test]
    fn test_row_parity() {
        assert!(!GridCoordinate::new(0, 0).is_odd_row());
        assert!(GridCoordinate::new(0, 1).is_odd_row());
        assert!(!GridCoordinate::new(0, 2).is_odd_row());
        // Truncated remainder: -1 % 2 == -1
        assert!(!GridCoordinate::new(0, -1).is_odd_row());
    }

    #[test]
    fn test_neighbors_even_row() {
        let neighbors = GridCoordinate::new(2, 2).hex_neighbors();
        assert!(neighbors.contains(&GridCoordinate::new(1, 1)));
        assert!(neighbors.contains(&GridCoordinate::new(1, 3)));
        assert!(!neighbors.contains(&GridCoordinate::new(3, 1)));
    }

    #[test]
    fn test_neighbors_odd_row() {
        let neighbors = GridCoordinate::new(2, 1).hex_neighbors();
        assert!(neighbors.contains(&GridCoordinate::new(3, 0)));
        assert!(neighbors.contains(&GridCoordinate::new(3, 2)));
        assert!(!neighbors.contains(&GridCoordinate::new(1, 0)));
    }

    #[test]
    fn test_adjacency_is_symmetric() {
        for column in 0..6 {
            for row in 0..6 {
                let a = GridCoordinate::new(column, row);
                for b in a.hex_neighbors().into_iter().filter(|b| b.row >= 0) {
                    assert!(b.is_neighbor_of(a), "{} -> {} not symmetric", a, b);
                }
            }
        }
    }

    #[test]
    fn test_parse() {
        assert_eq!("3,4".parse::<GridCoordinate>().unwrap(), GridCoordinate::new(3, 4));
        assert_eq!(" (1, -2) ".parse::<GridCoordinate>().unwrap(), GridCoordinate::new(1, -2));
        assert!("3".parse::<GridCoordinate>().is_err());
        assert!("a,b".parse::<GridCoordinate>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(GridCoordinate::new(1, 2).to_string(), "(1, 2)");
    }
}
