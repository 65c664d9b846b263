//! Grid configuration

use serde::{Deserialize, Serialize};

use crate::error::GridError;
use crate::layout::HexLayout;

/// Construction scalars for a grid, fixed for its lifetime
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Number of columns
    pub width: i32,
    /// Number of rows
    pub height: i32,
    /// World units per cell
    pub cell_size: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            cell_size: 2.0,
        }
    }
}

impl GridConfig {
    pub fn new(width: i32, height: i32, cell_size: f32) -> Self {
        Self {
            width,
            height,
            cell_size,
        }
    }

    /// Set cell size
    pub fn with_cell_size(mut self, cell_size: f32) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// Reject empty grids and degenerate cell sizes
    pub fn validate(&self) -> Result<(), GridError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(GridError::InvalidConfig(format!(
                "dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if !self.cell_size.is_finite() || self.cell_size <= 0.0 {
            return Err(GridError::InvalidConfig(format!(
                "cell size must be positive and finite, got {}",
                self.cell_size
            )));
        }
        Ok(())
    }

    pub fn layout(&self) -> HexLayout {
        HexLayout::new(self.cell_size)
    }

    /// Total number of cells
    pub fn cell_count(&self) -> usize {
        self.width.max(0) as usize * self.height.max(0) as usize
    }
}
