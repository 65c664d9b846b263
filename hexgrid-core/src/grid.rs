//! Fixed-size arena of per-coordinate records
//!
//! One record per coordinate in `[0, width) x [0, height)`, stored flat and
//! column-major. Records are built once by a factory and never added or
//! removed afterwards.

use crate::config::GridConfig;
use crate::coord::GridCoordinate;
use crate::error::GridError;
use crate::layout::HexLayout;

/// Generic hex grid of `T` records
#[derive(Clone, Debug)]
pub struct HexGrid<T> {
    config: GridConfig,
    layout: HexLayout,
    nodes: Vec<T>,
}

impl<T> HexGrid<T> {
    /// Build a grid, calling `factory` once per coordinate
    pub fn new<F>(config: GridConfig, mut factory: F) -> Result<Self, GridError>
    where
        F: FnMut(GridCoordinate) -> T,
    {
        config.validate()?;

        let mut nodes = Vec::with_capacity(config.cell_count());
        for column in 0..config.width {
            for row in 0..config.height {
                nodes.push(factory(GridCoordinate::new(column, row)));
            }
        }

        Ok(Self {
            config,
            layout: config.layout(),
            nodes,
        })
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn width(&self) -> i32 {
        self.config.width
    }

    pub fn height(&self) -> i32 {
        self.config.height
    }

    pub fn layout(&self) -> &HexLayout {
        &self.layout
    }

    /// Bounds check only
    pub fn is_valid(&self, coord: GridCoordinate) -> bool {
        coord.column >= 0
            && coord.row >= 0
            && coord.column < self.config.width
            && coord.row < self.config.height
    }

    /// Validate an untrusted coordinate
    pub fn checked(&self, coord: GridCoordinate) -> Result<GridCoordinate, GridError> {
        if self.is_valid(coord) {
            Ok(coord)
        } else {
            Err(GridError::OutOfBounds {
                coordinate: coord,
                width: self.config.width,
                height: self.config.height,
            })
        }
    }

    fn slot(&self, coord: GridCoordinate) -> Option<usize> {
        if self.is_valid(coord) {
            Some(coord.column as usize * self.config.height as usize + coord.row as usize)
        } else {
            None
        }
    }

    pub fn get(&self, coord: GridCoordinate) -> Option<&T> {
        self.slot(coord).map(|i| &self.nodes[i])
    }

    pub fn get_mut(&mut self, coord: GridCoordinate) -> Option<&mut T> {
        match self.slot(coord) {
            Some(i) => Some(&mut self.nodes[i]),
            None => None,
        }
    }

    /// # Panics
    ///
    /// Panics if `coord` is out of bounds. Gate on [`HexGrid::is_valid`].
    pub fn node(&self, coord: GridCoordinate) -> &T {
        match self.slot(coord) {
            Some(i) => &self.nodes[i],
            None => self.out_of_bounds(coord),
        }
    }

    /// # Panics
    ///
    /// Panics if `coord` is out of bounds. Gate on [`HexGrid::is_valid`].
    pub fn node_mut(&mut self, coord: GridCoordinate) -> &mut T {
        match self.slot(coord) {
            Some(i) => &mut self.nodes[i],
            None => self.out_of_bounds(coord),
        }
    }

    fn out_of_bounds(&self, coord: GridCoordinate) -> ! {
        panic!(
            "grid coordinate {} is outside the {}x{} grid",
            coord, self.config.width, self.config.height
        )
    }

    /// Every coordinate, column-major
    pub fn coordinates(&self) -> impl Iterator<Item = GridCoordinate> {
        let height = self.config.height;
        (0..self.config.width)
            .flat_map(move |column| (0..height).map(move |row| GridCoordinate::new(column, row)))
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.nodes.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.nodes.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
