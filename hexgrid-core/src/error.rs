//! Error types for grid construction and lookups

use crate::coord::GridCoordinate;

/// Errors raised by the grid, its factory, and input parsing
///
/// "No path" is never an error: searches report it as `None`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GridError {
    #[error("coordinate {coordinate} is outside the {width}x{height} grid")]
    OutOfBounds {
        coordinate: GridCoordinate,
        width: i32,
        height: i32,
    },

    #[error("invalid grid configuration: {0}")]
    InvalidConfig(String),

    #[error("a level named '{0}' is already registered")]
    DuplicateLevel(String),

    #[error("invalid coordinate '{0}', expected 'column,row'")]
    InvalidCoordinate(String),

    #[error("unknown action kind: {0}")]
    UnknownAction(String),
}
