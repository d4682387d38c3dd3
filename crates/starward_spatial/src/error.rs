//! Grid error types.

use thiserror::Error;

/// Result alias for grid operations.
pub type GridResult<T> = Result<T, GridError>;

/// Errors raised by spatial indexes.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    /// A position was NaN or infinite.
    #[error("entity {index} has non-finite position ({x}, {y})")]
    NonFinitePosition {
        /// Entity index.
        index: usize,
        /// X coordinate.
        x: f64,
        /// Y coordinate.
        y: f64,
    },

    /// Cell size must be finite and positive.
    #[error("invalid cell size {0}")]
    InvalidCellSize(f64),

    /// Index storage could not be reserved.
    #[error("failed to reserve grid storage for {entries} entries")]
    Allocation {
        /// Entries requested.
        entries: usize,
    },
}
