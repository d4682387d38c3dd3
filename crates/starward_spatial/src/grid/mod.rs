//! # Grid Indexes
//!
//! Two interchangeable uniform-grid indexes over a flat
//! `[x0, y0, x1, y1, ...]` position buffer, and the [`EnemyGrid`] that
//! chooses between them.
//!
//! Both return candidates in the same order: neighborhood rows from
//! bottom to top, cells left to right, insertion order within a cell.

mod enemy;
mod hash;
mod sorted;

pub use enemy::{EnemyGrid, GridStats};
pub use hash::HashGrid;
pub use sorted::SortedGrid;

use crate::error::{GridError, GridResult};

/// Production cell edge length.
pub const DEFAULT_CELL_SIZE: f64 = 128.0;

/// Integer cell coordinates.
pub type CellKey = (i32, i32);

/// Neighbor index over entity positions.
pub trait SpatialIndex {
    /// Replaces the index contents with `positions` (pairs of x, y).
    ///
    /// A trailing unpaired scalar is ignored.
    ///
    /// # Errors
    ///
    /// Backend specific; see [`GridError`].
    fn rebuild(&mut self, positions: &[f64]) -> GridResult<()>;

    /// Appends candidate indices near `(x, y)` to `out`.
    fn query_into(&self, x: f64, y: f64, out: &mut Vec<usize>);

    /// Returns candidate indices near `(x, y)`.
    fn query(&self, x: f64, y: f64) -> Vec<usize> {
        let mut out = Vec::new();
        self.query_into(x, y, &mut out);
        out
    }

    /// Number of indexed entities.
    fn len(&self) -> usize;

    /// Returns `true` if nothing is indexed.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cell edge length.
    fn cell_size(&self) -> f64;
}

/// Cell containing `(x, y)`.
///
/// Floors, so `-0.5` lands in cell `-1`. Out-of-range values saturate.
#[inline]
#[must_use]
pub fn cell_key(x: f64, y: f64, cell_size: f64) -> CellKey {
    ((x / cell_size).floor() as i32, (y / cell_size).floor() as i32)
}

/// The 3x3 block around `center`, skipping cells past the `i32` range.
pub(crate) fn neighborhood(center: CellKey) -> impl Iterator<Item = CellKey> {
    let (cx, cy) = center;
    (-1..=1).flat_map(move |dy| {
        (-1..=1).filter_map(move |dx| Some((cx.checked_add(dx)?, cy.checked_add(dy)?)))
    })
}

pub(crate) fn validate_cell_size(cell_size: f64) -> GridResult<f64> {
    if cell_size.is_finite() && cell_size > 0.0 {
        Ok(cell_size)
    } else {
        Err(GridError::InvalidCellSize(cell_size))
    }
}
