//! Hash-bucket grid. Accepts any input, including non-finite positions.

use std::collections::HashMap;

use super::{cell_key, neighborhood, validate_cell_size, CellKey, SpatialIndex};
use crate::error::GridResult;

/// Reference grid: one bucket per occupied cell.
#[derive(Clone, Debug)]
pub struct HashGrid {
    cell_size: f64,
    cells: HashMap<CellKey, Vec<usize>>,
    len: usize,
}

impl HashGrid {
    /// Creates an empty grid.
    ///
    /// # Errors
    ///
    /// [`GridError::InvalidCellSize`](crate::GridError::InvalidCellSize) for a
    /// non-finite or non-positive cell size.
    pub fn new(cell_size: f64) -> GridResult<Self> {
        Ok(Self {
            cell_size: validate_cell_size(cell_size)?,
            cells: HashMap::new(),
            len: 0,
        })
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn occupied_cells(&self) -> usize {
        self.cells.values().filter(|bucket| !bucket.is_empty()).count()
    }
}

impl SpatialIndex for HashGrid {
    fn rebuild(&mut self, positions: &[f64]) -> GridResult<()> {
        // Buckets that stayed empty for a whole tick are dropped, the rest keep
        // their allocation.
        self.cells.retain(|_, bucket| !bucket.is_empty());
        self.cells.values_mut().for_each(Vec::clear);

        self.len = 0;
        for (i, pair) in positions.chunks_exact(2).enumerate() {
            let key = cell_key(pair[0], pair[1], self.cell_size);
            self.cells.entry(key).or_default().push(i);
            self.len += 1;
        }
        Ok(())
    }

    fn query_into(&self, x: f64, y: f64, out: &mut Vec<usize>) {
        for key in neighborhood(cell_key(x, y, self.cell_size)) {
            if let Some(bucket) = self.cells.get(&key) {
                out.extend_from_slice(bucket);
            }
        }
    }

    fn len(&self) -> usize {
        self.len
    }

    fn cell_size(&self) -> f64 {
        self.cell_size
    }
}
