//! # Sorted-Run Grid
//!
//! Entities are stably sorted by cell key into one contiguous array; a run
//! table maps each occupied cell to its slice. Queries binary-search the
//! run table for the nine neighborhood keys.
//!
//! ```text
//! entries: [(0,0)#3 (0,0)#7 (1,0)#0 (4,2)#1 (4,2)#5 ...]
//! runs:    [(0,0) 0..2] [(1,0) 2..3] [(4,2) 3..5] ...
//! ```
//!
//! Storage is reused across rebuilds.

use super::{cell_key, neighborhood, validate_cell_size, CellKey, SpatialIndex};
use crate::error::{GridError, GridResult};

#[derive(Clone, Copy, Debug)]
struct Run {
    key: CellKey,
    start: usize,
    end: usize,
}

/// Accelerated grid over sorted cell runs.
#[derive(Clone, Debug)]
pub struct SortedGrid {
    cell_size: f64,
    entries: Vec<(CellKey, usize)>,
    runs: Vec<Run>,
}

impl SortedGrid {
    /// Creates an empty grid.
    ///
    /// # Errors
    ///
    /// [`GridError::InvalidCellSize`] for a non-finite or non-positive cell size.
    pub fn new(cell_size: f64) -> GridResult<Self> {
        Ok(Self {
            cell_size: validate_cell_size(cell_size)?,
            entries: Vec::new(),
            runs: Vec::new(),
        })
    }

    /// Number of occupied cells.
    #[inline]
    #[must_use]
    pub fn occupied_cells(&self) -> usize {
        self.runs.len()
    }

    fn fill(&mut self, positions: &[f64]) -> GridResult<()> {
        let count = positions.len() / 2;
        self.entries
            .try_reserve_exact(count)
            .map_err(|_| GridError::Allocation { entries: count })?;

        for (index, pair) in positions.chunks_exact(2).enumerate() {
            let (x, y) = (pair[0], pair[1]);
            if !(x.is_finite() && y.is_finite()) {
                return Err(GridError::NonFinitePosition { index, x, y });
            }
            self.entries.push((cell_key(x, y, self.cell_size), index));
        }

        self.entries.sort_by_key(|&(key, _)| key);

        let mut start = 0;
        while let Some(&(key, _)) = self.entries.get(start) {
            let len = self.entries[start..].partition_point(|&(k, _)| k == key);
            self.runs.push(Run {
                key,
                start,
                end: start + len,
            });
            start += len;
        }
        Ok(())
    }
}

impl SpatialIndex for SortedGrid {
    /// # Errors
    ///
    /// - [`GridError::NonFinitePosition`] for NaN or infinite coordinates
    /// - [`GridError::Allocation`] if entry storage cannot grow
    ///
    /// The grid is left empty on error.
    fn rebuild(&mut self, positions: &[f64]) -> GridResult<()> {
        self.entries.clear();
        self.runs.clear();

        let result = self.fill(positions);
        if result.is_err() {
            self.entries.clear();
            self.runs.clear();
        }
        result
    }

    fn query_into(&self, x: f64, y: f64, out: &mut Vec<usize>) {
        for key in neighborhood(cell_key(x, y, self.cell_size)) {
            if let Ok(pos) = self.runs.binary_search_by_key(&key, |run| run.key) {
                let run = self.runs[pos];
                out.extend(self.entries[run.start..run.end].iter().map(|&(_, index)| index));
            }
        }
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn cell_size(&self) -> f64 {
        self.cell_size
    }
}
