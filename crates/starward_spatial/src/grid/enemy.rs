//! # Enemy Grid
//!
//! Per-tick enemy index. Rebuild picks the backend; queries follow it.
//!
//! ```text
//! rebuild(positions)
//!   ├─ sorted enabled? ──► SortedGrid::rebuild
//!   │                        ├─ Ok  ──► queries use sorted
//!   │                        └─ Err ──► debug!, fall through
//!   └─ HashGrid::rebuild ──► queries use hash
//! ```

use starward_core::{positions_into, Enemy};

use super::{HashGrid, SortedGrid, SpatialIndex};
use crate::error::GridResult;

/// Rebuild counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GridStats {
    /// Rebuilds served by the sorted index.
    pub accelerated_rebuilds: u64,
    /// Rebuilds served by the hash index.
    pub reference_rebuilds: u64,
    /// Sorted rebuilds that failed and were redone on the hash index.
    pub fallbacks: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Active {
    Reference,
    Accelerated,
}

/// Enemy neighbor index with backend selection.
#[derive(Clone, Debug)]
pub struct EnemyGrid {
    reference: HashGrid,
    accelerated: Option<SortedGrid>,
    active: Active,
    positions: Vec<f64>,
    stats: GridStats,
}

impl EnemyGrid {
    /// Creates an empty grid.
    ///
    /// # Errors
    ///
    /// [`GridError::InvalidCellSize`](crate::GridError::InvalidCellSize) for a
    /// non-finite or non-positive cell size.
    pub fn new(cell_size: f64, accelerated: bool) -> GridResult<Self> {
        let accelerated = if accelerated {
            Some(SortedGrid::new(cell_size)?)
        } else {
            None
        };
        Ok(Self {
            reference: HashGrid::new(cell_size)?,
            accelerated,
            active: Active::Reference,
            positions: Vec::new(),
            stats: GridStats::default(),
        })
    }

    /// Rebuilds from the enemy collection.
    ///
    /// # Errors
    ///
    /// Only if the hash index itself fails.
    pub fn rebuild_from(&mut self, enemies: &[Enemy]) -> GridResult<()> {
        let mut positions = std::mem::take(&mut self.positions);
        positions_into(enemies, &mut positions);
        let result = self.rebuild(&positions);
        self.positions = positions;
        result
    }

    /// Name of the index answering queries.
    #[must_use]
    pub const fn active_backend(&self) -> &'static str {
        match self.active {
            Active::Reference => "hash",
            Active::Accelerated => "sorted",
        }
    }

    /// Rebuild counters.
    #[inline]
    #[must_use]
    pub const fn stats(&self) -> GridStats {
        self.stats
    }

    fn active_index(&self) -> &dyn SpatialIndex {
        match (self.active, &self.accelerated) {
            (Active::Accelerated, Some(sorted)) => sorted,
            _ => &self.reference,
        }
    }
}

impl SpatialIndex for EnemyGrid {
    fn rebuild(&mut self, positions: &[f64]) -> GridResult<()> {
        if let Some(sorted) = self.accelerated.as_mut() {
            match sorted.rebuild(positions) {
                Ok(()) => {
                    self.active = Active::Accelerated;
                    self.stats.accelerated_rebuilds += 1;
                    tracing::trace!(entities = sorted.len(), cells = sorted.occupied_cells(), "grid rebuilt");
                    return Ok(());
                }
                Err(err) => {
                    tracing::debug!(error = %err, "sorted grid rebuild failed, using hash grid");
                    self.stats.fallbacks += 1;
                }
            }
        }

        self.active = Active::Reference;
        self.reference.rebuild(positions)?;
        self.stats.reference_rebuilds += 1;
        tracing::trace!(entities = self.reference.len(), "grid rebuilt");
        Ok(())
    }

    fn query_into(&self, x: f64, y: f64, out: &mut Vec<usize>) {
        self.active_index().query_into(x, y, out);
    }

    fn len(&self) -> usize {
        self.active_index().len()
    }

    fn cell_size(&self) -> f64 {
        self.reference.cell_size()
    }
}
