use std::collections::HashSet;

use tracing::{debug, trace};

use crate::cell::Cell;
use crate::error::SearchError;
use crate::grid::Grid;
use crate::search::{NeighborSearch, checked_max_distance};

/// Exhaustive scan: every cell against every source. O(rows x cols x sources).
///
/// Serves as the reference the frontier expansion is checked against.
#[derive(Debug)]
pub struct BruteForceSearch<'g, 'a> {
    grid: &'g Grid<'a>,
    max_distance: u32,
}

impl<'g, 'a> BruteForceSearch<'g, 'a> {
    pub fn new(grid: &'g Grid<'a>, max_distance: i64) -> Result<Self, SearchError> {
        Ok(Self {
            grid,
            max_distance: checked_max_distance(max_distance)?,
        })
    }
}

impl NeighborSearch for BruteForceSearch<'_, '_> {
    fn find_neighbors(&self) -> Vec<Cell<u32>> {
        debug!(
            shape = ?self.grid.shape(),
            max_distance = self.max_distance,
            "brute force search started"
        );
        let sources = self.grid.positive_cells();
        if sources.is_empty() {
            debug!(shape = ?self.grid.shape(), "brute force: no source cells");
            return Vec::new();
        }

        let metric = self.grid.distance_type();
        let wrap_row_at = self.grid.wrap_row_at();
        let wrap_col_at = self.grid.wrap_col_at();

        // Keyed by coordinate only; the value rides along.
        let mut neighbors: HashSet<Cell<u32>> = HashSet::new();

        for cell in self.grid.iter() {
            let nearest = sources
                .iter()
                .map(|src| src.distance(&cell, metric, wrap_row_at, wrap_col_at))
                .min()
                .unwrap_or(u32::MAX);

            if nearest > self.max_distance {
                continue;
            }

            let annotated = cell.with_value(nearest);
            if !neighbors.insert(annotated) {
                trace!(%annotated, "skipping duplicate neighbor");
            }
        }

        debug!(
            shape = ?self.grid.shape(),
            sources = sources.len(),
            max_distance = self.max_distance,
            count = neighbors.len(),
            "brute force search finished"
        );
        neighbors.into_iter().collect()
    }

    fn max_distance(&self) -> u32 {
        self.max_distance
    }
}
