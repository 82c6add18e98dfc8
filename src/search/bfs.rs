use std::collections::VecDeque;

use tracing::debug;

use crate::cell::Cell;
use crate::error::SearchError;
use crate::field::Field;
use crate::grid::Grid;
use crate::search::{NeighborSearch, checked_max_distance};

const UNVISITED: u32 = u32::MAX;

/// Multi-source breadth-first expansion. O(rows x cols).
///
/// All sources start in the queue at distance 0 and the frontier grows one
/// ring per level. Every edge costs 1, so the first visit to a coordinate is
/// along a shortest path from some source, which is the nearest-source
/// distance brute force computes. Adjacency comes from the grid's metric
/// (4-connected for Manhattan, 8-connected for Chebyshev); that pairing is
/// what keeps the two engines in agreement.
///
/// Distances live in a separate map; grid cells are never mutated.
#[derive(Debug)]
pub struct BreadthFirstSearch<'g, 'a> {
    grid: &'g Grid<'a>,
    max_distance: u32,
}

impl<'g, 'a> BreadthFirstSearch<'g, 'a> {
    pub fn new(grid: &'g Grid<'a>, max_distance: i64) -> Result<Self, SearchError> {
        Ok(Self {
            grid,
            max_distance: checked_max_distance(max_distance)?,
        })
    }

    /// Run the expansion and return the raw distance map
    /// (`u32::MAX` where no source is within range).
    pub fn distance_field(&self) -> Field<u32> {
        let (rows, cols) = self.grid.shape();
        let mut dist = Field::filled(rows, cols, UNVISITED);
        let mut queue = VecDeque::with_capacity(rows * cols);

        for src in self.grid.positive_cells() {
            dist.set(src.row as usize, src.col as usize, 0);
            queue.push_back(src.with_value(0u32));
        }

        while let Some(cell) = queue.pop_front() {
            // Neighbors of a cell at the threshold would land outside it.
            if cell.value >= self.max_distance {
                continue;
            }
            let next = cell.value + 1;
            for n in self.grid.immediate_neighbors(&cell) {
                let (r, c) = (n.row as usize, n.col as usize);
                if dist.get(r, c) != UNVISITED {
                    continue;
                }
                dist.set(r, c, next);
                queue.push_back(n.with_value(next));
            }
        }

        dist
    }
}

impl NeighborSearch for BreadthFirstSearch<'_, '_> {
    fn find_neighbors(&self) -> Vec<Cell<u32>> {
        debug!(
            shape = ?self.grid.shape(),
            max_distance = self.max_distance,
            "breadth-first search started"
        );
        let dist = self.distance_field();
        let neighbors: Vec<Cell<u32>> = dist
            .iter()
            .filter(|&(_, _, d)| d != UNVISITED)
            .map(|(r, c, d)| Cell::new(r as i32, c as i32, d))
            .collect();

        debug!(
            shape = ?self.grid.shape(),
            max_distance = self.max_distance,
            count = neighbors.len(),
            "breadth-first search finished"
        );
        neighbors
    }

    fn max_distance(&self) -> u32 {
        self.max_distance
    }
}
