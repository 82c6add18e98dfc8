//! Nearest-source neighborhood search.
//!
//! Two engines share one contract: given a [`Grid`] and a non-negative
//! threshold, return every cell whose distance to its nearest source cell is
//! within the threshold, annotated with that distance. Output order is
//! unspecified.

pub mod bfs;
pub mod brute_force;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::error::SearchError;
use crate::grid::Grid;

pub use bfs::BreadthFirstSearch;
pub use brute_force::BruteForceSearch;

/// A configured search over one grid.
pub trait NeighborSearch {
    /// Cells within range of a source, each carrying its nearest-source distance.
    fn find_neighbors(&self) -> Vec<Cell<u32>>;

    fn max_distance(&self) -> u32;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    #[default]
    BruteForce,
    Bfs,
}

impl Algorithm {
    pub const ALL: [Algorithm; 2] = [Algorithm::BruteForce, Algorithm::Bfs];

    pub fn as_str(self) -> &'static str {
        match self {
            Algorithm::BruteForce => "brute_force",
            Algorithm::Bfs => "bfs",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "brute_force" => Ok(Algorithm::BruteForce),
            "bfs" => Ok(Algorithm::Bfs),
            other => Err(SearchError::UnknownAlgorithm(other.to_string())),
        }
    }
}

/// Closed set of engines behind [`NeighborSearch`].
#[derive(Debug)]
pub enum Search<'g, 'a> {
    BruteForce(BruteForceSearch<'g, 'a>),
    Bfs(BreadthFirstSearch<'g, 'a>),
}

impl<'g, 'a> Search<'g, 'a> {
    pub fn new(
        algorithm: Algorithm,
        grid: &'g Grid<'a>,
        max_distance: i64,
    ) -> Result<Self, SearchError> {
        Ok(match algorithm {
            Algorithm::BruteForce => Search::BruteForce(BruteForceSearch::new(grid, max_distance)?),
            Algorithm::Bfs => Search::Bfs(BreadthFirstSearch::new(grid, max_distance)?),
        })
    }

    pub fn algorithm(&self) -> Algorithm {
        match self {
            Search::BruteForce(_) => Algorithm::BruteForce,
            Search::Bfs(_) => Algorithm::Bfs,
        }
    }
}

impl NeighborSearch for Search<'_, '_> {
    fn find_neighbors(&self) -> Vec<Cell<u32>> {
        match self {
            Search::BruteForce(s) => s.find_neighbors(),
            Search::Bfs(s) => s.find_neighbors(),
        }
    }

    fn max_distance(&self) -> u32 {
        match self {
            Search::BruteForce(s) => s.max_distance(),
            Search::Bfs(s) => s.max_distance(),
        }
    }
}

/// Reject negative thresholds; saturate anything wider than `u32`.
pub(crate) fn checked_max_distance(max_distance: i64) -> Result<u32, SearchError> {
    if max_distance < 0 {
        return Err(SearchError::NegativeDistance(max_distance));
    }
    Ok(u32::try_from(max_distance).unwrap_or(u32::MAX))
}
