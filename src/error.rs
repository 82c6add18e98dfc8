use thiserror::Error;

/// Errors raised while building or indexing a [`Grid`](crate::grid::Grid).
///
/// All of these are fatal for the call that produced them: a grid is either
/// fully valid or not constructed at all.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GridError {
    #[error("Grid not specified or empty")]
    Empty,

    #[error("Empty row(s) found at index {rows:?}")]
    EmptyRow { rows: Vec<usize> },

    #[error("Invalid grid shape. Row lengths: {lengths:?}")]
    Ragged { lengths: Vec<usize> },

    #[error("Invalid cell found at ({row},{col}): {value}")]
    NonNumeric { row: usize, col: usize, value: f64 },

    #[error("Invalid row/col: ({row},{col}) for grid [{rows} X {cols}]")]
    OutOfBounds {
        row: i32,
        col: i32,
        rows: usize,
        cols: usize,
    },
}

/// Errors raised while configuring a search engine.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("Max distance must be non-negative. Received {0}")]
    NegativeDistance(i64),

    #[error("Unknown algorithm {0:?}, expected one of: brute_force, bfs")]
    UnknownAlgorithm(String),

    #[error("Unknown distance type {0:?}, expected one of: manhattan, chebyshev")]
    UnknownDistanceType(String),
}

/// Any failure of a full query: bad matrix or bad parameters.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Search(#[from] SearchError),
}
