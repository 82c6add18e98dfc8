use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// Distance metric used by a grid, selected once per grid.
///
/// The metric also fixes the adjacency used for frontier expansion:
/// Manhattan steps along 4 neighbors, Chebyshev along 8 (diagonals cost 1).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceType {
    #[default]
    Manhattan,
    Chebyshev,
}

const OFFSETS4: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

const OFFSETS8: [(i32, i32); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1),           (0, 1),
    (1, -1),  (1, 0),  (1, 1),
];

impl DistanceType {
    /// Combine two (already wrap-folded) axis deltas.
    #[inline]
    pub fn combine(self, d_row: u32, d_col: u32) -> u32 {
        match self {
            DistanceType::Manhattan => d_row + d_col,
            DistanceType::Chebyshev => d_row.max(d_col),
        }
    }

    /// Unit-step `(d_row, d_col)` offsets for this metric's adjacency.
    pub fn offsets(self) -> &'static [(i32, i32)] {
        match self {
            DistanceType::Manhattan => &OFFSETS4,
            DistanceType::Chebyshev => &OFFSETS8,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DistanceType::Manhattan => "manhattan",
            DistanceType::Chebyshev => "chebyshev",
        }
    }
}

impl fmt::Display for DistanceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DistanceType {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manhattan" => Ok(DistanceType::Manhattan),
            "chebyshev" => Ok(DistanceType::Chebyshev),
            other => Err(SearchError::UnknownDistanceType(other.to_string())),
        }
    }
}

/// Distance between two indices along one axis.
///
/// With `wrap_at = Some(len)` the axis is circular and the shorter way
/// around is taken, so the result never exceeds `len / 2`.
#[inline]
pub fn axis_delta(a: i32, b: i32, wrap_at: Option<usize>) -> u32 {
    let raw = (i64::from(a) - i64::from(b)).unsigned_abs();
    match wrap_at {
        Some(len) if len > 0 => {
            let len = len as u64;
            let raw = raw % len;
            raw.min(len - raw) as u32
        }
        _ => raw as u32,
    }
}

/// `|Δrow| + |Δcol|`, folding each wrapping axis.
#[inline]
pub fn manhattan(
    a: (i32, i32),
    b: (i32, i32),
    wrap_row_at: Option<usize>,
    wrap_col_at: Option<usize>,
) -> u32 {
    DistanceType::Manhattan.combine(
        axis_delta(a.0, b.0, wrap_row_at),
        axis_delta(a.1, b.1, wrap_col_at),
    )
}

/// `max(|Δrow|, |Δcol|)`, folding each wrapping axis.
#[inline]
pub fn chebyshev(
    a: (i32, i32),
    b: (i32, i32),
    wrap_row_at: Option<usize>,
    wrap_col_at: Option<usize>,
) -> u32 {
    DistanceType::Chebyshev.combine(
        axis_delta(a.0, b.0, wrap_row_at),
        axis_delta(a.1, b.1, wrap_col_at),
    )
}
