use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use crate::distance::{self, DistanceType};

/// Bare `(row, col)` coordinate as it appears in results.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

/// A grid coordinate carrying a value.
///
/// Identity is the coordinate alone: equality and hashing ignore `value`,
/// so sets of cells de-duplicate by position. Ordering compares `value`
/// only and is meant for picking minima, not for sorting by position.
///
/// Grid cells carry the raw `f64` matrix value; search results carry the
/// `u32` distance to the nearest source.
#[derive(Clone, Copy, Debug)]
pub struct Cell<V = f64> {
    pub row: i32,
    pub col: i32,
    pub value: V,
}

impl<V> Cell<V> {
    pub fn new(row: i32, col: i32, value: V) -> Self {
        Self { row, col, value }
    }

    #[inline]
    pub fn coord(&self) -> Coord {
        Coord {
            row: self.row,
            col: self.col,
        }
    }

    /// Same coordinate, replacement value. The source cell is left untouched.
    #[inline]
    pub fn with_value<U>(&self, value: U) -> Cell<U> {
        Cell {
            row: self.row,
            col: self.col,
            value,
        }
    }

    /// Component-wise absolute value of the coordinate.
    pub fn abs(self) -> Self {
        Self {
            row: self.row.abs(),
            col: self.col.abs(),
            value: self.value,
        }
    }

    pub fn manhattan_distance<U>(
        &self,
        other: &Cell<U>,
        wrap_row_at: Option<usize>,
        wrap_col_at: Option<usize>,
    ) -> u32 {
        distance::manhattan(
            (self.row, self.col),
            (other.row, other.col),
            wrap_row_at,
            wrap_col_at,
        )
    }

    pub fn chebyshev_distance<U>(
        &self,
        other: &Cell<U>,
        wrap_row_at: Option<usize>,
        wrap_col_at: Option<usize>,
    ) -> u32 {
        distance::chebyshev(
            (self.row, self.col),
            (other.row, other.col),
            wrap_row_at,
            wrap_col_at,
        )
    }

    /// Distance under `metric`. Axis lengths are passed in, never inferred.
    pub fn distance<U>(
        &self,
        other: &Cell<U>,
        metric: DistanceType,
        wrap_row_at: Option<usize>,
        wrap_col_at: Option<usize>,
    ) -> u32 {
        match metric {
            DistanceType::Manhattan => self.manhattan_distance(other, wrap_row_at, wrap_col_at),
            DistanceType::Chebyshev => self.chebyshev_distance(other, wrap_row_at, wrap_col_at),
        }
    }
}

impl<V> PartialEq for Cell<V> {
    fn eq(&self, other: &Self) -> bool {
        self.row == other.row && self.col == other.col
    }
}

impl<V> Eq for Cell<V> {}

impl<V> PartialEq<(i32, i32)> for Cell<V> {
    fn eq(&self, other: &(i32, i32)) -> bool {
        self.row == other.0 && self.col == other.1
    }
}

impl<V> Hash for Cell<V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (self.row, self.col).hash(state);
    }
}

impl<V: PartialOrd> PartialOrd for Cell<V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.value.partial_cmp(&other.value)
    }
}

impl<V, U> Add<Cell<U>> for Cell<V> {
    type Output = Cell<V>;

    fn add(self, rhs: Cell<U>) -> Cell<V> {
        Cell {
            row: self.row + rhs.row,
            col: self.col + rhs.col,
            value: self.value,
        }
    }
}

impl<V, U> Sub<Cell<U>> for Cell<V> {
    type Output = Cell<V>;

    fn sub(self, rhs: Cell<U>) -> Cell<V> {
        Cell {
            row: self.row - rhs.row,
            col: self.col - rhs.col,
            value: self.value,
        }
    }
}

impl<V: fmt::Display> fmt::Display for Cell<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cell({}, {}, {})", self.row, self.col, self.value)
    }
}
