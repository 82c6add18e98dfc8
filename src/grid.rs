use std::borrow::Cow;
use std::fmt;

use crate::cell::Cell;
use crate::distance::DistanceType;
use crate::error::GridError;

/// How a [`Grid`] treats its edges and measures distance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GridConfig {
    /// Row index `rows` is adjacent to row 0.
    pub wrap_rows: bool,
    /// Column index `cols` is adjacent to column 0.
    pub wrap_cols: bool,
    pub distance_type: DistanceType,
    /// Take a private copy of the matrix instead of borrowing it.
    pub copy_data: bool,
}

/// Read-only view over a caller-supplied numeric matrix.
///
/// The matrix is validated once at construction: it must be non-empty,
/// rectangular with non-zero row length, and hold only finite values.
/// Methods rely on that and do not re-check it.
///
/// The view borrows the matrix unless [`GridConfig::copy_data`] is set.
/// Dimensions are read from the backing data on every call rather than
/// cached.
#[derive(Clone, Debug)]
pub struct Grid<'a> {
    data: Cow<'a, [Vec<f64>]>,
    config: GridConfig,
}

impl<'a> Grid<'a> {
    pub fn new(data: &'a [Vec<f64>], config: GridConfig) -> Result<Self, GridError> {
        validate(data)?;
        let data = if config.copy_data {
            Cow::Owned(data.to_vec())
        } else {
            Cow::Borrowed(data)
        };
        Ok(Self { data, config })
    }
}

impl Grid<'static> {
    pub fn from_owned(data: Vec<Vec<f64>>, config: GridConfig) -> Result<Self, GridError> {
        validate(&data)?;
        Ok(Self {
            data: Cow::Owned(data),
            config,
        })
    }
}

impl Grid<'_> {
    /// Detach from the borrowed matrix, copying it if necessary.
    pub fn into_owned(self) -> Grid<'static> {
        Grid {
            data: Cow::Owned(self.data.into_owned()),
            config: self.config,
        }
    }

    #[inline]
    pub fn config(&self) -> GridConfig {
        self.config
    }

    #[inline]
    pub fn distance_type(&self) -> DistanceType {
        self.config.distance_type
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.data.len(), self.data[0].len())
    }

    #[inline]
    pub fn num_rows(&self) -> usize {
        self.shape().0
    }

    #[inline]
    pub fn num_cols(&self) -> usize {
        self.shape().1
    }

    #[inline]
    pub fn num_cells(&self) -> usize {
        let (rows, cols) = self.shape();
        rows * cols
    }

    /// Row-axis length to fold distances by, if rows wrap.
    #[inline]
    pub fn wrap_row_at(&self) -> Option<usize> {
        self.config.wrap_rows.then(|| self.num_rows())
    }

    /// Column-axis length to fold distances by, if columns wrap.
    #[inline]
    pub fn wrap_col_at(&self) -> Option<usize> {
        self.config.wrap_cols.then(|| self.num_cols())
    }

    /// Map a possibly out-of-range index pair onto the matrix.
    ///
    /// Wrapping axes reduce modulo their length (negative indices included).
    /// Returns None if a non-wrapping axis is out of range.
    #[inline]
    pub fn resolve(&self, row: i32, col: i32) -> Option<(usize, usize)> {
        let (rows, cols) = self.shape();
        let r = resolve_axis(row, rows, self.config.wrap_rows)?;
        let c = resolve_axis(col, cols, self.config.wrap_cols)?;
        Some((r, c))
    }

    /// Cell at `(row, col)`, with wrapping applied per axis.
    pub fn get(&self, row: i32, col: i32) -> Result<Cell, GridError> {
        let (r, c) = self.resolve(row, col).ok_or_else(|| {
            let (rows, cols) = self.shape();
            GridError::OutOfBounds {
                row,
                col,
                rows,
                cols,
            }
        })?;
        Ok(Cell::new(r as i32, c as i32, self.data[r][c]))
    }

    /// All cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.data.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .map(move |(c, &v)| Cell::new(r as i32, c as i32, v))
        })
    }

    /// Source cells (value > 0), row-major. Anything <= 0 is background.
    pub fn positive_cells(&self) -> Vec<Cell> {
        self.iter().filter(|cell| cell.value > 0.0).collect()
    }

    /// Unit-step neighbors of `cell` under the grid's metric: 4 for
    /// Manhattan, 8 for Chebyshev. Steps across a non-wrapping edge are
    /// dropped. On a wrapping axis of length 1 or 2 the same cell may
    /// appear more than once, or be `cell` itself.
    pub fn immediate_neighbors<V>(&self, cell: &Cell<V>) -> impl Iterator<Item = Cell> {
        let offsets = self.config.distance_type.offsets();
        let mut out = [Cell::new(0, 0, 0.0); 8];
        let mut n = 0;
        for &(dr, dc) in offsets {
            if let Ok(neighbor) = self.get(cell.row + dr, cell.col + dc) {
                out[n] = neighbor;
                n += 1;
            }
        }
        out.into_iter().take(n)
    }
}

#[inline]
fn resolve_axis(v: i32, len: usize, wrap: bool) -> Option<usize> {
    if wrap {
        Some(i64::from(v).rem_euclid(len as i64) as usize)
    } else if v >= 0 && (v as usize) < len {
        Some(v as usize)
    } else {
        None
    }
}

fn validate(data: &[Vec<f64>]) -> Result<(), GridError> {
    if data.is_empty() {
        return Err(GridError::Empty);
    }

    let empty: Vec<usize> = data
        .iter()
        .enumerate()
        .filter(|(_, row)| row.is_empty())
        .map(|(i, _)| i)
        .collect();
    if !empty.is_empty() {
        return Err(GridError::EmptyRow { rows: empty });
    }

    let cols = data[0].len();
    if data.iter().any(|row| row.len() != cols) {
        return Err(GridError::Ragged {
            lengths: data.iter().map(Vec::len).collect(),
        });
    }

    for (row, values) in data.iter().enumerate() {
        if let Some((col, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(GridError::NonNumeric { row, col, value });
        }
    }

    Ok(())
}

impl fmt::Display for Grid<'_> {
    /// `Grid [R X C]`; the alternate form appends the values.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (rows, cols) = self.shape();
        write!(f, "Grid [{rows} X {cols}]")?;
        if f.alternate() {
            for row in self.data.iter() {
                writeln!(f)?;
                let line: Vec<String> = row.iter().map(|v| format!("{v:>4}")).collect();
                write!(f, "{}", line.join(" "))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Vec<f64>> {
        vec![
            vec![0.0, -1.0, 50.0],
            vec![-99.0, 2.0, 3.0],
            vec![-1.0, -6.0, -4.0],
        ]
    }

    fn config(wrap_rows: bool, wrap_cols: bool, distance_type: DistanceType) -> GridConfig {
        GridConfig {
            wrap_rows,
            wrap_cols,
            distance_type,
            copy_data: false,
        }
    }

    #[test]
    fn rejects_invalid_matrices() {
        assert_eq!(Grid::new(&[], GridConfig::default()).unwrap_err(), GridError::Empty);

        let err = Grid::new(&[vec![]], GridConfig::default()).unwrap_err();
        assert_eq!(err, GridError::EmptyRow { rows: vec![0] });
        assert!(err.to_string().contains("Empty row(s)"));

        let ragged = vec![vec![1.0, 2.0], vec![3.0]];
        assert_eq!(
            Grid::new(&ragged, GridConfig::default()).unwrap_err(),
            GridError::Ragged { lengths: vec![2, 1] }
        );

        let nan = vec![vec![0.0, 1.0], vec![f64::NAN, 0.0]];
        let err = Grid::new(&nan, GridConfig::default()).unwrap_err();
        assert!(matches!(err, GridError::NonNumeric { row: 1, col: 0, .. }));
        assert!(err.to_string().starts_with("Invalid cell found"));
    }

    #[test]
    fn positive_cells_ignore_zero_and_negative() {
        let data = sample();
        let g = Grid::new(&data, GridConfig::default()).unwrap();
        let pos = g.positive_cells();
        assert_eq!(pos.len(), 3);
        assert!(pos[0] == (0, 2));
        assert!(pos[1] == (1, 1));
        assert!(pos[2] == (1, 2));
    }

    #[test]
    fn get_validates_non_wrapping_indices() {
        let data = sample();
        let g = Grid::new(&data, GridConfig::default()).unwrap();
        assert_eq!(g.get(2, 1).unwrap().value, -6.0);
        let err = g.get(44, 8).unwrap_err();
        assert!(err.to_string().starts_with("Invalid row/col: (44,8)"));
        assert!(g.get(-1, 0).is_err());
    }

    #[test]
    fn get_wraps_with_true_modulo() {
        let data = sample();
        let g = Grid::new(&data, config(true, false, DistanceType::Manhattan)).unwrap();
        let c = g.get(-1, 2).unwrap();
        assert!(c == (2, 2));
        assert_eq!(c.value, -4.0);
        assert!(g.get(7, 0).unwrap() == (1, 0));
        assert!(g.get(0, 3).is_err());

        let g = Grid::new(&data, config(false, true, DistanceType::Manhattan)).unwrap();
        assert!(g.get(0, -4).unwrap() == (0, 2));
        assert!(g.get(3, 0).is_err());
    }

    #[test]
    fn iterates_row_major() {
        let data = sample();
        let g = Grid::new(&data, GridConfig::default()).unwrap();
        let values: Vec<f64> = g.iter().map(|c| c.value).collect();
        assert_eq!(values, vec![0.0, -1.0, 50.0, -99.0, 2.0, 3.0, -1.0, -6.0, -4.0]);
    }

    #[test]
    fn neighbors_stop_at_non_wrapping_edges() {
        let data = vec![vec![0.0; 4]; 4];
        let g = Grid::new(&data, GridConfig::default()).unwrap();
        assert_eq!(g.immediate_neighbors(&Cell::new(0, 0, 0.0)).count(), 2);
        assert_eq!(g.immediate_neighbors(&Cell::new(1, 1, 0.0)).count(), 4);

        let g = Grid::new(&data, config(false, false, DistanceType::Chebyshev)).unwrap();
        assert_eq!(g.immediate_neighbors(&Cell::new(0, 0, 0.0)).count(), 3);
        assert_eq!(g.immediate_neighbors(&Cell::new(0, 1, 0.0)).count(), 5);
        assert_eq!(g.immediate_neighbors(&Cell::new(2, 2, 0.0)).count(), 8);
    }

    #[test]
    fn neighbors_cross_wrapping_edges() {
        let data = vec![vec![0.0; 4]; 4];
        let g = Grid::new(&data, config(true, false, DistanceType::Manhattan)).unwrap();
        let n: Vec<Cell> = g.immediate_neighbors(&Cell::new(0, 0, 0.0)).collect();
        assert_eq!(n.len(), 3);
        assert!(n.iter().any(|c| *c == (3, 0)));

        let g = Grid::new(&data, config(true, true, DistanceType::Chebyshev)).unwrap();
        let n: Vec<Cell> = g.immediate_neighbors(&Cell::new(0, 0, 0.0)).collect();
        assert_eq!(n.len(), 8);
        assert!(n.iter().any(|c| *c == (3, 3)));
    }

    #[test]
    fn wrap_lengths_follow_config() {
        let data = vec![vec![0.0; 5]; 3];
        let g = Grid::new(&data, config(true, false, DistanceType::Manhattan)).unwrap();
        assert_eq!(g.wrap_row_at(), Some(3));
        assert_eq!(g.wrap_col_at(), None);
        assert_eq!(g.shape(), (3, 5));
        assert_eq!(g.num_cells(), 15);
    }

    #[test]
    fn copy_data_detaches_from_source() {
        let data = sample();
        let cfg = GridConfig {
            copy_data: true,
            ..GridConfig::default()
        };
        let g = Grid::new(&data, cfg).unwrap();
        assert_eq!(g.get(0, 2).unwrap().value, 50.0);

        let detached = Grid::new(&data, GridConfig::default()).unwrap().into_owned();
        drop(data);
        assert_eq!(detached.get(1, 1).unwrap().value, 2.0);

        let owned = Grid::from_owned(vec![vec![1.0]], GridConfig::default()).unwrap();
        assert_eq!(owned.positive_cells().len(), 1);
    }

    #[test]
    fn display_shape_and_values() {
        let data = sample();
        let g = Grid::new(&data, GridConfig::default()).unwrap();
        assert_eq!(g.to_string(), "Grid [3 X 3]");
        let full = format!("{g:#}");
        assert!(full.starts_with("Grid [3 X 3]\n"));
        assert_eq!(full.lines().count(), 4);
    }
}
