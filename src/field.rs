/// Row-major flat storage, one slot per grid cell. No per-cell objects.
///
/// Used as the coordinate -> distance map during frontier expansion and as
/// the input to the renderers.
#[derive(Clone, Debug)]
pub struct Field<T> {
    pub data: Vec<T>,
    pub rows: usize,
    pub cols: usize,
}

impl<T: Copy> Field<T> {
    pub fn filled(rows: usize, cols: usize, v: T) -> Self {
        Self {
            data: vec![v; rows * cols],
            rows,
            cols,
        }
    }

    #[inline]
    pub fn idx(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.rows && col < self.cols);
        row * self.cols + col
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> T {
        self.data[self.idx(row, col)]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, v: T) {
        let i = self.idx(row, col);
        self.data[i] = v;
    }

    /// `(row, col, value)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        let cols = self.cols;
        self.data
            .iter()
            .enumerate()
            .map(move |(i, &v)| (i / cols, i % cols, v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_major_layout() {
        let mut f = Field::filled(2, 3, 0u32);
        f.set(1, 2, 9);
        f.set(0, 1, 4);
        assert_eq!(f.data, vec![0, 4, 0, 0, 0, 9]);
        assert_eq!(f.get(1, 2), 9);

        let hits: Vec<_> = f.iter().filter(|&(_, _, v)| v > 0).collect();
        assert_eq!(hits, vec![(0, 1, 4), (1, 2, 9)]);
    }

    #[test]
    fn filled_uses_sentinel() {
        let f = Field::filled(2, 2, u32::MAX);
        assert!(f.data.iter().all(|&v| v == u32::MAX));
    }
}
