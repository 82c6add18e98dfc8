use serde::{Deserialize, Serialize};

use crate::cell::{Cell, Coord};

/// One cell of a neighborhood, as reported to callers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Neighbor {
    pub row: i32,
    pub col: i32,
    pub distance: u32,
    /// The cell is itself a source (distance 0).
    pub is_positive: bool,
}

/// External shape of a search result.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeighborhoodResult {
    /// Cells in range, sources included.
    pub count: usize,
    pub neighbors: Vec<Neighbor>,
    pub positive_cells: Vec<Coord>,
}

/// Package annotated cells for output.
///
/// Sources are the distance-0 subset, so `positive_cells` is always a
/// subset of `neighbors`. Entries are sorted row-major.
pub fn assemble_result(cells: &[Cell<u32>]) -> NeighborhoodResult {
    let mut neighbors: Vec<Neighbor> = cells
        .iter()
        .map(|cell| Neighbor {
            row: cell.row,
            col: cell.col,
            distance: cell.value,
            is_positive: cell.value == 0,
        })
        .collect();
    neighbors.sort_by_key(|n| (n.row, n.col));

    let positive_cells = neighbors
        .iter()
        .filter(|n| n.is_positive)
        .map(|n| Coord {
            row: n.row,
            col: n.col,
        })
        .collect();

    NeighborhoodResult {
        count: neighbors.len(),
        neighbors,
        positive_cells,
    }
}
