pub mod api;
pub mod cell;
pub mod config;
pub mod distance;
pub mod error;
pub mod field;
pub mod grid;
pub mod render;
pub mod result;
pub mod search;

use std::time::Instant;

use tracing::info;

use config::SearchParams;
use error::Error;
use grid::Grid;
use result::{NeighborhoodResult, assemble_result};
use search::{NeighborSearch, Search};

pub use cell::{Cell, Coord};
pub use distance::DistanceType;
pub use grid::GridConfig;
pub use search::Algorithm;

pub struct Timing {
    pub name: &'static str,
    pub ms: f64,
}

/// Output of [`neighborhood`]: the shaped result plus the raw cells it was
/// built from, for callers that render or compare them.
pub struct Neighborhood {
    pub result: NeighborhoodResult,
    pub cells: Vec<Cell<u32>>,
    pub max_distance: u32,
    pub timings: Vec<Timing>,
}

/// Validate `data`, run the configured search and shape the result.
///
/// Fails before any searching if the matrix or the threshold is invalid.
pub fn neighborhood(
    data: &[Vec<f64>],
    params: &SearchParams,
) -> Result<Neighborhood, Error> {
    let mut timings = Vec::new();
    let total_start = Instant::now();

    let t = Instant::now();
    let grid = Grid::new(data, params.grid_config())?;
    let search = Search::new(params.algorithm, &grid, params.distance)?;
    timings.push(Timing {
        name: "validate",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    let t = Instant::now();
    let cells = search.find_neighbors();
    timings.push(Timing {
        name: search.algorithm().as_str(),
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    let t = Instant::now();
    let result = assemble_result(&cells);
    timings.push(Timing {
        name: "assemble",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    let total_ms = total_start.elapsed().as_secs_f64() * 1000.0;
    timings.push(Timing {
        name: "TOTAL",
        ms: total_ms,
    });

    info!(
        grid = %grid,
        algorithm = %params.algorithm,
        distance = params.distance,
        count = result.count,
        ms = total_ms,
        "neighborhood computed"
    );

    Ok(Neighborhood {
        result,
        cells,
        max_distance: search.max_distance(),
        timings,
    })
}
