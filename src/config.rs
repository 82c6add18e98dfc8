use crate::distance::DistanceType;
use crate::grid::GridConfig;
use crate::search::Algorithm;

/// Everything a neighborhood query needs besides the matrix itself.
/// Shared by the CLI and the HTTP layer so both default the same way.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchParams {
    /// Maximum distance from the nearest source. Must be non-negative.
    pub distance: i64,
    pub algorithm: Algorithm,
    pub wrap_rows: bool,
    pub wrap_cols: bool,
    pub distance_type: DistanceType,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            distance: 3,
            algorithm: Algorithm::BruteForce,
            wrap_rows: false,
            wrap_cols: false,
            distance_type: DistanceType::Manhattan,
        }
    }
}

impl SearchParams {
    pub fn grid_config(&self) -> GridConfig {
        GridConfig {
            wrap_rows: self.wrap_rows,
            wrap_cols: self.wrap_cols,
            distance_type: self.distance_type,
            copy_data: false,
        }
    }
}
