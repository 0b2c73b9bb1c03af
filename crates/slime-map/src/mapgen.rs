//! Random barrier generation.
//!
//! Every cell is blocked independently with a fixed probability.

use std::fmt;

use rand::{Rng, RngExt};
use slime_core::{Grid, GridError};

/// Default barrier density.
pub const DEFAULT_DENSITY: f64 = 0.33;

/// Highest recommended barrier density. Denser maps break the open cells
/// into small isolated pockets and most searches end unreachable.
pub const PERCOLATION_THRESHOLD: f64 = 0.367713;

/// Errors raised by [`BarrierGen`].
#[derive(Debug, Clone, PartialEq)]
pub enum MapGenError {
    /// The density is not a probability in `[0, 1]`.
    InvalidDensity(f64),
    /// The requested grid could not be built.
    Grid(GridError),
}

impl From<GridError> for MapGenError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

impl fmt::Display for MapGenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDensity(d) => write!(f, "barrier density {d} is not within [0, 1]"),
            Self::Grid(e) => write!(f, "map generation: {e}"),
        }
    }
}

impl std::error::Error for MapGenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            Self::InvalidDensity(_) => None,
        }
    }
}

/// Barrier generator driven by a caller-supplied random source.
///
/// Seed the source (e.g. `StdRng::seed_from_u64`) for reproducible maps.
pub struct BarrierGen<R: Rng> {
    pub rng: R,
}

impl<R: Rng> BarrierGen<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Overwrite every cell of `grid`: blocked with probability `density`,
    /// open otherwise.
    ///
    /// Returns the number of blocked cells.
    pub fn random_fill(&mut self, grid: &mut Grid, density: f64) -> Result<usize, MapGenError> {
        if !(0.0..=1.0).contains(&density) {
            return Err(MapGenError::InvalidDensity(density));
        }
        if density > PERCOLATION_THRESHOLD {
            log::warn!(
                "barrier density {density} exceeds the percolation threshold; open regions will be small"
            );
        }

        let rng = &mut self.rng;
        grid.fill_fn(|_| rng.random_bool(density));
        let blocked = grid.count_blocked();
        log::debug!(
            "generated {}x{} barrier map: {blocked} blocked cells",
            grid.width(),
            grid.height()
        );
        Ok(blocked)
    }

    /// Build a fresh `width × height` grid with [`random_fill`](Self::random_fill).
    pub fn generate(
        &mut self,
        width: i32,
        height: i32,
        density: f64,
    ) -> Result<Grid, MapGenError> {
        let mut grid = Grid::try_new(width, height)?;
        self.random_fill(&mut grid, density)?;
        Ok(grid)
    }
}
