//! Stateful sandpile engine: owns the grid, the random source and running totals.

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::grid::{create_grid, FillPolicy, Grid};
use super::region::extract_region;
use super::toppling::{resolve_cascade, StepMetrics};
use crate::error::SandpileError;

/// Largest grid side accepted by [`Sandpile::initialize`].
pub const MAX_GRID_SIZE: usize = 4096;

/// Avalanches with more topples than this are reported at debug level.
const LARGE_AVALANCHE: u64 = 1024;

/// Abelian sandpile on a square grid with absorbing edges.
///
/// The random source `R` drives random fills and random drop targets, so a
/// seeded generator makes whole runs reproducible.
#[derive(Debug, Clone)]
pub struct Sandpile<R = StdRng> {
    grid: Grid,
    rng: R,
    drops: u64,
    totals: StepMetrics,
}

impl Sandpile<StdRng> {
    /// Uninitialized engine with a seeded [`StdRng`].
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Sandpile<R> {
    /// Uninitialized engine; call [`Sandpile::initialize`] before dropping.
    pub fn with_rng(rng: R) -> Self {
        Self {
            grid: Grid::default(),
            rng,
            drops: 0,
            totals: StepMetrics::default(),
        }
    }

    /// Engine with a freshly allocated `size`×`size` grid.
    pub fn new(size: usize, fill: FillPolicy, rng: R) -> Result<Self, SandpileError> {
        let mut pile = Self::with_rng(rng);
        pile.initialize(size, fill)?;
        Ok(pile)
    }

    /// Replace the grid with a new `size`×`size` one, discarding prior state.
    ///
    /// On error the current grid is left as it was.
    pub fn initialize(&mut self, size: usize, fill: FillPolicy) -> Result<(), SandpileError> {
        if size == 0 || size > MAX_GRID_SIZE {
            return Err(SandpileError::InvalidSize {
                size,
                max: MAX_GRID_SIZE,
            });
        }

        self.grid = create_grid(size, fill, &mut self.rng);
        self.drops = 0;
        self.totals = StepMetrics::default();
        debug!("sandpile initialized: {}x{} {:?}", size, size, fill);
        Ok(())
    }

    /// Add one grain at `target`, or at a random cell when `None`, and settle
    /// the resulting avalanche.
    pub fn drop(&mut self, target: Option<(usize, usize)>) -> Result<StepMetrics, SandpileError> {
        match target {
            Some((row, col)) => self.drop_at(row, col),
            None => self.drop_random(),
        }
    }

    /// Add one grain at (row, col) and settle the resulting avalanche.
    pub fn drop_at(&mut self, row: usize, col: usize) -> Result<StepMetrics, SandpileError> {
        if self.grid.size == 0 {
            return Err(SandpileError::Uninitialized);
        }
        if !self.grid.in_bounds(row, col) {
            return Err(SandpileError::OutOfBounds {
                row,
                col,
                size: self.grid.size,
            });
        }

        let idx = self.grid.index_of(row, col);
        self.grid.cells[idx] += 1;
        let metrics = resolve_cascade(&mut self.grid, idx);

        self.drops += 1;
        self.totals += metrics;

        trace!("drop at ({}, {}): {:?}", row, col, metrics);
        if metrics.topples > LARGE_AVALANCHE {
            debug!(
                "large avalanche from ({}, {}): {} topples over {} cells, {} grains lost",
                row, col, metrics.topples, metrics.cells_affected, metrics.grains_lost
            );
        }

        Ok(metrics)
    }

    /// Add one grain at a uniformly random cell and settle the avalanche.
    pub fn drop_random(&mut self) -> Result<StepMetrics, SandpileError> {
        if self.grid.size == 0 {
            return Err(SandpileError::Uninitialized);
        }
        let row = self.rng.random_range(0..self.grid.size);
        let col = self.rng.random_range(0..self.grid.size);
        self.drop_at(row, col)
    }
}

impl<R> Sandpile<R> {
    /// Grid side length; 0 before initialization.
    pub fn size(&self) -> usize {
        self.grid.size
    }

    /// Height at (row, col).
    pub fn get(&self, row: usize, col: usize) -> Option<u32> {
        self.grid.get(row, col)
    }

    /// Row-major view of all heights.
    pub fn cells(&self) -> &[u32] {
        &self.grid.cells
    }

    /// Borrow the underlying grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Heights as nested rows, mainly for display and assertions.
    pub fn rows(&self) -> Vec<Vec<u32>> {
        if self.grid.size == 0 {
            return Vec::new();
        }
        self.grid
            .cells
            .chunks(self.grid.size)
            .map(<[u32]>::to_vec)
            .collect()
    }

    /// Total grains currently on the grid.
    pub fn total_grains(&self) -> u64 {
        self.grid.total()
    }

    /// True when no cell is at or above the toppling threshold.
    pub fn is_stable(&self) -> bool {
        self.grid.is_stable()
    }

    /// Number of cells at each height 0..=3.
    pub fn height_histogram(&self) -> [usize; 4] {
        self.grid.height_histogram()
    }

    /// Drops performed since the last initialization.
    pub fn drops(&self) -> u64 {
        self.drops
    }

    /// Metrics summed over every drop since the last initialization.
    pub fn totals(&self) -> StepMetrics {
        self.totals
    }

    /// Copy a clamped rectangular window of heights into `out`.
    ///
    /// See [`extract_region`] for layout and return value.
    pub fn extract_region(
        &self,
        out: &mut [u8],
        min_row: usize,
        min_col: usize,
        max_row: usize,
        max_col: usize,
    ) -> usize {
        extract_region(&self.grid, out, min_row, min_col, max_row, max_col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zeros(size: usize) -> Sandpile {
        let mut pile = Sandpile::seeded(0);
        pile.initialize(size, FillPolicy::Zeros).unwrap();
        pile
    }

    #[test]
    fn test_initialize_rejects_zero() {
        let mut pile = Sandpile::seeded(0);
        assert_eq!(
            pile.initialize(0, FillPolicy::Zeros),
            Err(SandpileError::InvalidSize {
                size: 0,
                max: MAX_GRID_SIZE,
            })
        );
        assert_eq!(pile.size(), 0);
    }

    #[test]
    fn test_failed_initialize_keeps_grid() {
        let mut pile = zeros(3);
        pile.drop_at(0, 0).unwrap();
        assert!(pile.initialize(MAX_GRID_SIZE + 1, FillPolicy::Zeros).is_err());
        assert_eq!(pile.size(), 3);
        assert_eq!(pile.get(0, 0), Some(1));
    }

    #[test]
    fn test_drop_before_initialize() {
        let mut pile = Sandpile::seeded(0);
        assert_eq!(pile.drop_at(0, 0), Err(SandpileError::Uninitialized));
        assert_eq!(pile.drop(None), Err(SandpileError::Uninitialized));
    }

    #[test]
    fn test_drop_out_of_bounds_leaves_grid() {
        let mut pile = zeros(3);
        assert_eq!(
            pile.drop(Some((3, 0))),
            Err(SandpileError::OutOfBounds {
                row: 3,
                col: 0,
                size: 3,
            })
        );
        assert_eq!(pile.total_grains(), 0);
        assert_eq!(pile.drops(), 0);
    }

    #[test]
    fn test_center_scenario() {
        let mut pile = zeros(3);

        let first = pile.drop(Some((1, 1))).unwrap();
        assert_eq!(pile.rows(), vec![vec![0, 0, 0], vec![0, 1, 0], vec![0, 0, 0]]);
        assert_eq!(first, StepMetrics::default());

        pile.drop(Some((1, 1))).unwrap();
        pile.drop(Some((1, 1))).unwrap();
        let fourth = pile.drop(Some((1, 1))).unwrap();

        assert_eq!(pile.rows(), vec![vec![0, 1, 0], vec![1, 0, 1], vec![0, 1, 0]]);
        assert_eq!(
            fourth,
            StepMetrics {
                topples: 1,
                cells_affected: 1,
                grains_lost: 0,
            }
        );
        assert_eq!(pile.drops(), 4);
        assert_eq!(pile.totals(), fourth);
    }

    #[test]
    fn test_single_cell_grid() {
        let mut pile = zeros(1);
        for _ in 0..3 {
            assert_eq!(pile.drop(None).unwrap(), StepMetrics::default());
        }
        assert_eq!(pile.get(0, 0), Some(3));

        let metrics = pile.drop(None).unwrap();
        assert_eq!(metrics.grains_lost, 4);
        assert_eq!(metrics.topples, 1);
        assert_eq!(pile.get(0, 0), Some(0));
    }

    #[test]
    fn test_random_drops_are_reproducible() {
        let run = |seed| {
            let mut pile = Sandpile::seeded(seed);
            pile.initialize(16, FillPolicy::RandomUniform0to3).unwrap();
            let metrics: Vec<_> = (0..200).map(|_| pile.drop(None).unwrap()).collect();
            (pile.cells().to_vec(), metrics)
        };

        assert_eq!(run(42), run(42));
    }

    #[test]
    fn test_random_drops_reach_every_cell() {
        let mut pile = zeros(3);
        let mut hits = [0u32; 9];

        for _ in 0..300 {
            let before = pile.cells().to_vec();
            let metrics = pile.drop(None).unwrap();
            if metrics.topples == 0 {
                // Without an avalanche exactly one cell gained a grain
                let idx = (0..9).find(|&i| pile.cells()[i] == before[i] + 1).unwrap();
                hits[idx] += 1;
            }
        }

        assert!(hits.iter().all(|&n| n > 0), "hits {:?}", hits);
    }

    #[test]
    fn test_conservation_over_random_run() {
        let mut pile = Sandpile::seeded(9);
        pile.initialize(12, FillPolicy::RandomUniform0to3).unwrap();

        for _ in 0..500 {
            let before = pile.total_grains() as i64;
            let metrics = pile.drop(None).unwrap();
            let after = pile.total_grains() as i64;
            assert_eq!(after - before, 1 - metrics.grains_lost as i64);
            assert!(pile.is_stable());
        }
    }

    #[test]
    fn test_initialize_resets_totals() {
        let mut pile = zeros(1);
        for _ in 0..4 {
            pile.drop(None).unwrap();
        }
        assert_eq!(pile.totals().grains_lost, 4);

        pile.initialize(2, FillPolicy::Zeros).unwrap();
        assert_eq!(pile.drops(), 0);
        assert_eq!(pile.totals(), StepMetrics::default());
        assert_eq!(pile.rows(), vec![vec![0, 0], vec![0, 0]]);
    }
}
