//! Grid buffer, fill policies and cell addressing helpers.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// A cell at or above this height topples.
pub const TOPPLE_THRESHOLD: u32 = 4;

/// Axis-aligned neighbor offsets (row, col): up, down, left, right.
pub const NEIGHBOR_OFFSETS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// How a freshly allocated grid is filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillPolicy {
    /// Every cell starts at 0.
    #[default]
    Zeros,
    /// Every cell drawn uniformly from `{0, 1, 2, 3}`.
    RandomUniform0to3,
}

impl FillPolicy {
    /// Decode the integer code used across the C ABI.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(FillPolicy::Zeros),
            1 => Some(FillPolicy::RandomUniform0to3),
            _ => None,
        }
    }
}

/// Square grid of grain heights, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Grid {
    pub size: usize,
    pub cells: Vec<u32>,
}

/// Allocate a `size`×`size` grid filled according to `fill`.
pub fn create_grid<R: Rng + ?Sized>(size: usize, fill: FillPolicy, rng: &mut R) -> Grid {
    let len = size * size;
    let cells = match fill {
        FillPolicy::Zeros => vec![0; len],
        FillPolicy::RandomUniform0to3 => (0..len)
            .map(|_| rng.random_range(0..TOPPLE_THRESHOLD))
            .collect(),
    };
    Grid { size, cells }
}

impl Grid {
    /// Calculate the linear index for a (row, col) coordinate.
    #[inline]
    pub fn index_of(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    /// Check if coordinates are within grid bounds.
    #[inline]
    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size
    }

    /// Height at (row, col), or `None` outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Option<u32> {
        if self.in_bounds(row, col) {
            Some(self.cells[self.index_of(row, col)])
        } else {
            None
        }
    }

    /// Index of the neighbor of `idx` at `offset`, or `None` if it falls off the edge.
    #[inline]
    pub fn neighbor(&self, idx: usize, offset: (isize, isize)) -> Option<usize> {
        let row = (idx / self.size).checked_add_signed(offset.0)?;
        let col = (idx % self.size).checked_add_signed(offset.1)?;
        if self.in_bounds(row, col) {
            Some(self.index_of(row, col))
        } else {
            None
        }
    }

    /// Sum of all heights.
    pub fn total(&self) -> u64 {
        self.cells.iter().map(|&c| c as u64).sum()
    }

    /// True when every cell is below the toppling threshold.
    pub fn is_stable(&self) -> bool {
        self.cells.iter().all(|&c| c < TOPPLE_THRESHOLD)
    }

    /// Number of cells at each stable height 0..=3.
    pub fn height_histogram(&self) -> [usize; 4] {
        let mut counts = [0; 4];
        for &c in &self.cells {
            if let Some(slot) = counts.get_mut(c as usize) {
                *slot += 1;
            }
        }
        counts
    }
}
