//! Avalanche resolution.
//!
//! Cells at or above [`TOPPLE_THRESHOLD`] shed `threshold * k` grains, one share of
//! `k` to each axis-aligned neighbor, where `k = height / threshold`. Shares aimed
//! off the grid are discarded and counted as lost. Resolution uses an explicit
//! stack so cascade length never maps onto call depth, and pending duplicates are
//! skipped when popped rather than filtered on push.

use std::collections::HashSet;
use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

use super::grid::{Grid, NEIGHBOR_OFFSETS, TOPPLE_THRESHOLD};

/// Counters for a single drop.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StepMetrics {
    /// Individual topple operations, counting a multi-topple as several.
    pub topples: u64,
    /// Distinct cells that toppled at least once.
    pub cells_affected: u64,
    /// Grains that left the grid through its edges.
    pub grains_lost: u64,
}

impl StepMetrics {
    /// Fold `other` into these counters.
    pub fn accumulate(&mut self, other: &StepMetrics) {
        self.topples += other.topples;
        self.cells_affected += other.cells_affected;
        self.grains_lost += other.grains_lost;
    }
}

impl AddAssign for StepMetrics {
    fn add_assign(&mut self, rhs: Self) {
        self.accumulate(&rhs);
    }
}

/// Topple until every cell is below threshold, starting from `seed`.
///
/// `seed` is the index of the cell that just received a grain. Returns the
/// metrics for the whole avalanche.
pub fn resolve_cascade(grid: &mut Grid, seed: usize) -> StepMetrics {
    let mut metrics = StepMetrics::default();
    if grid.cells[seed] < TOPPLE_THRESHOLD {
        return metrics;
    }

    let mut pending = vec![seed];
    let mut affected = HashSet::new();

    while let Some(idx) = pending.pop() {
        let height = grid.cells[idx];
        if height < TOPPLE_THRESHOLD {
            continue;
        }

        let count = height / TOPPLE_THRESHOLD;
        grid.cells[idx] -= count * TOPPLE_THRESHOLD;

        for offset in NEIGHBOR_OFFSETS {
            match grid.neighbor(idx, offset) {
                Some(n) => {
                    grid.cells[n] += count;
                    if grid.cells[n] >= TOPPLE_THRESHOLD {
                        pending.push(n);
                    }
                }
                None => metrics.grains_lost += count as u64,
            }
        }

        metrics.topples += count as u64;
        affected.insert(idx);
    }

    metrics.cells_affected = affected.len() as u64;
    metrics
}
