//! Initial-condition generators for the first row of a run.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::stepping::Row;

/// Starting pattern for row 0.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum InitialCondition {
    /// One live cell at `width / 2`.
    #[default]
    Single,
    /// Each cell alive independently with probability `density`.
    Random { density: f64 },
    /// Live cells at even positions.
    Stripe,
    /// Caller-supplied row; ignored in favor of `Single` if its length is wrong.
    Custom { cells: Vec<u8> },
}

/// Build row 0 of width `width` for `init`.
pub fn initial_row<R: Rng + ?Sized>(width: usize, init: &InitialCondition, rng: &mut R) -> Row {
    match init {
        InitialCondition::Single => single(width),
        InitialCondition::Random { density } => {
            let p = clamp_density(*density);
            (0..width).map(|_| u8::from(rng.random_bool(p))).collect()
        }
        InitialCondition::Stripe => (0..width).map(|i| u8::from(i % 2 == 0)).collect(),
        InitialCondition::Custom { cells } if cells.len() == width => {
            cells.iter().map(|&c| u8::from(c != 0)).collect()
        }
        InitialCondition::Custom { .. } => single(width),
    }
}

fn single(width: usize) -> Row {
    let mut row = vec![0; width];
    if let Some(center) = row.get_mut(width / 2) {
        *center = 1;
    }
    row
}

/// Probabilities outside `[0, 1]` are clamped and NaN becomes 0.
pub(crate) fn clamp_density(density: f64) -> f64 {
    if density.is_nan() {
        0.0
    } else {
        density.clamp(0.0, 1.0)
    }
}
