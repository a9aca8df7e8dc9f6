//! Abelian sandpile engine.
//!
//! Grains are dropped one at a time onto a square grid with absorbing edges.
//! Each drop settles completely before returning, so every cell is below
//! [`TOPPLE_THRESHOLD`] between calls.

pub mod engine;
pub mod grid;
pub mod region;
pub mod toppling;

pub use engine::{Sandpile, MAX_GRID_SIZE};
pub use grid::{create_grid, FillPolicy, Grid, TOPPLE_THRESHOLD};
pub use region::extract_region;
pub use toppling::{resolve_cascade, StepMetrics};
