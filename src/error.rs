//! Error types for the sandpile and automaton engines.

use thiserror::Error;

/// Errors returned by [`crate::sandpile::Sandpile`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SandpileError {
    /// Grid side length is zero or larger than the supported maximum.
    #[error("invalid grid size {size}: must be between 1 and {max}")]
    InvalidSize {
        /// Requested side length.
        size: usize,
        /// Largest supported side length.
        max: usize,
    },

    /// Explicit drop target lies outside the grid.
    #[error("drop target ({row}, {col}) is outside a {size}x{size} grid")]
    OutOfBounds {
        /// Target row.
        row: usize,
        /// Target column.
        col: usize,
        /// Grid side length.
        size: usize,
    },

    /// `drop` was called before `initialize`.
    #[error("sandpile grid has not been initialized")]
    Uninitialized,
}

/// Errors from rule construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    /// Rule number does not fit in 8 bits.
    #[error("rule number {0} is out of range 0..=255")]
    OutOfRange(u32),

    /// Neighborhood index does not address one of the 8 table entries.
    #[error("neighborhood index {0} is out of range 0..=7")]
    InvalidNeighborhood(usize),
}

/// Errors from validating driver-supplied configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A numeric setting fell outside its accepted range.
    #[error("{field} = {value} is outside {min}..={max}")]
    OutOfRange {
        /// Name of the offending setting.
        field: &'static str,
        /// Supplied value.
        value: f64,
        /// Inclusive lower bound.
        min: f64,
        /// Inclusive upper bound.
        max: f64,
    },

    /// Rule number could not be turned into a rule.
    #[error(transparent)]
    Rule(#[from] RuleError),
}
