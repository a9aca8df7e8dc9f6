//! Sandpile Automata - Abelian sandpile and elementary cellular automaton engines
//!
//! Two independent, single-threaded simulation cores:
//!
//! - [`sandpile`]: grain drops on a square grid with absorbing edges, settled
//!   to a stable configuration before each call returns.
//! - [`automaton`]: radius-1 binary rules, their truth tables, and the row
//!   transition function.
//!
//! A host drives them once per tick, either through the Rust API or through
//! the C ABI in [`ffi`].
//!
//! ```
//! use sandpile_automata::automaton::{next_row, Boundary, Rule};
//! use sandpile_automata::sandpile::{FillPolicy, Sandpile};
//!
//! let mut pile = Sandpile::seeded(7);
//! pile.initialize(3, FillPolicy::Zeros).unwrap();
//! for _ in 0..4 {
//!     pile.drop(Some((1, 1))).unwrap();
//! }
//! assert_eq!(pile.rows(), vec![vec![0, 1, 0], vec![1, 0, 1], vec![0, 1, 0]]);
//!
//! let next = next_row(&[0, 0, 1, 0, 0], Rule::new(90), Boundary::Wrap);
//! assert_eq!(next, vec![0, 1, 0, 1, 0]);
//! ```

pub mod automaton;
pub mod config;
pub mod error;
pub mod ffi;
pub mod sandpile;

pub use config::{AutomatonConfig, InitKind, SandpileConfig};
pub use error::{ConfigError, RuleError, SandpileError};
