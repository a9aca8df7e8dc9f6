//! C ABI for driving the engines from a host UI.
//!
//! All functions are marked with `#[no_mangle]` and use `extern "C"`.
//!
//! The actual logic is in the `sandpile` and `automaton` modules. These functions
//! are thin wrappers that handle null checks, pointer safety, and C-to-Rust
//! conversions, reporting failures as integer status codes.

pub mod automaton;
pub mod lifecycle;
pub mod sandpile;

pub use automaton::{
    eca_initial_row, eca_next_row, eca_rule_to_table, eca_table_to_rule, eca_toggle_bit,
};
pub use lifecycle::{sp_create, sp_destroy, SandpileHandle};
pub use sandpile::{
    sp_drop_at, sp_drop_random, sp_extract_region, sp_get_cell, sp_get_size, sp_get_totals,
    sp_initialize, sp_total_grains, SP_BAD_FILL, SP_INVALID, SP_NULL, SP_OK,
};
