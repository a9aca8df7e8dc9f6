//! Stateless elementary automaton entry points.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::automaton::{
    initial_row, next_row, rule_number_to_table, table_to_rule_number, Boundary, InitialCondition,
    Rule, RuleTable,
};

/// Writes the 8-entry truth table of `rule` into `out`.
///
/// # Safety
/// - `out` must point to at least 8 writable bytes, or be null
///
/// # Returns
/// 0 on success, 1 on null pointer.
#[no_mangle]
pub unsafe extern "C" fn eca_rule_to_table(rule: u8, out: *mut u8) -> i32 {
    if out.is_null() {
        return 1;
    }
    let table = rule_number_to_table(rule);
    std::ptr::copy_nonoverlapping(table.as_ptr(), out, table.len());
    0
}

/// Reads an 8-entry truth table and returns its rule number.
///
/// # Safety
/// - `table` must point to at least 8 readable bytes, or be null
///
/// # Returns
/// The rule number 0..=255, or -1 on null pointer.
#[no_mangle]
pub unsafe extern "C" fn eca_table_to_rule(table: *const u8) -> i32 {
    if table.is_null() {
        return -1;
    }
    let mut entries: RuleTable = [0; 8];
    std::ptr::copy_nonoverlapping(table, entries.as_mut_ptr(), entries.len());
    table_to_rule_number(&entries) as i32
}

/// Flips the table entry for neighborhood `index` of `rule`.
///
/// # Returns
/// The new rule number, or -1 if `index` is not 0..=7.
#[no_mangle]
pub extern "C" fn eca_toggle_bit(rule: u8, index: u32) -> i32 {
    match Rule::new(rule).with_toggled(index as usize) {
        Ok(toggled) => toggled.number() as i32,
        Err(_) => -1,
    }
}

/// Computes the generation after `prev` into `out`.
///
/// `wrap` non-zero reads past the edges toroidally; zero treats them as dead.
///
/// # Safety
/// - `prev` must point to `width` readable bytes and `out` to `width` writable
///   bytes; the two must not overlap
///
/// # Returns
/// Number of cells written, or 0 on null pointer.
#[no_mangle]
pub unsafe extern "C" fn eca_next_row(
    prev: *const u8,
    out: *mut u8,
    width: usize,
    rule: u8,
    wrap: u8,
) -> u64 {
    if prev.is_null() || out.is_null() {
        return 0;
    }

    let prev = std::slice::from_raw_parts(prev, width);
    let next = next_row(prev, Rule::new(rule), Boundary::from(wrap != 0));
    std::ptr::copy_nonoverlapping(next.as_ptr(), out, next.len());
    next.len() as u64
}

/// Fills `out` with an initial row.
///
/// `kind` is 0 for a single center cell, 1 for random cells alive with
/// probability `density` (drawn from a generator seeded with `seed`), 2 for
/// stripes. Unknown kinds fall back to a single center cell.
///
/// # Safety
/// - `out` must point to `width` writable bytes, or be null
///
/// # Returns
/// Number of cells written, or 0 on null pointer.
#[no_mangle]
pub unsafe extern "C" fn eca_initial_row(
    out: *mut u8,
    width: usize,
    kind: u8,
    density: f64,
    seed: u64,
) -> u64 {
    if out.is_null() {
        return 0;
    }

    let init = match kind {
        1 => InitialCondition::Random { density },
        2 => InitialCondition::Stripe,
        _ => InitialCondition::Single,
    };
    let mut rng = StdRng::seed_from_u64(seed);
    let row = initial_row(width, &init, &mut rng);
    std::ptr::copy_nonoverlapping(row.as_ptr(), out, row.len());
    row.len() as u64
}
