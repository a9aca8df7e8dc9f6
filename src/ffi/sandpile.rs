//! Grid setup, grain drops and read-back.

use super::lifecycle::SandpileHandle;
use crate::error::SandpileError;
use crate::sandpile::{FillPolicy, StepMetrics};

/// Status code for a successful call.
pub const SP_OK: i32 = 0;
/// Status code for a null handle.
pub const SP_NULL: i32 = 1;
/// Status code for a rejected size, an out-of-grid target or an uninitialized grid.
pub const SP_INVALID: i32 = 2;
/// Status code for an unknown fill policy code.
pub const SP_BAD_FILL: i32 = 3;

/// (Re)creates the grid as `size`×`size`, discarding prior state.
///
/// `fill` is 0 for all zeros, 1 for uniform random heights 0..=3.
///
/// # Safety
/// - `ptr` must be a valid pointer from `sp_create()`, or null
///
/// # Returns
/// `SP_OK`, `SP_NULL`, `SP_INVALID` (size 0 or too large) or `SP_BAD_FILL`.
#[no_mangle]
pub unsafe extern "C" fn sp_initialize(ptr: *mut SandpileHandle, size: u32, fill: u8) -> i32 {
    if ptr.is_null() {
        return SP_NULL;
    }
    let Some(fill) = FillPolicy::from_code(fill) else {
        return SP_BAD_FILL;
    };

    let pile = &mut *ptr;
    match pile.initialize(size as usize, fill) {
        Ok(()) => SP_OK,
        Err(_) => SP_INVALID,
    }
}

/// Drops one grain at (row, col) and settles the avalanche.
///
/// # Safety
/// - `ptr` must be a valid pointer from `sp_create()`, or null
/// - `out_metrics` must be valid for writes, or null to discard the metrics
///
/// # Returns
/// `SP_OK`, `SP_NULL` or `SP_INVALID`. The grid is untouched on failure.
#[no_mangle]
pub unsafe extern "C" fn sp_drop_at(
    ptr: *mut SandpileHandle,
    row: u32,
    col: u32,
    out_metrics: *mut StepMetrics,
) -> i32 {
    if ptr.is_null() {
        return SP_NULL;
    }

    let pile = &mut *ptr;
    write_result(pile.drop_at(row as usize, col as usize), out_metrics)
}

/// Drops one grain on a random cell and settles the avalanche.
///
/// # Safety
/// - `ptr` must be a valid pointer from `sp_create()`, or null
/// - `out_metrics` must be valid for writes, or null to discard the metrics
#[no_mangle]
pub unsafe extern "C" fn sp_drop_random(
    ptr: *mut SandpileHandle,
    out_metrics: *mut StepMetrics,
) -> i32 {
    if ptr.is_null() {
        return SP_NULL;
    }

    let pile = &mut *ptr;
    write_result(pile.drop_random(), out_metrics)
}

unsafe fn write_result(result: Result<StepMetrics, SandpileError>, out: *mut StepMetrics) -> i32 {
    match result {
        Ok(metrics) => {
            if !out.is_null() {
                *out = metrics;
            }
            SP_OK
        }
        Err(_) => SP_INVALID,
    }
}

/// Grid side length, or 0 for null or uninitialized handles.
///
/// # Safety
/// - `ptr` must be a valid pointer from `sp_create()`, or null
#[no_mangle]
pub unsafe extern "C" fn sp_get_size(ptr: *const SandpileHandle) -> u32 {
    if ptr.is_null() {
        return 0;
    }
    (*ptr).size() as u32
}

/// Height of the cell at (row, col).
///
/// # Safety
/// - `ptr` must be a valid pointer from `sp_create()`, or null
///
/// # Returns
/// The height, or 0 if out of bounds or null pointer.
#[no_mangle]
pub unsafe extern "C" fn sp_get_cell(ptr: *const SandpileHandle, row: u32, col: u32) -> u32 {
    if ptr.is_null() {
        return 0;
    }
    (*ptr).get(row as usize, col as usize).unwrap_or(0)
}

/// Total grains on the grid.
///
/// # Safety
/// - `ptr` must be a valid pointer from `sp_create()`, or null
#[no_mangle]
pub unsafe extern "C" fn sp_total_grains(ptr: *const SandpileHandle) -> u64 {
    if ptr.is_null() {
        return 0;
    }
    (*ptr).total_grains()
}

/// Writes metrics summed over every drop since the last `sp_initialize`.
///
/// # Safety
/// - `ptr` must be a valid pointer from `sp_create()`, or null
/// - `out_totals` must be valid for writes, or null
#[no_mangle]
pub unsafe extern "C" fn sp_get_totals(
    ptr: *const SandpileHandle,
    out_totals: *mut StepMetrics,
) -> i32 {
    if ptr.is_null() || out_totals.is_null() {
        return SP_NULL;
    }
    *out_totals = (*ptr).totals();
    SP_OK
}

/// Copies heights in `[min_row, max_row) × [min_col, max_col)` into `out_buf`.
///
/// # Layout
/// Row-major: row changes slowest, column fastest.
///
/// # Safety
/// - `ptr` must be a valid pointer from `sp_create()`, or null
/// - `out_buf` must point to at least `len` writable bytes
///
/// # Returns
/// Number of bytes written, or 0 on error.
#[no_mangle]
pub unsafe extern "C" fn sp_extract_region(
    ptr: *const SandpileHandle,
    out_buf: *mut u8,
    len: usize,
    min_row: u32,
    min_col: u32,
    max_row: u32,
    max_col: u32,
) -> u64 {
    if ptr.is_null() || out_buf.is_null() {
        return 0;
    }

    let buf_slice = std::slice::from_raw_parts_mut(out_buf, len);
    (*ptr).extract_region(
        buf_slice,
        min_row as usize,
        min_col as usize,
        max_row as usize,
        max_col as usize,
    ) as u64
}
