//! Rectangular window extraction for rendering.

use super::grid::Grid;

/// Copy the heights in `[min_row, max_row) × [min_col, max_col)` into `out_buf`.
///
/// # Layout
/// The buffer is filled row by row (row changes slowest, column fastest).
/// Heights above `u8::MAX` saturate; a stable grid never has them.
///
/// # Returns
/// Number of bytes written, or 0 when the clamped window is empty or the
/// buffer is too small.
pub fn extract_region(
    grid: &Grid,
    out_buf: &mut [u8],
    min_row: usize,
    min_col: usize,
    max_row: usize,
    max_col: usize,
) -> usize {
    if grid.cells.is_empty() {
        return 0;
    }

    // Clamp coordinates to grid bounds
    let max_row = max_row.min(grid.size);
    let max_col = max_col.min(grid.size);
    let min_row = min_row.min(max_row);
    let min_col = min_col.min(max_col);

    if min_row >= max_row || min_col >= max_col {
        return 0;
    }

    let total_size = (max_row - min_row) * (max_col - min_col);
    if out_buf.len() < total_size {
        return 0;
    }

    let mut offset = 0;
    for row in min_row..max_row {
        for col in min_col..max_col {
            let height = grid.cells[grid.index_of(row, col)];
            out_buf[offset] = u8::try_from(height).unwrap_or(u8::MAX);
            offset += 1;
        }
    }

    offset
}
