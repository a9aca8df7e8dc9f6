//! Row transition for elementary automata.

use serde::{Deserialize, Serialize};

use super::rule::{neighborhood_code, Rule};

/// One generation of cells; 0 = dead, 1 = alive.
pub type Row = Vec<u8>;

/// How neighbors past either end of a row are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Boundary {
    /// Indices wrap around, so the row is a ring.
    #[default]
    Wrap,
    /// Cells past the edge read as 0.
    Open,
}

impl From<bool> for Boundary {
    fn from(wrap: bool) -> Self {
        if wrap {
            Boundary::Wrap
        } else {
            Boundary::Open
        }
    }
}

/// Compute the generation after `prev` under `rule`.
///
/// `prev` is not modified. Non-zero cells count as alive.
pub fn next_row(prev: &[u8], rule: Rule, boundary: Boundary) -> Row {
    let width = prev.len();
    let cell = |i: usize| u8::from(prev[i] != 0);

    (0..width)
        .map(|i| {
            let left = match (i, boundary) {
                (0, Boundary::Wrap) => cell(width - 1),
                (0, Boundary::Open) => 0,
                _ => cell(i - 1),
            };
            let right = match (i + 1 == width, boundary) {
                (true, Boundary::Wrap) => cell(0),
                (true, Boundary::Open) => 0,
                (false, _) => cell(i + 1),
            };

            rule.output(neighborhood_code(left, cell(i), right))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::rule::presets::{RULE_110, RULE_90};

    #[test]
    fn test_rule_90_wrap() {
        let next = next_row(&[0, 0, 1, 0, 0], RULE_90, Boundary::Wrap);
        assert_eq!(next, vec![0, 1, 0, 1, 0]);
    }

    #[test]
    fn test_rule_0_and_255_open() {
        let prev = [1, 0, 0, 0, 0, 0];
        assert_eq!(next_row(&prev, Rule::new(0), Boundary::Open), vec![0; 6]);
        assert_eq!(next_row(&prev, Rule::new(255), Boundary::Open), vec![1; 6]);
    }

    #[test]
    fn test_wrap_vs_open_at_edge() {
        // Rule 90 at the left edge: wrap sees the last cell, open sees 0
        let prev = [0, 0, 0, 0, 1];
        assert_eq!(next_row(&prev, RULE_90, Boundary::Wrap), vec![1, 0, 0, 1, 0]);
        assert_eq!(next_row(&prev, RULE_90, Boundary::Open), vec![0, 0, 0, 1, 0]);
    }

    #[test]
    fn test_rule_uses_right_as_high_bit() {
        // Rule 16 fires only for code 4: right alive, center and left dead
        let next = next_row(&[0, 0, 1, 0, 0], Rule::new(16), Boundary::Open);
        assert_eq!(next, vec![0, 1, 0, 0, 0]);
    }

    #[test]
    fn test_prev_is_untouched_and_deterministic() {
        let prev = vec![1, 0, 1, 1, 0, 1, 0, 0];
        let copy = prev.clone();
        let a = next_row(&prev, RULE_110, Boundary::Wrap);
        let b = next_row(&prev, RULE_110, Boundary::Wrap);
        assert_eq!(prev, copy);
        assert_eq!(a, b);
    }

    #[test]
    fn test_single_cell_row() {
        // Width 1 with wrap: the cell is its own left and right neighbor
        assert_eq!(next_row(&[1], Rule::new(128), Boundary::Wrap), vec![1]);
        assert_eq!(next_row(&[1], Rule::new(128), Boundary::Open), vec![0]);
    }

    #[test]
    fn test_empty_row() {
        assert!(next_row(&[], RULE_90, Boundary::Wrap).is_empty());
    }

    #[test]
    fn test_boundary_from_bool() {
        assert_eq!(Boundary::from(true), Boundary::Wrap);
        assert_eq!(Boundary::from(false), Boundary::Open);
    }
}
