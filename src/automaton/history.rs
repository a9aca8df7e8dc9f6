//! Row history for a bounded run.

use super::rule::Rule;
use super::stepping::{next_row, Boundary, Row};

/// Generations computed so far, row 0 first, capped at a row budget.
///
/// Rows are only ever appended; earlier rows are never rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    rows: Vec<Row>,
    row_budget: usize,
}

impl History {
    /// Start a run from `initial` that may hold at most `row_budget` rows
    /// (at least 1, the initial row itself).
    pub fn new(initial: Row, row_budget: usize) -> Self {
        let row_budget = row_budget.max(1);
        let mut rows = Vec::with_capacity(row_budget);
        rows.push(initial);
        Self { rows, row_budget }
    }

    /// Append the next generation and return it, or `None` once the budget is spent.
    pub fn advance(&mut self, rule: Rule, boundary: Boundary) -> Option<&Row> {
        if self.is_full() {
            return None;
        }
        let next = next_row(self.latest(), rule, boundary);
        self.rows.push(next);
        self.rows.last()
    }

    /// Most recent generation.
    pub fn latest(&self) -> &Row {
        // rows always holds the initial row
        &self.rows[self.rows.len() - 1]
    }

    /// All generations, row 0 first.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of generations held, including row 0.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always false; a history holds at least its initial row.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Maximum number of rows this run may hold.
    pub fn row_budget(&self) -> usize {
        self.row_budget
    }

    /// True once no further rows will be appended.
    pub fn is_full(&self) -> bool {
        self.rows.len() >= self.row_budget
    }
}
