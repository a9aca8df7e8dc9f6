//! Elementary (radius-1, binary) cellular automaton engine.
//!
//! Everything here is a pure function of its inputs: rules convert to and from
//! truth tables, and [`next_row`] maps one generation to the next. Row history
//! belongs to the caller; [`History`] is a convenience for bounded runs.

pub mod history;
pub mod init;
pub mod rule;
pub mod stepping;

pub use history::History;
pub use init::{initial_row, InitialCondition};
pub use rule::{neighborhood_code, rule_number_to_table, table_to_rule_number, Rule, RuleTable};
pub use stepping::{next_row, Boundary, Row};
