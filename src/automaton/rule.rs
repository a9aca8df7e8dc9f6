//! Elementary rule numbers and their truth tables.
//!
//! A neighborhood is encoded as `(right << 2) | (center << 1) | left`, and bit
//! `i` of the rule number is the next state for neighborhood `i`.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::RuleError;

/// Next-state value (0 or 1) for each of the 8 neighborhood codes.
pub type RuleTable = [u8; 8];

/// Build the truth table for rule number `n`.
pub fn rule_number_to_table(n: u8) -> RuleTable {
    let mut table = [0; 8];
    for (i, slot) in table.iter_mut().enumerate() {
        *slot = (n >> i) & 1;
    }
    table
}

/// Inverse of [`rule_number_to_table`]. Any non-zero entry counts as 1.
pub fn table_to_rule_number(table: &RuleTable) -> u8 {
    table
        .iter()
        .enumerate()
        .filter(|&(_, &bit)| bit != 0)
        .fold(0u8, |n, (i, _)| n | (1u8 << i))
}

/// Neighborhood code for a (left, center, right) triple of 0/1 cells.
#[inline]
pub fn neighborhood_code(left: u8, center: u8, right: u8) -> usize {
    ((right << 2) | (center << 1) | left) as usize
}

/// An elementary cellular automaton rule (Wolfram numbering).
///
/// The rule number is the only stored state; the table is derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rule(u8);

impl Rule {
    /// Rule with Wolfram number `number`.
    pub const fn new(number: u8) -> Self {
        Rule(number)
    }

    /// The rule number, 0..=255.
    pub const fn number(self) -> u8 {
        self.0
    }

    /// Truth table view of this rule.
    pub fn table(self) -> RuleTable {
        rule_number_to_table(self.0)
    }

    /// Rule whose table is `table`.
    pub fn from_table(table: &RuleTable) -> Self {
        Rule(table_to_rule_number(table))
    }

    /// Next state for neighborhood `code` (only the low 3 bits are used).
    #[inline]
    pub fn output(self, code: usize) -> u8 {
        (self.0 >> (code & 7)) & 1
    }

    /// This rule with the entry for neighborhood `index` flipped.
    pub fn with_toggled(self, index: usize) -> Result<Self, RuleError> {
        if index >= 8 {
            return Err(RuleError::InvalidNeighborhood(index));
        }
        Ok(Rule(self.0 ^ (1u8 << index)))
    }

    /// Rule with each table entry set independently with probability one half.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut table = [0; 8];
        for slot in &mut table {
            *slot = u8::from(rng.random_bool(0.5));
        }
        Rule::from_table(&table)
    }

    /// Table entries from neighborhood 7 down to 0, e.g. `"01011010"` for rule 90.
    pub fn binary_string(self) -> String {
        format!("{:08b}", self.0)
    }

    /// Sum-of-minterms formula over `L`, `C` and `R`.
    ///
    /// Returns `"0"` for the empty rule and `"1"` for rule 255.
    pub fn formula(self) -> String {
        match self.0 {
            0 => return "0".to_string(),
            255 => return "1".to_string(),
            _ => {}
        }

        let literal = |bit: usize, name: &str| {
            if bit == 1 {
                name.to_string()
            } else {
                format!("¬{}", name)
            }
        };

        (0..8)
            .filter(|&code| self.output(code) == 1)
            .map(|code| {
                format!(
                    "({} ∧ {} ∧ {})",
                    literal(code & 1, "L"),
                    literal((code >> 1) & 1, "C"),
                    literal((code >> 2) & 1, "R"),
                )
            })
            .collect::<Vec<_>>()
            .join(" ∨ ")
    }
}

impl From<u8> for Rule {
    fn from(number: u8) -> Self {
        Rule(number)
    }
}

impl From<Rule> for u8 {
    fn from(rule: Rule) -> Self {
        rule.0
    }
}

impl TryFrom<u32> for Rule {
    type Error = RuleError;

    fn try_from(number: u32) -> Result<Self, Self::Error> {
        u8::try_from(number)
            .map(Rule)
            .map_err(|_| RuleError::OutOfRange(number))
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rule {}", self.0)
    }
}

/// Well-known elementary rules.
pub mod presets {
    use super::Rule;

    /// Chaotic; center column is a classic pseudo-random source.
    pub const RULE_30: Rule = Rule::new(30);

    /// XOR of left and right, draws a Sierpinski triangle.
    pub const RULE_90: Rule = Rule::new(90);

    /// Turing complete.
    pub const RULE_110: Rule = Rule::new(110);

    /// Traffic flow.
    pub const RULE_184: Rule = Rule::new(184);
}
