//! Driver-facing run settings.
//!
//! Both configs deserialize with defaults for missing fields, so a host can
//! pass a partial JSON or TOML document. `validate` rejects values outside the
//! ranges a UI would offer; `clamped` pulls them back in instead.

use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::automaton::init::clamp_density;
use crate::automaton::{initial_row, Boundary, History, InitialCondition, Rule};
use crate::error::{ConfigError, SandpileError};
use crate::sandpile::{FillPolicy, Sandpile};

/// Smallest sandpile side a driver may request.
pub const MIN_GRID_SIZE: usize = 1;
/// Largest sandpile side a driver may request.
pub const MAX_DRIVER_GRID_SIZE: usize = 512;
/// Narrowest automaton row.
pub const MIN_ROW_WIDTH: usize = 60;
/// Widest automaton row.
pub const MAX_ROW_WIDTH: usize = 400;
/// Smallest row budget.
pub const MIN_ROWS: usize = 60;
/// Largest row budget.
pub const MAX_ROWS: usize = 300;
/// Density used for random starts when none is given.
pub const DEFAULT_DENSITY: f64 = 0.5;

/// Settings for a sandpile run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SandpileConfig {
    /// Grid side length.
    pub size: usize,
    pub fill: FillPolicy,
}

impl Default for SandpileConfig {
    fn default() -> Self {
        Self {
            size: 64,
            fill: FillPolicy::Zeros,
        }
    }
}

impl SandpileConfig {
    /// Check the size against the driver range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("size", self.size, MIN_GRID_SIZE, MAX_DRIVER_GRID_SIZE)
    }

    /// Copy with the size clamped into the driver range.
    pub fn clamped(&self) -> Self {
        Self {
            size: clamp_logged("size", self.size, MIN_GRID_SIZE, MAX_DRIVER_GRID_SIZE),
            fill: self.fill,
        }
    }

    /// Allocate a sandpile with these settings.
    pub fn build<R: Rng>(&self, rng: R) -> Result<Sandpile<R>, SandpileError> {
        Sandpile::new(self.size, self.fill, rng)
    }
}

/// Which starting pattern an automaton run uses.
///
/// The random density lives on [`AutomatonConfig`] so switching kinds keeps it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum InitKind {
    #[default]
    Single,
    Random,
    Stripe,
    Custom { cells: Vec<u8> },
}

/// Settings for an elementary automaton run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutomatonConfig {
    /// Rule number; wider than `u8` so out-of-range input can be reported.
    pub rule: u32,
    /// Cells per row.
    pub width: usize,
    /// Row budget, including the initial row.
    pub rows: usize,
    pub wrap: bool,
    pub init: InitKind,
    /// Probability a cell starts alive when `init` is `Random`.
    pub density: f64,
}

impl Default for AutomatonConfig {
    fn default() -> Self {
        Self {
            rule: 110,
            width: 240,
            rows: 160,
            wrap: true,
            init: InitKind::Single,
            density: DEFAULT_DENSITY,
        }
    }
}

impl AutomatonConfig {
    /// Check every setting against the driver ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.rule()?;
        check_range("width", self.width, MIN_ROW_WIDTH, MAX_ROW_WIDTH)?;
        check_range("rows", self.rows, MIN_ROWS, MAX_ROWS)?;
        if !(0.0..=1.0).contains(&self.density) {
            return Err(ConfigError::OutOfRange {
                field: "density",
                value: self.density,
                min: 0.0,
                max: 1.0,
            });
        }
        Ok(())
    }

    /// Copy with every numeric setting clamped into the driver range.
    pub fn clamped(&self) -> Self {
        let density = clamp_density(self.density);
        if density != self.density {
            debug!("clamped density {} to {}", self.density, density);
        }

        Self {
            rule: clamp_logged("rule", self.rule as usize, 0, u8::MAX as usize) as u32,
            width: clamp_logged("width", self.width, MIN_ROW_WIDTH, MAX_ROW_WIDTH),
            rows: clamp_logged("rows", self.rows, MIN_ROWS, MAX_ROWS),
            wrap: self.wrap,
            init: self.init.clone(),
            density,
        }
    }

    /// The configured rule, or an error if the number exceeds 255.
    pub fn rule(&self) -> Result<Rule, ConfigError> {
        Ok(Rule::try_from(self.rule)?)
    }

    /// Edge policy selected by `wrap`.
    pub fn boundary(&self) -> Boundary {
        Boundary::from(self.wrap)
    }

    /// Starting pattern for row 0, with the density clamped into `[0, 1]`.
    pub fn initial_condition(&self) -> InitialCondition {
        match &self.init {
            InitKind::Single => InitialCondition::Single,
            InitKind::Random => InitialCondition::Random {
                density: clamp_density(self.density),
            },
            InitKind::Stripe => InitialCondition::Stripe,
            InitKind::Custom { cells } => InitialCondition::Custom {
                cells: cells.clone(),
            },
        }
    }

    /// Validate, build row 0 and return the rule with a fresh history.
    pub fn start<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<(Rule, History), ConfigError> {
        self.validate()?;
        let rule = self.rule()?;
        let initial = initial_row(self.width, &self.initial_condition(), rng);
        Ok((rule, History::new(initial, self.rows)))
    }
}

fn check_range(field: &'static str, value: usize, min: usize, max: usize) -> Result<(), ConfigError> {
    if value < min || value > max {
        return Err(ConfigError::OutOfRange {
            field,
            value: value as f64,
            min: min as f64,
            max: max as f64,
        });
    }
    Ok(())
}

fn clamp_logged(field: &str, value: usize, min: usize, max: usize) -> usize {
    let clamped = value.clamp(min, max);
    if clamped != value {
        debug!("clamped {} {} to {}", field, value, clamped);
    }
    clamped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RuleError;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_defaults_validate() {
        assert!(SandpileConfig::default().validate().is_ok());
        assert!(AutomatonConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: AutomatonConfig =
            serde_json::from_str(r#"{ "rule": 90, "wrap": false }"#).unwrap();
        assert_eq!(config.rule, 90);
        assert!(!config.wrap);
        assert_eq!(config.width, 240);
        assert_eq!(config.init, InitKind::Single);
        assert_eq!(config.density, DEFAULT_DENSITY);

        let config: SandpileConfig =
            serde_json::from_str(r#"{ "fill": "random_uniform0to3" }"#).unwrap();
        assert_eq!(config.size, 64);
        assert_eq!(config.fill, FillPolicy::RandomUniform0to3);
    }

    #[test]
    fn test_random_kind_without_density_uses_default() {
        let config: AutomatonConfig =
            serde_json::from_str(r#"{ "init": { "kind": "random" } }"#).unwrap();
        assert_eq!(config.init, InitKind::Random);
        assert_eq!(
            config.initial_condition(),
            InitialCondition::Random {
                density: DEFAULT_DENSITY
            }
        );

        let (_, history) = config.start(&mut StdRng::seed_from_u64(4)).unwrap();
        let expected = initial_row(
            config.width,
            &InitialCondition::Random {
                density: DEFAULT_DENSITY,
            },
            &mut StdRng::seed_from_u64(4),
        );
        assert_eq!(history.latest(), &expected);
    }

    #[test]
    fn test_density_is_separate_from_kind() {
        let config: AutomatonConfig =
            serde_json::from_str(r#"{ "init": { "kind": "random" }, "density": 0.3 }"#).unwrap();
        assert_eq!(
            config.initial_condition(),
            InitialCondition::Random { density: 0.3 }
        );

        // Switching kinds keeps the stored density for later
        let stripe = AutomatonConfig {
            init: InitKind::Stripe,
            ..config.clone()
        };
        assert_eq!(stripe.density, 0.3);
        assert_eq!(stripe.initial_condition(), InitialCondition::Stripe);

        let custom: AutomatonConfig =
            serde_json::from_str(r#"{ "init": { "kind": "custom", "cells": [1, 0, 1] } }"#)
                .unwrap();
        assert_eq!(
            custom.initial_condition(),
            InitialCondition::Custom {
                cells: vec![1, 0, 1]
            }
        );
    }

    #[test]
    fn test_initial_condition_clamps_density() {
        let config = AutomatonConfig {
            init: InitKind::Random,
            density: 4.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange { field: "density", .. })
        ));
        assert_eq!(
            config.initial_condition(),
            InitialCondition::Random { density: 1.0 }
        );
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let config = AutomatonConfig {
            rule: 300,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::Rule(RuleError::OutOfRange(300)))
        );

        let config = AutomatonConfig {
            width: 5,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange { field: "width", .. })
        ));

        let config = SandpileConfig {
            size: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_clamped() {
        let config = AutomatonConfig {
            rule: 1000,
            width: 1,
            rows: 10_000,
            wrap: false,
            init: InitKind::Random,
            density: -2.0,
        }
        .clamped();

        assert_eq!(config.rule, 255);
        assert_eq!(config.width, MIN_ROW_WIDTH);
        assert_eq!(config.rows, MAX_ROWS);
        assert_eq!(config.width, 60);
        assert_eq!(config.density, 0.0);
        assert_eq!(config.init, InitKind::Random);
        assert!(config.validate().is_ok());

        let sand = SandpileConfig {
            size: 9999,
            fill: FillPolicy::Zeros,
        }
        .clamped();
        assert_eq!(sand.size, MAX_DRIVER_GRID_SIZE);
    }

    #[test]
    fn test_build_sandpile() {
        let config = SandpileConfig {
            size: 8,
            fill: FillPolicy::RandomUniform0to3,
        };
        let pile = config.build(StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(pile.size(), 8);
        assert!(pile.is_stable());
    }

    #[test]
    fn test_start_automaton() {
        let config = AutomatonConfig {
            rule: 90,
            width: 61,
            rows: 60,
            ..Default::default()
        };
        let (rule, mut history) = config.start(&mut StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(rule.number(), 90);
        assert_eq!(history.latest()[30], 1);

        let mut steps = 0;
        while history.advance(rule, config.boundary()).is_some() {
            steps += 1;
        }
        assert_eq!(steps, 59);
        assert_eq!(history.len(), 60);
    }
}
