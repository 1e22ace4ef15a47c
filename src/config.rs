//! Economy tuning: cost curves, production exponent, fork requirement.
//!
//! Every number the formulas use lives here as a named constant and flows
//! into [`EconomyConfig::default`]. Hosts that ship their own tuning file can
//! load it with [`EconomyConfig::from_json`]; missing fields fall back to the
//! defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::state::UpgradeKind;

pub const SKILL_LEVEL_BASE_COST: u64 = 10;
pub const SKILL_LEVEL_COST_EXPONENT: f64 = 2.0;

pub const FRIEND_BASE_COST: u64 = 300;
pub const FRIEND_COST_EXPONENT: f64 = 2.5;

pub const FRIEND_UPGRADE_BASE_COST: u64 = 650;
pub const FRIEND_UPGRADE_COST_EXPONENT: f64 = 3.0;

/// Exponent `p` in `floor((friend_upgrades + 1)^p * developer_friends)`.
pub const PRODUCTION_EXPONENT: f64 = 1.5;

/// Lines of code needed before every fork after the first.
pub const FORK_REQUIREMENT_LINES: u64 = 10_000;

/// Manual write gain: `MANUAL_BASE_GAIN + MANUAL_GAIN_PER_LEVEL * skill`.
pub const MANUAL_BASE_GAIN: u64 = 1;
pub const MANUAL_GAIN_PER_LEVEL: u64 = 1;

/// Milliseconds between production ticks.
pub const PRODUCTION_INTERVAL_MS: u32 = 1_000;

/// Milliseconds between autosaves.
pub const AUTOSAVE_INTERVAL_MS: u32 = 2_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must be a finite, non-negative number (got {value})")]
    InvalidExponent { field: &'static str, value: f64 },
    #[error("{field} must be greater than zero")]
    ZeroInterval { field: &'static str },
    #[error("fork growth must be finite and at least 1.0 (got {0})")]
    InvalidForkGrowth(f64),
    #[error("failed to parse economy config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// `base + floor(level ^ exponent)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct UpgradeCurve {
    pub base: u64,
    pub exponent: f64,
}

impl UpgradeCurve {
    pub const fn new(base: u64, exponent: f64) -> Self {
        Self { base, exponent }
    }

    /// Cost of the next purchase when the affected field is at `level`.
    pub fn cost_at(&self, level: u64) -> u64 {
        let growth = (level as f64).powf(self.exponent).floor();
        // `as` saturates for out-of-range floats.
        self.base.saturating_add(growth as u64)
    }
}

/// How many lines of code the next fork (after the first) needs.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ForkRequirement {
    /// Same threshold for every fork.
    Flat { lines: u64 },
    /// `floor(base * growth ^ (forks - 1))`: later forks cost more.
    Scaling { base: u64, growth: f64 },
}

impl ForkRequirement {
    pub fn lines_for(&self, forks: u64) -> u64 {
        match *self {
            ForkRequirement::Flat { lines } => lines,
            ForkRequirement::Scaling { base, growth } => {
                let completed = forks.saturating_sub(1).min(i32::MAX as u64) as i32;
                (base as f64 * growth.powi(completed)).floor() as u64
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    pub skill_level: UpgradeCurve,
    pub friend: UpgradeCurve,
    pub friend_upgrade: UpgradeCurve,
    pub production_exponent: f64,
    pub fork_requirement: ForkRequirement,
    pub manual_base_gain: u64,
    pub manual_gain_per_level: u64,
    pub production_interval_ms: u32,
    pub autosave_interval_ms: u32,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            skill_level: UpgradeCurve::new(SKILL_LEVEL_BASE_COST, SKILL_LEVEL_COST_EXPONENT),
            friend: UpgradeCurve::new(FRIEND_BASE_COST, FRIEND_COST_EXPONENT),
            friend_upgrade: UpgradeCurve::new(
                FRIEND_UPGRADE_BASE_COST,
                FRIEND_UPGRADE_COST_EXPONENT,
            ),
            production_exponent: PRODUCTION_EXPONENT,
            fork_requirement: ForkRequirement::Flat {
                lines: FORK_REQUIREMENT_LINES,
            },
            manual_base_gain: MANUAL_BASE_GAIN,
            manual_gain_per_level: MANUAL_GAIN_PER_LEVEL,
            production_interval_ms: PRODUCTION_INTERVAL_MS,
            autosave_interval_ms: AUTOSAVE_INTERVAL_MS,
        }
    }
}

impl EconomyConfig {
    /// Parse and validate a JSON tuning file.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EconomyConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// The cost curve for one upgrade kind.
    pub fn curve(&self, kind: UpgradeKind) -> &UpgradeCurve {
        match kind {
            UpgradeKind::SkillLevel => &self.skill_level,
            UpgradeKind::Friend => &self.friend,
            UpgradeKind::FriendUpgrade => &self.friend_upgrade,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let exponents = [
            ("skill_level.exponent", self.skill_level.exponent),
            ("friend.exponent", self.friend.exponent),
            ("friend_upgrade.exponent", self.friend_upgrade.exponent),
            ("production_exponent", self.production_exponent),
        ];
        for (field, value) in exponents {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidExponent { field, value });
            }
        }
        if self.production_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval {
                field: "production_interval_ms",
            });
        }
        if self.autosave_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval {
                field: "autosave_interval_ms",
            });
        }
        if let ForkRequirement::Scaling { growth, .. } = self.fork_requirement {
            if !growth.is_finite() || growth < 1.0 {
                return Err(ConfigError::InvalidForkGrowth(growth));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(EconomyConfig::default().validate().is_ok());
    }

    #[test]
    fn curve_lookup_per_kind() {
        let config = EconomyConfig::default();
        assert_eq!(config.curve(UpgradeKind::SkillLevel).base, 10);
        assert_eq!(config.curve(UpgradeKind::Friend).base, 300);
        assert_eq!(config.curve(UpgradeKind::FriendUpgrade).base, 650);
    }

    #[test]
    fn curve_cost_at_level_zero_is_base() {
        let curve = UpgradeCurve::new(300, 2.5);
        assert_eq!(curve.cost_at(0), 300);
    }

    #[test]
    fn curve_cost_floors_fractional_growth() {
        // 2^2.5 = 5.656...
        let curve = UpgradeCurve::new(300, 2.5);
        assert_eq!(curve.cost_at(2), 305);
    }

    #[test]
    fn curve_cost_saturates() {
        let curve = UpgradeCurve::new(u64::MAX - 1, 3.0);
        assert_eq!(curve.cost_at(1_000_000), u64::MAX);
    }

    #[test]
    fn flat_fork_requirement_ignores_forks() {
        let req = ForkRequirement::Flat { lines: 10_000 };
        assert_eq!(req.lines_for(1), 10_000);
        assert_eq!(req.lines_for(50), 10_000);
    }

    #[test]
    fn scaling_fork_requirement_grows_per_fork() {
        let req = ForkRequirement::Scaling {
            base: 1_000,
            growth: 2.0,
        };
        assert_eq!(req.lines_for(1), 1_000);
        assert_eq!(req.lines_for(2), 2_000);
        assert_eq!(req.lines_for(4), 8_000);
    }

    #[test]
    fn from_json_fills_missing_fields_with_defaults() {
        let config = EconomyConfig::from_json(r#"{ "production_exponent": 2.0 }"#).unwrap();
        assert!((config.production_exponent - 2.0).abs() < f64::EPSILON);
        assert_eq!(config.skill_level, EconomyConfig::default().skill_level);
    }

    #[test]
    fn from_json_reads_tagged_fork_requirement() {
        let config = EconomyConfig::from_json(
            r#"{ "fork_requirement": { "kind": "scaling", "base": 500, "growth": 1.5 } }"#,
        )
        .unwrap();
        assert_eq!(
            config.fork_requirement,
            ForkRequirement::Scaling {
                base: 500,
                growth: 1.5
            }
        );
    }

    #[test]
    fn from_json_rejects_negative_exponent() {
        let err = EconomyConfig::from_json(r#"{ "friend": { "base": 300, "exponent": -1.0 } }"#)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidExponent {
                field: "friend.exponent",
                ..
            }
        ));
    }

    #[test]
    fn from_json_rejects_zero_interval() {
        let err = EconomyConfig::from_json(r#"{ "autosave_interval_ms": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroInterval { .. }));
    }

    #[test]
    fn from_json_rejects_garbage() {
        assert!(matches!(
            EconomyConfig::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
