//! Dispatch configuration.
//!
//! Labor-rule parameters, objective weights, the variable-scope policy and
//! the solve policy. Loadable from TOML so rule changes need no rebuild.
//!
//! # Examples
//!
//! ```
//! use u_roster::config::{DispatchConfig, SkillScope};
//!
//! let config = DispatchConfig::from_toml_str(r#"
//!     [rules]
//!     day_window = { width = 7, cap = 5 }
//!
//!     [weights]
//!     continuity = 12.0
//!
//!     [model]
//!     skill_scope = "qualified"
//! "#).unwrap();
//!
//! assert_eq!(config.rules.day_window.cap, 5);
//! assert_eq!(config.rules.night_window.cap, 14); // default kept
//! assert_eq!(config.model.skill_scope, SkillScope::Qualified);
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::milp::SolvePolicy;

/// Configuration error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete dispatch configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct DispatchConfig {
    /// Labor rules.
    #[serde(default)]
    pub rules: RuleConfig,

    /// Objective weights.
    #[serde(default)]
    pub weights: WeightConfig,

    /// Variable declaration policy.
    #[serde(default)]
    pub model: ModelConfig,

    /// Solve policy.
    #[serde(default)]
    pub solve: SolveConfig,
}

/// Labor-rule parameters.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RuleConfig {
    /// Forbid assignments in adjacent timeslots.
    pub rest_period: bool,
    /// Cap on all assignments within a rolling day window.
    pub day_window: WindowRule,
    /// Cap on night assignments within a rolling night window.
    pub night_window: WindowRule,
}

/// Largest window width whose span fits in a timeslot index.
pub const MAX_WINDOW_WIDTH: u32 = u32::MAX / 2;

/// A rolling-window workload cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct WindowRule {
    /// Window width in day-cycles (span = 2 × width timeslots).
    pub width: u32,
    /// Maximum assignments within one window.
    pub cap: u32,
}

/// Objective weights.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct WeightConfig {
    /// Penalty per change indicator.
    pub continuity: f64,
    /// Penalty per unit of `max_shifts - min_shifts`.
    pub fairness: f64,
    /// Cost multiplier for external contractors.
    pub external_multiplier: f64,
}

/// Which `(resource, shift, skill)` triples get an assignment variable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillScope {
    /// Every skill demanded by any shift, for every shift.
    All,
    /// Only skills the shift itself demands.
    #[default]
    Demanded,
    /// Only skills the shift demands and the resource holds.
    Qualified,
}

/// Variable declaration policy.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ModelConfig {
    pub skill_scope: SkillScope,
}

/// Solve policy.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SolveConfig {
    /// Wall-clock limit for the solver.
    pub time_limit_secs: Option<u64>,
    /// Decode feasible-but-unproven results as well as optimal ones.
    pub accept_feasible: bool,
    /// Run input validation before building the model.
    pub validate_input: bool,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            rest_period: true,
            day_window: WindowRule::new(9, 7),
            night_window: WindowRule::new(30, 14),
        }
    }
}

impl WindowRule {
    pub const fn new(width: u32, cap: u32) -> Self {
        Self { width, cap }
    }

    /// Span in timeslots.
    #[inline]
    pub const fn span(&self) -> u32 {
        self.width.saturating_mul(2)
    }
}

impl Default for WeightConfig {
    fn default() -> Self {
        Self {
            continuity: 10.0,
            fairness: 5.0,
            external_multiplier: 20.0,
        }
    }
}

impl Default for SolveConfig {
    fn default() -> Self {
        Self {
            time_limit_secs: None,
            accept_feasible: true,
            validate_input: true,
        }
    }
}

impl SolveConfig {
    /// Returns the time limit, if configured.
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_secs.map(Duration::from_secs)
    }

    /// Solver-facing timeout policy.
    pub fn policy(&self) -> SolvePolicy {
        SolvePolicy {
            time_limit: self.time_limit(),
        }
    }
}

impl DispatchConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file doesn't exist, contains invalid TOML or
    /// fails [`validate`](Self::validate).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks parameter sanity.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, rule) in [
            ("day_window", self.rules.day_window),
            ("night_window", self.rules.night_window),
        ] {
            if rule.width == 0 {
                return Err(ConfigError::Invalid(format!("{name}.width must be positive")));
            }
            if rule.width > MAX_WINDOW_WIDTH {
                return Err(ConfigError::Invalid(format!(
                    "{name}.width must not exceed {MAX_WINDOW_WIDTH}"
                )));
            }
        }
        for (name, weight) in [
            ("continuity", self.weights.continuity),
            ("fairness", self.weights.fairness),
            ("external_multiplier", self.weights.external_multiplier),
        ] {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "weight {name} must be finite and non-negative, got {weight}"
                )));
            }
        }
        Ok(())
    }

    /// Enables or disables the rest-period rule.
    pub fn with_rest_period(mut self, enabled: bool) -> Self {
        self.rules.rest_period = enabled;
        self
    }

    /// Sets the day-window rule.
    pub fn with_day_window(mut self, width: u32, cap: u32) -> Self {
        self.rules.day_window = WindowRule::new(width, cap);
        self
    }

    /// Sets the night-window rule.
    pub fn with_night_window(mut self, width: u32, cap: u32) -> Self {
        self.rules.night_window = WindowRule::new(width, cap);
        self
    }

    /// Sets the continuity penalty weight.
    pub fn with_continuity_weight(mut self, weight: f64) -> Self {
        self.weights.continuity = weight;
        self
    }

    /// Sets the fairness penalty weight.
    pub fn with_fairness_weight(mut self, weight: f64) -> Self {
        self.weights.fairness = weight;
        self
    }

    /// Sets the external cost multiplier.
    pub fn with_external_multiplier(mut self, multiplier: f64) -> Self {
        self.weights.external_multiplier = multiplier;
        self
    }

    /// Sets the variable scope policy.
    pub fn with_skill_scope(mut self, scope: SkillScope) -> Self {
        self.model.skill_scope = scope;
        self
    }

    /// Sets the solver time limit.
    pub fn with_time_limit_secs(mut self, seconds: u64) -> Self {
        self.solve.time_limit_secs = Some(seconds);
        self
    }

    /// Enables or disables input validation.
    pub fn with_validation(mut self, enabled: bool) -> Self {
        self.solve.validate_input = enabled;
        self
    }
}
