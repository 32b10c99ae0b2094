//! Planner configuration.
//!
//! Controls the planning horizon and credit bounds. Load from TOML to
//! change limits without code changes.
//!
//! # Examples
//!
//! ```
//! use u_courseplan::config::PlannerConfig;
//!
//! let config = PlannerConfig::from_toml_str(r#"
//!     include_summer_terms = false
//!     max_terms = 8
//!
//!     [regular]
//!     floor = 12
//!     ceiling = 18
//! "#).unwrap();
//!
//! assert_eq!(config.calendar().horizon(), 8);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{AcademicYear, CreditBounds, TermCalendar};

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<ConfigError> for crate::error::PlanError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

/// Planning horizon and credit limits.
///
/// Every key is optional when deserializing, including `floor` and
/// `ceiling` inside the `[regular]` and `[summer]` tables. Missing keys
/// keep their [`Default`] values.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "ConfigFile", rename_all = "snake_case")]
pub struct PlannerConfig {
    /// Whether summer terms are schedulable (three slots per year).
    pub include_summer_terms: bool,

    /// Number of terms in the horizon.
    pub max_terms: u32,

    /// Credit bounds for fall and spring terms.
    pub regular: CreditBounds,

    /// Credit bounds for summer terms.
    pub summer: CreditBounds,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            include_summer_terms: true,
            max_terms: 11,
            regular: CreditBounds::new(12, 18),
            summer: CreditBounds::new(0, 6),
        }
    }
}

/// Partial bounds table as written in a config file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct BoundsTable {
    floor: Option<u32>,
    ceiling: Option<u32>,
}

impl BoundsTable {
    fn over(self, base: CreditBounds) -> CreditBounds {
        CreditBounds::new(
            self.floor.unwrap_or(base.floor),
            self.ceiling.unwrap_or(base.ceiling),
        )
    }
}

/// Deserialization shape of [`PlannerConfig`].
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "snake_case")]
struct ConfigFile {
    include_summer_terms: Option<bool>,
    max_terms: Option<u32>,
    regular: Option<BoundsTable>,
    summer: Option<BoundsTable>,
}

impl From<ConfigFile> for PlannerConfig {
    fn from(file: ConfigFile) -> Self {
        let base = Self::default();
        Self {
            include_summer_terms: file
                .include_summer_terms
                .unwrap_or(base.include_summer_terms),
            max_terms: file.max_terms.unwrap_or(base.max_terms),
            regular: file
                .regular
                .map_or(base.regular, |table| table.over(base.regular)),
            summer: file
                .summer
                .map_or(base.summer, |table| table.over(base.summer)),
        }
    }
}

impl PlannerConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file doesn't exist, contains invalid TOML,
    /// or fails [`PlannerConfig::validate`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses and validates configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets summer term inclusion.
    pub fn with_summer_terms(mut self, include: bool) -> Self {
        self.include_summer_terms = include;
        self
    }

    /// Sets the number of terms.
    pub fn with_max_terms(mut self, max_terms: u32) -> Self {
        self.max_terms = max_terms;
        self
    }

    /// Sets fall/spring credit bounds.
    pub fn with_regular_bounds(mut self, floor: u32, ceiling: u32) -> Self {
        self.regular = CreditBounds::new(floor, ceiling);
        self
    }

    /// Sets summer credit bounds.
    pub fn with_summer_bounds(mut self, floor: u32, ceiling: u32) -> Self {
        self.summer = CreditBounds::new(floor, ceiling);
        self
    }

    /// Semesters per academic year under this configuration.
    pub fn slots_per_year(&self) -> u32 {
        if self.include_summer_terms {
            3
        } else {
            2
        }
    }

    /// Checks internal consistency.
    ///
    /// The horizon must fit in the four academic years and each floor
    /// must not exceed its ceiling.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let limit = AcademicYear::COUNT * self.slots_per_year();
        if self.max_terms == 0 || self.max_terms > limit {
            return Err(ConfigError::Invalid(format!(
                "max_terms must be in 1..={limit}, got {}",
                self.max_terms
            )));
        }
        for (name, bounds) in [("regular", self.regular), ("summer", self.summer)] {
            if bounds.floor > bounds.ceiling {
                return Err(ConfigError::Invalid(format!(
                    "{name} floor {} exceeds ceiling {}",
                    bounds.floor, bounds.ceiling
                )));
            }
        }
        Ok(())
    }

    /// Builds the term calendar for this configuration.
    pub fn calendar(&self) -> TermCalendar {
        TermCalendar::new(
            self.include_summer_terms,
            self.max_terms,
            self.regular,
            self.summer,
        )
    }
}
