// ABOUTME: Analysis configuration for bucket limits, display caps, and performance sampling
// ABOUTME: Loaded from PACELAB_* environment variables with defaults and range validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacelab Contributors

//! Analysis Configuration
//!
//! Only presentation limits and sample sizes are configurable. Tier, risk,
//! and trend thresholds live in [`crate::physiological_constants`].
//!
//! | Variable | Default |
//! |----------|---------|
//! | `PACELAB_WEEK_BUCKET_LIMIT` | 12 |
//! | `PACELAB_MONTH_BUCKET_LIMIT` | 6 |
//! | `PACELAB_SINGLE_BUCKET_LIMIT` | 20 |
//! | `PACELAB_BUCKET_MEMBER_LIMIT` | 10 |
//! | `PACELAB_PERFORMANCE_SAMPLE_SIZE` | 30 |
//! | `PACELAB_RECENT_ACTIVITY_LIMIT` | 10 |
//! | `PACELAB_MIN_VDOT_DISTANCE_KM` | 3.0 |

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

use super::error::ConfigError;
use crate::aggregation::Granularity;

/// Default number of weekly buckets returned
pub const DEFAULT_WEEK_LIMIT: usize = 12;
/// Default number of monthly buckets returned
pub const DEFAULT_MONTH_LIMIT: usize = 6;
/// Default number of single-activity buckets returned
pub const DEFAULT_SINGLE_LIMIT: usize = 20;
/// Default number of member activities listed per bucket
pub const DEFAULT_MEMBER_DISPLAY_LIMIT: usize = 10;
/// Default number of most recent activities in the performance summary
pub const DEFAULT_PERFORMANCE_SAMPLE_SIZE: usize = 30;
/// Default number of activities listed in the recent-activity summary
pub const DEFAULT_RECENT_DISPLAY_LIMIT: usize = 10;
/// Default minimum run distance for a VDOT estimate
pub const DEFAULT_MIN_VDOT_DISTANCE_KM: f64 = 3.0;

/// Read and parse an environment variable
///
/// `Ok(None)` when the variable is unset.
fn parse_var<T: FromStr>(key: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Parse(format!("{key}='{raw}' is not a valid value"))),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(error) => Err(ConfigError::EnvVar(error)),
    }
}

/// Read an environment variable, falling back to `default` when unset or malformed
fn var_or<T: FromStr>(key: &'static str, default: T) -> T {
    parse_var(key).ok().flatten().unwrap_or(default)
}

/// Bucket aggregation limits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationConfig {
    /// Weekly buckets returned, most recent first
    pub week_limit: usize,
    /// Monthly buckets returned, most recent first
    pub month_limit: usize,
    /// Single-activity buckets returned, most recent first
    pub single_limit: usize,
    /// Member activities listed on each bucket
    pub member_display_limit: usize,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            week_limit: DEFAULT_WEEK_LIMIT,
            month_limit: DEFAULT_MONTH_LIMIT,
            single_limit: DEFAULT_SINGLE_LIMIT,
            member_display_limit: DEFAULT_MEMBER_DISPLAY_LIMIT,
        }
    }
}

impl AggregationConfig {
    /// Load aggregation limits from environment
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            week_limit: var_or("PACELAB_WEEK_BUCKET_LIMIT", DEFAULT_WEEK_LIMIT),
            month_limit: var_or("PACELAB_MONTH_BUCKET_LIMIT", DEFAULT_MONTH_LIMIT),
            single_limit: var_or("PACELAB_SINGLE_BUCKET_LIMIT", DEFAULT_SINGLE_LIMIT),
            member_display_limit: var_or("PACELAB_BUCKET_MEMBER_LIMIT", DEFAULT_MEMBER_DISPLAY_LIMIT),
        }
    }

    /// Strict variant of [`Self::from_env`]
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed values and
    /// `ConfigError::ValueOutOfRange` for zero limits.
    pub fn try_from_env() -> Result<Self, ConfigError> {
        let config = Self {
            week_limit: parse_var("PACELAB_WEEK_BUCKET_LIMIT")?.unwrap_or(DEFAULT_WEEK_LIMIT),
            month_limit: parse_var("PACELAB_MONTH_BUCKET_LIMIT")?.unwrap_or(DEFAULT_MONTH_LIMIT),
            single_limit: parse_var("PACELAB_SINGLE_BUCKET_LIMIT")?.unwrap_or(DEFAULT_SINGLE_LIMIT),
            member_display_limit: parse_var("PACELAB_BUCKET_MEMBER_LIMIT")?
                .unwrap_or(DEFAULT_MEMBER_DISPLAY_LIMIT),
        };
        config.validate()?;
        Ok(config)
    }

    /// Default bucket limit for a granularity
    #[must_use]
    pub const fn limit_for(&self, granularity: Granularity) -> usize {
        match granularity {
            Granularity::Single => self.single_limit,
            Granularity::Week => self.week_limit,
            Granularity::Month => self.month_limit,
        }
    }

    /// Validate limits
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValueOutOfRange` when a limit is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.week_limit == 0 {
            return Err(ConfigError::ValueOutOfRange("week_limit must be at least 1"));
        }
        if self.month_limit == 0 {
            return Err(ConfigError::ValueOutOfRange("month_limit must be at least 1"));
        }
        if self.single_limit == 0 {
            return Err(ConfigError::ValueOutOfRange("single_limit must be at least 1"));
        }
        if self.member_display_limit == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "member_display_limit must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Performance and recent-activity summary settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceConfig {
    /// Most recent activities in the performance window
    pub sample_size: usize,
    /// Activities listed in the recent-activity summary
    pub recent_display_limit: usize,
    /// Minimum run distance for a VDOT estimate in km
    pub min_vdot_distance_km: f64,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            sample_size: DEFAULT_PERFORMANCE_SAMPLE_SIZE,
            recent_display_limit: DEFAULT_RECENT_DISPLAY_LIMIT,
            min_vdot_distance_km: DEFAULT_MIN_VDOT_DISTANCE_KM,
        }
    }
}

impl PerformanceConfig {
    /// Load performance settings from environment
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            sample_size: var_or("PACELAB_PERFORMANCE_SAMPLE_SIZE", DEFAULT_PERFORMANCE_SAMPLE_SIZE),
            recent_display_limit: var_or("PACELAB_RECENT_ACTIVITY_LIMIT", DEFAULT_RECENT_DISPLAY_LIMIT),
            min_vdot_distance_km: var_or("PACELAB_MIN_VDOT_DISTANCE_KM", DEFAULT_MIN_VDOT_DISTANCE_KM),
        }
    }

    /// Strict variant of [`Self::from_env`]
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed values and
    /// `ConfigError::ValueOutOfRange` for invalid settings.
    pub fn try_from_env() -> Result<Self, ConfigError> {
        let config = Self {
            sample_size: parse_var("PACELAB_PERFORMANCE_SAMPLE_SIZE")?
                .unwrap_or(DEFAULT_PERFORMANCE_SAMPLE_SIZE),
            recent_display_limit: parse_var("PACELAB_RECENT_ACTIVITY_LIMIT")?
                .unwrap_or(DEFAULT_RECENT_DISPLAY_LIMIT),
            min_vdot_distance_km: parse_var("PACELAB_MIN_VDOT_DISTANCE_KM")?
                .unwrap_or(DEFAULT_MIN_VDOT_DISTANCE_KM),
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate settings
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValueOutOfRange` for a zero sample size or display
    /// limit, or a negative or non-finite minimum distance.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_size == 0 {
            return Err(ConfigError::ValueOutOfRange("sample_size must be at least 1"));
        }
        if self.recent_display_limit == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "recent_display_limit must be at least 1",
            ));
        }
        if !self.min_vdot_distance_km.is_finite() || self.min_vdot_distance_km < 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "min_vdot_distance_km must be a non-negative number",
            ));
        }
        Ok(())
    }
}

/// Complete analysis configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Bucket aggregation limits
    pub aggregation: AggregationConfig,
    /// Performance summary settings
    pub performance: PerformanceConfig,
}

impl AnalysisConfig {
    /// Load configuration from environment, ignoring malformed values
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            aggregation: AggregationConfig::from_env(),
            performance: PerformanceConfig::from_env(),
        }
    }

    /// Load configuration from environment, failing on malformed values
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError` of either section.
    pub fn try_from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            aggregation: AggregationConfig::try_from_env()?,
            performance: PerformanceConfig::try_from_env()?,
        })
    }

    /// Validate all sections
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError` of either section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.aggregation.validate()?;
        self.performance.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const KEYS: [&str; 7] = [
        "PACELAB_WEEK_BUCKET_LIMIT",
        "PACELAB_MONTH_BUCKET_LIMIT",
        "PACELAB_SINGLE_BUCKET_LIMIT",
        "PACELAB_BUCKET_MEMBER_LIMIT",
        "PACELAB_PERFORMANCE_SAMPLE_SIZE",
        "PACELAB_RECENT_ACTIVITY_LIMIT",
        "PACELAB_MIN_VDOT_DISTANCE_KM",
    ];

    fn clear_env() {
        for key in KEYS {
            env::remove_var(key);
        }
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = AnalysisConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.aggregation.limit_for(Granularity::Week), 12);
        assert_eq!(config.aggregation.limit_for(Granularity::Month), 6);
        assert_eq!(config.aggregation.limit_for(Granularity::Single), 20);
    }

    #[test]
    #[serial]
    fn test_from_env_reads_overrides() {
        clear_env();
        env::set_var("PACELAB_WEEK_BUCKET_LIMIT", "4");
        env::set_var("PACELAB_MIN_VDOT_DISTANCE_KM", "5.0");

        let config = AnalysisConfig::from_env();
        assert_eq!(config.aggregation.week_limit, 4);
        assert_eq!(config.aggregation.month_limit, DEFAULT_MONTH_LIMIT);
        assert!((config.performance.min_vdot_distance_km - 5.0).abs() < f64::EPSILON);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_ignores_malformed_values() {
        clear_env();
        env::set_var("PACELAB_MONTH_BUCKET_LIMIT", "six");

        assert_eq!(AnalysisConfig::from_env().aggregation.month_limit, DEFAULT_MONTH_LIMIT);
        assert!(matches!(
            AnalysisConfig::try_from_env(),
            Err(ConfigError::Parse(_))
        ));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_try_from_env_rejects_zero_limit() {
        clear_env();
        env::set_var("PACELAB_PERFORMANCE_SAMPLE_SIZE", "0");

        assert!(matches!(
            AnalysisConfig::try_from_env(),
            Err(ConfigError::ValueOutOfRange(_))
        ));

        clear_env();
    }
}
