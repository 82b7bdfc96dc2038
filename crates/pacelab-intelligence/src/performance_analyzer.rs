// ABOUTME: Performance summary over the most recent activities with pace trend and VDOT estimate
// ABOUTME: Compares average pace against the preceding window and estimates VDOT from qualifying runs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacelab Contributors

//! Performance summary
//!
//! The window is the `sample_size` most recent activities by start time.
//! Average pace is total time over total distance, not a mean of paces.

use pacelab_core::models::{ActivitySample, SportType};
use pacelab_core::time_utils::format_pace;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregation::mean_heart_rate;
use crate::algorithms::{compute_vdot, FitnessTier};
use crate::config::PerformanceConfig;
use crate::physiological_constants::vdot::{
    DEFAULT_VDOT_ESTIMATE, PACE_BAND_ESTIMATES, SLOWEST_PACE_BAND_ESTIMATE,
};

/// Where the VDOT estimate came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum VdotSource {
    /// Best VDOT among qualifying runs in the window
    BestEffort,
    /// Pace-band lookup of the window's average pace
    PaceBand,
    /// No usable activity; default estimate
    Default,
}

/// Recent performance of an athlete
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSummary {
    /// Activities in the window
    pub sample_size: usize,
    /// Average pace in seconds per km, 0 when undefined
    pub avg_pace_seconds: f64,
    /// Average pace as `M:SS`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_pace: Option<String>,
    /// Seconds per km gained against the preceding window (positive is faster)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pace_improvement_seconds: Option<f64>,
    /// Mean heart rate of activities with a heart rate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_heart_rate: Option<u32>,
    /// Estimated VDOT
    pub vdot_estimate: f64,
    /// Origin of the estimate
    pub vdot_source: VdotSource,
    /// Fitness tier of the estimate
    pub fitness_tier: FitnessTier,
}

/// VDOT estimate from an average training pace in seconds per km
#[must_use]
pub fn estimate_vdot_from_pace(pace_seconds: f64) -> f64 {
    PACE_BAND_ESTIMATES
        .iter()
        .find(|(upper, _)| pace_seconds < *upper)
        .map_or(SLOWEST_PACE_BAND_ESTIMATE, |(_, vdot)| *vdot)
}

/// Total time over total distance in seconds per km
fn window_pace(samples: &[ActivitySample]) -> Option<f64> {
    let meters: f64 = samples.iter().map(|s| s.distance_meters).sum();
    let seconds: f64 = samples.iter().map(|s| s.moving_seconds).sum();
    (meters > 0.0 && seconds > 0.0).then(|| seconds / (meters / 1000.0))
}

fn best_effort_vdot(samples: &[ActivitySample], min_distance_km: f64) -> Option<f64> {
    samples
        .iter()
        .filter(|s| s.sport_type == SportType::Run)
        .filter(|s| s.distance_km() >= min_distance_km && s.moving_seconds > 0.0)
        .filter_map(|s| compute_vdot(s.distance_km(), s.moving_seconds).ok())
        .map(|result| result.vdot)
        .reduce(f64::max)
}

/// Analyzes recent performance
#[derive(Debug, Clone, Default)]
pub struct PerformanceAnalyzer {
    config: PerformanceConfig,
}

impl PerformanceAnalyzer {
    /// Create an analyzer with the given settings
    #[must_use]
    pub const fn new(config: PerformanceConfig) -> Self {
        Self { config }
    }

    /// Summarize the most recent activities
    ///
    /// Input order does not matter; samples are ordered by start time first.
    #[must_use]
    pub fn summarize(&self, samples: &[ActivitySample]) -> PerformanceSummary {
        let mut ordered = samples.to_vec();
        ordered.sort_by(|a, b| a.start.cmp(&b.start));

        let window_size = self.config.sample_size.max(1);
        let split = ordered.len().saturating_sub(window_size);
        let (older, recent) = ordered.split_at(split);
        let previous = &older[older.len().saturating_sub(window_size)..];

        let avg_pace = window_pace(recent);
        let pace_improvement_seconds = avg_pace
            .zip(window_pace(previous))
            .map(|(current, before)| (before - current).round());

        let avg_heart_rate = mean_heart_rate(recent.iter().filter_map(|s| s.average_heartrate));

        let (vdot_estimate, vdot_source) =
            match best_effort_vdot(recent, self.config.min_vdot_distance_km) {
                Some(vdot) => (vdot, VdotSource::BestEffort),
                None => avg_pace.map_or((DEFAULT_VDOT_ESTIMATE, VdotSource::Default), |pace| {
                    (estimate_vdot_from_pace(pace), VdotSource::PaceBand)
                }),
            };

        debug!(
            sample_size = recent.len(),
            vdot_estimate,
            ?vdot_source,
            "summarized performance"
        );

        PerformanceSummary {
            sample_size: recent.len(),
            avg_pace_seconds: avg_pace.unwrap_or(0.0),
            avg_pace: avg_pace.map(format_pace),
            pace_improvement_seconds,
            avg_heart_rate,
            vdot_estimate,
            vdot_source,
            fitness_tier: FitnessTier::from_vdot(vdot_estimate),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, NaiveDateTime};

    fn base() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(7, 0, 0)
            .unwrap()
    }

    fn sample(day: i64, meters: f64, seconds: f64, hr: Option<u32>, sport: SportType) -> ActivitySample {
        ActivitySample {
            start: base() + Duration::days(day),
            distance_meters: meters,
            moving_seconds: seconds,
            average_speed: None,
            average_heartrate: hr,
            sport_type: sport,
        }
    }

    #[test]
    fn test_pace_bands() {
        assert!((estimate_vdot_from_pace(239.0) - 60.0).abs() < f64::EPSILON);
        assert!((estimate_vdot_from_pace(240.0) - 55.0).abs() < f64::EPSILON);
        assert!((estimate_vdot_from_pace(359.0) - 40.0).abs() < f64::EPSILON);
        assert!((estimate_vdot_from_pace(419.0) - 35.0).abs() < f64::EPSILON);
        assert!((estimate_vdot_from_pace(420.0) - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_window_uses_default() {
        let summary = PerformanceAnalyzer::default().summarize(&[]);

        assert_eq!(summary.sample_size, 0);
        assert_eq!(summary.vdot_source, VdotSource::Default);
        assert!((summary.vdot_estimate - DEFAULT_VDOT_ESTIMATE).abs() < f64::EPSILON);
        assert_eq!(summary.avg_pace, None);
        assert_eq!(summary.avg_heart_rate, None);
        assert_eq!(summary.pace_improvement_seconds, None);
    }

    #[test]
    fn test_best_effort_vdot_ignores_short_and_non_runs() {
        let samples = vec![
            sample(0, 5_000.0, 1500.0, Some(150), SportType::Run),
            sample(1, 2_000.0, 400.0, Some(170), SportType::Run),
            sample(2, 40_000.0, 3600.0, None, SportType::Ride),
        ];

        let summary = PerformanceAnalyzer::default().summarize(&samples);
        assert_eq!(summary.vdot_source, VdotSource::BestEffort);
        assert!((summary.vdot_estimate - 36.0).abs() < f64::EPSILON);
        assert_eq!(summary.fitness_tier, FitnessTier::Moderate);
        assert_eq!(summary.avg_heart_rate, Some(160));
    }

    #[test]
    fn test_pace_band_fallback_when_no_qualifying_run() {
        let samples = vec![sample(0, 2_000.0, 600.0, None, SportType::Run)];
        let summary = PerformanceAnalyzer::default().summarize(&samples);

        assert_eq!(summary.vdot_source, VdotSource::PaceBand);
        // 5:00/km falls in the 5:00-5:30 band
        assert!((summary.vdot_estimate - 45.0).abs() < f64::EPSILON);
        assert_eq!(summary.avg_pace.as_deref(), Some("5:00"));
    }

    #[test]
    fn test_pace_improvement_against_previous_window() {
        let config = PerformanceConfig {
            sample_size: 2,
            ..PerformanceConfig::default()
        };
        // oldest first after sorting: two at 6:00/km, then two at 5:30/km
        let samples = vec![
            sample(3, 10_000.0, 3300.0, None, SportType::Run),
            sample(0, 10_000.0, 3600.0, None, SportType::Run),
            sample(2, 10_000.0, 3300.0, None, SportType::Run),
            sample(1, 10_000.0, 3600.0, None, SportType::Run),
        ];

        let summary = PerformanceAnalyzer::new(config).summarize(&samples);
        assert_eq!(summary.sample_size, 2);
        assert_eq!(summary.pace_improvement_seconds, Some(30.0));
        assert_eq!(summary.avg_pace.as_deref(), Some("5:30"));
    }
}
