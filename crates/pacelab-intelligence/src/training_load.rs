// ABOUTME: Weekly, monthly, and yearly training stress totals ending at an injectable "now"
// ABOUTME: Scores with threshold-pace TSS, heart-rate TSS, or a pace-band load estimate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacelab Contributors

//! Training load over rolling windows
//!
//! Windows are 7, 30, and 365 days ending at `now` (inclusive). Activities
//! starting after `now` are ignored.
//!
//! A lactate threshold pace wins over a lactate threshold heart rate. Under
//! the heart-rate method, activities recorded without heart rate fall back
//! to the pace-band estimate.

use chrono::{Duration, NaiveDateTime};
use pacelab_core::constants::time_constants::SECONDS_PER_HOUR_F64;
use pacelab_core::models::ActivitySample;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregation::activity_tss;
use crate::algorithms::tss::raw_hr_tss;
use crate::physiological_constants::training_load::{
    DEFAULT_SPEED_MPS, EASY_MULTIPLIER, FAST_MULTIPLIER, FAST_PACE_SECONDS, MONTH_WINDOW_DAYS,
    STEADY_MULTIPLIER, STEADY_PACE_SECONDS, WEEK_WINDOW_DAYS, YEAR_WINDOW_DAYS,
};
use crate::physiological_constants::tss::TSS_BASE_MULTIPLIER;
use crate::recommendation_engine::{classify_risk, classify_trend, RiskLevel, TrendDirection};

/// How per-activity load was scored
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum LoadMethod {
    /// Pace-based TSS against the profile's lactate threshold pace
    ThresholdPace,
    /// Heart-rate TSS against the profile's lactate threshold heart rate
    HeartRate,
    /// Duration scaled by a pace-band multiplier
    PaceBandEstimate,
}

/// Athlete thresholds available for load scoring
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LoadThresholds {
    /// Lactate threshold pace, seconds per km
    pub pace_seconds: Option<f64>,
    /// Lactate threshold heart rate, bpm
    pub heart_rate: Option<u32>,
}

impl LoadThresholds {
    fn method(&self) -> LoadMethod {
        if self.pace().is_some() {
            LoadMethod::ThresholdPace
        } else if self.heart_rate().is_some() {
            LoadMethod::HeartRate
        } else {
            LoadMethod::PaceBandEstimate
        }
    }

    fn pace(&self) -> Option<f64> {
        self.pace_seconds.filter(|pace| pace.is_finite() && *pace > 0.0)
    }

    fn heart_rate(&self) -> Option<f64> {
        self.heart_rate.filter(|bpm| *bpm > 0).map(f64::from)
    }

    fn activity_load(&self, sample: &ActivitySample) -> f64 {
        if let Some(pace) = self.pace() {
            return activity_tss(sample, pace);
        }
        match (self.heart_rate(), sample.average_heartrate) {
            (Some(threshold), Some(bpm)) if bpm > 0 && sample.moving_seconds > 0.0 => {
                let minutes = sample.moving_seconds / 60.0;
                (raw_hr_tss(minutes, f64::from(bpm), threshold) * 10.0).round() / 10.0
            }
            _ => estimated_activity_load(sample),
        }
    }
}

/// Rolling-window training load
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingLoadSummary {
    /// Load over the last 7 days
    pub weekly_tss: f64,
    /// Load over the last 30 days
    pub monthly_tss: f64,
    /// Load over the last 365 days
    pub yearly_tss: f64,
    /// Direction of weekly load
    pub trend_direction: TrendDirection,
    /// Risk from weekly load
    pub risk_level: RiskLevel,
    /// Primary scoring method
    pub method: LoadMethod,
    /// Activities inside the yearly window
    pub activities_counted: usize,
}

/// Pace-band load estimate of one activity
///
/// `round(hours × 100 × m)` with `m` 1.2 below 5:00/km, 1.0 below 6:00/km,
/// else 0.8. A missing speed counts as 2.5 m/s.
#[must_use]
pub fn estimated_activity_load(sample: &ActivitySample) -> f64 {
    let speed = sample
        .average_speed
        .filter(|speed| *speed > 0.0)
        .unwrap_or(DEFAULT_SPEED_MPS);
    let pace = 1000.0 / speed;
    let multiplier = if pace < FAST_PACE_SECONDS {
        FAST_MULTIPLIER
    } else if pace < STEADY_PACE_SECONDS {
        STEADY_MULTIPLIER
    } else {
        EASY_MULTIPLIER
    };
    (sample.moving_seconds / SECONDS_PER_HOUR_F64 * TSS_BASE_MULTIPLIER * multiplier).round()
}

/// Summarize load over the rolling windows ending at `now`
#[must_use]
pub fn summarize_training_load(
    samples: &[ActivitySample],
    threshold_pace_seconds: Option<f64>,
    now: NaiveDateTime,
) -> TrainingLoadSummary {
    let thresholds = LoadThresholds {
        pace_seconds: threshold_pace_seconds,
        heart_rate: None,
    };
    summarize_training_load_with(samples, thresholds, now)
}

/// Summarize load with every threshold the athlete profile provides
#[must_use]
pub fn summarize_training_load_with(
    samples: &[ActivitySample],
    thresholds: LoadThresholds,
    now: NaiveDateTime,
) -> TrainingLoadSummary {
    let method = thresholds.method();

    let week_start = now - Duration::days(WEEK_WINDOW_DAYS);
    let month_start = now - Duration::days(MONTH_WINDOW_DAYS);
    let year_start = now - Duration::days(YEAR_WINDOW_DAYS);

    let mut weekly_tss = 0.0;
    let mut monthly_tss = 0.0;
    let mut yearly_tss = 0.0;
    let mut activities_counted = 0;

    for sample in samples
        .iter()
        .filter(|sample| sample.start >= year_start && sample.start <= now)
    {
        let load = thresholds.activity_load(sample);
        if sample.start >= week_start {
            weekly_tss += load;
        }
        if sample.start >= month_start {
            monthly_tss += load;
        }
        yearly_tss += load;
        activities_counted += 1;
    }

    let round_tenth = |value: f64| (value * 10.0).round() / 10.0;
    let weekly_tss = round_tenth(weekly_tss);
    debug!(weekly_tss, monthly_tss, yearly_tss, ?method, "summarized training load");

    TrainingLoadSummary {
        weekly_tss,
        monthly_tss: round_tenth(monthly_tss),
        yearly_tss: round_tenth(yearly_tss),
        trend_direction: classify_trend(weekly_tss),
        risk_level: classify_risk(weekly_tss),
        method,
        activities_counted,
    }
}
