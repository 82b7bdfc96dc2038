// ABOUTME: Pace-based Training Stress Score from duration, average pace, and threshold pace
// ABOUTME: Intensity factor is threshold pace over average pace, so faster runs score higher
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacelab Contributors

use pacelab_core::constants::time_constants::MINUTES_PER_HOUR_F64;
use pacelab_core::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::physiological_constants::tss::{
    HARD_LIMIT, HR_INTENSITY_CEILING, HR_INTENSITY_FLOOR, LIGHT_LIMIT, MODERATE_LIMIT,
    TSS_BASE_MULTIPLIER,
};

/// Interpretation of a TSS value
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TssIntensity {
    /// Below 50
    Light,
    /// 50 to below 100
    Moderate,
    /// 100 to below 200
    Hard,
    /// 200 and above
    VeryHard,
}

impl TssIntensity {
    /// Classify a TSS value
    #[must_use]
    pub fn from_tss(tss: f64) -> Self {
        if tss < LIGHT_LIMIT {
            Self::Light
        } else if tss < MODERATE_LIMIT {
            Self::Moderate
        } else if tss < HARD_LIMIT {
            Self::Hard
        } else {
            Self::VeryHard
        }
    }

    /// Human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Light => "Light session",
            Self::Moderate => "Moderate session",
            Self::Hard => "Hard session",
            Self::VeryHard => "Very hard session",
        }
    }

    /// Recovery guidance for the tier
    #[must_use]
    pub const fn advice(&self) -> &'static str {
        match self {
            Self::Light => "Suitable for a recovery or technique day",
            Self::Moderate => "Standard training load, can be repeated daily",
            Self::Hard => "Allow 1-2 days of recovery",
            Self::VeryHard => "Allow 2-3 days of recovery and schedule carefully",
        }
    }
}

/// Training stress of one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TssResult {
    /// TSS, one decimal
    pub tss: f64,
    /// Threshold pace over average pace, two decimals
    pub intensity_factor: f64,
    /// Tier of the TSS value
    pub interpretation: TssIntensity,
    /// Recovery guidance
    pub training_advice: String,
}

fn require_positive(name: &str, value: f64) -> AppResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(AppError::value_out_of_range(format!(
            "{name} must be a positive number, got {value}"
        )))
    }
}

/// Unrounded TSS for inputs already known to be positive
pub(crate) fn raw_tss(duration_minutes: f64, avg_pace_seconds: f64, threshold_pace_seconds: f64) -> f64 {
    let intensity_factor = threshold_pace_seconds / avg_pace_seconds;
    (duration_minutes / MINUTES_PER_HOUR_F64) * intensity_factor.powi(2) * TSS_BASE_MULTIPLIER
}

/// Compute the Training Stress Score of a run
///
/// `tss = hours × IF² × 100` with `IF = threshold_pace / avg_pace`.
///
/// # Errors
///
/// Returns `ErrorCode::ValueOutOfRange` when any argument is zero, negative,
/// or non-finite.
///
/// # Example
///
/// ```rust
/// use pacelab_intelligence::algorithms::{compute_tss, TssIntensity};
///
/// let result = compute_tss(60.0, 300.0, 270.0).unwrap();
/// assert_eq!(result.interpretation, TssIntensity::Moderate);
/// ```
pub fn compute_tss(
    duration_minutes: f64,
    avg_pace_seconds: f64,
    threshold_pace_seconds: f64,
) -> AppResult<TssResult> {
    require_positive("duration_minutes", duration_minutes)?;
    require_positive("avg_pace_seconds", avg_pace_seconds)?;
    require_positive("threshold_pace_seconds", threshold_pace_seconds)?;

    let intensity_factor = threshold_pace_seconds / avg_pace_seconds;
    let tss = raw_tss(duration_minutes, avg_pace_seconds, threshold_pace_seconds);
    let rounded_tss = (tss * 10.0).round() / 10.0;
    let interpretation = TssIntensity::from_tss(tss);
    debug!(duration_minutes, intensity_factor, tss = rounded_tss, "computed TSS");

    Ok(TssResult {
        tss: rounded_tss,
        intensity_factor: (intensity_factor * 100.0).round() / 100.0,
        interpretation,
        training_advice: interpretation.advice().to_owned(),
    })
}

/// Unrounded heart-rate TSS for inputs already known to be positive
pub(crate) fn raw_hr_tss(
    duration_minutes: f64,
    avg_heart_rate: f64,
    threshold_heart_rate: f64,
) -> f64 {
    let intensity_factor =
        (avg_heart_rate / threshold_heart_rate).clamp(HR_INTENSITY_FLOOR, HR_INTENSITY_CEILING);
    (duration_minutes / MINUTES_PER_HOUR_F64) * intensity_factor.powi(2) * TSS_BASE_MULTIPLIER
}

/// Compute the Training Stress Score of a session from heart rate
///
/// `IF = avg_hr / threshold_hr`, clamped to `[0.4, 1.2]` so a bad strap
/// reading cannot produce an absurd load. Used for sessions without a
/// meaningful pace, or when only a lactate threshold heart rate is known.
///
/// # Errors
///
/// Returns `ErrorCode::ValueOutOfRange` when any argument is zero, negative,
/// or non-finite.
pub fn compute_hr_tss(
    duration_minutes: f64,
    avg_heart_rate: f64,
    threshold_heart_rate: f64,
) -> AppResult<TssResult> {
    require_positive("duration_minutes", duration_minutes)?;
    require_positive("avg_heart_rate", avg_heart_rate)?;
    require_positive("threshold_heart_rate", threshold_heart_rate)?;

    let intensity_factor =
        (avg_heart_rate / threshold_heart_rate).clamp(HR_INTENSITY_FLOOR, HR_INTENSITY_CEILING);
    let tss = raw_hr_tss(duration_minutes, avg_heart_rate, threshold_heart_rate);
    let rounded_tss = (tss * 10.0).round() / 10.0;
    let interpretation = TssIntensity::from_tss(tss);
    debug!(duration_minutes, intensity_factor, tss = rounded_tss, "computed heart rate TSS");

    Ok(TssResult {
        tss: rounded_tss,
        intensity_factor: (intensity_factor * 100.0).round() / 100.0,
        interpretation,
        training_advice: interpretation.advice().to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_hour_slower_than_threshold() {
        let result = compute_tss(60.0, 300.0, 270.0).unwrap();

        assert!((result.intensity_factor - 0.9).abs() < f64::EPSILON);
        assert!((result.tss - 81.0).abs() < f64::EPSILON);
        assert_eq!(result.interpretation, TssIntensity::Moderate);
        assert_eq!(result.training_advice, TssIntensity::Moderate.advice());
    }

    #[test]
    fn test_faster_than_threshold_scores_higher() {
        let at_threshold = compute_tss(60.0, 270.0, 270.0).unwrap();
        let faster = compute_tss(60.0, 250.0, 270.0).unwrap();

        assert!((at_threshold.tss - 100.0).abs() < f64::EPSILON);
        assert_eq!(at_threshold.interpretation, TssIntensity::Hard);
        assert!(faster.tss > at_threshold.tss);
    }

    #[test]
    fn test_tier_uses_unrounded_score() {
        // 49.96 displays as 50.0 but is still a light session
        let result = compute_tss(29.976, 270.0, 270.0).unwrap();

        assert!((result.tss - 50.0).abs() < f64::EPSILON);
        assert_eq!(result.interpretation, TssIntensity::Light);
    }

    #[test]
    fn test_hr_tss_at_threshold() {
        let result = compute_hr_tss(60.0, 160.0, 160.0).unwrap();

        assert!((result.tss - 100.0).abs() < f64::EPSILON);
        assert!((result.intensity_factor - 1.0).abs() < f64::EPSILON);
        assert_eq!(result.interpretation, TssIntensity::Hard);
    }

    #[test]
    fn test_hr_tss_clamps_intensity() {
        let spike = compute_hr_tss(60.0, 400.0, 160.0).unwrap();
        let stroll = compute_hr_tss(60.0, 20.0, 160.0).unwrap();

        assert!((spike.intensity_factor - 1.2).abs() < f64::EPSILON);
        assert!((spike.tss - 144.0).abs() < 1e-9);
        assert!((stroll.intensity_factor - 0.4).abs() < f64::EPSILON);
        assert!((stroll.tss - 16.0).abs() < 1e-9);
    }

    #[test]
    fn test_hr_tss_rejects_non_positive_arguments() {
        assert!(compute_hr_tss(0.0, 150.0, 160.0).unwrap_err().is_validation());
        assert!(compute_hr_tss(60.0, 0.0, 160.0).unwrap_err().is_validation());
        assert!(compute_hr_tss(60.0, 150.0, -1.0).unwrap_err().is_validation());
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(TssIntensity::from_tss(49.9), TssIntensity::Light);
        assert_eq!(TssIntensity::from_tss(50.0), TssIntensity::Moderate);
        assert_eq!(TssIntensity::from_tss(199.9), TssIntensity::Hard);
        assert_eq!(TssIntensity::from_tss(200.0), TssIntensity::VeryHard);
    }

    #[test]
    fn test_rejects_non_positive_arguments() {
        assert!(compute_tss(0.0, 300.0, 270.0).unwrap_err().is_validation());
        assert!(compute_tss(60.0, -300.0, 270.0).unwrap_err().is_validation());
        assert!(compute_tss(60.0, 300.0, 0.0).unwrap_err().is_validation());
        assert!(compute_tss(60.0, f64::NAN, 270.0).unwrap_err().is_validation());
    }

    proptest! {
        #[test]
        fn prop_tss_non_negative(
            minutes in 0.1_f64..600.0,
            pace in 120.0_f64..900.0,
            threshold in 120.0_f64..900.0,
        ) {
            let result = compute_tss(minutes, pace, threshold).unwrap();
            prop_assert!(result.tss >= 0.0);
            prop_assert!(result.intensity_factor > 0.0);
        }
    }
}
