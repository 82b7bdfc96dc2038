// ABOUTME: Estimators for missing profile values: max HR, threshold HR, and race paces from 5K pace
// ABOUTME: Fills only absent fields so values entered by the athlete always win
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacelab Contributors

use pacelab_core::errors::{AppError, AppResult};
use pacelab_core::models::{PaceBenchmark, UserProfile};
use pacelab_core::time_utils::{format_pace, parse_clock_to_seconds};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::physiological_constants::profile::{
    AGE_PREDICTED_MAX_HR_BASE, HALF_MARATHON_OFFSET_SECONDS, LACTATE_THRESHOLD_RESERVE_FRACTION,
    MARATHON_OFFSET_SECONDS, TEN_K_OFFSET_SECONDS, THRESHOLD_OFFSET_SECONDS,
};

/// Race and threshold paces derived from a 5K pace, all `M:SS` per km
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimatedPaces {
    /// 10K pace
    pub ten_k: String,
    /// Half marathon pace
    pub half_marathon: String,
    /// Marathon pace
    pub marathon: String,
    /// Lactate threshold pace
    pub lactate_threshold: String,
}

/// Age-predicted maximum heart rate (220 - age)
///
/// # Errors
///
/// Returns `ErrorCode::ValueOutOfRange` when age is 0 or 220 and above.
pub fn estimate_max_heart_rate(age: u32) -> AppResult<u32> {
    if age == 0 || age >= AGE_PREDICTED_MAX_HR_BASE {
        return Err(AppError::value_out_of_range(format!(
            "cannot estimate max heart rate for age {age}"
        )));
    }
    Ok(AGE_PREDICTED_MAX_HR_BASE - age)
}

/// Lactate threshold heart rate at 85% of heart rate reserve
///
/// # Errors
///
/// Returns `ErrorCode::ValueOutOfRange` unless `max_hr > resting_hr > 0`.
pub fn estimate_lactate_threshold_heart_rate(resting_hr: u32, max_hr: u32) -> AppResult<u32> {
    if resting_hr == 0 || max_hr <= resting_hr {
        return Err(AppError::value_out_of_range(format!(
            "max heart rate {max_hr} must exceed resting heart rate {resting_hr}"
        )));
    }
    let reserve = f64::from(max_hr - resting_hr);
    Ok(LACTATE_THRESHOLD_RESERVE_FRACTION
        .mul_add(reserve, f64::from(resting_hr))
        .round() as u32)
}

/// Derive race and threshold paces from a 5K pace string
///
/// # Errors
///
/// Returns a format error when the 5K pace cannot be parsed.
pub fn estimate_paces_from_five_k(five_k_pace: &str) -> AppResult<EstimatedPaces> {
    let five_k = parse_clock_to_seconds(five_k_pace)?;
    if five_k <= 0.0 {
        return Err(AppError::value_out_of_range("5K pace must be positive"));
    }
    Ok(EstimatedPaces {
        ten_k: format_pace(five_k + TEN_K_OFFSET_SECONDS),
        half_marathon: format_pace(five_k + HALF_MARATHON_OFFSET_SECONDS),
        marathon: format_pace(five_k + MARATHON_OFFSET_SECONDS),
        lactate_threshold: format_pace(five_k + THRESHOLD_OFFSET_SECONDS),
    })
}

/// Copy of `profile` with absent heart rates and paces estimated
///
/// Estimation failures leave the field empty and are logged at `warn`.
#[must_use]
pub fn fill_profile_estimates(profile: &UserProfile) -> UserProfile {
    let mut filled = profile.clone();

    if filled.max_heart_rate.is_none() {
        if let Some(age) = filled.age {
            match estimate_max_heart_rate(age) {
                Ok(max_hr) => filled.max_heart_rate = Some(max_hr),
                Err(error) => warn!(%error, "skipping max heart rate estimate"),
            }
        }
    }

    if filled.lactate_threshold_heart_rate.is_none() {
        if let (Some(resting), Some(max_hr)) = (filled.resting_heart_rate, filled.max_heart_rate) {
            match estimate_lactate_threshold_heart_rate(resting, max_hr) {
                Ok(lthr) => filled.lactate_threshold_heart_rate = Some(lthr),
                Err(error) => warn!(%error, "skipping threshold heart rate estimate"),
            }
        }
    }

    if let Some(five_k) = filled.pace(PaceBenchmark::FiveK) {
        match estimate_paces_from_five_k(five_k) {
            Ok(paces) => {
                filled.ten_k_pace.get_or_insert(paces.ten_k);
                filled.half_marathon_pace.get_or_insert(paces.half_marathon);
                filled.marathon_pace.get_or_insert(paces.marathon);
                filled
                    .lactate_threshold_pace
                    .get_or_insert(paces.lactate_threshold);
            }
            Err(error) => warn!(%error, "ignoring malformed 5K pace in profile"),
        }
    }

    filled
}
