// ABOUTME: VDOT calculation from a race effort using the Daniels oxygen-cost polynomial
// ABOUTME: Produces the clamped score, a fitness tier, table training paces, and race predictions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacelab Contributors

use pacelab_core::constants::race_distances::{FIVE_K_KM, HALF_MARATHON_KM, MARATHON_KM, TEN_K_KM};
use pacelab_core::constants::time_constants::SECONDS_PER_MINUTE_F64;
use pacelab_core::constants::units::METERS_PER_KILOMETER;
use pacelab_core::errors::{AppError, AppResult};
use pacelab_core::time_utils::format_seconds_to_clock;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::physiological_constants::vdot::{
    ADVANCED_THRESHOLD, DANIELS_A, DANIELS_B, DANIELS_C, ELITE_THRESHOLD, GOOD_THRESHOLD, MAX_VDOT,
    MIN_VDOT, MODERATE_THRESHOLD,
};
use crate::vdot_tables::{race_rows_for, training_paces_for, RaceTimeRow};

/// Five-level classification of a VDOT score
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FitnessTier {
    /// Below 35
    Beginner,
    /// 35 to below 45
    Moderate,
    /// 45 to below 55
    Good,
    /// 55 to below 65
    Advanced,
    /// 65 and above
    Elite,
}

impl FitnessTier {
    /// Classify a VDOT score
    #[must_use]
    pub fn from_vdot(vdot: f64) -> Self {
        if vdot >= ELITE_THRESHOLD {
            Self::Elite
        } else if vdot >= ADVANCED_THRESHOLD {
            Self::Advanced
        } else if vdot >= GOOD_THRESHOLD {
            Self::Good
        } else if vdot >= MODERATE_THRESHOLD {
            Self::Moderate
        } else {
            Self::Beginner
        }
    }

    /// Human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Moderate => "Moderate",
            Self::Good => "Good",
            Self::Advanced => "Advanced",
            Self::Elite => "Elite",
        }
    }
}

/// Race distance with a published prediction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RaceDistance {
    /// 5 km
    FiveK,
    /// 10 km
    TenK,
    /// 21.1 km
    HalfMarathon,
    /// 42.2 km
    Marathon,
}

impl RaceDistance {
    /// All distances in ascending order
    pub const ALL: [Self; 4] = [Self::FiveK, Self::TenK, Self::HalfMarathon, Self::Marathon];

    /// Distance in kilometers
    #[must_use]
    pub const fn kilometers(&self) -> f64 {
        match self {
            Self::FiveK => FIVE_K_KM,
            Self::TenK => TEN_K_KM,
            Self::HalfMarathon => HALF_MARATHON_KM,
            Self::Marathon => MARATHON_KM,
        }
    }

    /// Display name
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::FiveK => "5K",
            Self::TenK => "10K",
            Self::HalfMarathon => "Half Marathon",
            Self::Marathon => "Marathon",
        }
    }

    const fn table_seconds(self, row: &RaceTimeRow) -> u32 {
        match self {
            Self::FiveK => row.five_k,
            Self::TenK => row.ten_k,
            Self::HalfMarathon => row.half_marathon,
            Self::Marathon => row.marathon,
        }
    }
}

/// Daniels training paces for a VDOT
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingPaces {
    /// Easy pace per km
    pub easy: String,
    /// Tempo pace per km
    pub tempo: String,
    /// Interval pace per 400 m
    pub interval: String,
    /// Repetition pace per 400 m
    pub repetition: String,
}

/// Predicted finishing time for one race distance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RacePrediction {
    /// Race distance
    pub distance: RaceDistance,
    /// Predicted time in whole seconds
    pub time_seconds: u32,
    /// Predicted time as `H:MM:SS` or `M:SS`
    pub formatted_time: String,
}

/// VDOT analysis of a single effort
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VdotResult {
    /// VDOT score in [20, 85], one decimal
    pub vdot: f64,
    /// Fitness tier of the score
    pub fitness_tier: FitnessTier,
    /// Training paces from the nearest table row
    pub training_paces: TrainingPaces,
    /// Race predictions for 5K, 10K, half marathon, and marathon
    pub race_predictions: Vec<RacePrediction>,
}

impl VdotResult {
    /// Prediction for one distance
    #[must_use]
    pub fn prediction(&self, distance: RaceDistance) -> Option<&RacePrediction> {
        self.race_predictions
            .iter()
            .find(|prediction| prediction.distance == distance)
    }
}

/// Raw VDOT from a distance in km and a time in seconds, before clamping
#[must_use]
pub fn raw_vdot(distance_km: f64, time_seconds: f64) -> f64 {
    let velocity = distance_km * METERS_PER_KILOMETER / (time_seconds / SECONDS_PER_MINUTE_F64);
    (DANIELS_A * velocity).mul_add(velocity, DANIELS_B.mul_add(velocity, DANIELS_C))
}

/// Compute VDOT, training paces, and race predictions from one effort
///
/// The score is clamped to [20, 85] and rounded to one decimal before paces
/// and predictions are looked up, so extreme efforts still yield table values.
///
/// # Errors
///
/// Returns `ErrorCode::ValueOutOfRange` when distance or time is zero,
/// negative, or non-finite.
///
/// # Example
///
/// ```rust
/// use pacelab_intelligence::algorithms::{compute_vdot, FitnessTier};
///
/// let result = compute_vdot(5.0, 1500.0).unwrap();
/// assert!((result.vdot - 36.0).abs() < 0.05);
/// assert_eq!(result.fitness_tier, FitnessTier::Moderate);
/// ```
pub fn compute_vdot(distance_km: f64, time_seconds: f64) -> AppResult<VdotResult> {
    if !distance_km.is_finite() || distance_km <= 0.0 {
        return Err(AppError::value_out_of_range(format!(
            "distance must be a positive number of kilometers, got {distance_km}"
        )));
    }
    if !time_seconds.is_finite() || time_seconds <= 0.0 {
        return Err(AppError::value_out_of_range(format!(
            "time must be a positive number of seconds, got {time_seconds}"
        )));
    }

    let raw = raw_vdot(distance_km, time_seconds);
    let vdot = (raw.clamp(MIN_VDOT, MAX_VDOT) * 10.0).round() / 10.0;
    debug!(distance_km, time_seconds, raw, vdot, "computed VDOT");

    Ok(VdotResult {
        vdot,
        fitness_tier: FitnessTier::from_vdot(vdot),
        training_paces: training_paces(vdot),
        race_predictions: race_predictions(vdot)?,
    })
}

/// Training paces of the table row nearest to `vdot`
#[must_use]
pub fn training_paces(vdot: f64) -> TrainingPaces {
    let row = training_paces_for(vdot);
    TrainingPaces {
        easy: row.easy.to_owned(),
        tempo: row.tempo.to_owned(),
        interval: row.interval.to_owned(),
        repetition: row.repetition.to_owned(),
    }
}

/// Race predictions interpolated between the bracketing table rows
///
/// # Errors
///
/// Only fails if an interpolated time cannot be formatted, which the table
/// values rule out.
pub fn race_predictions(vdot: f64) -> AppResult<Vec<RacePrediction>> {
    let (lower, upper, fraction) = race_rows_for(vdot);

    RaceDistance::ALL
        .iter()
        .map(|&distance| {
            let lower_seconds = f64::from(distance.table_seconds(lower));
            let upper_seconds = f64::from(distance.table_seconds(upper));
            let seconds = (upper_seconds - lower_seconds)
                .mul_add(fraction, lower_seconds)
                .round();
            Ok(RacePrediction {
                distance,
                time_seconds: seconds as u32,
                formatted_time: format_seconds_to_clock(seconds)?,
            })
        })
        .collect()
}
