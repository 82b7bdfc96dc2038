// ABOUTME: User profile model with heart rate, best-effort pace, and health settings
// ABOUTME: Every field is optional; helpers parse stored pace strings on demand
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacelab Contributors

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::errors::{AppError, AppResult};
use crate::time_utils::parse_clock_to_seconds;

/// Youngest accepted profile age
const MIN_PROFILE_AGE: u32 = 1;

/// Oldest accepted profile age
const MAX_PROFILE_AGE: u32 = 120;

/// Health category used to adjust the MAF heart rate
///
/// Unrecognised values deserialize to [`HealthCategory::Unknown`] and carry
/// no adjustment instead of failing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum HealthCategory {
    /// Recovering from major illness, surgery, or on medication
    MajorIllness,
    /// Injured, frequently ill, asthmatic, or new to training
    MinorIssues,
    /// Training consistently without problems
    #[default]
    Healthy,
    /// Two or more years of progress without injury
    Elite,
    /// Age 65 and over
    Senior,
    /// Any label not listed above
    #[serde(other)]
    Unknown,
}

impl HealthCategory {
    /// Stable snake-case label
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MajorIllness => "major_illness",
            Self::MinorIssues => "minor_issues",
            Self::Healthy => "healthy",
            Self::Elite => "elite",
            Self::Senior => "senior",
            Self::Unknown => "unknown",
        }
    }
}

impl FromStr for HealthCategory {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "major_illness" => Self::MajorIllness,
            "minor_issues" => Self::MinorIssues,
            "healthy" => Self::Healthy,
            "elite" => Self::Elite,
            "senior" => Self::Senior,
            _ => Self::Unknown,
        })
    }
}

impl fmt::Display for HealthCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gender as entered by the user
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    /// Male
    Male,
    /// Female
    Female,
    /// Not specified or other
    #[serde(other)]
    Other,
}

/// Self-assessed training level
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TrainingLevel {
    /// New to running
    Beginner,
    /// Regular recreational runner
    Intermediate,
    /// Structured training, racing
    Advanced,
    /// Competitive
    Elite,
}

/// Primary training goal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PrimaryGoal {
    /// General fitness
    #[serde(rename = "fitness")]
    Fitness,
    /// Weight loss
    #[serde(rename = "weight_loss")]
    WeightLoss,
    /// 5K race
    #[serde(rename = "5k")]
    FiveK,
    /// 10K race
    #[serde(rename = "10k")]
    TenK,
    /// Half marathon
    #[serde(rename = "half_marathon")]
    HalfMarathon,
    /// Marathon
    #[serde(rename = "marathon")]
    Marathon,
    /// Ultra distance
    #[serde(rename = "ultra")]
    Ultra,
}

/// Best-effort pace slots stored on a profile
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PaceBenchmark {
    /// 5K race pace
    FiveK,
    /// 10K race pace
    TenK,
    /// Half marathon race pace
    HalfMarathon,
    /// Marathon race pace
    Marathon,
    /// Lactate threshold pace
    LactateThreshold,
}

/// Personal settings supplied by the caller
///
/// All fields are optional. Missing fields reduce the detail of an analysis
/// but never make it fail. Paces are `M:SS` strings per kilometer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    /// Age in years (1-120)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Gender
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    /// Body weight in kilograms
    #[serde(alias = "weight", skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    /// Height in centimeters
    #[serde(alias = "height", skip_serializing_if = "Option::is_none")]
    pub height_cm: Option<f64>,
    /// Resting heart rate in bpm
    #[serde(alias = "restingHeartRate", skip_serializing_if = "Option::is_none")]
    pub resting_heart_rate: Option<u32>,
    /// Maximum heart rate in bpm
    #[serde(alias = "maxHeartRate", skip_serializing_if = "Option::is_none")]
    pub max_heart_rate: Option<u32>,
    /// Lactate threshold heart rate in bpm
    #[serde(alias = "lactateThresholdHR", skip_serializing_if = "Option::is_none")]
    pub lactate_threshold_heart_rate: Option<u32>,
    /// Best 5K pace
    #[serde(alias = "km5_pace", skip_serializing_if = "Option::is_none")]
    pub five_k_pace: Option<String>,
    /// Best 10K pace
    #[serde(alias = "km10_pace", skip_serializing_if = "Option::is_none")]
    pub ten_k_pace: Option<String>,
    /// Best half marathon pace
    #[serde(skip_serializing_if = "Option::is_none")]
    pub half_marathon_pace: Option<String>,
    /// Best marathon pace
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marathon_pace: Option<String>,
    /// Lactate threshold pace
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lactate_threshold_pace: Option<String>,
    /// Weekly running volume in kilometers
    #[serde(alias = "weeklyMileage", skip_serializing_if = "Option::is_none")]
    pub weekly_mileage_km: Option<f64>,
    /// Years of structured training
    #[serde(alias = "trainingExperience", skip_serializing_if = "Option::is_none")]
    pub training_experience_years: Option<f64>,
    /// Health category for the MAF adjustment
    #[serde(alias = "healthCategory", skip_serializing_if = "Option::is_none")]
    pub health_category: Option<HealthCategory>,
    /// Self-assessed training level
    #[serde(alias = "fitnessLevel", skip_serializing_if = "Option::is_none")]
    pub fitness_level: Option<TrainingLevel>,
    /// Primary goal
    #[serde(alias = "primaryGoal", skip_serializing_if = "Option::is_none")]
    pub primary_goal: Option<PrimaryGoal>,
}

impl UserProfile {
    /// Check the numeric ranges of the fields that are present
    ///
    /// # Errors
    ///
    /// Returns a validation error when age lies outside 1-120 or a heart rate
    /// is zero.
    pub fn validate(&self) -> AppResult<()> {
        if let Some(age) = self.age {
            if !(MIN_PROFILE_AGE..=MAX_PROFILE_AGE).contains(&age) {
                return Err(AppError::value_out_of_range(format!(
                    "age {age} must be between {MIN_PROFILE_AGE} and {MAX_PROFILE_AGE}"
                )));
            }
        }

        for (field, value) in [
            ("resting_heart_rate", self.resting_heart_rate),
            ("max_heart_rate", self.max_heart_rate),
            ("lactate_threshold_heart_rate", self.lactate_threshold_heart_rate),
        ] {
            if value == Some(0) {
                return Err(AppError::value_out_of_range(format!(
                    "{field} must be greater than zero"
                )));
            }
        }

        Ok(())
    }

    /// Stored pace string for a benchmark
    #[must_use]
    pub fn pace(&self, benchmark: PaceBenchmark) -> Option<&str> {
        match benchmark {
            PaceBenchmark::FiveK => self.five_k_pace.as_deref(),
            PaceBenchmark::TenK => self.ten_k_pace.as_deref(),
            PaceBenchmark::HalfMarathon => self.half_marathon_pace.as_deref(),
            PaceBenchmark::Marathon => self.marathon_pace.as_deref(),
            PaceBenchmark::LactateThreshold => self.lactate_threshold_pace.as_deref(),
        }
    }

    /// Pace for a benchmark in seconds per kilometer
    ///
    /// `Ok(None)` when the profile has no value for the benchmark.
    ///
    /// # Errors
    ///
    /// Returns a format error when the stored pace string is malformed.
    pub fn pace_seconds(&self, benchmark: PaceBenchmark) -> AppResult<Option<f64>> {
        self.pace(benchmark).map(parse_clock_to_seconds).transpose()
    }

    /// Health category, defaulting to healthy
    #[must_use]
    pub fn health_category_or_default(&self) -> HealthCategory {
        self.health_category.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_health_category_deserializes() {
        let category: HealthCategory = serde_json::from_str("\"recovering\"").unwrap();
        assert_eq!(category, HealthCategory::Unknown);
        assert_eq!("ELITE".parse::<HealthCategory>(), Ok(HealthCategory::Elite));
    }

    #[test]
    fn test_profile_accepts_camel_case_aliases() {
        let json = r#"{
            "age": 34,
            "maxHeartRate": 186,
            "km5_pace": "4:40",
            "lactate_threshold_pace": "4:55",
            "primaryGoal": "half_marathon"
        }"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();

        assert_eq!(profile.max_heart_rate, Some(186));
        assert_eq!(profile.primary_goal, Some(PrimaryGoal::HalfMarathon));
        assert_eq!(
            profile.pace_seconds(PaceBenchmark::LactateThreshold).unwrap(),
            Some(295.0)
        );
        assert_eq!(profile.pace_seconds(PaceBenchmark::Marathon).unwrap(), None);
    }

    #[test]
    fn test_malformed_pace_is_format_error() {
        let profile = UserProfile {
            five_k_pace: Some("four forty".to_owned()),
            ..UserProfile::default()
        };
        assert!(profile
            .pace_seconds(PaceBenchmark::FiveK)
            .unwrap_err()
            .is_format());
    }

    #[test]
    fn test_validate_age_range() {
        let mut profile = UserProfile {
            age: Some(121),
            ..UserProfile::default()
        };
        assert!(profile.validate().unwrap_err().is_validation());

        profile.age = Some(120);
        assert!(profile.validate().is_ok());
    }
}
