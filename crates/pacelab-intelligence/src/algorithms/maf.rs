// ABOUTME: Maximum aerobic function (MAF 180) heart rate with health-category adjustment
// ABOUTME: Derives five training zones as fractions of the clamped MAF heart rate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacelab Contributors

//! MAF heart rate and training zones
//!
//! Zone bounds are rounded independently, so a bound shared by two zones is
//! the same integer on both sides but fractional bounds can drift by one bpm
//! from the exact product.

use pacelab_core::errors::{AppError, AppResult};
use pacelab_core::models::HealthCategory;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::physiological_constants::maf::{
    ELITE_ADJUSTMENT, MAF_BASE, MAJOR_ILLNESS_ADJUSTMENT, MAX_AGE, MAX_MAF_HR, MINOR_ISSUES_ADJUSTMENT,
    MIN_AGE, MIN_MAF_HR, RECOMMENDED_BAND_BPM, SENIOR_ADJUSTMENT, ZONE_FRACTIONS,
};

/// One heart rate training zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeartRateZone {
    /// Zone number, 1-5
    pub zone: u8,
    /// Lower bound in bpm
    pub min_hr: u32,
    /// Upper bound in bpm
    pub max_hr: u32,
    /// Zone name
    pub name: String,
    /// What training in the zone develops
    pub description: String,
    /// Rate of perceived exertion label
    pub perceived_exertion: String,
}

/// MAF heart rate, zones, and guidance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MafResult {
    /// MAF heart rate in bpm, clamped to [100, 180]
    pub maf_heart_rate: u32,
    /// Five zones ordered from easiest to hardest
    pub zones: Vec<HeartRateZone>,
    /// Recommended training band text
    pub recommendation: String,
}

impl MafResult {
    /// Zone by number (1-5)
    #[must_use]
    pub fn zone(&self, number: u8) -> Option<&HeartRateZone> {
        self.zones.iter().find(|zone| zone.zone == number)
    }
}

/// Name, description, and exertion label of each zone
const ZONE_LABELS: [(&str, &str, &str); 5] = [
    (
        "Recovery",
        "Active recovery and fat oxidation",
        "RPE 1-2 (very easy)",
    ),
    (
        "Aerobic Base",
        "Builds the aerobic base for long slow distance",
        "RPE 3-4 (easy)",
    ),
    (
        "MAF",
        "Maximum aerobic function, improves efficiency",
        "RPE 5-6 (moderate)",
    ),
    (
        "Lactate Threshold",
        "Improves lactate clearance",
        "RPE 7-8 (hard)",
    ),
    (
        "Anaerobic",
        "Develops VO2max and anaerobic power",
        "RPE 9-10 (maximal)",
    ),
];

/// Heart rate adjustment for a health category
#[must_use]
pub const fn health_adjustment(category: HealthCategory) -> i32 {
    match category {
        HealthCategory::MajorIllness => MAJOR_ILLNESS_ADJUSTMENT,
        HealthCategory::MinorIssues => MINOR_ISSUES_ADJUSTMENT,
        HealthCategory::Elite => ELITE_ADJUSTMENT,
        HealthCategory::Senior => SENIOR_ADJUSTMENT,
        HealthCategory::Healthy | HealthCategory::Unknown => 0,
    }
}

fn scaled_bpm(maf: u32, fraction: f64) -> u32 {
    (f64::from(maf) * fraction).round() as u32
}

/// Compute the MAF heart rate and zones
///
/// # Errors
///
/// Returns `ErrorCode::ValueOutOfRange` when age lies outside 1-100.
///
/// # Example
///
/// ```rust
/// use pacelab_core::models::HealthCategory;
/// use pacelab_intelligence::algorithms::compute_maf;
///
/// let result = compute_maf(35, HealthCategory::Healthy).unwrap();
/// assert_eq!(result.maf_heart_rate, 145);
/// ```
pub fn compute_maf(age: u32, health_category: HealthCategory) -> AppResult<MafResult> {
    if !(MIN_AGE..=MAX_AGE).contains(&age) {
        return Err(AppError::value_out_of_range(format!(
            "age {age} must be between {MIN_AGE} and {MAX_AGE}"
        )));
    }

    let adjustment = health_adjustment(health_category);
    let maf = (MAF_BASE - age as i32 + adjustment).clamp(MIN_MAF_HR, MAX_MAF_HR) as u32;
    debug!(age, %health_category, adjustment, maf, "computed MAF heart rate");

    let zones = ZONE_FRACTIONS
        .iter()
        .zip(ZONE_LABELS)
        .enumerate()
        .map(|(index, (&(low, high), (name, description, rpe)))| HeartRateZone {
            zone: index as u8 + 1,
            min_hr: scaled_bpm(maf, low),
            max_hr: scaled_bpm(maf, high),
            name: name.to_owned(),
            description: description.to_owned(),
            perceived_exertion: rpe.to_owned(),
        })
        .collect();

    Ok(MafResult {
        maf_heart_rate: maf,
        zones,
        recommendation: format!(
            "Keep most training between {} and {maf} bpm",
            maf.saturating_sub(RECOMMENDED_BAND_BPM)
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_healthy_35_year_old() {
        let result = compute_maf(35, HealthCategory::Healthy).unwrap();

        assert_eq!(result.maf_heart_rate, 145);
        let zone3 = result.zone(3).unwrap();
        assert_eq!((zone3.min_hr, zone3.max_hr), (123, 145));
        assert_eq!(zone3.name, "MAF");
        assert_eq!(result.recommendation, "Keep most training between 135 and 145 bpm");
    }

    #[test]
    fn test_senior_adjustment() {
        let result = compute_maf(70, HealthCategory::Senior).unwrap();
        assert_eq!(result.maf_heart_rate, 120);
    }

    #[test]
    fn test_adjustments_by_category() {
        let rate = |category| compute_maf(40, category).unwrap().maf_heart_rate;

        assert_eq!(rate(HealthCategory::MajorIllness), 130);
        assert_eq!(rate(HealthCategory::MinorIssues), 135);
        assert_eq!(rate(HealthCategory::Elite), 145);
        assert_eq!(rate(HealthCategory::Unknown), 140);
    }

    #[test]
    fn test_clamped_to_range() {
        assert_eq!(
            compute_maf(1, HealthCategory::Senior).unwrap().maf_heart_rate,
            180
        );
        assert_eq!(
            compute_maf(100, HealthCategory::MajorIllness)
                .unwrap()
                .maf_heart_rate,
            100
        );
    }

    #[test]
    fn test_zones_are_contiguous_and_ordered() {
        let result = compute_maf(45, HealthCategory::Healthy).unwrap();

        assert_eq!(result.zones.len(), 5);
        for pair in result.zones.windows(2) {
            assert_eq!(pair[0].max_hr, pair[1].min_hr);
            assert!(pair[0].min_hr < pair[1].min_hr);
        }
    }

    #[test]
    fn test_rejects_age_out_of_range() {
        assert!(compute_maf(0, HealthCategory::Healthy)
            .unwrap_err()
            .is_validation());
        assert!(compute_maf(101, HealthCategory::Healthy)
            .unwrap_err()
            .is_validation());
    }
}
