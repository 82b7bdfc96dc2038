// ABOUTME: Maps VDOT level and weekly training load to categorical training guidance
// ABOUTME: Risk and trend classification, weekly templates, recovery, nutrition, and age-aware advice
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacelab Contributors

//! Training recommendation engine
//!
//! Every output is a pure function of its arguments: the same VDOT, load,
//! and risk level always produce the same texts.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::physiological_constants::advice::{
    BASE_BUILDING_VDOT, FOCUS_BASE_VDOT, FOCUS_TEMPO_VDOT, INTERMEDIATE_VDOT, MASTERS_BALANCE_AGE,
    MASTERS_RECOVERY_AGE,
};
use crate::physiological_constants::training_load::{
    DECREASING_TREND_WEEKLY_TSS, HIGH_RISK_WEEKLY_TSS, INCREASING_TREND_WEEKLY_TSS,
    MODERATE_RISK_WEEKLY_TSS,
};

/// Injury and overtraining risk from weekly load
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    /// Weekly TSS of 350 or less
    Low,
    /// Weekly TSS above 350
    Moderate,
    /// Weekly TSS above 500
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
        })
    }
}

/// Direction of weekly training load
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    /// Weekly TSS above 300
    Increasing,
    /// Weekly TSS between 150 and 300
    Stable,
    /// Weekly TSS below 150
    Decreasing,
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Increasing => "increasing",
            Self::Stable => "stable",
            Self::Decreasing => "decreasing",
        })
    }
}

/// Classify injury risk from weekly TSS
#[must_use]
pub fn classify_risk(weekly_tss: f64) -> RiskLevel {
    if weekly_tss > HIGH_RISK_WEEKLY_TSS {
        RiskLevel::High
    } else if weekly_tss > MODERATE_RISK_WEEKLY_TSS {
        RiskLevel::Moderate
    } else {
        RiskLevel::Low
    }
}

/// Classify load trend from weekly TSS
#[must_use]
pub fn classify_trend(weekly_tss: f64) -> TrendDirection {
    if weekly_tss > INCREASING_TREND_WEEKLY_TSS {
        TrendDirection::Increasing
    } else if weekly_tss < DECREASING_TREND_WEEKLY_TSS {
        TrendDirection::Decreasing
    } else {
        TrendDirection::Stable
    }
}

/// Guidance derived from fitness level and training load
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationSet {
    /// What the next training block should emphasise
    pub training_focus: String,
    /// Seven sessions, Monday first
    pub weekly_structure: Vec<String>,
    /// Recovery guidance for the risk level
    pub recovery_advice: String,
    /// General fueling guidance
    pub nutrition_tips: String,
    /// Direction of weekly load
    pub load_trend: TrendDirection,
}

const REDUCED_LOAD_WEEK: [&str; 7] = [
    "Rest or light cross-training",
    "Easy run 30-40 min",
    "Rest",
    "Easy run 45 min",
    "Rest",
    "Medium-long run 60 min",
    "Rest or recovery walk",
];

const BEGINNER_WEEK: [&str; 7] = [
    "Easy run 30 min",
    "Rest or cross-training",
    "Easy run 40 min",
    "Rest",
    "Tempo run 20 min",
    "Long run 60-90 min",
    "Rest",
];

const STANDARD_WEEK: [&str; 7] = [
    "Easy run 45 min",
    "Intervals 40 min",
    "Easy run 50 min",
    "Tempo run 35 min",
    "Easy run 40 min",
    "Long run 90-120 min",
    "Recovery run or rest",
];

const NUTRITION_TIPS: &str = "Avoid high-fiber food 2-3 hours before running. Take 30-60 g of \
carbohydrate per hour on long runs. Within 30 minutes after training, refuel with carbohydrate and \
protein at a 3:1 to 4:1 ratio.";

fn training_focus(vdot: f64) -> &'static str {
    if vdot < FOCUS_BASE_VDOT {
        "Focus on aerobic base building: add volume gradually with easy runs and long slow distance."
    } else if vdot < FOCUS_TEMPO_VDOT {
        "Keep the aerobic base while adding tempo runs and intervals to raise lactate threshold and \
         speed endurance."
    } else {
        "Add more high-quality interval and speed sessions while keeping enough aerobic base work."
    }
}

const fn recovery_advice(risk_level: RiskLevel) -> &'static str {
    match risk_level {
        RiskLevel::High => {
            "Reduce training intensity now. Sleep 8 hours a night and add stretching and massage. \
             Track resting heart rate each morning and take full rest if it stays elevated."
        }
        RiskLevel::Moderate => {
            "Prioritise sleep, run more of your volume as recovery runs, and take at least 2 full \
             rest or light cross-training days per week."
        }
        RiskLevel::Low => {
            "Keep a regular routine, refuel promptly after sessions, take at least 1 full rest day \
             per week, and stretch deeply on a regular basis."
        }
    }
}

/// Build the recommendation set for a fitness level and training load
///
/// A high risk level always selects the reduced-load week regardless of VDOT.
#[must_use]
pub fn recommend(vdot: f64, weekly_tss: f64, risk_level: RiskLevel) -> RecommendationSet {
    let week = if risk_level == RiskLevel::High {
        &REDUCED_LOAD_WEEK
    } else if vdot < FOCUS_BASE_VDOT {
        &BEGINNER_WEEK
    } else {
        &STANDARD_WEEK
    };

    RecommendationSet {
        training_focus: training_focus(vdot).to_owned(),
        weekly_structure: week.iter().map(|&session| session.to_owned()).collect(),
        recovery_advice: recovery_advice(risk_level).to_owned(),
        nutrition_tips: NUTRITION_TIPS.to_owned(),
        load_trend: classify_trend(weekly_tss),
    }
}

/// Training advice for a VDOT level, MAF heart rate, and age
#[must_use]
pub fn training_advice(vdot: f64, maf_heart_rate: u32, age: u32) -> String {
    let mut advice = if vdot < BASE_BUILDING_VDOT {
        format!(
            "Build the aerobic base first: keep over 80% of training below your MAF heart rate of \
             {maf_heart_rate} bpm, 3-4 sessions per week, mostly easy running."
        )
    } else if vdot < INTERMEDIATE_VDOT {
        format!(
            "Keep the aerobic base under {maf_heart_rate} bpm while adding tempo and interval work: \
             4-5 sessions per week, 70% easy, 20% tempo, 10% intervals."
        )
    } else {
        "Train like an elite: aerobic base plus structured speed and race-specific work, 6-7 \
         sessions per week in a periodised plan."
            .to_owned()
    };

    if age >= MASTERS_RECOVERY_AGE {
        advice.push_str(
            " Allow longer recovery, add strength training, and reduce high-intensity frequency.",
        );
    } else if age >= MASTERS_BALANCE_AGE {
        advice.push_str(" Balance training intensity and prioritise sleep and nutrition for recovery.");
    }

    advice
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_risk_thresholds() {
        assert_eq!(classify_risk(350.0), RiskLevel::Low);
        assert_eq!(classify_risk(350.1), RiskLevel::Moderate);
        assert_eq!(classify_risk(500.0), RiskLevel::Moderate);
        assert_eq!(classify_risk(500.1), RiskLevel::High);
    }

    #[test]
    fn test_classify_trend_thresholds() {
        assert_eq!(classify_trend(149.9), TrendDirection::Decreasing);
        assert_eq!(classify_trend(150.0), TrendDirection::Stable);
        assert_eq!(classify_trend(300.0), TrendDirection::Stable);
        assert_eq!(classify_trend(300.1), TrendDirection::Increasing);
    }

    #[test]
    fn test_high_risk_overrides_vdot_template() {
        let set = recommend(60.0, 600.0, RiskLevel::High);
        assert_eq!(set.weekly_structure, REDUCED_LOAD_WEEK);
        assert_eq!(set.load_trend, TrendDirection::Increasing);
        assert!(set.recovery_advice.starts_with("Reduce training intensity"));
    }

    #[test]
    fn test_templates_by_vdot() {
        assert_eq!(
            recommend(30.0, 100.0, RiskLevel::Low).weekly_structure,
            BEGINNER_WEEK
        );
        assert_eq!(
            recommend(50.0, 200.0, RiskLevel::Moderate).weekly_structure,
            STANDARD_WEEK
        );
        assert_eq!(recommend(50.0, 200.0, RiskLevel::Low).weekly_structure.len(), 7);
    }

    #[test]
    fn test_focus_bands() {
        assert!(recommend(34.9, 0.0, RiskLevel::Low)
            .training_focus
            .starts_with("Focus on aerobic base"));
        assert!(recommend(44.9, 0.0, RiskLevel::Low)
            .training_focus
            .starts_with("Keep the aerobic base"));
        assert!(recommend(45.0, 0.0, RiskLevel::Low)
            .training_focus
            .starts_with("Add more high-quality"));
    }

    #[test]
    fn test_recommend_is_deterministic() {
        assert_eq!(
            recommend(42.0, 320.0, RiskLevel::Low),
            recommend(42.0, 320.0, RiskLevel::Low)
        );
    }

    #[test]
    fn test_training_advice_age_notes() {
        let young = training_advice(38.0, 150, 30);
        assert!(young.contains("150 bpm"));
        assert!(!young.contains("strength"));

        let forties = training_advice(48.0, 140, 45);
        assert!(forties.contains("70% easy"));
        assert!(forties.ends_with("nutrition for recovery."));

        let fifties = training_advice(60.0, 130, 55);
        assert!(fifties.starts_with("Train like an elite"));
        assert!(fifties.contains("strength training"));
    }
}
