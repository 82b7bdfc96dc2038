// ABOUTME: Fixed thresholds for VDOT tiers, MAF adjustments and zones, TSS tiers, and load risk
// ABOUTME: Values follow Daniels' Running Formula, the Maffetone 180 method, and Coggan TSS bands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacelab Contributors

//! Physiological constants used by the running analysis engine
//!
//! These values are deliberately not configurable: reports stay comparable
//! between users and runs only if tiers and thresholds are fixed.

/// VDOT score bounds and fitness tier thresholds
///
/// References:
/// - Daniels, J. (2013). "Daniels' Running Formula" (3rd ed.). Human Kinetics.
pub mod vdot {
    /// Constant term of the Daniels oxygen cost polynomial
    pub const DANIELS_C: f64 = -4.6;
    /// Linear coefficient (velocity in m/min)
    pub const DANIELS_B: f64 = 0.182_258;
    /// Quadratic coefficient (velocity in m/min)
    pub const DANIELS_A: f64 = 0.000_104;

    /// Lowest reported VDOT
    pub const MIN_VDOT: f64 = 20.0;
    /// Highest reported VDOT
    pub const MAX_VDOT: f64 = 85.0;

    /// Elite tier lower bound
    pub const ELITE_THRESHOLD: f64 = 65.0;
    /// Advanced tier lower bound
    pub const ADVANCED_THRESHOLD: f64 = 55.0;
    /// Good tier lower bound
    pub const GOOD_THRESHOLD: f64 = 45.0;
    /// Moderate tier lower bound
    pub const MODERATE_THRESHOLD: f64 = 35.0;

    /// VDOT assumed when no activity yields an estimate
    pub const DEFAULT_VDOT_ESTIMATE: f64 = 35.0;

    /// Pace bands (seconds per km, exclusive upper bound) for estimating VDOT
    /// from an average training pace when no run qualifies for the formula
    pub const PACE_BAND_ESTIMATES: [(f64, f64); 6] = [
        (240.0, 60.0),
        (270.0, 55.0),
        (300.0, 50.0),
        (330.0, 45.0),
        (360.0, 40.0),
        (420.0, 35.0),
    ];
    /// Estimate for paces of 7:00/km and slower
    pub const SLOWEST_PACE_BAND_ESTIMATE: f64 = 30.0;
}

/// Maximum aerobic function heart rate
///
/// References:
/// - Maffetone, P. (2010). "The Big Book of Endurance Training and Racing". Skyhorse.
pub mod maf {
    /// Base of the 180 formula
    pub const MAF_BASE: i32 = 180;
    /// Lower clamp of the MAF heart rate
    pub const MIN_MAF_HR: i32 = 100;
    /// Upper clamp of the MAF heart rate
    pub const MAX_MAF_HR: i32 = 180;
    /// Youngest accepted age
    pub const MIN_AGE: u32 = 1;
    /// Oldest accepted age
    pub const MAX_AGE: u32 = 100;

    /// Adjustment for major illness, surgery, or medication
    pub const MAJOR_ILLNESS_ADJUSTMENT: i32 = -10;
    /// Adjustment for injury, frequent colds, asthma, or new runners
    pub const MINOR_ISSUES_ADJUSTMENT: i32 = -5;
    /// Adjustment for athletes with two years of injury-free progress
    pub const ELITE_ADJUSTMENT: i32 = 5;
    /// Adjustment for athletes over 65
    pub const SENIOR_ADJUSTMENT: i32 = 10;

    /// Zone bounds as fractions of the MAF heart rate
    pub const ZONE_FRACTIONS: [(f64, f64); 5] =
        [(0.65, 0.75), (0.75, 0.85), (0.85, 1.0), (1.0, 1.1), (1.1, 1.2)];
    /// Width of the recommended training band below the MAF heart rate
    pub const RECOMMENDED_BAND_BPM: u32 = 10;
}

/// Training stress score interpretation
///
/// References:
/// - Coggan, A. & Allen, H. (2010). "Training and Racing with a Power Meter." `VeloPress`.
pub mod tss {
    /// TSS scale factor (one hour at threshold)
    pub const TSS_BASE_MULTIPLIER: f64 = 100.0;
    /// Upper bound of light sessions
    pub const LIGHT_LIMIT: f64 = 50.0;
    /// Upper bound of moderate sessions
    pub const MODERATE_LIMIT: f64 = 100.0;
    /// Upper bound of hard sessions
    pub const HARD_LIMIT: f64 = 200.0;
    /// Lowest heart-rate intensity factor counted
    pub const HR_INTENSITY_FLOOR: f64 = 0.4;
    /// Highest heart-rate intensity factor counted
    pub const HR_INTENSITY_CEILING: f64 = 1.2;
}

/// Weekly training load thresholds
pub mod training_load {
    /// Load window for weekly TSS
    pub const WEEK_WINDOW_DAYS: i64 = 7;
    /// Load window for monthly TSS
    pub const MONTH_WINDOW_DAYS: i64 = 30;
    /// Load window for yearly TSS
    pub const YEAR_WINDOW_DAYS: i64 = 365;

    /// Weekly TSS above which injury risk is high
    pub const HIGH_RISK_WEEKLY_TSS: f64 = 500.0;
    /// Weekly TSS above which injury risk is moderate
    pub const MODERATE_RISK_WEEKLY_TSS: f64 = 350.0;
    /// Weekly TSS above which load is increasing
    pub const INCREASING_TREND_WEEKLY_TSS: f64 = 300.0;
    /// Weekly TSS below which load is decreasing
    pub const DECREASING_TREND_WEEKLY_TSS: f64 = 150.0;

    /// Speed assumed when a record has none (m/s)
    pub const DEFAULT_SPEED_MPS: f64 = 2.5;
    /// Pace faster than this (s/km) scores the high intensity multiplier
    pub const FAST_PACE_SECONDS: f64 = 300.0;
    /// Pace faster than this (s/km) scores the neutral multiplier
    pub const STEADY_PACE_SECONDS: f64 = 360.0;
    /// Multiplier for fast sessions
    pub const FAST_MULTIPLIER: f64 = 1.2;
    /// Multiplier for steady sessions
    pub const STEADY_MULTIPLIER: f64 = 1.0;
    /// Multiplier for easy sessions
    pub const EASY_MULTIPLIER: f64 = 0.8;
}

/// Training advice bands
pub mod advice {
    /// VDOT below which advice focuses on aerobic base
    pub const BASE_BUILDING_VDOT: f64 = 40.0;
    /// VDOT below which advice mixes tempo and intervals
    pub const INTERMEDIATE_VDOT: f64 = 55.0;
    /// Age from which recovery and strength notes apply
    pub const MASTERS_RECOVERY_AGE: u32 = 50;
    /// Age from which balance and sleep notes apply
    pub const MASTERS_BALANCE_AGE: u32 = 40;

    /// VDOT below which recommendations focus on base building
    pub const FOCUS_BASE_VDOT: f64 = 35.0;
    /// VDOT below which recommendations add tempo work
    pub const FOCUS_TEMPO_VDOT: f64 = 45.0;

    /// Pace faster than this fraction of 5K pace is too fast for training
    pub const TOO_FAST_FRACTION: f64 = 0.9;
    /// Pace slower than this fraction of 5K pace counts as easy
    pub const EASY_FRACTION: f64 = 1.3;
}

/// Heart rate zones as fractions of maximum heart rate
pub mod heart_rate_zones {
    /// Lower bound of zone 1
    pub const ZONE_FLOOR_FRACTION: f64 = 0.5;
    /// Upper bounds of zones 1 to 4; zone 5 runs to maximum
    pub const ZONE_UPPER_FRACTIONS: [f64; 4] = [0.6, 0.7, 0.8, 0.9];
}

/// Personal best eligibility
pub mod personal_bests {
    /// Shortest run counted for the fastest pace, in km
    pub const FASTEST_PACE_MIN_KM: f64 = 1.0;
}

/// Profile estimators
pub mod profile {
    /// Age-predicted maximum heart rate base (220 - age)
    pub const AGE_PREDICTED_MAX_HR_BASE: u32 = 220;
    /// Fraction of heart rate reserve at lactate threshold
    pub const LACTATE_THRESHOLD_RESERVE_FRACTION: f64 = 0.85;
    /// Seconds per km added to 5K pace for 10K pace
    pub const TEN_K_OFFSET_SECONDS: f64 = 15.0;
    /// Seconds per km added to 5K pace for half marathon pace
    pub const HALF_MARATHON_OFFSET_SECONDS: f64 = 45.0;
    /// Seconds per km added to 5K pace for marathon pace
    pub const MARATHON_OFFSET_SECONDS: f64 = 90.0;
    /// Seconds per km added to 5K pace for lactate threshold pace
    pub const THRESHOLD_OFFSET_SECONDS: f64 = 25.0;
}
