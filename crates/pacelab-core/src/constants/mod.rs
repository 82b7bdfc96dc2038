// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Unit conversions, standard race distances, and activity defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacelab Contributors

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single
//! large list.

/// Time unit conversions
pub mod time_constants {
    /// Seconds in one minute
    pub const SECONDS_PER_MINUTE: u32 = 60;
    /// Seconds in one hour
    pub const SECONDS_PER_HOUR: u32 = 3600;
    /// Seconds in one minute as f64
    pub const SECONDS_PER_MINUTE_F64: f64 = 60.0;
    /// Seconds in one hour as f64
    pub const SECONDS_PER_HOUR_F64: f64 = 3600.0;
    /// Minutes in one hour as f64
    pub const MINUTES_PER_HOUR_F64: f64 = 60.0;
}

/// Distance unit conversions
pub mod units {
    /// Meters in one kilometer
    pub const METERS_PER_KILOMETER: f64 = 1000.0;
}

/// Standard race distances in kilometers
pub mod race_distances {
    /// 5K
    pub const FIVE_K_KM: f64 = 5.0;
    /// 10K
    pub const TEN_K_KM: f64 = 10.0;
    /// Half marathon as listed in the race tables
    pub const HALF_MARATHON_KM: f64 = 21.1;
    /// Marathon as listed in the race tables
    pub const MARATHON_KM: f64 = 42.2;
}

/// Activity record defaults
pub mod activity_defaults {
    /// Label applied when a record carries no activity type
    pub const DEFAULT_ACTIVITY_TYPE: &str = "running";
}

/// Heart rate bounds applied to recorded data
pub mod heart_rate {
    /// Highest average heart rate accepted from an activity record, in bpm
    pub const MAX_PLAUSIBLE_HEART_RATE: u32 = 300;
    /// Maximum heart rate assumed when a profile gives neither max HR nor age
    pub const DEFAULT_MAX_HEART_RATE: u32 = 190;
}
