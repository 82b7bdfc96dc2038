// ABOUTME: Benchmark fixtures generating realistic running activity exports
// ABOUTME: Deterministic data anchored at a fixed date for reproducible measurements
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacelab Contributors

//! Benchmark fixtures.
//!
//! Activities go backwards from [`anchor`] every other day, with distance,
//! duration, and heart rate varied by index so buckets differ in content.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use pacelab::models::ActivityRecord;

/// Predefined batch sizes for benchmark scenarios
#[derive(Debug, Clone, Copy)]
pub enum ActivityBatchSize {
    /// 10 activities
    Small,
    /// 100 activities, a typical season
    Medium,
    /// 500 activities, several years of history
    Large,
}

impl ActivityBatchSize {
    #[must_use]
    pub const fn count(self) -> usize {
        match self {
            Self::Small => 10,
            Self::Medium => 100,
            Self::Large => 500,
        }
    }
}

/// Fixed "now" of every benchmark
#[must_use]
pub fn anchor() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 30)
        .and_then(|date| date.and_hms_opt(20, 0, 0))
        .unwrap_or_default()
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_possible_wrap
)]
fn generate_activity(index: usize) -> ActivityRecord {
    let distance_meters = 5000.0 + ((index * 251) % 10_000) as f64;
    // 4:30 to 6:30 per km
    let pace_seconds = 270.0 + ((index * 37) % 120) as f64;
    let moving_seconds = (distance_meters / 1000.0 * pace_seconds).round();
    let start = anchor() - Duration::days((index * 2) as i64) - Duration::hours(12);

    ActivityRecord::builder(start.format("%Y-%m-%d %H:%M:%S").to_string())
        .id(format!("bench_activity_{index}"))
        .name(format!("Benchmark Run {index}"))
        .distance_meters(distance_meters)
        .moving_time(moving_seconds)
        .average_speed(distance_meters / moving_seconds)
        .average_heartrate(130 + ((index * 17) % 40) as u32)
        .activity_type("running")
        .build()
}

/// Generate a batch of activities
#[must_use]
pub fn generate_activities(size: ActivityBatchSize) -> Vec<ActivityRecord> {
    (0..size.count()).map(generate_activity).collect()
}
