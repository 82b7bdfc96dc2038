// ABOUTME: Shared fixtures for Pacelab integration tests
// ABOUTME: Builds activity records and profiles anchored at a fixed "now"
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacelab Contributors
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared fixtures for integration tests

use chrono::{Duration, NaiveDateTime};
use pacelab::models::{ActivityRecord, UserProfile};
use pacelab::time_utils::parse_start_timestamp;
use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("warn")
            .with_test_writer()
            .try_init();
    });
}

/// Fixed end of every analysis window
pub fn now() -> NaiveDateTime {
    parse_start_timestamp("2024-06-30 20:00:00").unwrap()
}

/// A run starting `days_ago` days before [`now`] at a steady pace
pub fn run(days_ago: i64, km: f64, pace_seconds: f64) -> ActivityRecord {
    let start = now() - Duration::days(days_ago) - Duration::hours(12);
    let meters = km * 1000.0;
    let seconds = (km * pace_seconds).round();
    ActivityRecord::builder(start.format("%Y-%m-%d %H:%M:%S").to_string())
        .distance_meters(meters)
        .moving_time(seconds)
        .average_speed(meters / seconds)
        .average_heartrate(148)
        .build()
}

/// Two months of runs every other day, alternating 8 km and 12 km
pub fn training_block() -> Vec<ActivityRecord> {
    (0..30)
        .map(|index| {
            let km = if index % 2 == 0 { 8.0 } else { 12.0 };
            run(index * 2, km, 300.0 + f64::from(index as u32 % 4) * 10.0)
        })
        .collect()
}

/// Profile of a 42-year-old runner with a 4:40/km 5K pace
pub fn profile() -> UserProfile {
    UserProfile {
        age: Some(42),
        resting_heart_rate: Some(52),
        five_k_pace: Some("4:40".to_owned()),
        lactate_threshold_pace: Some("5:05".to_owned()),
        ..UserProfile::default()
    }
}
