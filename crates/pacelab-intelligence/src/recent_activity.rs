// ABOUTME: Summary of activities in the 30 days up to "now": counts, distances, and the latest sessions
// ABOUTME: Activities after "now" are excluded; the listed sessions are most recent first
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacelab Contributors

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::aggregation::{MemberActivity, ValidatedActivity};
use crate::physiological_constants::training_load::MONTH_WINDOW_DAYS;

/// Activity volume in the recent window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentActivitySummary {
    /// Window length in days
    pub window_days: i64,
    /// Activities in the window
    pub total_runs: usize,
    /// Total distance in km
    pub total_distance_km: f64,
    /// Mean distance per activity in km, 0 when empty
    pub avg_distance_km: f64,
    /// Longest activity in km
    pub longest_distance_km: f64,
    /// Most recent activities, capped for display
    pub activities: Vec<MemberActivity>,
}

/// Summarize activities from `now - 30 days` through `now`
#[must_use]
pub fn summarize_recent_activities(
    activities: &[ValidatedActivity<'_>],
    now: NaiveDateTime,
    display_limit: usize,
) -> RecentActivitySummary {
    let window_start = now - Duration::days(MONTH_WINDOW_DAYS);
    let mut recent: Vec<&ValidatedActivity<'_>> = activities
        .iter()
        .filter(|a| a.sample.start >= window_start && a.sample.start <= now)
        .collect();
    recent.sort_by(|a, b| b.sample.start.cmp(&a.sample.start));

    let total_distance_km: f64 = recent.iter().map(|a| a.sample.distance_km()).sum();
    let total_runs = recent.len();

    RecentActivitySummary {
        window_days: MONTH_WINDOW_DAYS,
        total_runs,
        total_distance_km,
        avg_distance_km: if total_runs == 0 {
            0.0
        } else {
            total_distance_km / total_runs as f64
        },
        longest_distance_km: recent
            .iter()
            .map(|a| a.sample.distance_km())
            .fold(0.0, f64::max),
        activities: recent
            .iter()
            .take(display_limit)
            .map(|a| a.to_member())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::partition_records;
    use pacelab_core::models::ActivityRecord;
    use pacelab_core::time_utils::parse_start_timestamp;

    #[test]
    fn test_window_and_ordering() {
        let records = vec![
            ActivityRecord::builder("2024-06-01 07:00:00")
                .distance_meters(10_000.0)
                .moving_time("50:00")
                .build(),
            ActivityRecord::builder("2024-06-20 07:00:00")
                .distance_meters(6_000.0)
                .moving_time("30:00")
                .build(),
            ActivityRecord::builder("2024-04-01 07:00:00")
                .distance_meters(21_100.0)
                .moving_time("1:50:00")
                .build(),
            ActivityRecord::builder("2024-07-02 07:00:00")
                .distance_meters(5_000.0)
                .moving_time("25:00")
                .build(),
        ];
        let (valid, skipped) = partition_records(&records);
        assert!(skipped.is_empty());

        let now = parse_start_timestamp("2024-06-30 12:00:00").unwrap();
        let summary = summarize_recent_activities(&valid, now, 10);

        assert_eq!(summary.total_runs, 2);
        assert!((summary.total_distance_km - 16.0).abs() < 1e-9);
        assert!((summary.avg_distance_km - 8.0).abs() < 1e-9);
        assert!((summary.longest_distance_km - 10.0).abs() < 1e-9);
        assert_eq!(summary.activities[0].start_date, "2024-06-20 07:00:00");
    }

    #[test]
    fn test_empty_window() {
        let now = parse_start_timestamp("2024-06-30").unwrap();
        let summary = summarize_recent_activities(&[], now, 10);

        assert_eq!(summary.total_runs, 0);
        assert!(summary.avg_distance_km.abs() < f64::EPSILON);
        assert!(summary.activities.is_empty());
    }
}
