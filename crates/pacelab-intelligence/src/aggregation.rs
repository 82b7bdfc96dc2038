// ABOUTME: Groups activity records into single, weekly, or monthly buckets with per-bucket statistics
// ABOUTME: Invalid records are skipped and reported; bucket TSS uses the caller's threshold pace
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacelab Contributors

//! Activity Aggregator
//!
//! Records are validated with [`ActivityRecord::to_sample`]. A record that
//! fails validation never aborts the report: it is logged at `warn` and
//! listed in [`BucketAggregation::skipped`].
//!
//! Buckets are keyed by sortable strings (`YYYY-MM-DD HH:MM:SS`, Monday
//! `YYYY-MM-DD`, or `YYYY-MM`), returned most recent first, and truncated to
//! the limit after sorting.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use pacelab_core::errors::{AppError, AppResult, ErrorCode};
use pacelab_core::models::{ActivityRecord, ActivitySample, PaceBenchmark, SportType, UserProfile};
use pacelab_core::time_utils::{
    format_pace, format_seconds_to_clock, month_bucket_key, parse_start_timestamp, week_bucket_key,
    week_start,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::algorithms::{compute_tss, compute_vdot, VdotResult};
use crate::config::{AggregationConfig, PerformanceConfig};
use crate::physiological_constants::advice::{EASY_FRACTION, TOO_FAST_FRACTION};

/// Layout of single-activity bucket keys
const SINGLE_KEY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Time window used to group activities
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    /// One bucket per activity start timestamp
    Single,
    /// ISO week starting Monday
    Week,
    /// Calendar month
    Month,
}

impl Granularity {
    /// Bucket key for a start timestamp
    #[must_use]
    pub fn bucket_key(self, start: &NaiveDateTime) -> String {
        match self {
            Self::Single => start.format(SINGLE_KEY_FORMAT).to_string(),
            Self::Week => week_bucket_key(start.date()),
            Self::Month => month_bucket_key(start.date()),
        }
    }

    /// Stable lowercase name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Week => "week",
            Self::Month => "month",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "single" | "activity" => Ok(Self::Single),
            "week" | "weekly" => Ok(Self::Week),
            "month" | "monthly" => Ok(Self::Month),
            other => Err(AppError::invalid_input(format!(
                "unknown granularity '{other}', expected single, week, or month"
            ))),
        }
    }
}

/// Display summary of one activity inside a bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberActivity {
    /// Caller-side identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Start timestamp as supplied
    pub start_date: String,
    /// Distance in km
    pub distance_km: f64,
    /// Moving time as `H:MM:SS` or `M:SS`
    pub moving_time: String,
    /// Pace per km as `M:SS`, when derivable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pace: Option<String>,
    /// Average heart rate in bpm
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_heartrate: Option<u32>,
}

/// Rolled-up statistics of one time bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeBucketSummary {
    /// Sortable bucket key
    pub key: String,
    /// Display label
    pub label: String,
    /// Granularity that produced the bucket
    pub granularity: Granularity,
    /// Number of activities in the bucket
    pub activity_count: usize,
    /// Total distance in km
    pub total_distance_km: f64,
    /// Average pace in seconds per km, 0 when no member recorded a speed
    pub avg_pace_seconds: f64,
    /// Average pace as `M:SS`, absent when no member recorded a speed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_pace: Option<String>,
    /// Mean heart rate of members with a heart rate, 0 when none
    pub avg_heart_rate: u32,
    /// Sum of per-activity TSS, 0 without a threshold pace
    pub total_tss: f64,
    /// Longest single activity in km
    pub longest_distance_km: f64,
    /// Total distance divided by distinct weeks touched (monthly buckets only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekly_average_km: Option<f64>,
    /// Most recent member activities, capped for display
    pub activities: Vec<MemberActivity>,
}

/// A record left out of an aggregation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRecord {
    /// Position in the input slice
    pub index: usize,
    /// Start timestamp as supplied
    pub start_date: String,
    /// Error code, normally `INVALID_DATA`
    pub code: ErrorCode,
    /// Why the record was skipped
    pub reason: String,
}

impl SkippedRecord {
    fn new(index: usize, record: &ActivityRecord, error: &AppError) -> Self {
        let reason = error.source.as_ref().map_or_else(
            || error.message.clone(),
            |source| format!("{}: {source}", error.message),
        );
        Self {
            index,
            start_date: record.start_date().to_owned(),
            code: error.code,
            reason,
        }
    }
}

/// Buckets plus the records that could not be bucketed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BucketAggregation {
    /// Buckets, most recent first
    pub buckets: Vec<TimeBucketSummary>,
    /// Records skipped because of data errors
    pub skipped: Vec<SkippedRecord>,
    /// Sport the buckets were restricted to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sport: Option<SportType>,
    /// Valid records left out by the sport restriction
    #[serde(default)]
    pub filtered_out: usize,
}

/// Qualitative pace classification relative to 5K pace
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PaceCategory {
    /// Faster than 90% of 5K pace
    TooFast,
    /// Between 90% and 130% of 5K pace
    Moderate,
    /// Slower than 130% of 5K pace
    Easy,
}

impl PaceCategory {
    /// Classify a pace against a 5K pace, both in seconds per km
    #[must_use]
    pub fn classify(pace_seconds: f64, five_k_pace_seconds: f64) -> Self {
        if pace_seconds < five_k_pace_seconds * TOO_FAST_FRACTION {
            Self::TooFast
        } else if pace_seconds > five_k_pace_seconds * EASY_FRACTION {
            Self::Easy
        } else {
            Self::Moderate
        }
    }

    /// Guidance text
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::TooFast => "Pace is on the fast side; control intensity to avoid overtraining",
            Self::Moderate => "Moderate pace, consistent with a medium-intensity session",
            Self::Easy => "Easy pace, suited to recovery and aerobic base building",
        }
    }
}

/// Pace guidance for one activity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaceRecommendation {
    /// Pace category
    pub category: PaceCategory,
    /// Guidance text
    pub message: String,
}

/// Detailed analysis of one selected activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleActivityAnalysis {
    /// Start timestamp as supplied
    pub start_date: String,
    /// Display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Distance in km
    pub distance_km: f64,
    /// Moving time in seconds
    pub duration_seconds: f64,
    /// Moving time as `H:MM:SS` or `M:SS`
    pub duration: String,
    /// Pace in seconds per km, when derivable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pace_seconds: Option<f64>,
    /// Pace as `M:SS`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pace: Option<String>,
    /// Average heart rate in bpm
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_heartrate: Option<u32>,
    /// VDOT analysis, only for runs of at least the minimum distance
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vdot: Option<VdotResult>,
    /// Pace guidance relative to the profile's 5K pace
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pace_recommendation: Option<PaceRecommendation>,
}

/// An input record together with its validated sample
#[derive(Debug, Clone, Copy)]
pub struct ValidatedActivity<'a> {
    /// Record as supplied
    pub record: &'a ActivityRecord,
    /// Validated numeric view of the record
    pub sample: ActivitySample,
}

impl ValidatedActivity<'_> {
    /// Display summary of the activity
    #[must_use]
    pub fn to_member(&self) -> MemberActivity {
        MemberActivity {
            id: self.record.id().map(str::to_owned),
            name: self.record.name().map(str::to_owned),
            start_date: self.record.start_date().to_owned(),
            distance_km: self.sample.distance_km(),
            moving_time: format_seconds_to_clock(self.sample.moving_seconds).unwrap_or_default(),
            pace: self.sample.derived_pace_seconds().map(format_pace),
            average_heartrate: self.sample.average_heartrate,
        }
    }
}

/// Validate every record, splitting usable activities from skipped ones
///
/// Skipped records are logged at `warn`. Input order is preserved on both
/// sides.
#[must_use]
pub fn partition_records(
    activities: &[ActivityRecord],
) -> (Vec<ValidatedActivity<'_>>, Vec<SkippedRecord>) {
    let mut valid = Vec::with_capacity(activities.len());
    let mut skipped = Vec::new();

    for (index, record) in activities.iter().enumerate() {
        match record.to_sample() {
            Ok(sample) => valid.push(ValidatedActivity { record, sample }),
            Err(error) => {
                warn!(
                    index,
                    start_date = record.start_date(),
                    %error,
                    "skipping activity record"
                );
                skipped.push(SkippedRecord::new(index, record, &error));
            }
        }
    }

    (valid, skipped)
}

/// Training stress of one activity against a threshold pace
///
/// Zero when the activity has no derivable pace or no moving time.
pub(crate) fn activity_tss(sample: &ActivitySample, threshold_pace_seconds: f64) -> f64 {
    let Some(pace) = sample.derived_pace_seconds() else {
        return 0.0;
    };
    match compute_tss(sample.moving_minutes(), pace, threshold_pace_seconds) {
        Ok(result) => result.tss,
        Err(error) => {
            debug!(start = %sample.start, %error, "activity contributes no TSS");
            0.0
        }
    }
}

/// Rounded mean of heart rates, `None` for an empty input
pub(crate) fn mean_heart_rate(heart_rates: impl Iterator<Item = u32>) -> Option<u32> {
    let (total, count) = heart_rates.fold((0.0, 0_u32), |(total, count), bpm| {
        (total + f64::from(bpm), count + 1)
    });
    (count > 0).then(|| (total / f64::from(count)).round() as u32)
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Groups activities into time buckets
///
/// # Example
///
/// ```rust
/// use pacelab_core::models::ActivityRecord;
/// use pacelab_intelligence::aggregation::{ActivityAggregator, Granularity};
/// use pacelab_intelligence::config::AggregationConfig;
///
/// let activities = vec![
///     ActivityRecord::builder("2024-03-04 07:00:00")
///         .distance_meters(8000.0)
///         .moving_time("40:00")
///         .average_speed(3.33)
///         .build(),
///     ActivityRecord::builder("2024-03-06 07:00:00")
///         .distance_meters(5000.0)
///         .moving_time("25:00")
///         .build(),
/// ];
///
/// let aggregator = ActivityAggregator::new(AggregationConfig::default());
/// let report = aggregator.aggregate(&activities, Granularity::Week, None, Some(270.0));
/// assert_eq!(report.buckets.len(), 1);
/// assert_eq!(report.buckets[0].key, "2024-03-04");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ActivityAggregator {
    config: AggregationConfig,
    sport: Option<SportType>,
}

impl ActivityAggregator {
    /// Create an aggregator with the given limits
    #[must_use]
    pub const fn new(config: AggregationConfig) -> Self {
        Self {
            config,
            sport: None,
        }
    }

    /// Only bucket activities of one sport
    ///
    /// Valid records of other sports are left out of every bucket and counted
    /// in [`BucketAggregation::filtered_out`]; they are not skipped records.
    #[must_use]
    pub const fn with_sport(mut self, sport: SportType) -> Self {
        self.sport = Some(sport);
        self
    }

    /// Limits in use
    #[must_use]
    pub const fn config(&self) -> &AggregationConfig {
        &self.config
    }

    /// Aggregate activities, reporting skipped records
    ///
    /// `limit` overrides the configured bucket limit for the granularity.
    /// Without a `threshold_pace_seconds` every bucket's TSS is zero.
    #[must_use]
    pub fn aggregate(
        &self,
        activities: &[ActivityRecord],
        granularity: Granularity,
        limit: Option<usize>,
        threshold_pace_seconds: Option<f64>,
    ) -> BucketAggregation {
        let (valid, skipped) = partition_records(activities);
        let valid_count = valid.len();
        let mut groups: BTreeMap<String, Vec<ValidatedActivity<'_>>> = BTreeMap::new();
        let mut occurrences: BTreeMap<String, usize> = BTreeMap::new();
        for activity in valid
            .into_iter()
            .filter(|activity| self.sport.is_none() || self.sport == Some(activity.sample.sport_type))
        {
            let mut key = granularity.bucket_key(&activity.sample.start);
            if granularity == Granularity::Single {
                // activities sharing a start timestamp still get a bucket each
                let seen = occurrences.entry(key.clone()).or_default();
                *seen += 1;
                if *seen > 1 {
                    key = format!("{key}#{seen}");
                }
            }
            groups.entry(key).or_default().push(activity);
        }
        let filtered_out = valid_count - groups.values().map(Vec::len).sum::<usize>();

        let threshold = threshold_pace_seconds.filter(|pace| pace.is_finite() && *pace > 0.0);
        let limit = limit.unwrap_or_else(|| self.config.limit_for(granularity));
        let buckets: Vec<TimeBucketSummary> = groups
            .into_iter()
            .rev()
            .take(limit)
            .map(|(key, members)| self.summarize(granularity, key, members, threshold))
            .collect();

        debug!(
            %granularity,
            records = activities.len(),
            buckets = buckets.len(),
            skipped = skipped.len(),
            "aggregated activities"
        );

        BucketAggregation {
            buckets,
            skipped,
            sport: self.sport,
            filtered_out,
        }
    }

    fn summarize(
        &self,
        granularity: Granularity,
        key: String,
        mut members: Vec<ValidatedActivity<'_>>,
        threshold_pace_seconds: Option<f64>,
    ) -> TimeBucketSummary {
        let total_distance_km: f64 = members.iter().map(|m| m.sample.distance_km()).sum();
        let longest_distance_km = members
            .iter()
            .map(|m| m.sample.distance_km())
            .fold(0.0, f64::max);

        let speeds: Vec<f64> = members
            .iter()
            .filter_map(|m| m.sample.average_speed)
            .filter(|speed| *speed > 0.0)
            .collect();
        let avg_pace_seconds = if speeds.is_empty() {
            0.0
        } else {
            1000.0 / (speeds.iter().sum::<f64>() / speeds.len() as f64)
        };

        let avg_heart_rate =
            mean_heart_rate(members.iter().filter_map(|m| m.sample.average_heartrate)).unwrap_or(0);

        let total_tss = threshold_pace_seconds.map_or(0.0, |threshold| {
            round_tenth(
                members
                    .iter()
                    .map(|m| activity_tss(&m.sample, threshold))
                    .sum(),
            )
        });

        let weekly_average_km = (granularity == Granularity::Month).then(|| {
            let weeks: BTreeSet<_> = members
                .iter()
                .map(|m| week_start(m.sample.start.date()))
                .collect();
            total_distance_km / weeks.len().max(1) as f64
        });

        members.sort_by(|a, b| b.sample.start.cmp(&a.sample.start));
        let activities = members
            .iter()
            .take(self.config.member_display_limit)
            .map(ValidatedActivity::to_member)
            .collect();

        TimeBucketSummary {
            label: bucket_label(granularity, &key, &members),
            key,
            granularity,
            activity_count: members.len(),
            total_distance_km,
            avg_pace_seconds,
            avg_pace: (avg_pace_seconds > 0.0).then(|| format_pace(avg_pace_seconds)),
            avg_heart_rate,
            total_tss,
            longest_distance_km,
            weekly_average_km,
            activities,
        }
    }
}

fn bucket_label(granularity: Granularity, key: &str, members: &[ValidatedActivity<'_>]) -> String {
    let Some(first) = members.first() else {
        return key.to_owned();
    };
    match granularity {
        Granularity::Week => format!("Week of {key}"),
        Granularity::Month => first.sample.start.format("%B %Y").to_string(),
        Granularity::Single => first.record.name().map_or_else(
            || format!("Activity on {}", first.sample.start.format("%Y-%m-%d %H:%M")),
            str::to_owned,
        ),
    }
}

/// Aggregate with default limits, returning only the buckets
#[must_use]
pub fn aggregate_by_bucket(
    activities: &[ActivityRecord],
    granularity: Granularity,
    limit: Option<usize>,
    threshold_pace_seconds: Option<f64>,
) -> Vec<TimeBucketSummary> {
    aggregate_with_report(activities, granularity, limit, threshold_pace_seconds).buckets
}

/// Aggregate with default limits, returning buckets and skipped records
#[must_use]
pub fn aggregate_with_report(
    activities: &[ActivityRecord],
    granularity: Granularity,
    limit: Option<usize>,
    threshold_pace_seconds: Option<f64>,
) -> BucketAggregation {
    ActivityAggregator::default().aggregate(activities, granularity, limit, threshold_pace_seconds)
}

/// Whether `key` selects `record`
///
/// Matches the raw start date string, or the normalized timestamp when both
/// parse.
fn matches_key(record: &ActivityRecord, key: &str, normalized_key: Option<&NaiveDateTime>) -> bool {
    if record.start_date().trim() == key.trim() {
        return true;
    }
    normalized_key.is_some_and(|wanted| {
        record
            .start_timestamp()
            .is_ok_and(|start| start == *wanted)
    })
}

/// Analyze the activity whose start timestamp matches `key`
///
/// # Errors
///
/// Returns `ErrorCode::InvalidInput` when no activity matches and
/// `ErrorCode::InvalidData` when the matching record lacks the fields an
/// analysis needs.
pub fn analyze_single_activity(
    activities: &[ActivityRecord],
    key: &str,
    profile: Option<&UserProfile>,
) -> AppResult<SingleActivityAnalysis> {
    analyze_single_activity_with(activities, key, profile, &PerformanceConfig::default())
}

/// [`analyze_single_activity`] with explicit settings
///
/// # Errors
///
/// Same conditions as [`analyze_single_activity`].
pub fn analyze_single_activity_with(
    activities: &[ActivityRecord],
    key: &str,
    profile: Option<&UserProfile>,
    config: &PerformanceConfig,
) -> AppResult<SingleActivityAnalysis> {
    let normalized_key = parse_start_timestamp(key).ok();
    let record = activities
        .iter()
        .find(|record| matches_key(record, key, normalized_key.as_ref()))
        .ok_or_else(|| AppError::invalid_input(format!("no activity starts at '{key}'")))?;
    let sample = record.to_sample()?;

    let distance_km = sample.distance_km();
    let pace_seconds = sample.derived_pace_seconds();

    let vdot = if distance_km >= config.min_vdot_distance_km && sample.moving_seconds > 0.0 {
        Some(compute_vdot(distance_km, sample.moving_seconds)?)
    } else {
        None
    };

    let pace_recommendation = pace_seconds.and_then(|pace| {
        let five_k = profile.and_then(|profile| match profile.pace_seconds(PaceBenchmark::FiveK) {
            Ok(value) => value,
            Err(error) => {
                warn!(%error, "ignoring malformed 5K pace in profile");
                None
            }
        })?;
        let category = PaceCategory::classify(pace, five_k);
        Some(PaceRecommendation {
            category,
            message: category.message().to_owned(),
        })
    });

    Ok(SingleActivityAnalysis {
        start_date: record.start_date().to_owned(),
        name: record.name().map(str::to_owned),
        distance_km,
        duration_seconds: sample.moving_seconds,
        duration: format_seconds_to_clock(sample.moving_seconds)?,
        pace_seconds,
        pace: pace_seconds.map(format_pace),
        average_heartrate: sample.average_heartrate,
        vdot,
        pace_recommendation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(start: &str, meters: f64, moving: &str, speed: Option<f64>, hr: Option<u32>) -> ActivityRecord {
        let mut builder = ActivityRecord::builder(start)
            .distance_meters(meters)
            .moving_time(moving);
        if let Some(speed) = speed {
            builder = builder.average_speed(speed);
        }
        if let Some(hr) = hr {
            builder = builder.average_heartrate(hr);
        }
        builder.build()
    }

    #[test]
    fn test_empty_input_yields_no_buckets() {
        assert!(aggregate_by_bucket(&[], Granularity::Week, None, None).is_empty());
        assert!(aggregate_by_bucket(&[], Granularity::Month, None, Some(270.0)).is_empty());
    }

    #[test]
    fn test_weekly_statistics() {
        let activities = vec![
            run("2024-03-04 07:00:00", 10_000.0, "50:00", Some(4.0), Some(150)),
            run("2024-03-06 07:00:00", 5_000.0, "25:00", Some(2.0), None),
            run("2024-03-10 18:00:00", 2_000.0, "12:00", None, Some(141)),
        ];

        let buckets = aggregate_by_bucket(&activities, Granularity::Week, None, None);
        assert_eq!(buckets.len(), 1);

        let week = &buckets[0];
        assert_eq!(week.key, "2024-03-04");
        assert_eq!(week.label, "Week of 2024-03-04");
        assert_eq!(week.activity_count, 3);
        assert!((week.total_distance_km - 17.0).abs() < 1e-9);
        assert!((week.longest_distance_km - 10.0).abs() < 1e-9);
        // mean speed 3.0 m/s
        assert!((week.avg_pace_seconds - 1000.0 / 3.0).abs() < 1e-9);
        assert_eq!(week.avg_pace.as_deref(), Some("5:33"));
        assert_eq!(week.avg_heart_rate, 146);
        assert!(week.total_tss.abs() < f64::EPSILON);
        assert_eq!(week.weekly_average_km, None);
        assert_eq!(week.activities[0].start_date, "2024-03-10 18:00:00");
    }

    #[test]
    fn test_bucket_without_speed_or_heart_rate_reports_zero() {
        let activities = vec![run("2024-03-04 07:00:00", 5_000.0, "30:00", None, None)];
        let week = &aggregate_by_bucket(&activities, Granularity::Week, None, None)[0];

        assert!(week.avg_pace_seconds.abs() < f64::EPSILON);
        assert_eq!(week.avg_pace, None);
        assert_eq!(week.avg_heart_rate, 0);
    }

    #[test]
    fn test_bucket_tss_uses_each_activity_pace() {
        let activities = vec![
            // 300 s/km for an hour against 270 s/km threshold: 81.0
            run("2024-03-04 07:00:00", 12_000.0, "1:00:00", None, None),
            // 270 s/km for 30 minutes: 50.0
            run("2024-03-05 07:00:00", 6_000.0, "30:00", Some(1000.0 / 270.0), None),
        ];

        let week = &aggregate_by_bucket(&activities, Granularity::Week, None, Some(270.0))[0];
        assert!((week.total_tss - 131.0).abs() < 1e-9);
    }

    #[test]
    fn test_skipped_records_are_reported() {
        let activities = vec![
            run("2024-03-04 07:00:00", 5_000.0, "25:00", None, None),
            run("not a date", 5_000.0, "25:00", None, None),
            ActivityRecord::builder("2024-03-05 07:00:00").distance_meters(3000.0).build(),
        ];

        let report = aggregate_with_report(&activities, Granularity::Week, None, None);
        assert_eq!(report.buckets[0].activity_count, 1);
        assert_eq!(report.skipped.len(), 2);
        assert_eq!(report.skipped[0].index, 1);
        assert_eq!(report.skipped[0].code, ErrorCode::InvalidData);
        assert!(report.skipped[1].reason.contains("moving time"));
    }

    #[test]
    fn test_buckets_sorted_recent_first_then_truncated() {
        let activities: Vec<ActivityRecord> = (1..=9)
            .map(|month| run(&format!("2024-0{month}-15 07:00:00"), 5_000.0, "25:00", None, None))
            .collect();

        let buckets = aggregate_by_bucket(&activities, Granularity::Month, None, None);
        let keys: Vec<&str> = buckets.iter().map(|b| b.key.as_str()).collect();
        assert_eq!(
            keys,
            ["2024-09", "2024-08", "2024-07", "2024-06", "2024-05", "2024-04"]
        );

        let two = aggregate_by_bucket(&activities, Granularity::Month, Some(2), None);
        assert_eq!(two.len(), 2);
        assert_eq!(two[0].key, "2024-09");
    }

    #[test]
    fn test_monthly_weekly_average_counts_distinct_weeks() {
        let activities = vec![
            run("2024-05-01 07:00:00", 10_000.0, "50:00", None, None),
            run("2024-05-02 07:00:00", 10_000.0, "50:00", None, None),
            run("2024-05-20 07:00:00", 10_000.0, "50:00", None, None),
        ];

        let month = &aggregate_by_bucket(&activities, Granularity::Month, None, None)[0];
        assert_eq!(month.label, "May 2024");
        assert!((month.weekly_average_km.unwrap() - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_granularity_one_bucket_per_activity() {
        let activities = vec![
            run("2024-03-04T07:00:00", 5_000.0, "25:00", None, None),
            run("2024-03-04 18:30:00", 8_000.0, "40:00", None, None),
        ];

        let buckets = aggregate_by_bucket(&activities, Granularity::Single, None, None);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].key, "2024-03-04 18:30:00");
        assert_eq!(buckets[1].key, "2024-03-04 07:00:00");
    }

    #[test]
    fn test_single_granularity_keeps_shared_timestamps_apart() {
        let activities = vec![
            run("2024-03-04 07:00:00", 5_000.0, "25:00", None, None),
            run("2024-03-04 07:00:00", 3_000.0, "18:00", None, None),
            run("2024-03-03 07:00:00", 8_000.0, "40:00", None, None),
        ];

        let buckets = aggregate_by_bucket(&activities, Granularity::Single, None, None);
        let keys: Vec<&str> = buckets.iter().map(|bucket| bucket.key.as_str()).collect();
        assert_eq!(
            keys,
            ["2024-03-04 07:00:00#2", "2024-03-04 07:00:00", "2024-03-03 07:00:00"]
        );
        assert!(buckets.iter().all(|bucket| bucket.activity_count == 1));
        assert!((buckets[0].total_distance_km - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_sport_filter_keeps_rides_out_of_run_buckets() {
        let ride = ActivityRecord::builder("2024-03-05 07:00:00")
            .distance_meters(40_000.0)
            .moving_time("1:20:00")
            .average_speed(8.33)
            .activity_type("Ride")
            .build();
        let activities = vec![
            run("2024-03-04 07:00:00", 10_000.0, "50:00", Some(10.0 / 3.0), None),
            ride,
        ];

        let mixed = ActivityAggregator::default().aggregate(&activities, Granularity::Week, None, None);
        assert_eq!(mixed.buckets[0].activity_count, 2);

        let runs = ActivityAggregator::default()
            .with_sport(SportType::Run)
            .aggregate(&activities, Granularity::Week, None, None);
        assert_eq!(runs.sport, Some(SportType::Run));
        assert_eq!(runs.filtered_out, 1);
        assert!(runs.skipped.is_empty());
        assert_eq!(runs.buckets[0].activity_count, 1);
        assert_eq!(runs.buckets[0].avg_pace.as_deref(), Some("5:00"));
    }

    #[test]
    fn test_huge_heart_rates_are_skipped_not_summed() {
        let json = r#"[
            {"start_date": "2024-03-04 07:00:00", "distance": 5000, "moving_time": 1500, "average_heartrate": 3000000000},
            {"start_date": "2024-03-05 07:00:00", "distance": 5000, "moving_time": 1500, "average_heartrate": 3000000000},
            {"start_date": "2024-03-06 07:00:00", "distance": 5000, "moving_time": 1500, "average_heartrate": 150}
        ]"#;
        let activities: Vec<ActivityRecord> = serde_json::from_str(json).unwrap();

        let report = aggregate_with_report(&activities, Granularity::Week, None, None);
        assert_eq!(report.skipped.len(), 2);
        assert_eq!(report.buckets[0].avg_heart_rate, 150);
    }

    #[test]
    fn test_mean_heart_rate_does_not_overflow() {
        assert_eq!(mean_heart_rate([u32::MAX, u32::MAX].into_iter()), Some(u32::MAX));
        assert_eq!(mean_heart_rate([140, 151].into_iter()), Some(146));
        assert_eq!(mean_heart_rate(Vec::new().into_iter()), None);
    }

    #[test]
    fn test_member_list_is_capped_but_counts_everything() {
        let activities: Vec<ActivityRecord> = (0..14)
            .map(|hour| run(&format!("2024-03-05 {hour:02}:00:00"), 1_000.0, "6:00", None, None))
            .collect();

        let week = &aggregate_by_bucket(&activities, Granularity::Week, None, None)[0];
        assert_eq!(week.activity_count, 14);
        assert_eq!(week.activities.len(), 10);
        assert!((week.total_distance_km - 14.0).abs() < 1e-9);
    }

    #[test]
    fn test_granularity_from_str() {
        assert_eq!("Weekly".parse::<Granularity>().unwrap(), Granularity::Week);
        assert_eq!("month".parse::<Granularity>().unwrap(), Granularity::Month);
        assert!("fortnight".parse::<Granularity>().unwrap_err().is_validation());
    }

    #[test]
    fn test_single_activity_analysis() {
        let activities = vec![
            run("2024-03-04 07:00:00", 5_000.0, "25:00", Some(10.0 / 3.0), Some(160)),
            run("2024-03-06 07:00:00", 2_000.0, "14:00", None, None),
        ];
        let profile = UserProfile {
            five_k_pace: Some("4:30".to_owned()),
            ..UserProfile::default()
        };

        let analysis =
            analyze_single_activity(&activities, "2024-03-04T07:00:00", Some(&profile)).unwrap();
        assert_eq!(analysis.pace.as_deref(), Some("5:00"));
        assert_eq!(analysis.duration, "25:00");
        assert!((analysis.vdot.as_ref().unwrap().vdot - 36.0).abs() < f64::EPSILON);
        let guidance = analysis.pace_recommendation.unwrap();
        assert_eq!(guidance.category, PaceCategory::Moderate);

        let short = analyze_single_activity(&activities, "2024-03-06 07:00:00", None).unwrap();
        assert!(short.vdot.is_none());
        assert!(short.pace_recommendation.is_none());
        assert_eq!(short.pace.as_deref(), Some("7:00"));
    }

    #[test]
    fn test_single_activity_unknown_key() {
        let activities = vec![run("2024-03-04 07:00:00", 5_000.0, "25:00", None, None)];
        let error = analyze_single_activity(&activities, "2024-03-05", None).unwrap_err();
        assert_eq!(error.code, ErrorCode::InvalidInput);
    }

    #[test]
    fn test_pace_category_boundaries() {
        assert_eq!(PaceCategory::classify(240.0, 270.0), PaceCategory::TooFast);
        assert_eq!(PaceCategory::classify(243.0, 270.0), PaceCategory::Moderate);
        assert_eq!(PaceCategory::classify(351.0, 270.0), PaceCategory::Moderate);
        assert_eq!(PaceCategory::classify(352.0, 270.0), PaceCategory::Easy);
    }
}
