// ABOUTME: Whole-history statistics: personal bests, per-sport breakdown, and heart rate zone counts
// ABOUTME: Works on validated activities; zones use the profile's max heart rate or an estimate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacelab Contributors

//! Activity statistics
//!
//! Every function here takes the validated activities of one collection and
//! is independent of "now". Callers decide which activities to pass.

use std::cmp::Reverse;
use std::iter;

use pacelab_core::constants::heart_rate::DEFAULT_MAX_HEART_RATE;
use pacelab_core::models::{ActivitySample, SportType, UserProfile};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregation::ValidatedActivity;
use crate::physiological_constants::heart_rate_zones::{ZONE_FLOOR_FRACTION, ZONE_UPPER_FRACTIONS};
use crate::physiological_constants::personal_bests::FASTEST_PACE_MIN_KM;
use crate::profile_estimates::estimate_max_heart_rate;

/// Sports in reporting order
const SPORTS: [SportType; 5] = [
    SportType::Run,
    SportType::Walk,
    SportType::Ride,
    SportType::Swim,
    SportType::Other,
];

/// One record-setting activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalBest {
    /// Value of the record in the unit of its category
    pub value: f64,
    /// Start timestamp of the activity as supplied
    pub start_date: String,
    /// Activity name, when supplied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Best single activities across the collection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonalBests {
    /// Longest distance in km
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longest_distance_km: Option<PersonalBest>,
    /// Longest moving time in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longest_moving_seconds: Option<PersonalBest>,
    /// Highest recorded average speed in m/s
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highest_speed_mps: Option<PersonalBest>,
    /// Fastest run pace in seconds per km, runs over 1 km only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fastest_pace_seconds: Option<PersonalBest>,
}

/// Totals and averages for one sport
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SportStatistics {
    /// Sport classification
    pub sport: SportType,
    /// Activities of this sport
    pub activity_count: usize,
    /// Total distance in km, two decimals
    pub total_distance_km: f64,
    /// Total moving time in seconds
    pub total_moving_seconds: f64,
    /// Mean distance per activity in km, two decimals
    pub avg_distance_km: f64,
    /// Mean moving time per activity in whole seconds
    pub avg_moving_seconds: f64,
    /// Share of all activities, one decimal
    pub share_percent: f64,
}

/// Where the maximum heart rate behind the zones came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MaxHeartRateSource {
    /// Entered in the profile
    Profile,
    /// 220 minus the profile's age
    AgeEstimate,
    /// Fixed fallback of 190 bpm
    Default,
}

/// Activity count of one heart rate zone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeartRateZoneCount {
    /// Zone number, 1 to 5
    pub zone: u8,
    /// Nominal lower bound in bpm
    pub min_bpm: u32,
    /// Nominal upper bound in bpm
    pub max_bpm: u32,
    /// Activities whose average heart rate falls in the zone
    pub activity_count: usize,
    /// Share of activities with a heart rate, one decimal
    pub share_percent: f64,
}

/// Distribution of activity average heart rates over five zones
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeartRateZoneDistribution {
    /// Maximum heart rate the zones are derived from
    pub max_heart_rate: u32,
    /// Origin of `max_heart_rate`
    pub max_heart_rate_source: MaxHeartRateSource,
    /// Activities that recorded an average heart rate
    pub activities_with_heart_rate: usize,
    /// Zones 1 to 5 in order
    pub zones: Vec<HeartRateZoneCount>,
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10_f64.powi(places);
    (value * factor).round() / factor
}

fn share_percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        round_to(count as f64 / total as f64 * 100.0, 1)
    }
}

/// Activity with the best value, earliest start on ties
fn pick_best(
    activities: &[ValidatedActivity<'_>],
    value: impl Fn(&ActivitySample) -> Option<f64>,
    prefer_lower: bool,
) -> Option<PersonalBest> {
    let mut best: Option<(&ValidatedActivity<'_>, f64)> = None;

    for activity in activities {
        let Some(candidate) = value(&activity.sample).filter(|v| v.is_finite()) else {
            continue;
        };
        let replace = match best {
            None => true,
            Some((current, current_value)) => {
                let improves = if prefer_lower {
                    candidate < current_value
                } else {
                    candidate > current_value
                };
                improves
                    || ((candidate - current_value).abs() < f64::EPSILON
                        && activity.sample.start < current.sample.start)
            }
        };
        if replace {
            best = Some((activity, candidate));
        }
    }

    best.map(|(activity, value)| PersonalBest {
        value,
        start_date: activity.record.start_date().to_owned(),
        name: activity.record.name().map(str::to_owned),
    })
}

/// Longest, longest-running, fastest, and best-paced activities
///
/// The fastest pace is moving time over distance and only counts runs longer
/// than 1 km. Zero values never set a record.
#[must_use]
pub fn personal_bests(activities: &[ValidatedActivity<'_>]) -> PersonalBests {
    PersonalBests {
        longest_distance_km: pick_best(
            activities,
            |sample| Some(sample.distance_km()).filter(|km| *km > 0.0),
            false,
        ),
        longest_moving_seconds: pick_best(
            activities,
            |sample| Some(sample.moving_seconds).filter(|seconds| *seconds > 0.0),
            false,
        ),
        highest_speed_mps: pick_best(
            activities,
            |sample| sample.average_speed.filter(|speed| *speed > 0.0),
            false,
        ),
        fastest_pace_seconds: pick_best(
            activities,
            |sample| {
                (sample.sport_type == SportType::Run
                    && sample.distance_km() > FASTEST_PACE_MIN_KM
                    && sample.moving_seconds > 0.0)
                    .then(|| sample.moving_seconds / sample.distance_km())
            },
            true,
        ),
    }
}

/// Per-sport totals, most frequent sport first
///
/// Sports without activities are omitted. Ties keep the order run, walk,
/// ride, swim, other.
#[must_use]
pub fn sport_breakdown(activities: &[ValidatedActivity<'_>]) -> Vec<SportStatistics> {
    let total = activities.len();
    let mut breakdown: Vec<SportStatistics> = SPORTS
        .iter()
        .filter_map(|sport| {
            let (count, distance_km, moving_seconds) = activities
                .iter()
                .filter(|activity| activity.sample.sport_type == *sport)
                .fold((0_usize, 0.0, 0.0), |(count, km, seconds), activity| {
                    (
                        count + 1,
                        km + activity.sample.distance_km(),
                        seconds + activity.sample.moving_seconds,
                    )
                });
            (count > 0).then(|| SportStatistics {
                sport: *sport,
                activity_count: count,
                total_distance_km: round_to(distance_km, 2),
                total_moving_seconds: moving_seconds,
                avg_distance_km: round_to(distance_km / count as f64, 2),
                avg_moving_seconds: (moving_seconds / count as f64).round(),
                share_percent: share_percent(count, total),
            })
        })
        .collect();
    breakdown.sort_by_key(|stats| Reverse(stats.activity_count));
    breakdown
}

/// Maximum heart rate for zone boundaries
///
/// Uses the profile value, then 220 minus age, then 190 bpm.
#[must_use]
pub fn resolve_max_heart_rate(profile: Option<&UserProfile>) -> (u32, MaxHeartRateSource) {
    if let Some(max_hr) = profile
        .and_then(|profile| profile.max_heart_rate)
        .filter(|bpm| *bpm > 0)
    {
        return (max_hr, MaxHeartRateSource::Profile);
    }
    profile
        .and_then(|profile| profile.age)
        .and_then(|age| estimate_max_heart_rate(age).ok())
        .map_or(
            (DEFAULT_MAX_HEART_RATE, MaxHeartRateSource::Default),
            |max_hr| (max_hr, MaxHeartRateSource::AgeEstimate),
        )
}

/// Zone of an average heart rate, 0-based
///
/// Below 50% of max counts as zone 1; above max counts as zone 5.
fn zone_index(bpm: u32, max_heart_rate: u32) -> usize {
    let fraction = f64::from(bpm) / f64::from(max_heart_rate);
    ZONE_UPPER_FRACTIONS
        .iter()
        .position(|upper| fraction < *upper)
        .unwrap_or(ZONE_UPPER_FRACTIONS.len())
}

/// Count activities per heart rate zone
///
/// Zones are 50-60, 60-70, 70-80, 80-90, and 90-100 percent of the maximum
/// heart rate resolved by [`resolve_max_heart_rate`]. Activities without an
/// average heart rate are not counted.
#[must_use]
pub fn heart_rate_zone_distribution(
    activities: &[ValidatedActivity<'_>],
    profile: Option<&UserProfile>,
) -> HeartRateZoneDistribution {
    let (max_heart_rate, max_heart_rate_source) = resolve_max_heart_rate(profile);
    let mut counts = [0_usize; ZONE_UPPER_FRACTIONS.len() + 1];

    for bpm in activities
        .iter()
        .filter_map(|activity| activity.sample.average_heartrate)
        .filter(|bpm| *bpm > 0)
    {
        counts[zone_index(bpm, max_heart_rate)] += 1;
    }
    let activities_with_heart_rate = counts.iter().sum();

    let max = f64::from(max_heart_rate);
    let lower_fractions = iter::once(ZONE_FLOOR_FRACTION).chain(ZONE_UPPER_FRACTIONS);
    let upper_fractions = ZONE_UPPER_FRACTIONS.into_iter().chain(iter::once(1.0));
    let zones = lower_fractions
        .zip(upper_fractions)
        .zip(counts)
        .zip(1_u8..)
        .map(|(((lower, upper), activity_count), zone)| HeartRateZoneCount {
            zone,
            min_bpm: (max * lower).round() as u32,
            max_bpm: (max * upper).round() as u32,
            activity_count,
            share_percent: share_percent(activity_count, activities_with_heart_rate),
        })
        .collect();

    debug!(
        max_heart_rate,
        ?max_heart_rate_source,
        activities_with_heart_rate,
        "counted heart rate zones"
    );

    HeartRateZoneDistribution {
        max_heart_rate,
        max_heart_rate_source,
        activities_with_heart_rate,
        zones,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::partition_records;
    use pacelab_core::models::ActivityRecord;

    fn records() -> Vec<ActivityRecord> {
        vec![
            ActivityRecord::builder("2024-05-01 07:00:00")
                .name("Tempo")
                .distance_meters(10_000.0)
                .moving_time("45:00")
                .average_speed(3.7)
                .average_heartrate(165)
                .build(),
            ActivityRecord::builder("2024-05-03 07:00:00")
                .name("Long run")
                .distance_meters(21_100.0)
                .moving_time("1:55:00")
                .average_speed(3.06)
                .average_heartrate(145)
                .build(),
            ActivityRecord::builder("2024-05-04 09:00:00")
                .name("Strides")
                .distance_meters(800.0)
                .moving_time("2:40")
                .average_speed(5.0)
                .build(),
            ActivityRecord::builder("2024-05-05 09:00:00")
                .name("Commute")
                .activity_type("Ride")
                .distance_meters(30_000.0)
                .moving_time("1:00:00")
                .average_speed(8.33)
                .average_heartrate(120)
                .build(),
        ]
    }

    #[test]
    fn test_personal_bests() {
        let records = records();
        let (valid, _) = partition_records(&records);
        let bests = personal_bests(&valid);

        let longest = bests.longest_distance_km.unwrap();
        assert!((longest.value - 30.0).abs() < 1e-9);
        assert_eq!(longest.name.as_deref(), Some("Commute"));

        let longest_time = bests.longest_moving_seconds.unwrap();
        assert_eq!(longest_time.name.as_deref(), Some("Long run"));

        let speed = bests.highest_speed_mps.unwrap();
        assert_eq!(speed.name.as_deref(), Some("Commute"));

        // strides are under 1 km and the ride is not a run
        let pace = bests.fastest_pace_seconds.unwrap();
        assert_eq!(pace.start_date, "2024-05-01 07:00:00");
        assert!((pace.value - 270.0).abs() < 1e-9);
    }

    #[test]
    fn test_personal_best_ties_keep_earliest() {
        let records = vec![
            ActivityRecord::builder("2024-05-02 07:00:00")
                .name("Later")
                .distance_meters(5_000.0)
                .moving_time("25:00")
                .build(),
            ActivityRecord::builder("2024-05-01 07:00:00")
                .name("Earlier")
                .distance_meters(5_000.0)
                .moving_time("25:00")
                .build(),
        ];
        let (valid, _) = partition_records(&records);

        let bests = personal_bests(&valid);
        assert_eq!(bests.longest_distance_km.unwrap().name.as_deref(), Some("Earlier"));
        assert!(bests.highest_speed_mps.is_none());
    }

    #[test]
    fn test_sport_breakdown() {
        let records = records();
        let (valid, _) = partition_records(&records);
        let breakdown = sport_breakdown(&valid);

        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].sport, SportType::Run);
        assert_eq!(breakdown[0].activity_count, 3);
        assert!((breakdown[0].total_distance_km - 31.9).abs() < 1e-9);
        assert!((breakdown[0].avg_distance_km - 10.63).abs() < 1e-9);
        assert!((breakdown[0].share_percent - 75.0).abs() < 1e-9);
        assert_eq!(breakdown[1].sport, SportType::Ride);
        assert!((breakdown[1].avg_moving_seconds - 3600.0).abs() < 1e-9);
        assert!((breakdown[1].share_percent - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_sport_breakdown_of_nothing_is_empty() {
        assert!(sport_breakdown(&[]).is_empty());
    }

    #[test]
    fn test_max_heart_rate_resolution() {
        assert_eq!(
            resolve_max_heart_rate(None),
            (DEFAULT_MAX_HEART_RATE, MaxHeartRateSource::Default)
        );

        let aged = UserProfile {
            age: Some(40),
            ..UserProfile::default()
        };
        assert_eq!(
            resolve_max_heart_rate(Some(&aged)),
            (180, MaxHeartRateSource::AgeEstimate)
        );

        let entered = UserProfile {
            age: Some(40),
            max_heart_rate: Some(192),
            ..UserProfile::default()
        };
        assert_eq!(
            resolve_max_heart_rate(Some(&entered)),
            (192, MaxHeartRateSource::Profile)
        );
    }

    #[test]
    fn test_zone_distribution() {
        let records = records();
        let (valid, _) = partition_records(&records);
        let profile = UserProfile {
            max_heart_rate: Some(200),
            ..UserProfile::default()
        };

        let distribution = heart_rate_zone_distribution(&valid, Some(&profile));

        assert_eq!(distribution.max_heart_rate, 200);
        assert_eq!(distribution.activities_with_heart_rate, 3);
        assert_eq!(distribution.zones.len(), 5);
        // 120 is 60% and opens zone 2; 145 is zone 3; 165 is zone 4
        let counts: Vec<usize> = distribution.zones.iter().map(|z| z.activity_count).collect();
        assert_eq!(counts, vec![0, 1, 1, 1, 0]);
        assert_eq!(distribution.zones[0].min_bpm, 100);
        assert_eq!(distribution.zones[4].max_bpm, 200);
        assert!((distribution.zones[1].share_percent - 33.3).abs() < 1e-9);
    }

    #[test]
    fn test_zone_edges() {
        assert_eq!(zone_index(80, 190), 0);
        assert_eq!(zone_index(113, 190), 0);
        assert_eq!(zone_index(171, 190), 4);
        assert_eq!(zone_index(210, 190), 4);
    }
}
