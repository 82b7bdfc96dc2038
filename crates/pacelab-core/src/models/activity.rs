// ABOUTME: Activity record models including ActivityRecord, its builder, and ActivitySample
// ABOUTME: Accepts clock-string or raw-second moving times and validates records at the boundary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacelab Contributors

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::SportType;
use crate::constants::activity_defaults::DEFAULT_ACTIVITY_TYPE;
use crate::constants::heart_rate::MAX_PLAUSIBLE_HEART_RATE;
use crate::constants::time_constants::SECONDS_PER_MINUTE_F64;
use crate::constants::units::METERS_PER_KILOMETER;
use crate::errors::{AppError, AppResult};
use crate::time_utils::{parse_clock_to_seconds, parse_start_timestamp};

/// Moving duration as supplied by the caller
///
/// Exports from different tools disagree on the representation, so both a
/// clock string (`H:MM:SS` / `MM:SS`) and a raw second count are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MovingTime {
    /// Raw second count
    Seconds(f64),
    /// Clock string, or a bare numeric string holding seconds
    Clock(String),
}

impl MovingTime {
    /// Total moving time in seconds
    ///
    /// # Errors
    ///
    /// Returns a format error for malformed clock strings and a validation
    /// error for negative or non-finite second counts.
    pub fn to_seconds(&self) -> AppResult<f64> {
        match self {
            Self::Seconds(seconds) => {
                if !seconds.is_finite() || *seconds < 0.0 {
                    return Err(AppError::value_out_of_range(format!(
                        "moving time {seconds} s must be a non-negative number"
                    )));
                }
                Ok(*seconds)
            }
            Self::Clock(text) => parse_clock_to_seconds(text),
        }
    }

    /// Total moving time in minutes
    ///
    /// # Errors
    ///
    /// Same conditions as [`MovingTime::to_seconds`].
    pub fn to_minutes(&self) -> AppResult<f64> {
        Ok(self.to_seconds()? / SECONDS_PER_MINUTE_F64)
    }
}

impl From<f64> for MovingTime {
    fn from(seconds: f64) -> Self {
        Self::Seconds(seconds)
    }
}

impl From<&str> for MovingTime {
    fn from(clock: &str) -> Self {
        Self::Clock(clock.to_owned())
    }
}

/// Represents one completed exercise session supplied by the caller
///
/// Fields are private so records stay immutable once produced - use accessor
/// methods to read and `ActivityRecordBuilder` to construct new instances.
/// The JSON shape matches common activity exports (`start_date`, `distance`,
/// `moving_time`, `average_speed`, `average_heartrate`, `type`).
///
/// # Examples
///
/// ```rust
/// use pacelab_core::models::ActivityRecord;
///
/// let record = ActivityRecord::builder("2024-03-04 07:30:00")
///     .distance_meters(10_000.0)
///     .moving_time("50:00")
///     .average_speed(3.33)
///     .average_heartrate(152)
///     .build();
///
/// assert_eq!(record.distance_meters(), Some(10_000.0));
/// assert!(record.to_sample().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Caller-side identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    /// Timezone-naive local start timestamp
    #[serde(default, alias = "start_date_local")]
    start_date: String,
    /// Distance in meters
    #[serde(default, alias = "distance_meters")]
    distance: Option<f64>,
    /// Moving duration
    #[serde(default)]
    moving_time: Option<MovingTime>,
    /// Average speed in meters per second
    #[serde(default, skip_serializing_if = "Option::is_none")]
    average_speed: Option<f64>,
    /// Average heart rate in beats per minute
    #[serde(
        default,
        alias = "average_heart_rate",
        deserialize_with = "deserialize_heart_rate",
        skip_serializing_if = "Option::is_none"
    )]
    average_heartrate: Option<u32>,
    /// Free-text activity type label
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    activity_type: Option<String>,
    /// Why the export entry could not be read as a record
    #[serde(skip)]
    rejection: Option<String>,
}

/// Heart rates arrive as floats from most exports; round them to whole bpm
fn deserialize_heart_rate<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<f64> = Option::deserialize(deserializer)?;
    Ok(value
        .filter(|bpm| bpm.is_finite() && *bpm > 0.0)
        .map(|bpm| bpm.round() as u32))
}

impl ActivityRecord {
    /// Start building a record with the given start timestamp
    #[must_use]
    pub fn builder(start_date: impl Into<String>) -> ActivityRecordBuilder {
        ActivityRecordBuilder::new(start_date)
    }

    /// Read one entry of an activity export
    ///
    /// Never fails: an entry whose fields have the wrong JSON types becomes a
    /// rejected record that [`ActivityRecord::to_sample`] reports as
    /// `ErrorCode::InvalidData`, so one bad entry cannot sink a whole export.
    #[must_use]
    pub fn from_export_value(value: Value) -> Self {
        let start_date = ["start_date", "start_date_local"]
            .iter()
            .find_map(|key| value.get(key).and_then(Value::as_str))
            .unwrap_or_default()
            .to_owned();
        serde_json::from_value(value).unwrap_or_else(|error| Self {
            rejection: Some(error.to_string()),
            ..ActivityRecordBuilder::new(start_date).build()
        })
    }

    /// Reason the export entry was rejected, if it was
    #[must_use]
    pub fn rejection(&self) -> Option<&str> {
        self.rejection.as_deref()
    }

    /// Caller-side identifier
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Display name
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Raw start timestamp as supplied; also the selection key for single-activity analysis
    #[must_use]
    pub fn start_date(&self) -> &str {
        &self.start_date
    }

    /// Distance in meters
    #[must_use]
    pub const fn distance_meters(&self) -> Option<f64> {
        self.distance
    }

    /// Moving duration as supplied
    #[must_use]
    pub const fn moving_time(&self) -> Option<&MovingTime> {
        self.moving_time.as_ref()
    }

    /// Average speed in meters per second
    #[must_use]
    pub const fn average_speed(&self) -> Option<f64> {
        self.average_speed
    }

    /// Average heart rate in bpm
    #[must_use]
    pub const fn average_heartrate(&self) -> Option<u32> {
        self.average_heartrate
    }

    /// Activity type label, defaulting to "running"
    #[must_use]
    pub fn activity_type(&self) -> &str {
        self.activity_type.as_deref().unwrap_or(DEFAULT_ACTIVITY_TYPE)
    }

    /// Sport classification of the activity type label
    #[must_use]
    pub fn sport_type(&self) -> SportType {
        SportType::from_label(self.activity_type())
    }

    /// Parse the start timestamp
    ///
    /// # Errors
    ///
    /// Returns a format error when the timestamp is empty or unparseable.
    pub fn start_timestamp(&self) -> AppResult<NaiveDateTime> {
        parse_start_timestamp(&self.start_date)
    }

    /// Validate the fields an aggregation needs
    ///
    /// # Errors
    ///
    /// Returns `ErrorCode::InvalidData` when the export entry was rejected,
    /// the start timestamp cannot be parsed, distance / moving time is
    /// missing, negative, or malformed, or the average heart rate is above
    /// [`MAX_PLAUSIBLE_HEART_RATE`]. The underlying format or validation
    /// error is kept as the source.
    pub fn to_sample(&self) -> AppResult<ActivitySample> {
        if let Some(reason) = &self.rejection {
            return Err(AppError::invalid_data(format!(
                "activity at '{}' could not be read: {reason}",
                self.start_date
            )));
        }

        let start = self.start_timestamp().map_err(|e| {
            AppError::invalid_data(format!("unparseable start date '{}'", self.start_date))
                .with_source(e)
        })?;

        let distance_meters = self.distance.ok_or_else(|| {
            AppError::invalid_data(format!(
                "activity at '{}' has no distance",
                self.start_date
            ))
            .with_source(AppError::missing_field("distance"))
        })?;
        if !distance_meters.is_finite() || distance_meters < 0.0 {
            return Err(AppError::invalid_data(format!(
                "activity at '{}' has invalid distance {distance_meters}",
                self.start_date
            )));
        }

        let moving_seconds = self
            .moving_time
            .as_ref()
            .ok_or_else(|| {
                AppError::invalid_data(format!(
                    "activity at '{}' has no moving time",
                    self.start_date
                ))
                .with_source(AppError::missing_field("moving_time"))
            })?
            .to_seconds()
            .map_err(|e| {
                AppError::invalid_data(format!(
                    "activity at '{}' has invalid moving time",
                    self.start_date
                ))
                .with_source(e)
            })?;

        if let Some(bpm) = self
            .average_heartrate
            .filter(|bpm| *bpm > MAX_PLAUSIBLE_HEART_RATE)
        {
            return Err(AppError::invalid_data(format!(
                "activity at '{}' has implausible average heart rate {bpm} bpm",
                self.start_date
            ))
            .with_source(AppError::value_out_of_range(format!(
                "heart rate must be at most {MAX_PLAUSIBLE_HEART_RATE} bpm"
            ))));
        }

        Ok(ActivitySample {
            start,
            distance_meters,
            moving_seconds,
            average_speed: self
                .average_speed
                .filter(|speed| speed.is_finite() && *speed >= 0.0),
            average_heartrate: self.average_heartrate,
            sport_type: self.sport_type(),
        })
    }
}

/// Builder for [`ActivityRecord`]
#[derive(Debug, Clone)]
pub struct ActivityRecordBuilder {
    record: ActivityRecord,
}

impl ActivityRecordBuilder {
    /// Creates a new builder with the start timestamp
    #[must_use]
    pub fn new(start_date: impl Into<String>) -> Self {
        Self {
            record: ActivityRecord {
                id: None,
                name: None,
                start_date: start_date.into(),
                distance: None,
                moving_time: None,
                average_speed: None,
                average_heartrate: None,
                activity_type: None,
                rejection: None,
            },
        }
    }

    /// Sets the caller-side identifier
    #[must_use]
    pub fn id(mut self, value: impl Into<String>) -> Self {
        self.record.id = Some(value.into());
        self
    }

    /// Sets the display name
    #[must_use]
    pub fn name(mut self, value: impl Into<String>) -> Self {
        self.record.name = Some(value.into());
        self
    }

    /// Sets the distance in meters
    #[must_use]
    pub const fn distance_meters(mut self, value: f64) -> Self {
        self.record.distance = Some(value);
        self
    }

    /// Sets the moving time from a clock string or second count
    #[must_use]
    pub fn moving_time(mut self, value: impl Into<MovingTime>) -> Self {
        self.record.moving_time = Some(value.into());
        self
    }

    /// Sets the average speed in meters per second
    #[must_use]
    pub const fn average_speed(mut self, value: f64) -> Self {
        self.record.average_speed = Some(value);
        self
    }

    /// Sets the average heart rate in bpm
    #[must_use]
    pub const fn average_heartrate(mut self, value: u32) -> Self {
        self.record.average_heartrate = Some(value);
        self
    }

    /// Sets the activity type label
    #[must_use]
    pub fn activity_type(mut self, value: impl Into<String>) -> Self {
        self.record.activity_type = Some(value.into());
        self
    }

    /// Builds the record
    #[must_use]
    pub fn build(self) -> ActivityRecord {
        self.record
    }
}

/// An activity whose timestamp, distance, and moving time were validated
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActivitySample {
    /// Parsed start timestamp
    pub start: NaiveDateTime,
    /// Distance in meters (≥ 0)
    pub distance_meters: f64,
    /// Moving time in seconds (≥ 0)
    pub moving_seconds: f64,
    /// Average speed in m/s, when recorded
    pub average_speed: Option<f64>,
    /// Average heart rate in bpm, when recorded
    pub average_heartrate: Option<u32>,
    /// Sport classification of the record's type label
    pub sport_type: SportType,
}

impl ActivitySample {
    /// Distance in kilometers
    #[must_use]
    pub fn distance_km(&self) -> f64 {
        self.distance_meters / METERS_PER_KILOMETER
    }

    /// Moving time in minutes
    #[must_use]
    pub fn moving_minutes(&self) -> f64 {
        self.moving_seconds / SECONDS_PER_MINUTE_F64
    }

    /// Pace from the recorded average speed, in seconds per kilometer
    #[must_use]
    pub fn recorded_pace_seconds(&self) -> Option<f64> {
        self.average_speed
            .filter(|speed| *speed > 0.0)
            .map(|speed| METERS_PER_KILOMETER / speed)
    }

    /// Pace in seconds per kilometer
    ///
    /// Prefers the recorded average speed and falls back to distance over
    /// moving time. `None` when neither yields a positive pace.
    #[must_use]
    pub fn derived_pace_seconds(&self) -> Option<f64> {
        self.recorded_pace_seconds().or_else(|| {
            (self.distance_meters > 0.0 && self.moving_seconds > 0.0)
                .then(|| self.moving_seconds / self.distance_km())
        })
    }
}
