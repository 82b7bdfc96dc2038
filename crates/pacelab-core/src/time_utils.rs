// ABOUTME: Duration and pace string parsing, clock formatting, and calendar bucket keys
// ABOUTME: Separate seconds/minutes parsers keep the unit of bare numbers explicit
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacelab Contributors

//! Time utilities
//!
//! Clock strings (`H:MM:SS`, `M:SS`) are converted by total conversion: every
//! segment is multiplied by its unit and summed. Minute or second segments of
//! 60 or more are accepted as-is (`"1:75"` is 135 seconds) rather than
//! rejected or clamped.
//!
//! A bare number carries no unit, so the caller picks the parser:
//! [`parse_clock_to_seconds`] reads it as seconds and [`parse_clock_to_minutes`]
//! reads it as minutes.

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveDateTime};

use crate::constants::time_constants::{SECONDS_PER_HOUR, SECONDS_PER_MINUTE, SECONDS_PER_MINUTE_F64};
use crate::errors::{AppError, AppResult};

/// Naive timestamp layouts accepted for activity start dates
const NAIVE_TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Offset-carrying layout used by some exports (`2024-03-04 07:30:00+08:00`)
const OFFSET_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f%:z";

/// Unit of a bare numeric duration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BareUnit {
    Seconds,
    Minutes,
}

/// Parse a non-negative, finite numeric segment
fn parse_segment(segment: &str, input: &str) -> AppResult<f64> {
    let trimmed = segment.trim();
    let value: f64 = trimmed.parse().map_err(|_| {
        AppError::invalid_format(format!("cannot parse duration '{input}': '{trimmed}' is not a number"))
    })?;
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::invalid_format(format!(
            "cannot parse duration '{input}': segments must be non-negative"
        )));
    }
    Ok(value)
}

fn parse_duration(input: &str, bare_unit: BareUnit) -> AppResult<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AppError::invalid_format("duration string is empty"));
    }

    let segments: Vec<&str> = trimmed.split(':').collect();
    let seconds = match segments.as_slice() {
        [bare] => {
            let value = parse_segment(bare, input)?;
            match bare_unit {
                BareUnit::Seconds => value,
                BareUnit::Minutes => value * SECONDS_PER_MINUTE_F64,
            }
        }
        [minutes, seconds] => {
            let minutes = parse_segment(minutes, input)?;
            let seconds = parse_segment(seconds, input)?;
            minutes.mul_add(SECONDS_PER_MINUTE_F64, seconds)
        }
        [hours, minutes, seconds] => {
            let hours = parse_segment(hours, input)?;
            let minutes = parse_segment(minutes, input)?;
            let seconds = parse_segment(seconds, input)?;
            hours.mul_add(f64::from(SECONDS_PER_HOUR), minutes * SECONDS_PER_MINUTE_F64) + seconds
        }
        _ => {
            return Err(AppError::invalid_format(format!(
                "cannot parse duration '{input}': expected H:MM:SS, M:SS, or a number"
            )))
        }
    };

    Ok(seconds)
}

/// Parse a duration or pace string into seconds
///
/// Accepts `H:MM:SS`, `M:SS`, or a bare number of seconds.
///
/// # Errors
///
/// Returns `ErrorCode::InvalidFormat` for empty, non-numeric, negative, or
/// wrongly segmented input.
///
/// # Example
///
/// ```rust
/// use pacelab_core::time_utils::parse_clock_to_seconds;
///
/// assert_eq!(parse_clock_to_seconds("1:02:03").unwrap(), 3723.0);
/// assert_eq!(parse_clock_to_seconds("4:30").unwrap(), 270.0);
/// assert_eq!(parse_clock_to_seconds("90").unwrap(), 90.0);
/// ```
pub fn parse_clock_to_seconds(input: &str) -> AppResult<f64> {
    parse_duration(input, BareUnit::Seconds)
}

/// Parse a duration string into minutes
///
/// Accepts `H:MM:SS`, `M:SS`, or a bare number of minutes.
///
/// # Errors
///
/// Same conditions as [`parse_clock_to_seconds`].
pub fn parse_clock_to_minutes(input: &str) -> AppResult<f64> {
    Ok(parse_duration(input, BareUnit::Minutes)? / SECONDS_PER_MINUTE_F64)
}

/// Split whole seconds into `(hours, minutes, seconds)`
const fn split_clock(total: u64) -> (u64, u64, u64) {
    let hours = total / SECONDS_PER_HOUR as u64;
    let minutes = (total % SECONDS_PER_HOUR as u64) / SECONDS_PER_MINUTE as u64;
    let seconds = total % SECONDS_PER_MINUTE as u64;
    (hours, minutes, seconds)
}

/// Format seconds as `H:MM:SS` (one hour or more) or `M:SS`
///
/// Fractional seconds are rounded to the nearest whole second first.
///
/// # Errors
///
/// Returns a validation error for negative or non-finite input.
///
/// # Example
///
/// ```rust
/// use pacelab_core::time_utils::format_seconds_to_clock;
///
/// assert_eq!(format_seconds_to_clock(1540.0).unwrap(), "25:40");
/// assert_eq!(format_seconds_to_clock(7020.0).unwrap(), "1:57:00");
/// ```
pub fn format_seconds_to_clock(seconds: f64) -> AppResult<String> {
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(AppError::value_out_of_range(format!(
            "cannot format {seconds} seconds: value must be a non-negative number"
        )));
    }

    let (hours, minutes, secs) = split_clock(seconds.round() as u64);
    if hours > 0 {
        Ok(format!("{hours}:{minutes:02}:{secs:02}"))
    } else {
        Ok(format!("{minutes}:{secs:02}"))
    }
}

/// Format a pace in seconds per kilometer as `M:SS`
///
/// Unlike [`format_seconds_to_clock`] this never switches to an hour field,
/// and non-positive or non-finite paces format as `0:00`.
#[must_use]
pub fn format_pace(seconds_per_km: f64) -> String {
    if !seconds_per_km.is_finite() || seconds_per_km <= 0.0 {
        return "0:00".to_owned();
    }
    let total = seconds_per_km.round() as u64;
    format!(
        "{}:{:02}",
        total / u64::from(SECONDS_PER_MINUTE),
        total % u64::from(SECONDS_PER_MINUTE)
    )
}

/// ISO date (`YYYY-MM-DD`) of the Monday on or before `date`
#[must_use]
pub fn week_bucket_key(date: NaiveDate) -> String {
    week_start(date).format("%Y-%m-%d").to_string()
}

/// Monday on or before `date`
#[must_use]
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(offset)).unwrap_or(date)
}

/// Calendar month key (`YYYY-MM`)
#[must_use]
pub fn month_bucket_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Parse an activity start timestamp
///
/// Accepts `YYYY-MM-DD HH:MM:SS`, the `T`-separated form, optional fractional
/// seconds, RFC 3339 (the offset is dropped and the local wall-clock time
/// kept), and bare `YYYY-MM-DD` dates (midnight).
///
/// # Errors
///
/// Returns `ErrorCode::InvalidFormat` when no layout matches.
pub fn parse_start_timestamp(text: &str) -> AppResult<NaiveDateTime> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(AppError::invalid_format("start timestamp is empty"));
    }

    for format in NAIVE_TIMESTAMP_FORMATS {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(timestamp);
        }
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(timestamp.naive_local());
    }
    if let Ok(timestamp) = DateTime::parse_from_str(trimmed, OFFSET_TIMESTAMP_FORMAT) {
        return Ok(timestamp.naive_local());
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| AppError::invalid_format(format!("cannot parse start timestamp '{trimmed}'")))
}
