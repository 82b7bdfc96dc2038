// ABOUTME: Static VDOT reference tables for training paces and equivalent race times
// ABOUTME: Training paces step by 2 VDOT points (30-70), race times step by 5 (30-70)
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacelab Contributors

//! VDOT reference tables
//!
//! Values are taken from Daniels' published tables. Lookups clamp the VDOT
//! into the table range before indexing, so every lookup succeeds.

/// Training paces for one VDOT row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainingPaceRow {
    /// Table key
    pub vdot: u32,
    /// Easy pace per km
    pub easy: &'static str,
    /// Tempo pace per km
    pub tempo: &'static str,
    /// Interval pace per 400 m
    pub interval: &'static str,
    /// Repetition pace per 400 m
    pub repetition: &'static str,
}

/// Equivalent race times in seconds for one VDOT row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RaceTimeRow {
    /// Table key
    pub vdot: u32,
    /// 5K time
    pub five_k: u32,
    /// 10K time
    pub ten_k: u32,
    /// Half marathon time
    pub half_marathon: u32,
    /// Marathon time
    pub marathon: u32,
}

/// Lowest table key
pub const TABLE_MIN_VDOT: f64 = 30.0;
/// Highest table key
pub const TABLE_MAX_VDOT: f64 = 70.0;
/// Spacing of the training pace rows
pub const TRAINING_PACE_STEP: f64 = 2.0;
/// Spacing of the race time rows
pub const RACE_TIME_STEP: f64 = 5.0;

const fn pace_row(
    vdot: u32,
    easy: &'static str,
    tempo: &'static str,
    interval: &'static str,
    repetition: &'static str,
) -> TrainingPaceRow {
    TrainingPaceRow {
        vdot,
        easy,
        tempo,
        interval,
        repetition,
    }
}

const fn race_row(vdot: u32, five_k: u32, ten_k: u32, half_marathon: u32, marathon: u32) -> RaceTimeRow {
    RaceTimeRow {
        vdot,
        five_k,
        ten_k,
        half_marathon,
        marathon,
    }
}

/// Training paces, ordered by VDOT
pub static TRAINING_PACES: [TrainingPaceRow; 21] = [
    pace_row(30, "12:40", "10:18", "2:22", "2:15"),
    pace_row(32, "12:04", "9:47", "2:14", "2:07"),
    pace_row(34, "11:32", "9:20", "2:08", "2:00"),
    pace_row(36, "11:02", "8:55", "2:02", "1:54"),
    pace_row(38, "10:35", "8:33", "1:56", "1:48"),
    pace_row(40, "10:11", "8:12", "1:52", "1:43"),
    pace_row(42, "9:48", "7:52", "1:48", "1:38"),
    pace_row(44, "9:27", "7:33", "1:44", "1:34"),
    pace_row(46, "9:07", "7:17", "1:40", "1:30"),
    pace_row(48, "8:49", "7:02", "1:36", "1:26"),
    pace_row(50, "8:32", "6:51", "1:33", "1:22"),
    pace_row(52, "8:16", "6:38", "1:31", "1:19"),
    pace_row(54, "8:01", "6:26", "1:28", "1:16"),
    pace_row(56, "7:48", "6:15", "1:26", "1:13"),
    pace_row(58, "7:34", "6:04", "1:23", "1:11"),
    pace_row(60, "7:22", "5:54", "1:21", "1:08"),
    pace_row(62, "7:11", "5:45", "1:19", "1:06"),
    pace_row(64, "7:00", "5:36", "1:17", "1:04"),
    pace_row(66, "6:49", "5:28", "1:15", "1:02"),
    pace_row(68, "6:39", "5:20", "1:13", "1:00"),
    pace_row(70, "6:30", "5:13", "1:11", "0:58"),
];

/// Race times, ordered by VDOT
pub static RACE_TIMES: [RaceTimeRow; 9] = [
    race_row(30, 1840, 3826, 8464, 17357),
    race_row(35, 1540, 3200, 7020, 14400),
    race_row(40, 1288, 2683, 5889, 12105),
    race_row(45, 1095, 2282, 5010, 10300),
    race_row(50, 957, 1995, 4375, 9000),
    race_row(55, 852, 1776, 3900, 8025),
    race_row(60, 771, 1607, 3530, 7275),
    race_row(65, 705, 1470, 3225, 6660),
    race_row(70, 651, 1356, 2975, 6150),
];

/// Clamp a VDOT into the table range
#[must_use]
pub fn clamp_to_table(vdot: f64) -> f64 {
    vdot.clamp(TABLE_MIN_VDOT, TABLE_MAX_VDOT)
}

/// Training pace row nearest to `vdot`
#[must_use]
pub fn training_paces_for(vdot: f64) -> &'static TrainingPaceRow {
    let key = (clamp_to_table(vdot) / TRAINING_PACE_STEP).round() * TRAINING_PACE_STEP;
    let index = ((key - TABLE_MIN_VDOT) / TRAINING_PACE_STEP) as usize;
    &TRAINING_PACES[index.min(TRAINING_PACES.len() - 1)]
}

/// Race rows bracketing `vdot` and the interpolation fraction between them
///
/// When the clamped VDOT sits exactly on a row both rows are the same and
/// the fraction is 0.
#[must_use]
pub fn race_rows_for(vdot: f64) -> (&'static RaceTimeRow, &'static RaceTimeRow, f64) {
    let clamped = clamp_to_table(vdot);
    let lower_key = (clamped / RACE_TIME_STEP).floor() * RACE_TIME_STEP;
    let upper_key = (clamped / RACE_TIME_STEP).ceil() * RACE_TIME_STEP;

    let row_at = |key: f64| {
        let index = ((key - TABLE_MIN_VDOT) / RACE_TIME_STEP) as usize;
        &RACE_TIMES[index.min(RACE_TIMES.len() - 1)]
    };

    let fraction = if upper_key > lower_key {
        (clamped - lower_key) / (upper_key - lower_key)
    } else {
        0.0
    };

    (row_at(lower_key), row_at(upper_key), fraction)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_are_ordered_and_spaced() {
        for pair in TRAINING_PACES.windows(2) {
            assert_eq!(pair[1].vdot - pair[0].vdot, 2);
        }
        for pair in RACE_TIMES.windows(2) {
            assert_eq!(pair[1].vdot - pair[0].vdot, 5);
            assert!(pair[1].marathon < pair[0].marathon);
        }
    }

    #[test]
    fn test_training_paces_round_to_nearest_step() {
        assert_eq!(training_paces_for(36.0).vdot, 36);
        assert_eq!(training_paces_for(36.9).vdot, 36);
        assert_eq!(training_paces_for(37.0).vdot, 38);
        assert_eq!(training_paces_for(20.0).vdot, 30);
        assert_eq!(training_paces_for(85.0).vdot, 70);
    }

    #[test]
    fn test_race_rows_bracket_value() {
        let (lower, upper, fraction) = race_rows_for(36.0);
        assert_eq!((lower.vdot, upper.vdot), (35, 40));
        assert!((fraction - 0.2).abs() < 1e-9);

        let (lower, upper, fraction) = race_rows_for(50.0);
        assert_eq!((lower.vdot, upper.vdot), (50, 50));
        assert!(fraction.abs() < f64::EPSILON);

        let (lower, upper, _) = race_rows_for(84.0);
        assert_eq!((lower.vdot, upper.vdot), (70, 70));
    }
}
