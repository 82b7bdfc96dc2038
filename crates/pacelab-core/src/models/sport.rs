// ABOUTME: Sport type classification for free-text activity type labels
// ABOUTME: Maps provider labels such as "Run" or "TrailRun" onto a small enum
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacelab Contributors

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::AppError;

/// Broad sport classification of an activity type label
///
/// Activity records carry a free-text type label. Analysis code only needs to
/// know whether a session was a run, so labels are folded into this enum.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SportType {
    /// Running, trail running, treadmill, jogging
    Run,
    /// Walking or hiking
    Walk,
    /// Cycling of any kind
    Ride,
    /// Swimming
    Swim,
    /// Anything else
    Other,
}

impl SportType {
    /// Classify a free-text activity type label
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        let normalized = label.trim().to_lowercase();
        if normalized.contains("run")
            || normalized.contains("jog")
            || normalized.contains("treadmill")
        {
            Self::Run
        } else if normalized.contains("walk") || normalized.contains("hike") {
            Self::Walk
        } else if normalized.contains("ride")
            || normalized.contains("cycl")
            || normalized.contains("bik")
        {
            Self::Ride
        } else if normalized.contains("swim") {
            Self::Swim
        } else {
            Self::Other
        }
    }

    /// Get the display name for this sport type
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Run => "run",
            Self::Walk => "walk",
            Self::Ride => "ride",
            Self::Swim => "swim",
            Self::Other => "other",
        }
    }
}

impl FromStr for SportType {
    type Err = AppError;

    /// Parse a sport name as accepted on the command line
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "run" => Ok(Self::Run),
            "walk" => Ok(Self::Walk),
            "ride" => Ok(Self::Ride),
            "swim" => Ok(Self::Swim),
            "other" => Ok(Self::Other),
            other => Err(AppError::invalid_input(format!(
                "unknown sport '{other}', expected run, walk, ride, swim, or other"
            ))),
        }
    }
}

impl fmt::Display for SportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
