// ABOUTME: Input helpers for pacelab-cli
// ABOUTME: Loads profile JSON files and resolves the analysis end timestamp
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacelab Contributors

use std::fs;
use std::path::Path;

use chrono::{Local, NaiveDateTime};
use pacelab_core::errors::{AppError, AppResult};
use pacelab_core::models::UserProfile;
use pacelab_core::time_utils::parse_start_timestamp;
use tracing::warn;

/// Read a profile JSON file
///
/// Out-of-range values are logged and kept; the analysis drops whatever
/// output depends on them.
pub fn load_profile(path: &Path) -> AppResult<UserProfile> {
    let text = fs::read_to_string(path).map_err(|error| {
        AppError::invalid_input(format!("cannot read profile {}", path.display()))
            .with_source(error)
    })?;
    let profile: UserProfile = serde_json::from_str(&text)?;
    if let Err(error) = profile.validate() {
        warn!(path = %path.display(), %error, "profile has out-of-range values");
    }
    Ok(profile)
}

/// Parse `--now`, defaulting to the local wall-clock time
pub fn resolve_now(now: Option<&str>) -> AppResult<NaiveDateTime> {
    now.map_or_else(|| Ok(Local::now().naive_local()), parse_start_timestamp)
}
