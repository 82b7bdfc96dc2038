// ABOUTME: Activity sources feeding the analysis pipeline: in-memory collections and JSON exports
// ABOUTME: Loading failures surface as DATA_SOURCE_UNAVAILABLE errors carrying the underlying cause
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacelab Contributors

//! # Activity Sources
//!
//! The analysis pipeline never reads files or talks to services itself. It
//! asks an [`ActivitySource`] for the full activity collection and works on
//! the returned records.
//!
//! A JSON export may be either a bare array of activities or an object with
//! an `activities` array:
//!
//! ```json
//! [{"start_date_local": "2024-03-04 07:30:00", "distance": 10000, "moving_time": "50:00"}]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use pacelab_core::errors::{AppError, AppResult};
use pacelab_core::models::ActivityRecord;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

/// Provider of the activity collection to analyze
pub trait ActivitySource: Send + Sync {
    /// Short name used in logs and error messages
    fn name(&self) -> &str;

    /// Load every activity the source holds
    ///
    /// # Errors
    ///
    /// Returns `ErrorCode::DataSourceUnavailable` when the collection cannot
    /// be obtained.
    fn load_activities(&self) -> AppResult<Vec<ActivityRecord>>;
}

/// Activities held in memory
///
/// # Example
///
/// ```rust
/// use pacelab::sources::{ActivitySource, InMemorySource};
/// use pacelab_core::models::ActivityRecord;
///
/// let source = InMemorySource::new(vec![ActivityRecord::builder("2024-03-04").build()]);
/// assert_eq!(source.load_activities().unwrap().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    activities: Vec<ActivityRecord>,
}

impl InMemorySource {
    /// Wrap a collection of records
    #[must_use]
    pub const fn new(activities: Vec<ActivityRecord>) -> Self {
        Self { activities }
    }

    /// Number of held records
    #[must_use]
    pub fn len(&self) -> usize {
        self.activities.len()
    }

    /// Whether the source holds no records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }
}

impl ActivitySource for InMemorySource {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn load_activities(&self) -> AppResult<Vec<ActivityRecord>> {
        Ok(self.activities.clone())
    }
}

/// Export layout; entries stay raw so each is read on its own
#[derive(Deserialize)]
#[serde(untagged)]
enum ActivityExport {
    List(Vec<Value>),
    Wrapped { activities: Vec<Value> },
}

impl ActivityExport {
    fn into_records(self) -> Vec<ActivityRecord> {
        match self {
            Self::List(entries) | Self::Wrapped { activities: entries } => entries
                .into_iter()
                .map(ActivityRecord::from_export_value)
                .collect(),
        }
    }
}

/// Activities read from a JSON export on disk
///
/// The file is read on every call to [`ActivitySource::load_activities`].
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    /// Source backed by the file at `path`
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the export
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse an export held in memory
    ///
    /// Entries with wrongly typed fields are kept as rejected records and
    /// later skipped as `ErrorCode::InvalidData`.
    ///
    /// # Errors
    ///
    /// Returns a serialization error when the text is not JSON, or is neither
    /// an array nor an object with an `activities` array.
    pub fn parse(text: &str) -> AppResult<Vec<ActivityRecord>> {
        let export: ActivityExport = serde_json::from_str(text)?;
        let records = export.into_records();
        let rejected = records.iter().filter(|r| r.rejection().is_some()).count();
        if rejected > 0 {
            warn!(rejected, total = records.len(), "export contains unreadable entries");
        }
        Ok(records)
    }
}

impl ActivitySource for JsonFileSource {
    fn name(&self) -> &'static str {
        "json_file"
    }

    fn load_activities(&self) -> AppResult<Vec<ActivityRecord>> {
        let shown = self.path.display();
        let text = fs::read_to_string(&self.path).map_err(|error| {
            AppError::data_source(format!("cannot read activity export {shown}")).with_source(error)
        })?;
        let activities = Self::parse(&text).map_err(|error| {
            AppError::data_source(format!("activity export {shown} is not valid JSON"))
                .with_source(error)
        })?;
        debug!(path = %shown, count = activities.len(), "loaded activity export");
        Ok(activities)
    }
}
