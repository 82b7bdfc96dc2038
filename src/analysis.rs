// ABOUTME: Comprehensive running analysis combining training load, performance, and recommendations
// ABOUTME: Orchestrates the intelligence crate over an activity collection, an optional profile, and "now"
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacelab Contributors

//! # Comprehensive Analysis
//!
//! One call turns an activity collection into a training-load summary,
//! a performance summary, a recommendation set, a recent-activity view, and
//! whole-history statistics (personal bests, sport breakdown, heart rate zones).
//! All windows end at the caller's `now`; the clock is never read here.
//!
//! Records that fail validation are skipped and listed in
//! [`ComprehensiveAnalysis::skipped`]. Malformed profile fields only drop the
//! output that depends on them.

use chrono::NaiveDateTime;
use pacelab_core::errors::AppError;
use pacelab_core::models::{ActivityRecord, ActivitySample, PaceBenchmark, UserProfile};
use pacelab_intelligence::activity_stats::{
    heart_rate_zone_distribution, personal_bests, sport_breakdown, HeartRateZoneDistribution,
    PersonalBests, SportStatistics,
};
use pacelab_intelligence::aggregation::{partition_records, SkippedRecord, ValidatedActivity};
use pacelab_intelligence::algorithms::{compute_maf, MafResult};
use pacelab_intelligence::config::AnalysisConfig;
use pacelab_intelligence::performance_analyzer::{PerformanceAnalyzer, PerformanceSummary};
use pacelab_intelligence::profile_estimates::fill_profile_estimates;
use pacelab_intelligence::recent_activity::{summarize_recent_activities, RecentActivitySummary};
use pacelab_intelligence::recommendation_engine::{recommend, training_advice, RecommendationSet};
use pacelab_intelligence::training_load::{
    summarize_training_load_with, LoadThresholds, TrainingLoadSummary,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::sources::ActivitySource;

/// Failures of the analysis pipeline itself
///
/// Per-record and per-field problems never surface here.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The activity collection could not be obtained
    #[error("activity source '{source_name}' is unavailable")]
    SourceUnavailable {
        /// Name of the failing source
        source_name: String,
        /// Underlying cause
        #[source]
        source: AppError,
    },
}

/// Heart-rate guidance derived from the profile's age
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeGuidance {
    /// MAF heart rate and zones
    pub maf: MafResult,
    /// Training advice for the athlete's level and age
    pub training_advice: String,
}

/// Result of a comprehensive analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComprehensiveAnalysis {
    /// End of every analysis window
    pub analyzed_at: NaiveDateTime,
    /// Rolling 7/30/365-day load
    pub training_load: TrainingLoadSummary,
    /// Recent pace trend and VDOT estimate
    pub performance: PerformanceSummary,
    /// Guidance from VDOT and weekly load
    pub recommendations: RecommendationSet,
    /// Activities in the last 30 days
    pub recent_activities: RecentActivitySummary,
    /// Best single activities up to `analyzed_at`
    pub personal_bests: PersonalBests,
    /// Per-sport totals up to `analyzed_at`
    pub sport_breakdown: Vec<SportStatistics>,
    /// Average heart rates over five zones up to `analyzed_at`
    pub heart_rate_zones: HeartRateZoneDistribution,
    /// MAF zones and advice, when the profile has a usable age
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guidance: Option<AgeGuidance>,
    /// Profile with missing heart rates and paces estimated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_profile: Option<UserProfile>,
    /// Records left out because of data errors
    pub skipped: Vec<SkippedRecord>,
}

/// Runs comprehensive analyses with fixed settings
#[derive(Debug, Clone, Default)]
pub struct ComprehensiveAnalyzer {
    config: AnalysisConfig,
}

impl ComprehensiveAnalyzer {
    /// Create an analyzer with the given settings
    #[must_use]
    pub const fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// Settings in use
    #[must_use]
    pub const fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze `activities` with windows ending at `now`
    #[must_use]
    pub fn analyze(
        &self,
        activities: &[ActivityRecord],
        profile: Option<&UserProfile>,
        now: NaiveDateTime,
    ) -> ComprehensiveAnalysis {
        let (valid, skipped) = partition_records(activities);
        let past: Vec<ValidatedActivity<'_>> = valid
            .iter()
            .copied()
            .filter(|activity| activity.sample.start <= now)
            .collect();
        let samples: Vec<ActivitySample> = past.iter().map(|activity| activity.sample).collect();

        let thresholds = LoadThresholds {
            pace_seconds: threshold_pace(profile),
            heart_rate: profile.and_then(|profile| profile.lactate_threshold_heart_rate),
        };
        let training_load = summarize_training_load_with(&samples, thresholds, now);
        let performance = PerformanceAnalyzer::new(self.config.performance.clone()).summarize(&samples);
        let recommendations = recommend(
            performance.vdot_estimate,
            training_load.weekly_tss,
            training_load.risk_level,
        );
        let recent_activities = summarize_recent_activities(
            &valid,
            now,
            self.config.performance.recent_display_limit,
        );
        let guidance = profile.and_then(|profile| age_guidance(profile, performance.vdot_estimate));

        info!(
            activities = activities.len(),
            skipped = skipped.len(),
            weekly_tss = training_load.weekly_tss,
            risk = %training_load.risk_level,
            vdot = performance.vdot_estimate,
            "comprehensive analysis complete"
        );

        ComprehensiveAnalysis {
            analyzed_at: now,
            training_load,
            performance,
            recommendations,
            recent_activities,
            personal_bests: personal_bests(&past),
            sport_breakdown: sport_breakdown(&past),
            heart_rate_zones: heart_rate_zone_distribution(&past, profile),
            guidance,
            estimated_profile: profile.map(fill_profile_estimates),
            skipped,
        }
    }

    /// Load activities from `source` and analyze them
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::SourceUnavailable`] when the source fails.
    pub fn analyze_source(
        &self,
        source: &dyn ActivitySource,
        profile: Option<&UserProfile>,
        now: NaiveDateTime,
    ) -> Result<ComprehensiveAnalysis, AnalysisError> {
        let activities = source.load_activities().map_err(|error| {
            warn!(source = source.name(), %error, "activity source unavailable");
            AnalysisError::SourceUnavailable {
                source_name: source.name().to_owned(),
                source: error,
            }
        })?;
        Ok(self.analyze(&activities, profile, now))
    }
}

/// Lactate threshold pace of the profile in seconds per km
fn threshold_pace(profile: Option<&UserProfile>) -> Option<f64> {
    let profile = profile?;
    match profile.pace_seconds(PaceBenchmark::LactateThreshold) {
        Ok(pace) => pace,
        Err(error) => {
            warn!(%error, "ignoring malformed lactate threshold pace in profile");
            None
        }
    }
}

fn age_guidance(profile: &UserProfile, vdot: f64) -> Option<AgeGuidance> {
    let age = profile.age?;
    match compute_maf(age, profile.health_category_or_default()) {
        Ok(maf) => Some(AgeGuidance {
            training_advice: training_advice(vdot, maf.maf_heart_rate, age),
            maf,
        }),
        Err(error) => {
            warn!(age, %error, "skipping heart rate guidance");
            None
        }
    }
}

/// Analyze `activities` with default settings
#[must_use]
pub fn run_comprehensive_analysis(
    activities: &[ActivityRecord],
    profile: Option<&UserProfile>,
    now: NaiveDateTime,
) -> ComprehensiveAnalysis {
    ComprehensiveAnalyzer::default().analyze(activities, profile, now)
}

/// Load activities from `source` and analyze them with default settings
///
/// # Errors
///
/// Returns [`AnalysisError::SourceUnavailable`] when the source fails.
pub fn analyze_from_source(
    source: &dyn ActivitySource,
    profile: Option<&UserProfile>,
    now: NaiveDateTime,
) -> Result<ComprehensiveAnalysis, AnalysisError> {
    ComprehensiveAnalyzer::default().analyze_source(source, profile, now)
}
