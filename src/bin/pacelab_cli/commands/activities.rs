// ABOUTME: Activity-export commands for pacelab-cli
// ABOUTME: Handles bucket aggregation, single-activity analysis, and comprehensive analysis
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacelab Contributors

use std::path::Path;

use anyhow::Result;
use pacelab::analysis::ComprehensiveAnalyzer;
use pacelab::sources::{ActivitySource, JsonFileSource};
use pacelab_core::models::SportType;
use pacelab_core::time_utils::parse_clock_to_seconds;
use pacelab_intelligence::aggregation::{analyze_single_activity_with, ActivityAggregator, Granularity};
use pacelab_intelligence::config::AnalysisConfig;
use tracing::{info, warn};

use crate::helpers::display::print_json;
use crate::helpers::input::{load_profile, resolve_now};

/// Aggregate an export into time buckets
pub fn buckets(
    file: &Path,
    granularity: Granularity,
    limit: Option<usize>,
    threshold: Option<&str>,
    sport: Option<SportType>,
) -> Result<()> {
    let activities = JsonFileSource::new(file).load_activities()?;
    let threshold = threshold.map(parse_clock_to_seconds).transpose()?;

    let mut aggregator = ActivityAggregator::new(AnalysisConfig::from_env().aggregation);
    if let Some(sport) = sport {
        aggregator = aggregator.with_sport(sport);
    }
    let report = aggregator.aggregate(&activities, granularity, limit, threshold);
    if !report.skipped.is_empty() {
        warn!(skipped = report.skipped.len(), "some activities were skipped");
    }
    info!(
        %granularity,
        buckets = report.buckets.len(),
        filtered_out = report.filtered_out,
        "aggregated export"
    );
    print_json(&report)
}

/// Analyze one activity of an export
pub fn activity(file: &Path, start: &str, profile: Option<&Path>) -> Result<()> {
    let activities = JsonFileSource::new(file).load_activities()?;
    let profile = profile.map(load_profile).transpose()?;

    let config = AnalysisConfig::from_env();
    let analysis =
        analyze_single_activity_with(&activities, start, profile.as_ref(), &config.performance)?;
    print_json(&analysis)
}

/// Comprehensive analysis of an export
pub fn analyze(file: &Path, profile: Option<&Path>, now: Option<&str>) -> Result<()> {
    let source = JsonFileSource::new(file);
    let profile = profile.map(load_profile).transpose()?;
    let now = resolve_now(now)?;

    let analyzer = ComprehensiveAnalyzer::new(AnalysisConfig::from_env());
    let analysis = analyzer.analyze_source(&source, profile.as_ref(), now)?;
    print_json(&analysis)
}
