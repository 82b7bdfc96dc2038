// ABOUTME: Running analytics engine for Pacelab: formulas, aggregation, training load, and guidance
// ABOUTME: Pure computation over validated activity records and an optional athlete profile
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacelab Contributors

#![deny(unsafe_code)]

//! # Pacelab Intelligence
//!
//! Analysis engine behind the Pacelab workspace. Everything here is a
//! synchronous function of its inputs plus an injectable "now"; nothing
//! reads the clock, the network, or the filesystem.
//!
//! ## Modules
//!
//! - **algorithms**: VDOT, MAF heart rate zones, and pace or heart-rate TSS
//! - **aggregation**: Week/month/single-activity buckets and per-activity analysis
//! - **`training_load`**: Rolling weekly, monthly, and yearly load with risk and trend
//! - **`activity_stats`**: Personal bests, per-sport totals, and heart rate zone counts
//! - **`performance_analyzer`**: Recent pace trend and VDOT estimate
//! - **`recommendation_engine`**: Weekly templates, recovery, and nutrition guidance
//! - **`profile_estimates`**: Heart rate and pace estimates for incomplete profiles
//! - **config**: Environment-driven limits with validated defaults

/// Formula engine: VDOT, MAF, and TSS
pub mod algorithms;

/// Personal bests, per-sport totals, and heart rate zones
pub mod activity_stats;

/// Time-bucket aggregation and single-activity analysis
pub mod aggregation;

/// Bucket and performance-window settings
pub mod config;

/// Recent pace trend and VDOT estimate
pub mod performance_analyzer;

/// Physiological thresholds and formula coefficients
pub mod physiological_constants;

/// Heart rate and pace estimates for incomplete profiles
pub mod profile_estimates;

/// Activity volume in the last 30 days
pub mod recent_activity;

/// Training guidance from fitness level and load
pub mod recommendation_engine;

/// Rolling-window training load
pub mod training_load;

/// Daniels training pace and race time tables
pub mod vdot_tables;

pub use activity_stats::{
    heart_rate_zone_distribution, personal_bests, resolve_max_heart_rate, sport_breakdown,
    HeartRateZoneCount, HeartRateZoneDistribution, MaxHeartRateSource, PersonalBest,
    PersonalBests, SportStatistics,
};
pub use aggregation::{
    aggregate_by_bucket, aggregate_with_report, analyze_single_activity,
    analyze_single_activity_with, partition_records, ActivityAggregator, BucketAggregation,
    Granularity, MemberActivity, PaceCategory, PaceRecommendation, SingleActivityAnalysis,
    SkippedRecord, TimeBucketSummary, ValidatedActivity,
};
pub use algorithms::{
    compute_hr_tss, compute_maf, compute_tss, compute_vdot, FitnessTier, HeartRateZone, MafResult,
    RaceDistance, RacePrediction, TrainingPaces, TssIntensity, TssResult, VdotResult,
};
pub use config::{AggregationConfig, AnalysisConfig, ConfigError, PerformanceConfig};
pub use performance_analyzer::{PerformanceAnalyzer, PerformanceSummary, VdotSource};
pub use profile_estimates::{fill_profile_estimates, EstimatedPaces};
pub use recent_activity::{summarize_recent_activities, RecentActivitySummary};
pub use recommendation_engine::{
    recommend, training_advice, RecommendationSet, RiskLevel, TrendDirection,
};
pub use training_load::{
    summarize_training_load, summarize_training_load_with, LoadMethod, LoadThresholds,
    TrainingLoadSummary,
};
