// ABOUTME: Main library entry point for Pacelab running analytics
// ABOUTME: Wires activity sources, the comprehensive analysis pipeline, and logging setup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacelab Contributors

#![deny(unsafe_code)]

//! # Pacelab
//!
//! Running analytics over historical activity records: VDOT fitness
//! estimates, MAF heart rate zones, pace-based training stress, and time
//! bucket summaries, combined into training guidance.
//!
//! ## Architecture
//!
//! - **`pacelab-core`**: Error system, activity and profile models, time utilities
//! - **`pacelab-intelligence`**: Formula engine, aggregation, training load, recommendations
//! - **This crate**: Activity sources, the comprehensive analysis pipeline, logging
//!
//! ## Example Usage
//!
//! ```rust
//! use pacelab::analysis::run_comprehensive_analysis;
//! use pacelab::models::ActivityRecord;
//! use pacelab::time_utils::parse_start_timestamp;
//!
//! let activities = vec![ActivityRecord::builder("2024-03-04 07:30:00")
//!     .distance_meters(10_000.0)
//!     .moving_time("50:00")
//!     .average_speed(3.33)
//!     .build()];
//!
//! let now = parse_start_timestamp("2024-03-05").unwrap();
//! let analysis = run_comprehensive_analysis(&activities, None, now);
//! assert_eq!(analysis.recent_activities.total_runs, 1);
//! ```

/// Comprehensive analysis pipeline
pub mod analysis;

/// Structured logging setup
pub mod logging;

/// Activity collection providers
pub mod sources;

pub use pacelab_core::{constants, errors, models, time_utils};
pub use pacelab_intelligence as intelligence;

pub use analysis::{
    analyze_from_source, run_comprehensive_analysis, AnalysisError, ComprehensiveAnalysis,
    ComprehensiveAnalyzer,
};
pub use sources::{ActivitySource, InMemorySource, JsonFileSource};
