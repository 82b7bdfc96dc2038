// ABOUTME: Configuration module for pacelab-intelligence crate
// ABOUTME: Re-exports analysis configuration types and their error
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacelab Contributors

/// Bucket limits, display caps, and performance sample sizes
pub mod analysis;

/// Configuration error types
pub mod error;

pub use analysis::{AggregationConfig, AnalysisConfig, PerformanceConfig};
pub use error::ConfigError;
