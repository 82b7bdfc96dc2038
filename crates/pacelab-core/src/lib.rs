// ABOUTME: Core types and constants for Pacelab running analytics
// ABOUTME: Foundation crate with error handling, activity/profile models, and time utilities
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacelab Contributors

#![deny(unsafe_code)]

//! # Pacelab Core
//!
//! Foundation crate providing shared types for the Pacelab analytics workspace.
//! This crate is designed to change infrequently, enabling incremental
//! compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Unit conversions and standard race distances
//! - **models**: Activity records and user profile types
//! - **`time_utils`**: Clock-string parsing/formatting and calendar bucket keys

/// Unified error handling system with standard error codes
pub mod errors;

/// Unit conversion and race distance constants
pub mod constants;

/// Activity and user profile data models
pub mod models;

/// Duration/pace string parsing, clock formatting, and bucket keys
pub mod time_utils;

pub use errors::{AppError, AppResult, ErrorCode};
