// ABOUTME: Core data models for the Pacelab analytics workspace
// ABOUTME: Re-exports ActivityRecord, UserProfile and the validated ActivitySample
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacelab Contributors

//! # Data Models
//!
//! Input records are supplied by callers (file loaders, HTTP clients, UIs) and
//! are never mutated by the analysis code.
//!
//! ## Design Principles
//!
//! - **Boundary validation**: optional fields stay optional on [`ActivityRecord`];
//!   [`ActivityRecord::to_sample`] validates the fields an aggregation needs
//! - **Lenient input**: moving time accepts clock strings or raw seconds
//! - **Serializable**: all models round-trip through JSON
//!
//! ## Core Models
//!
//! - `ActivityRecord`: a completed exercise session as supplied by the caller
//! - `ActivitySample`: a record whose timestamp, distance, and duration were validated
//! - `UserProfile`: optional personal settings (age, heart rates, best paces)
//! - `HealthCategory`: MAF health adjustment category

// Domain modules
mod activity;
mod profile;
mod sport;

// Activity domain
pub use activity::{ActivityRecord, ActivityRecordBuilder, ActivitySample, MovingTime};

// Profile domain
pub use profile::{Gender, HealthCategory, PaceBenchmark, PrimaryGoal, TrainingLevel, UserProfile};

// Sport labels
pub use sport::SportType;
