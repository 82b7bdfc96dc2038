// ABOUTME: Formula engine for running metrics: VDOT, MAF heart rate zones, and pace-based TSS
// ABOUTME: Pure functions over validated numeric inputs, re-exported for the aggregation layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacelab Contributors

//! Formula Engine
//!
//! Each formula validates its numeric inputs and returns an
//! `AppError` with a validation code instead of producing NaN or
//! out-of-range output. Results are plain serializable structs.
//!
//! # Example
//!
//! ```rust
//! use pacelab_core::models::HealthCategory;
//! use pacelab_intelligence::algorithms::{compute_maf, compute_tss, compute_vdot};
//!
//! let vdot = compute_vdot(10.0, 3000.0).unwrap();
//! let maf = compute_maf(42, HealthCategory::Healthy).unwrap();
//! let tss = compute_tss(50.0, 300.0, 280.0).unwrap();
//! assert!(vdot.vdot > 20.0 && maf.maf_heart_rate == 138 && tss.tss > 0.0);
//! ```

pub mod maf;
pub mod tss;
pub mod vdot;

pub use maf::{compute_maf, health_adjustment, HeartRateZone, MafResult};
pub use tss::{compute_hr_tss, compute_tss, TssIntensity, TssResult};
pub use vdot::{
    compute_vdot, race_predictions, training_paces, FitnessTier, RaceDistance, RacePrediction,
    TrainingPaces, VdotResult,
};
