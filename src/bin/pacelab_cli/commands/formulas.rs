// ABOUTME: Formula commands for pacelab-cli
// ABOUTME: Prints VDOT, MAF, and TSS results for values given on the command line
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacelab Contributors

use anyhow::Result;
use pacelab_core::models::HealthCategory;
use pacelab_core::time_utils::parse_clock_to_seconds;
use pacelab_intelligence::algorithms::{compute_maf, compute_tss, compute_vdot};
use tracing::info;

use crate::helpers::display::print_json;

/// VDOT from a race distance and finish time
pub fn vdot(distance_km: f64, time: &str) -> Result<()> {
    let seconds = parse_clock_to_seconds(time)?;
    let result = compute_vdot(distance_km, seconds)?;
    info!(distance_km, seconds, vdot = result.vdot, "computed VDOT");
    print_json(&result)
}

/// MAF heart rate and zones
pub fn maf(age: u32, health: HealthCategory) -> Result<()> {
    let result = compute_maf(age, health)?;
    info!(age, %health, maf = result.maf_heart_rate, "computed MAF heart rate");
    print_json(&result)
}

/// Training stress of one session
pub fn tss(minutes: f64, pace: &str, threshold: &str) -> Result<()> {
    let result = compute_tss(
        minutes,
        parse_clock_to_seconds(pace)?,
        parse_clock_to_seconds(threshold)?,
    )?;
    info!(minutes, tss = result.tss, "computed TSS");
    print_json(&result)
}
