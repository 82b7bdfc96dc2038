// ABOUTME: Output formatting helpers for pacelab-cli
// ABOUTME: Every command result is printed to stdout as pretty JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacelab Contributors

use anyhow::Result;
use serde::Serialize;

/// Print a result as pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
