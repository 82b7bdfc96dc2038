// ABOUTME: Re-exports helper modules for pacelab-cli
// ABOUTME: Provides access to input loading and JSON output utilities
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacelab Contributors

pub mod display;
pub mod input;
