// ABOUTME: Re-exports command modules for pacelab-cli
// ABOUTME: Provides access to formula and activity-export commands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacelab Contributors

pub mod activities;
pub mod formulas;
