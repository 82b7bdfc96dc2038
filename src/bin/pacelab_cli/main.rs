// ABOUTME: Pacelab CLI - command-line front end for the running analytics engine
// ABOUTME: Computes VDOT, MAF, and TSS, aggregates activity exports, and runs full analyses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacelab Contributors
//!
//! Usage:
//! ```bash
//! # VDOT, training paces, and race predictions from a 10K in 50:00
//! pacelab-cli vdot --distance-km 10 --time 50:00
//!
//! # MAF heart rate and zones
//! pacelab-cli maf --age 42 --health healthy
//!
//! # Training stress of one session
//! pacelab-cli tss --minutes 60 --pace 5:00 --threshold 4:30
//!
//! # Weekly buckets of an activity export
//! pacelab-cli buckets --file activities.json --granularity week --threshold 4:30
//!
//! # Monthly buckets of runs only
//! pacelab-cli buckets --file activities.json --granularity month --sport run
//!
//! # Analysis of a single activity
//! pacelab-cli activity --file activities.json --start "2024-03-04 07:30:00" --profile profile.json
//!
//! # Comprehensive analysis as of a fixed date
//! pacelab-cli analyze --file activities.json --profile profile.json --now 2024-06-30
//! ```

mod commands;
mod helpers;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use pacelab::logging::LoggingConfig;
use pacelab_core::models::{HealthCategory, SportType};
use pacelab_intelligence::aggregation::Granularity;
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "pacelab-cli",
    version,
    about = "Pacelab running analytics CLI",
    long_about = "Running metrics from activity exports: VDOT, MAF heart rate zones, training stress, time buckets, and training guidance."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// VDOT, training paces, and race predictions from a race result
    Vdot {
        /// Race distance in kilometers
        #[arg(long)]
        distance_km: f64,

        /// Finish time as H:MM:SS, M:SS, or seconds
        #[arg(long)]
        time: String,
    },

    /// MAF heart rate and training zones
    Maf {
        /// Age in years
        #[arg(long)]
        age: u32,

        /// Health category (major_illness, minor_issues, healthy, elite, senior)
        #[arg(long, default_value = "healthy")]
        health: HealthCategory,
    },

    /// Training stress score of one session
    Tss {
        /// Session duration in minutes
        #[arg(long)]
        minutes: f64,

        /// Average pace per km as M:SS
        #[arg(long)]
        pace: String,

        /// Lactate threshold pace per km as M:SS
        #[arg(long)]
        threshold: String,
    },

    /// Group an activity export into time buckets
    Buckets {
        /// Activity export (JSON array or object with an `activities` array)
        #[arg(long)]
        file: PathBuf,

        /// Bucket granularity (single, week, month)
        #[arg(long, default_value = "week")]
        granularity: Granularity,

        /// Maximum number of buckets, most recent first
        #[arg(long)]
        limit: Option<usize>,

        /// Lactate threshold pace per km as M:SS, enables bucket TSS
        #[arg(long)]
        threshold: Option<String>,

        /// Only bucket activities of this sport (run, walk, ride, swim, other)
        #[arg(long)]
        sport: Option<SportType>,
    },

    /// Analyze the activity starting at a given timestamp
    Activity {
        /// Activity export
        #[arg(long)]
        file: PathBuf,

        /// Start timestamp of the activity
        #[arg(long)]
        start: String,

        /// Profile JSON file
        #[arg(long)]
        profile: Option<PathBuf>,
    },

    /// Comprehensive analysis: training load, performance, and recommendations
    Analyze {
        /// Activity export
        #[arg(long)]
        file: PathBuf,

        /// Profile JSON file
        #[arg(long)]
        profile: Option<PathBuf>,

        /// End of the analysis windows (defaults to the local time)
        #[arg(long)]
        now: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let logging = LoggingConfig::from_env();
    let logging = if cli.verbose {
        logging.with_level("debug")
    } else {
        logging
    };
    logging.init()?;
    debug!("Pacelab CLI");

    match cli.command {
        Command::Vdot { distance_km, time } => commands::formulas::vdot(distance_km, &time)?,
        Command::Maf { age, health } => commands::formulas::maf(age, health)?,
        Command::Tss {
            minutes,
            pace,
            threshold,
        } => commands::formulas::tss(minutes, &pace, &threshold)?,
        Command::Buckets {
            file,
            granularity,
            limit,
            threshold,
            sport,
        } => commands::activities::buckets(&file, granularity, limit, threshold.as_deref(), sport)?,
        Command::Activity {
            file,
            start,
            profile,
        } => commands::activities::activity(&file, &start, profile.as_deref())?,
        Command::Analyze { file, profile, now } => {
            commands::activities::analyze(&file, profile.as_deref(), now.as_deref())?;
        }
    }

    Ok(())
}
