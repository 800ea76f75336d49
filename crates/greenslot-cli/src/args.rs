// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of GreenSlot.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "greenslot")]
#[command(author, version, about = "GreenSlot favorable consumption window planner")]
#[command(
    long_about = "Find the cleanest time of day to run a flexible appliance.\n\
    \nReads a day of 10-minute favorability scores (0-100, higher is cleaner),\n\
    colors each bucket and recommends the best contiguous windows.\n\
    \nExamples:\n  \
    greenslot windows --demo                     # Best 60 min windows of a synthetic day\n  \
    greenslot windows --duration 90 --deadline 07:00\n  \
    greenslot timeline --csv predictions.csv     # Colored day overview\n  \
    greenslot decide --emergency                 # Ask the backend to start now"
)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Recommend the best windows for a run of the given length
    Windows(WindowsArgs),

    /// Show the colored score timeline of the day
    Timeline(TimelineArgs),

    /// Ask the decision service whether to start now
    #[command(
        long_about = "Post a start request to the decision service and report the outcome.\n\
        \nOutcomes: started now, not started (inside an allowed interval or no\n\
        interval data), or failure. A failure never starts anything."
    )]
    Decide(DecideArgs),

    /// Print an example configuration file
    ExampleConfig,
}

/// Where the day's scores come from
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Read one prediction CSV file
    #[arg(long, value_name = "PATH", conflicts_with = "demo")]
    pub csv: Option<PathBuf>,

    /// Directory holding next_day_predictions_colored_*.csv (newest is used)
    #[arg(long, value_name = "DIR", conflicts_with_all = ["csv", "demo"])]
    pub data_dir: Option<PathBuf>,

    /// Use a generated synthetic day instead of real predictions
    #[arg(long, default_value_t = false)]
    pub demo: bool,

    /// Seed of the synthetic day
    #[arg(long, default_value_t = greenslot_core::DEFAULT_SEED, requires = "demo")]
    pub seed: u32,

    /// Date stamped on the synthetic day (YYYY-MM-DD, default today)
    #[arg(long, value_name = "DATE", requires = "demo")]
    pub date: Option<String>,
}

#[derive(Args, Debug)]
pub struct WindowsArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Run length in minutes (default from config)
    #[arg(long, short = 'd')]
    pub duration: Option<u32>,

    /// Number of windows to show (default from config)
    #[arg(long, short = 'n')]
    pub top: Option<usize>,

    /// Only windows starting at or after HH:MM
    #[arg(long, value_name = "HH:MM")]
    pub earliest_after: Option<String>,

    /// Only windows starting at or before HH:MM
    #[arg(long, value_name = "HH:MM")]
    pub latest_before: Option<String>,

    /// Only windows whose last bucket is at or before HH:MM
    #[arg(long, value_name = "HH:MM")]
    pub deadline: Option<String>,

    /// Wall-clock time used as "now" (HH:MM, default current local time)
    #[arg(long, value_name = "HH:MM")]
    pub now: Option<String>,

    /// Current score to compare against, overriding the bucket lookup
    #[arg(long)]
    pub current_score: Option<f64>,

    /// JSON file with windows computed upstream; skips the scan when non-empty
    #[arg(long, value_name = "PATH")]
    pub precomputed: Option<PathBuf>,

    /// Print reasons for the best window
    #[arg(long, default_value_t = false)]
    pub explain: bool,

    /// Print the recommendation as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct TimelineArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Print points with their colors as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct DecideArgs {
    /// Instant to decide for (RFC 3339, default now)
    #[arg(long, value_name = "DATETIME")]
    pub when: Option<String>,

    /// Request an emergency start
    #[arg(long, default_value_t = false)]
    pub emergency: bool,

    /// Decision service base URL (overrides config)
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,
}
