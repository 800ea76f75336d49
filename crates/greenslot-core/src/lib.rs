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

pub mod bucket;
pub mod classify;
pub mod config;
pub mod decision;
pub mod explain;
pub mod overview;
pub mod percentile;
pub mod planner;
pub mod ranker;
pub mod scanner;
pub mod synthetic;
pub mod traits;

pub use bucket::{CurrentReading, current_bucket_key, current_reading, find_bucket};
pub use classify::{band, classify, classify_series, colorize, timeline_colors};
pub use config::{
    ConfigError, DataConfig, DecisionConfig, GreenSlotConfig, ThresholdConfig, WindowConfig,
};
pub use decision::{DecisionGate, interpret};
pub use explain::{
    EmissionModel, EmissionsEstimate, emissions_avoided, estimated_color, explain,
    format_percentile, top_percent,
};
pub use overview::{
    DayOverview, NextBetter, is_subtle_day, next_better_bucket, overview, point_percentile,
};
pub use percentile::{nearest_rank, percentile, rank_percentile, sorted_scores, thresholds};
pub use planner::{PlanRequest, Planner, Recommendation, WindowSource};
pub use ranker::{DEFAULT_SCORE_BAND, DEFAULT_TOP_N, compare_windows, rank, rank_with};
pub use scanner::{classify_stability, classify_trend, scan, scan_with, window_size};
pub use synthetic::{DEFAULT_SEED, Mulberry32, SyntheticSource, generate_day};
pub use traits::{DecisionService, ScoreSource};
