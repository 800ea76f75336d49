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

//! Whole-day summary shown next to the recommendations.

use greenslot_types::{BUCKET_MINUTES, ScorePoint};
use serde::Serialize;

use crate::config::WindowConfig;
use crate::percentile::{rank_percentile, sorted_scores};

/// Range below which differences across the day are not worth acting on
pub const DEFAULT_SUBTLE_RANGE: f64 = 20.0;

/// Score gain a later bucket needs before it is suggested as "better"
pub const DEFAULT_BETTER_MARGIN: f64 = 10.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NextBetter {
    pub time: String,
    pub index: usize,
    pub score: f64,
    pub minutes_away: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayOverview {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub valid_points: usize,
    /// max - min is below the subtle range
    pub is_subtle: bool,
    pub next_better: Option<NextBetter>,
}

fn min_max(series: &[ScorePoint]) -> Option<(f64, f64)> {
    series
        .iter()
        .filter_map(ScorePoint::valid_score)
        .fold(None, |acc, s| match acc {
            None => Some((s, s)),
            Some((lo, hi)) => Some((lo.min(s), hi.max(s))),
        })
}

/// True when the day's scores span less than `range` points
pub fn is_subtle_day_with(series: &[ScorePoint], range: f64) -> bool {
    min_max(series).is_some_and(|(lo, hi)| hi - lo < range)
}

pub fn is_subtle_day(series: &[ScorePoint]) -> bool {
    is_subtle_day_with(series, DEFAULT_SUBTLE_RANGE)
}

/// First bucket after `current_index` scoring more than `margin` above it.
///
/// Returns `None` when the current bucket has no score or nothing later
/// clears the margin.
pub fn next_better_bucket(
    series: &[ScorePoint],
    current_index: usize,
    margin: f64,
) -> Option<NextBetter> {
    let current = series.get(current_index)?.valid_score()?;

    series
        .iter()
        .enumerate()
        .skip(current_index + 1)
        .find_map(|(index, point)| {
            let score = point.valid_score()?;
            (score > current + margin).then(|| NextBetter {
                time: point.time.clone(),
                index,
                score,
                minutes_away: (index - current_index) as u32 * BUCKET_MINUTES,
            })
        })
}

/// Rank of a single score within the day, 0-100
pub fn point_percentile(series: &[ScorePoint], score: f64) -> f64 {
    rank_percentile(&sorted_scores(series), score)
}

/// Summarize the day; `None` when the series has no usable score.
pub fn overview(
    series: &[ScorePoint],
    current_index: Option<usize>,
    config: &WindowConfig,
) -> Option<DayOverview> {
    let (min, max) = min_max(series)?;
    let scores = sorted_scores(series);
    let mean = scores.iter().sum::<f64>() / scores.len() as f64;

    Some(DayOverview {
        min,
        max,
        mean,
        valid_points: scores.len(),
        is_subtle: max - min < config.subtle_range,
        next_better: current_index
            .and_then(|index| next_better_bucket(series, index, config.better_margin)),
    })
}
