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

//! Rank-based percentile engine.
//!
//! Uses the nearest-rank method (no interpolation) over the valid scores of a
//! series. Points with missing or non-finite scores are silently dropped, and
//! an empty series yields 0 rather than an error.

use greenslot_types::{ScorePoint, Thresholds};

use crate::config::ThresholdConfig;

/// Valid scores of a series in ascending order
pub fn sorted_scores(series: &[ScorePoint]) -> Vec<f64> {
    let mut scores: Vec<f64> = series.iter().filter_map(ScorePoint::valid_score).collect();
    scores.sort_by(f64::total_cmp);
    scores
}

/// Nearest-rank percentile of an already sorted slice.
///
/// rank index = ceil(p/100 * n) - 1, clamped into the slice.
pub fn nearest_rank(sorted: &[f64], p: f64) -> f64 {
    let Some(last) = sorted.len().checked_sub(1) else {
        return 0.0;
    };

    let p = if p.is_nan() { 0.0 } else { p.clamp(0.0, 100.0) };
    let rank = ((p / 100.0) * sorted.len() as f64).ceil() as usize;
    let index = rank.saturating_sub(1).min(last);

    sorted.get(index).copied().unwrap_or(0.0)
}

/// Percentile `p` (0-100) of the series' scores
pub fn percentile(series: &[ScorePoint], p: f64) -> f64 {
    nearest_rank(&sorted_scores(series), p)
}

/// Position of `value` in a sorted distribution as a percentage.
///
/// Counts the scores strictly below `value`, i.e. the index of the first score
/// >= `value`: 0 at the minimum, approaching 100 near the maximum.
pub fn rank_percentile(sorted: &[f64], value: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }

    let below = sorted.partition_point(|score| *score < value);
    below as f64 / sorted.len() as f64 * 100.0
}

/// Color thresholds of a series, sorting it only once
pub fn thresholds(series: &[ScorePoint], config: &ThresholdConfig) -> Thresholds {
    let sorted = sorted_scores(series);
    let thresholds = Thresholds::new(
        nearest_rank(&sorted, config.low_percentile),
        nearest_rank(&sorted, config.mid_percentile),
        nearest_rank(&sorted, config.high_percentile),
    );

    tracing::debug!(
        "Thresholds over {} valid scores: P{}={:.2}, P{}={:.2}, P{}={:.2}",
        sorted.len(),
        config.low_percentile,
        thresholds.p25,
        config.mid_percentile,
        thresholds.p_mid,
        config.high_percentile,
        thresholds.p_high
    );

    thresholds
}
