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

//! Sliding-window scan over a day's score series.
//!
//! Every contiguous placement of `ceil(duration / 10)` buckets is evaluated;
//! there is no wraparound across midnight. Results are unranked so callers can
//! apply their own ranking policy.

use greenslot_types::{
    BUCKET_MINUTES, ScorePoint, Stability, TimeWindow, Trend, WindowConstraints,
};
use tracing::debug;

use crate::config::WindowConfig;
use crate::percentile::{rank_percentile, sorted_scores};

/// Buckets needed to cover `duration_minutes`, rounding up to whole buckets
pub fn window_size(duration_minutes: u32) -> usize {
    duration_minutes.div_ceil(BUCKET_MINUTES) as usize
}

/// Scan with the default stability and trend bands
pub fn scan(
    series: &[ScorePoint],
    duration_minutes: u32,
    current_score: Option<f64>,
    constraints: Option<&WindowConstraints>,
) -> Vec<TimeWindow> {
    scan_with(
        series,
        duration_minutes,
        current_score,
        constraints,
        &WindowConfig::default(),
    )
}

/// Evaluate every window of the requested duration that passes `constraints`.
///
/// A duration longer than the series, or a zero duration, yields no windows.
/// `delta_vs_now` is left unset when `current_score` is unknown.
pub fn scan_with(
    series: &[ScorePoint],
    duration_minutes: u32,
    current_score: Option<f64>,
    constraints: Option<&WindowConstraints>,
    config: &WindowConfig,
) -> Vec<TimeWindow> {
    let size = window_size(duration_minutes);
    if size == 0 || size > series.len() {
        debug!(
            "No windows: {} min needs {} buckets, series has {}",
            duration_minutes,
            size,
            series.len()
        );
        return Vec::new();
    }

    let distribution = sorted_scores(series);

    let windows: Vec<TimeWindow> = series
        .windows(size)
        .filter_map(|buckets| {
            let (first, last) = (buckets.first()?, buckets.last()?);
            if let Some(constraints) = constraints
                && !constraints.admits(&first.time, &last.time)
            {
                return None;
            }
            evaluate(buckets, &distribution, current_score, config)
        })
        .collect();

    debug!(
        "Scanned {} min ({} buckets): {} of {} placements qualify",
        duration_minutes,
        size,
        windows.len(),
        series.len() - size + 1
    );

    windows
}

fn evaluate(
    buckets: &[ScorePoint],
    distribution: &[f64],
    current_score: Option<f64>,
    config: &WindowConfig,
) -> Option<TimeWindow> {
    let scores: Vec<f64> = buckets.iter().filter_map(ScorePoint::valid_score).collect();
    let avg_score = mean(&scores)?;

    let (min, max) = scores
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &s| {
            (lo.min(s), hi.max(s))
        });
    let stability_value = max - min;

    Some(TimeWindow {
        start: buckets.first()?.time.clone(),
        end: buckets.last()?.time.clone(),
        avg_score,
        percentile: rank_percentile(distribution, avg_score),
        delta_vs_now: current_score.map(|now| avg_score - now),
        stability: classify_stability(stability_value, config),
        stability_value,
        trend: classify_trend(&scores, config.trend_threshold),
    })
}

/// High up to `stability_high_max`, medium up to `stability_medium_max`, else low
pub fn classify_stability(range: f64, config: &WindowConfig) -> Stability {
    if range <= config.stability_high_max {
        Stability::High
    } else if range <= config.stability_medium_max {
        Stability::Medium
    } else {
        Stability::Low
    }
}

/// Compare the mean of the second half against the first half.
///
/// The split is floor(n/2), so for odd sizes the middle bucket belongs to the
/// second half. A single bucket has no first half and counts as stable.
pub fn classify_trend(scores: &[f64], threshold: f64) -> Trend {
    let (first_half, second_half) = scores.split_at(scores.len() / 2);

    let (Some(first), Some(second)) = (mean(first_half), mean(second_half)) else {
        return Trend::Stable;
    };

    let diff = second - first;
    if diff > threshold {
        Trend::Ascending
    } else if diff < -threshold {
        Trend::Descending
    } else {
        Trend::Stable
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn series(scores: &[f64]) -> Vec<ScorePoint> {
        let base = NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        scores
            .iter()
            .enumerate()
            .map(|(i, &s)| ScorePoint::new(base + chrono::Duration::minutes(i as i64 * 10), s))
            .collect()
    }

    #[test]
    fn test_window_size_rounds_up() {
        assert_eq!(window_size(0), 0);
        assert_eq!(window_size(10), 1);
        assert_eq!(window_size(60), 6);
        assert_eq!(window_size(65), 7);
        assert_eq!(window_size(1), 1);
    }

    #[test]
    fn test_window_count_without_constraints() {
        let data = series(&[50.0; 20]);
        assert_eq!(scan(&data, 60, Some(50.0), None).len(), 15);
        assert_eq!(scan(&data, 200, Some(50.0), None).len(), 1);
        assert_eq!(scan(&data, 210, Some(50.0), None).len(), 0);
        assert_eq!(scan(&data, 0, Some(50.0), None).len(), 0);
        assert!(scan(&[], 60, None, None).is_empty());
    }

    #[test]
    fn test_constant_window_statistics() {
        let data = series(&[64.0; 6]);
        let windows = scan(&data, 60, Some(60.0), None);
        assert_eq!(windows.len(), 1);

        let w = &windows[0];
        assert_eq!(w.start, "00:00");
        assert_eq!(w.end, "00:50");
        assert_eq!(w.avg_score, 64.0);
        assert_eq!(w.stability_value, 0.0);
        assert_eq!(w.stability, Stability::High);
        assert_eq!(w.trend, Trend::Stable);
        assert_eq!(w.delta_vs_now, Some(4.0));
        assert_eq!(w.percentile, 0.0);
    }

    #[test]
    fn test_unknown_current_score_leaves_delta_unset() {
        let data = series(&[64.0; 6]);
        let windows = scan(&data, 30, None, None);
        assert!(windows.iter().all(|w| w.delta_vs_now.is_none()));
    }

    #[test]
    fn test_stability_bands() {
        let config = WindowConfig::default();
        assert_eq!(classify_stability(5.0, &config), Stability::High);
        assert_eq!(classify_stability(5.5, &config), Stability::Medium);
        assert_eq!(classify_stability(10.0, &config), Stability::Medium);
        assert_eq!(classify_stability(10.1, &config), Stability::Low);
    }

    #[test]
    fn test_trend_split_puts_middle_in_second_half() {
        // first half [40], second half [40, 50] -> diff 5
        assert_eq!(classify_trend(&[40.0, 40.0, 50.0], 3.0), Trend::Ascending);
        assert_eq!(classify_trend(&[60.0, 60.0, 50.0, 50.0], 3.0), Trend::Descending);
        assert_eq!(classify_trend(&[50.0, 52.0, 51.0, 53.0], 3.0), Trend::Stable);
        assert_eq!(classify_trend(&[70.0], 3.0), Trend::Stable);
        assert_eq!(classify_trend(&[], 3.0), Trend::Stable);
    }

    #[test]
    fn test_window_fields_on_ramp() {
        let data = series(&[10.0, 20.0, 30.0, 40.0]);
        let windows = scan(&data, 20, Some(25.0), None);
        assert_eq!(windows.len(), 3);

        let last = &windows[2];
        assert_eq!(last.start, "00:20");
        assert_eq!(last.end, "00:30");
        assert_eq!(last.avg_score, 35.0);
        assert_eq!(last.stability_value, 10.0);
        assert_eq!(last.stability, Stability::Medium);
        assert_eq!(last.trend, Trend::Ascending);
        assert_eq!(last.delta_vs_now, Some(10.0));
        // three of four scores are below 35
        assert_eq!(last.percentile, 75.0);
    }

    #[test]
    fn test_deadline_excludes_late_windows() {
        let data = series(&[50.0; 12]);
        let constraints = WindowConstraints::default().deadline("01:00");
        let windows = scan(&data, 30, None, Some(&constraints));

        assert!(!windows.is_empty());
        assert!(windows.iter().all(|w| w.end.as_str() <= "01:00"));
        assert_eq!(windows.last().unwrap().end, "01:00");
    }

    #[test]
    fn test_start_bounds() {
        let data = series(&[50.0; 12]);
        let constraints = WindowConstraints::default()
            .earliest_after("00:30")
            .latest_before("01:00");
        let starts: Vec<String> = scan(&data, 20, None, Some(&constraints))
            .into_iter()
            .map(|w| w.start)
            .collect();
        assert_eq!(starts, vec!["00:30", "00:40", "00:50", "01:00"]);
    }

    #[test]
    fn test_missing_scores_skipped_in_average() {
        let data = series(&[60.0, f64::NAN, 80.0]);
        let windows = scan(&data, 30, None, None);
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].avg_score, 70.0);
        assert_eq!(windows[0].stability_value, 20.0);
    }

    #[test]
    fn test_window_of_only_missing_scores_is_dropped() {
        let data = series(&[f64::NAN, f64::NAN, 55.0]);
        let windows = scan(&data, 20, None, None);
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].start, "00:10");
    }
}
