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

use chrono::{Duration, NaiveDate, NaiveDateTime};
use greenslot_core::{
    GreenSlotConfig, PlanRequest, Planner, WindowSource, percentile, rank, scan, window_size,
};
use greenslot_types::{ScorePoint, Stability, TimeWindow, Trend, WindowConstraints};
use proptest::prelude::*;

fn midnight() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, 10)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn build_series(scores: &[f64]) -> Vec<ScorePoint> {
    scores
        .iter()
        .enumerate()
        .map(|(i, &s)| ScorePoint::new(midnight() + Duration::minutes(i as i64 * 10), s))
        .collect()
}

/// Clean night, dirty morning peak, then a choppy day
fn night_day_series() -> Vec<ScorePoint> {
    let mut scores = vec![75.0; 36];
    scores.extend(std::iter::repeat_n(35.0, 18));
    scores.extend((0..90).map(|i| if i % 2 == 0 { 40.0 } else { 60.0 }));
    build_series(&scores)
}

#[test]
fn test_night_segment_wins() {
    let series = night_day_series();
    assert_eq!(series.len(), 144);

    let windows = scan(&series, 60, Some(50.0), None);
    assert_eq!(windows.len(), 139);
    assert!(windows.iter().all(|w| w.span_minutes() == Some(60)));

    let ranked = rank(windows, 3);
    assert_eq!(ranked.len(), 3);

    let best = &ranked[0];
    assert_eq!(best.start, "00:00");
    assert_eq!(best.end, "00:50");
    assert_eq!(best.avg_score, 75.0);
    assert_eq!(best.delta_vs_now, Some(25.0));
    assert_eq!(best.stability, Stability::High);
    assert_eq!(best.trend, Trend::Stable);

    for window in &ranked {
        assert!(window.end.as_str() <= "05:50");
        assert_eq!(window.avg_score, 75.0);
    }
}

#[test]
fn test_choppy_day_is_low_stability() {
    let series = night_day_series();
    let windows = scan(&series, 60, None, None);

    let midday = windows.iter().find(|w| w.start == "12:00").unwrap();
    assert_eq!(midday.avg_score, 50.0);
    assert_eq!(midday.stability_value, 20.0);
    assert_eq!(midday.stability, Stability::Low);
}

#[test]
fn test_deadline_excludes_windows() {
    let series = night_day_series();
    let constraints = WindowConstraints::default().deadline("03:00");
    let windows = scan(&series, 60, Some(50.0), Some(&constraints));

    assert!(windows.iter().all(|w| w.end.as_str() <= "03:00"));
    assert!(windows.iter().any(|w| w.end == "03:00"));
    assert!(!windows.iter().any(|w| w.end == "03:10"));
}

#[test]
fn test_ranking_band() {
    let make = |start: &str, avg: f64, range: f64| TimeWindow {
        start: start.to_owned(),
        end: start.to_owned(),
        avg_score: avg,
        percentile: 50.0,
        delta_vs_now: None,
        stability: Stability::Medium,
        stability_value: range,
        trend: Trend::Stable,
    };

    let close = rank(vec![make("a", 71.0, 9.0), make("b", 70.0, 1.0)], 2);
    assert_eq!(close[0].start, "b");

    let far = rank(vec![make("a", 70.0, 1.0), make("b", 75.0, 9.0)], 2);
    assert_eq!(far[0].start, "b");
}

#[test]
fn test_precomputed_windows_bypass_scan() {
    let series = night_day_series();
    let precomputed = vec![TimeWindow {
        start: "14:00".to_owned(),
        end: "14:50".to_owned(),
        avg_score: 51.0,
        percentile: 60.0,
        delta_vs_now: Some(1.0),
        stability: Stability::Medium,
        stability_value: 8.0,
        trend: Trend::Ascending,
    }];

    let planner = Planner::new(GreenSlotConfig::default());
    let rec = planner.recommend(
        &series,
        &PlanRequest::default(),
        Some(precomputed.clone()),
    );

    assert_eq!(rec.source, WindowSource::Precomputed);
    assert_eq!(rec.windows, precomputed);
}

proptest! {
    #[test]
    fn prop_window_count(len in 0usize..160, duration in 1u32..300) {
        let series = build_series(&vec![50.0; len]);
        let w = window_size(duration);
        let expected = (len + 1).saturating_sub(w);
        prop_assert_eq!(scan(&series, duration, None, None).len(), expected);
    }

    #[test]
    fn prop_constant_window(score in 0.0f64..=100.0, buckets in 1usize..30) {
        let series = build_series(&vec![score; buckets]);
        let windows = scan(&series, (buckets as u32) * 10, Some(score), None);

        prop_assert_eq!(windows.len(), 1);
        let w = &windows[0];
        prop_assert!((w.avg_score - score).abs() < 1e-9);
        prop_assert_eq!(w.stability_value, 0.0);
        prop_assert_eq!(w.stability, Stability::High);
        prop_assert_eq!(w.trend, Trend::Stable);
    }

    #[test]
    fn prop_percentile_monotonic(
        scores in prop::collection::vec(0.0f64..=100.0, 0..200),
        p1 in 0.0f64..=100.0,
        p2 in 0.0f64..=100.0,
    ) {
        let series = build_series(&scores);
        let (lo, hi) = if p1 <= p2 { (p1, p2) } else { (p2, p1) };
        prop_assert!(percentile(&series, lo) <= percentile(&series, hi));
        prop_assert_eq!(percentile(&series, lo), percentile(&series, lo));
    }
}
