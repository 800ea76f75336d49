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

//! Four-band color classification with hysteresis.
//!
//! Default banding:
//! - score >= p_high          -> green
//! - p_mid <= score < p_high  -> yellow
//! - p25 <= score < p_mid     -> orange
//! - score < p25              -> red
//!
//! When the previous bucket's color is known and the score still fits that
//! band, the previous color is kept. Orange keeps its color up to and
//! including `p_mid`, which is what damps flicker at the orange/yellow edge
//! when buckets are classified in sequence.

use greenslot_types::{ScoreColor, ScorePoint, Thresholds};

/// Color of a single score.
///
/// Pure: the caller threads `previous` explicitly from the last bucket.
pub fn classify(score: f64, thresholds: &Thresholds, previous: Option<ScoreColor>) -> ScoreColor {
    if let Some(previous) = previous
        && retains(previous, score, thresholds)
    {
        return previous;
    }

    band(score, thresholds)
}

/// Default banding without hysteresis. Non-finite scores fall through to red.
pub fn band(score: f64, thresholds: &Thresholds) -> ScoreColor {
    if score >= thresholds.p_high {
        ScoreColor::Green
    } else if score >= thresholds.p_mid {
        ScoreColor::Yellow
    } else if score >= thresholds.p25 {
        ScoreColor::Orange
    } else {
        ScoreColor::Red
    }
}

fn retains(previous: ScoreColor, score: f64, t: &Thresholds) -> bool {
    match previous {
        ScoreColor::Green => score >= t.p_high,
        ScoreColor::Yellow => score >= t.p_mid && score < t.p_high,
        ScoreColor::Orange => score >= t.p25 && score <= t.p_mid,
        ScoreColor::Red => score < t.p25,
    }
}

/// Classify every bucket in order, feeding each color into the next call.
///
/// Buckets without a valid score are red and do not move the carried color.
pub fn classify_series(series: &[ScorePoint], thresholds: &Thresholds) -> Vec<ScoreColor> {
    let mut previous = None;

    series
        .iter()
        .map(|point| match point.valid_score() {
            Some(score) => {
                let color = classify(score, thresholds, previous);
                previous = Some(color);
                color
            }
            None => ScoreColor::Red,
        })
        .collect()
}

/// Timeline colors: an upstream color wins, otherwise the sequential
/// classification. Precomputed colors also seed the hysteresis for the next
/// bucket.
pub fn timeline_colors(series: &[ScorePoint], thresholds: &Thresholds) -> Vec<ScoreColor> {
    let mut previous = None;

    series
        .iter()
        .map(|point| {
            let color = match (point.color, point.valid_score()) {
                (Some(upstream), _) => upstream,
                (None, Some(score)) => classify(score, thresholds, previous),
                (None, None) => return ScoreColor::Red,
            };
            previous = Some(color);
            color
        })
        .collect()
}

/// Fill in `color` on every point that lacks one
pub fn colorize(series: &mut [ScorePoint], thresholds: &Thresholds) {
    let colors = timeline_colors(series, thresholds);
    for (point, color) in series.iter_mut().zip(colors) {
        if point.color.is_none() {
            point.color = Some(color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const T: Thresholds = Thresholds {
        p25: 20.0,
        p_mid: 50.0,
        p_high: 80.0,
    };

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
    fn test_boundaries_without_history() {
        assert_eq!(classify(80.0, &T, None), ScoreColor::Green);
        assert_eq!(classify(79.99, &T, None), ScoreColor::Yellow);
        assert_eq!(classify(50.0, &T, None), ScoreColor::Yellow);
        assert_eq!(classify(49.99, &T, None), ScoreColor::Orange);
        assert_eq!(classify(20.0, &T, None), ScoreColor::Orange);
        assert_eq!(classify(19.99, &T, None), ScoreColor::Red);
    }

    #[test]
    fn test_previous_color_kept_while_it_still_fits() {
        assert_eq!(classify(85.0, &T, Some(ScoreColor::Green)), ScoreColor::Green);
        assert_eq!(classify(60.0, &T, Some(ScoreColor::Yellow)), ScoreColor::Yellow);
        assert_eq!(classify(10.0, &T, Some(ScoreColor::Red)), ScoreColor::Red);
    }

    #[test]
    fn test_orange_holds_at_mid_threshold() {
        assert_eq!(classify(50.0, &T, None), ScoreColor::Yellow);
        assert_eq!(classify(50.0, &T, Some(ScoreColor::Orange)), ScoreColor::Orange);
        assert_eq!(classify(50.01, &T, Some(ScoreColor::Orange)), ScoreColor::Yellow);
    }

    #[test]
    fn test_previous_color_dropped_when_band_left() {
        assert_eq!(classify(79.0, &T, Some(ScoreColor::Green)), ScoreColor::Yellow);
        assert_eq!(classify(15.0, &T, Some(ScoreColor::Yellow)), ScoreColor::Red);
        assert_eq!(classify(90.0, &T, Some(ScoreColor::Red)), ScoreColor::Green);
    }

    #[test]
    fn test_non_finite_score_is_red() {
        assert_eq!(band(f64::NAN, &T), ScoreColor::Red);
    }

    #[test]
    fn test_series_does_not_flicker_around_mid() {
        // Starts orange, then hovers on the orange/yellow edge
        let data = series(&[45.0, 50.0, 49.5, 50.0, 49.8, 50.0]);
        let colors = classify_series(&data, &T);
        assert!(colors.iter().all(|c| *c == ScoreColor::Orange), "{colors:?}");
    }

    #[test]
    fn test_series_matches_default_banding_without_edges() {
        let data = series(&[90.0, 60.0, 30.0, 10.0]);
        assert_eq!(
            classify_series(&data, &T),
            vec![
                ScoreColor::Green,
                ScoreColor::Yellow,
                ScoreColor::Orange,
                ScoreColor::Red
            ]
        );
    }

    #[test]
    fn test_missing_score_keeps_carried_color() {
        let data = series(&[45.0, f64::NAN, 50.0]);
        assert_eq!(
            classify_series(&data, &T),
            vec![ScoreColor::Orange, ScoreColor::Red, ScoreColor::Orange]
        );
    }

    #[test]
    fn test_colorize_keeps_upstream_colors() {
        let mut data = series(&[90.0, 60.0]);
        data[1].color = Some(ScoreColor::Red);

        colorize(&mut data, &T);

        assert_eq!(data[0].color, Some(ScoreColor::Green));
        assert_eq!(data[1].color, Some(ScoreColor::Red));
    }
}
