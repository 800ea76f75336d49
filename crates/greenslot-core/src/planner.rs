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

//! One-call recommendation over a day's series.
//!
//! Resolves thresholds, the current reading and the candidate windows in the
//! order a caller needs them, so the pieces always agree with each other.

use chrono::NaiveDateTime;
use greenslot_types::{ScoreColor, ScorePoint, Thresholds, TimeWindow, WindowConstraints};
use serde::Serialize;
use tracing::{debug, info};

use crate::bucket::{CurrentReading, current_reading};
use crate::classify::timeline_colors;
use crate::config::GreenSlotConfig;
use crate::overview::{DayOverview, overview};
use crate::percentile::thresholds;
use crate::ranker::rank_with;
use crate::scanner::scan_with;

/// What the caller wants a window for
#[derive(Debug, Clone, Default)]
pub struct PlanRequest {
    /// Defaults to the configured duration when unset
    pub duration_minutes: Option<u32>,
    pub constraints: Option<WindowConstraints>,
    /// Wall-clock instant used to find the current bucket
    pub now: Option<NaiveDateTime>,
    /// Explicit current score; wins over the `now` lookup
    pub current_score: Option<f64>,
    /// Defaults to the configured top N when unset
    pub top_n: Option<usize>,
}

/// Where the recommended windows came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowSource {
    Computed,
    Precomputed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub thresholds: Thresholds,
    pub current: Option<CurrentReading>,
    /// Score the deltas were computed against, if known
    pub current_score: Option<f64>,
    pub windows: Vec<TimeWindow>,
    pub source: WindowSource,
    /// One color per input point, in order
    pub colors: Vec<ScoreColor>,
    pub overview: Option<DayOverview>,
}

#[derive(Debug, Clone, Default)]
pub struct Planner {
    config: GreenSlotConfig,
}

impl Planner {
    pub fn new(config: GreenSlotConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GreenSlotConfig {
        &self.config
    }

    pub fn thresholds(&self, series: &[ScorePoint]) -> Thresholds {
        thresholds(series, &self.config.thresholds)
    }

    /// Build a recommendation.
    ///
    /// A non-empty `precomputed` list is returned as is, bypassing scan and
    /// rank; an empty one falls back to computing windows.
    pub fn recommend(
        &self,
        series: &[ScorePoint],
        request: &PlanRequest,
        precomputed: Option<Vec<TimeWindow>>,
    ) -> Recommendation {
        let windows_config = &self.config.windows;
        let thresholds = self.thresholds(series);

        let current = request.now.and_then(|now| current_reading(series, &now));
        let current_score = request
            .current_score
            .filter(|s| s.is_finite())
            .or_else(|| current.as_ref().map(|reading| reading.score));

        if current_score.is_none() {
            debug!("No current score, window deltas stay unset");
        }

        let (windows, source) = match precomputed {
            Some(windows) if !windows.is_empty() => (windows, WindowSource::Precomputed),
            _ => {
                let duration = request
                    .duration_minutes
                    .unwrap_or(windows_config.default_duration_minutes);
                let candidates = scan_with(
                    series,
                    duration,
                    current_score,
                    request.constraints.as_ref(),
                    windows_config,
                );
                let top_n = request.top_n.unwrap_or(windows_config.top_n);
                (
                    rank_with(candidates, top_n, windows_config.score_band),
                    WindowSource::Computed,
                )
            }
        };

        info!(
            "Recommendation over {} points: {} windows ({:?}), current score {:?}",
            series.len(),
            windows.len(),
            source,
            current_score
        );

        Recommendation {
            thresholds,
            colors: timeline_colors(series, &thresholds),
            overview: overview(series, current.as_ref().map(|c| c.index), windows_config),
            current,
            current_score,
            windows,
            source,
        }
    }
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

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_current_score_from_now() {
        let data = series(&[30.0, 30.0, 80.0, 80.0, 30.0, 30.0]);
        let request = PlanRequest {
            duration_minutes: Some(20),
            now: Some(at(0, 1)),
            top_n: Some(1),
            ..PlanRequest::default()
        };

        let rec = Planner::default().recommend(&data, &request, None);
        assert_eq!(rec.source, WindowSource::Computed);
        assert_eq!(rec.current_score, Some(30.0));
        assert_eq!(rec.current.as_ref().unwrap().key, "00:00");
        assert_eq!(rec.windows.len(), 1);
        assert_eq!(rec.windows[0].start, "00:20");
        assert_eq!(rec.windows[0].delta_vs_now, Some(50.0));
        assert_eq!(rec.colors.len(), data.len());
        assert_eq!(rec.overview.unwrap().next_better.unwrap().time, "00:20");
    }

    #[test]
    fn test_explicit_current_score_wins() {
        let data = series(&[30.0, 40.0, 50.0]);
        let request = PlanRequest {
            duration_minutes: Some(10),
            now: Some(at(0, 0)),
            current_score: Some(45.0),
            ..PlanRequest::default()
        };

        let rec = Planner::default().recommend(&data, &request, None);
        assert_eq!(rec.current_score, Some(45.0));
        assert_eq!(rec.windows[0].delta_vs_now, Some(5.0));
    }

    #[test]
    fn test_unknown_now_leaves_deltas_unset() {
        let data = series(&[30.0, 40.0, 50.0]);
        let request = PlanRequest {
            duration_minutes: Some(10),
            now: Some(at(18, 0)),
            ..PlanRequest::default()
        };

        let rec = Planner::default().recommend(&data, &request, None);
        assert!(rec.current.is_none());
        assert!(rec.current_score.is_none());
        assert!(!rec.windows.is_empty());
        assert!(rec.windows.iter().all(|w| w.delta_vs_now.is_none()));
    }

    #[test]
    fn test_empty_precomputed_falls_back_to_scan() {
        let data = series(&[30.0, 40.0, 50.0]);
        let request = PlanRequest {
            duration_minutes: Some(10),
            ..PlanRequest::default()
        };

        let rec = Planner::default().recommend(&data, &request, Some(Vec::new()));
        assert_eq!(rec.source, WindowSource::Computed);
        assert_eq!(rec.windows[0].start, "00:20");
    }

    #[test]
    fn test_recommendation_wire_names() {
        let data = series(&[30.0, 40.0, 50.0]);
        let request = PlanRequest {
            duration_minutes: Some(20),
            current_score: Some(40.0),
            ..PlanRequest::default()
        };

        let rec = Planner::default().recommend(&data, &request, None);
        let json = serde_json::to_value(&rec).unwrap();

        assert_eq!(json["source"], "computed");
        assert_eq!(json["currentScore"], 40.0);
        assert_eq!(json["thresholds"]["pMid"], 40.0);
        assert_eq!(json["windows"][0]["avgScore"], 45.0);
        assert_eq!(json["windows"][0]["deltaVsNow"], 5.0);
        assert_eq!(json["windows"][0]["stability"], "medie");
        assert_eq!(json["colors"][2], "green");
    }

    #[test]
    fn test_empty_series_degrades_gracefully() {
        let rec = Planner::default().recommend(&[], &PlanRequest::default(), None);
        assert!(rec.windows.is_empty());
        assert!(rec.colors.is_empty());
        assert!(rec.overview.is_none());
        assert_eq!(rec.thresholds, Thresholds::new(0.0, 0.0, 0.0));
    }
}
