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

use chrono::{NaiveDateTime, Timelike};
use greenslot_types::{ScoreColor, ScorePoint, bucket_label};
use serde::Serialize;

/// Label of the bucket `now` falls into.
///
/// The minute is rounded to the nearest ten and capped at 50, so 10:57 maps
/// to "10:50" rather than rolling over to the next hour.
pub fn current_bucket_key<T: Timelike>(now: &T) -> String {
    let minute = ((now.minute() + 5) / 10).min(5) * 10;
    bucket_label(now.hour(), minute)
}

/// Position of the bucket labelled `key`, if the series has one
pub fn find_bucket(series: &[ScorePoint], key: &str) -> Option<usize> {
    series.iter().position(|point| point.time == key)
}

/// The bucket matching "now" together with its score.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentReading {
    pub key: String,
    pub index: usize,
    pub score: f64,
    pub color: Option<ScoreColor>,
    pub bucket_start: NaiveDateTime,
}

/// Look up the current bucket.
///
/// `None` is the legitimate "no data yet" state: the series has no bucket for
/// `now` or the bucket carries no usable score.
pub fn current_reading(series: &[ScorePoint], now: &NaiveDateTime) -> Option<CurrentReading> {
    let key = current_bucket_key(now);
    let index = find_bucket(series, &key)?;
    let point = &series[index];
    let score = point.valid_score()?;

    Some(CurrentReading {
        key,
        index,
        score,
        color: point.color,
        bucket_start: point.timestamp,
    })
}
