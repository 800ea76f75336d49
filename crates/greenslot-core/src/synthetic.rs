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

//! Deterministic synthetic score day.
//!
//! Produces a plausible 144-bucket day (clean night, morning and evening
//! peaks) for demos and tests when no prediction file is at hand. The same
//! seed always produces the same day.

use chrono::{NaiveDate, NaiveTime};
use greenslot_types::{BUCKET_MINUTES, BUCKETS_PER_DAY, ScorePoint};
use tracing::debug;

use crate::traits::ScoreSource;

pub const DEFAULT_SEED: u32 = 12345;

/// Maximum deviation added to the hourly base score
const JITTER: f64 = 15.0;

/// Small seeded PRNG (mulberry32), uniform in [0, 1)
#[derive(Debug, Clone)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    pub fn next_f64(&mut self) -> f64 {
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        f64::from(t ^ (t >> 14)) / 4_294_967_296.0
    }
}

/// Typical score for an hour of the day before jitter
pub fn base_score(hour: u32) -> f64 {
    match hour {
        0..6 => 75.0,  // night
        6..9 => 35.0,  // morning peak
        9..17 => 60.0, // day
        17..21 => 30.0, // evening peak
        _ => 70.0,     // late evening
    }
}

/// Generate a full day of whole-number scores for `date`
pub fn generate_day(date: NaiveDate, seed: u32) -> Vec<ScorePoint> {
    let mut rng = Mulberry32::new(seed);
    let buckets_per_hour = (60 / BUCKET_MINUTES) as usize;

    (0..BUCKETS_PER_DAY)
        .filter_map(|index| {
            let hour = (index / buckets_per_hour) as u32;
            let minute = (index % buckets_per_hour) as u32 * BUCKET_MINUTES;

            let jitter = rng.next_f64() * 2.0 * JITTER - JITTER;
            let score = (base_score(hour) + jitter).clamp(0.0, 100.0).round();

            let time = NaiveTime::from_hms_opt(hour, minute, 0)?;
            Some(ScorePoint::new(date.and_time(time), score))
        })
        .collect()
}

/// Score source that serves a generated day
#[derive(Debug, Clone)]
pub struct SyntheticSource {
    pub date: NaiveDate,
    pub seed: u32,
}

impl SyntheticSource {
    pub fn new(date: NaiveDate, seed: u32) -> Self {
        Self { date, seed }
    }
}

impl ScoreSource for SyntheticSource {
    fn load_series(&self) -> anyhow::Result<Vec<ScorePoint>> {
        debug!("Generating synthetic day {} (seed {})", self.date, self.seed);
        Ok(generate_day(self.date, self.seed))
    }

    fn name(&self) -> &str {
        "synthetic"
    }
}
