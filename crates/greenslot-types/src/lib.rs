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

//! Shared data model for GreenSlot.
//!
//! A day is a series of 144 ten-minute buckets, each carrying a favorability
//! score (0-100, higher means a cleaner grid mix). Everything here is plain
//! serializable data; the algorithms that classify and rank it live in
//! `greenslot-core`.

pub mod decision;
pub mod score;
pub mod time;
pub mod window;

pub use decision::{DecisionDetails, DecisionOutcome, DecisionRequest, DecisionResponse};
pub use score::{ScoreColor, ScorePoint, UnknownColor};
pub use time::{BUCKET_MINUTES, BUCKETS_PER_DAY, bucket_label, label_from_index, label_minutes};
pub use window::{Stability, Thresholds, TimeWindow, Trend, WindowConstraints};
