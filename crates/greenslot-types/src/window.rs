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

use serde::{Deserialize, Serialize};

use crate::time::{BUCKET_MINUTES, label_minutes};

/// Categorical stability of a window, derived from its max-min score range.
///
/// Serialized with the Romanian labels the web front end displays; the
/// English names are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stability {
    #[serde(rename = "ridicată", alias = "high")]
    High,
    #[serde(rename = "medie", alias = "medium")]
    Medium,
    #[serde(rename = "scăzută", alias = "low")]
    Low,
}

impl Stability {
    pub fn label(self) -> &'static str {
        match self {
            Self::High => "ridicată",
            Self::Medium => "medie",
            Self::Low => "scăzută",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Self::High => "✓",
            Self::Medium => "~",
            Self::Low => "!",
        }
    }
}

/// Direction of the score inside a window (second half vs first half)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trend {
    #[serde(rename = "în creștere", alias = "ascending")]
    Ascending,
    #[serde(rename = "stabil", alias = "stable")]
    Stable,
    #[serde(rename = "în scădere", alias = "descending")]
    Descending,
}

impl Trend {
    pub fn label(self) -> &'static str {
        match self {
            Self::Ascending => "în creștere",
            Self::Stable => "stabil",
            Self::Descending => "în scădere",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Self::Ascending => "↑",
            Self::Stable => "→",
            Self::Descending => "↓",
        }
    }
}

/// A contiguous run of buckets evaluated as one candidate consumption slot.
///
/// `end` is the label of the last included bucket, not an exclusive bound.
/// Values are derived fresh on every query and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeWindow {
    pub start: String,
    pub end: String,
    /// Mean of the window's scores, full precision
    pub avg_score: f64,
    /// Rank of `avg_score` within the whole day, 0-100
    pub percentile: f64,
    /// `avg_score - current score`; `None` when the current score is unknown
    pub delta_vs_now: Option<f64>,
    pub stability: Stability,
    /// max - min of the window's scores (lower is steadier)
    pub stability_value: f64,
    pub trend: Trend,
}

impl TimeWindow {
    /// Minutes of wall clock covered, counting the last bucket in full
    pub fn span_minutes(&self) -> Option<u32> {
        let start = label_minutes(&self.start)?;
        let end = label_minutes(&self.end)?;
        end.checked_sub(start).map(|d| d + BUCKET_MINUTES)
    }
}

/// Percentile cut values used to band scores into colors.
///
/// Recomputed for every series version; never cached across series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thresholds {
    /// Below this a score is red
    pub p25: f64,
    /// At or above this a score is at least yellow
    pub p_mid: f64,
    /// At or above this a score is green
    pub p_high: f64,
}

impl Thresholds {
    pub fn new(p25: f64, p_mid: f64, p_high: f64) -> Self {
        Self { p25, p_mid, p_high }
    }
}

/// Optional limits on where a window may sit in the day.
///
/// All bounds are compared lexicographically against `HH:MM` labels, so a
/// window crossing midnight is not handled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowConstraints {
    /// Reject windows starting before this label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub earliest_after: Option<String>,
    /// Reject windows starting after this label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_before: Option<String>,
    /// Reject windows whose last bucket is after this label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
}

impl WindowConstraints {
    #[must_use]
    pub fn earliest_after(mut self, label: impl Into<String>) -> Self {
        self.earliest_after = Some(label.into());
        self
    }

    #[must_use]
    pub fn latest_before(mut self, label: impl Into<String>) -> Self {
        self.latest_before = Some(label.into());
        self
    }

    #[must_use]
    pub fn deadline(mut self, label: impl Into<String>) -> Self {
        self.deadline = Some(label.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.earliest_after.is_none() && self.latest_before.is_none() && self.deadline.is_none()
    }

    /// Whether a window bounded by `start`..=`end` passes every set bound
    pub fn admits(&self, start: &str, end: &str) -> bool {
        if let Some(earliest) = self.earliest_after.as_deref()
            && start < earliest
        {
            return false;
        }
        if let Some(latest) = self.latest_before.as_deref()
            && start > latest
        {
            return false;
        }
        if let Some(deadline) = self.deadline.as_deref()
            && end > deadline
        {
            return false;
        }
        true
    }
}
