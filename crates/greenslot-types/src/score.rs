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

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize};

use crate::time::bucket_label;

// ============= Favorability Colors =============

/// Discrete favorability band of a score, best first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreColor {
    Green,
    Yellow,
    Orange,
    Red,
}

/// Returned when a color name is not one of green/yellow/orange/red
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownColor(pub String);

impl fmt::Display for UnknownColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown score color '{}'", self.0)
    }
}

impl std::error::Error for UnknownColor {}

impl ScoreColor {
    pub const ALL: [ScoreColor; 4] = [Self::Green, Self::Yellow, Self::Orange, Self::Red];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Orange => "orange",
            Self::Red => "red",
        }
    }

    /// Timeline swatch color
    pub fn hex(self) -> &'static str {
        match self {
            Self::Green => "#2E8540",
            Self::Yellow => "#FFFF00",
            Self::Orange => "#FFA500",
            Self::Red => "#D0021B",
        }
    }

    pub fn dot(self) -> &'static str {
        match self {
            Self::Green => "🟢",
            Self::Yellow => "🟡",
            Self::Orange => "🟠",
            Self::Red => "🔴",
        }
    }

    /// Romanian display name used by the web front end
    pub fn localized_name(self) -> &'static str {
        match self {
            Self::Green => "Verde",
            Self::Yellow => "Galben",
            Self::Orange => "Portocaliu",
            Self::Red => "Roșu",
        }
    }

    /// Case- and whitespace-insensitive parse; `None` for anything unrecognized
    pub fn parse_lenient(value: &str) -> Option<Self> {
        value.parse().ok()
    }
}

impl fmt::Display for ScoreColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScoreColor {
    type Err = UnknownColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "green" => Ok(Self::Green),
            "yellow" => Ok(Self::Yellow),
            "orange" => Ok(Self::Orange),
            "red" => Ok(Self::Red),
            other => Err(UnknownColor(other.to_owned())),
        }
    }
}

/// Deserialize an optional color, mapping unknown or empty strings to `None`
/// instead of failing the whole document.
pub fn deserialize_lenient_color<'de, D>(deserializer: D) -> Result<Option<ScoreColor>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(ScoreColor::parse_lenient))
}

fn deserialize_score<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<f64> = Option::deserialize(deserializer)?;
    Ok(raw.unwrap_or(f64::NAN))
}

// ============= Score Points =============

/// One 10-minute bucket of the day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScorePoint {
    /// Wall-clock bucket label, `HH:MM`
    pub time: String,

    /// Favorability score, 0-100. Missing values are carried as NaN and
    /// skipped by every computation.
    #[serde(deserialize_with = "deserialize_score")]
    pub score: f64,

    /// Instant this bucket starts at
    pub timestamp: NaiveDateTime,

    /// Precomputed color, if the upstream source supplied one
    #[serde(
        default,
        deserialize_with = "deserialize_lenient_color",
        skip_serializing_if = "Option::is_none"
    )]
    pub color: Option<ScoreColor>,
}

impl ScorePoint {
    /// Build a point for `timestamp`, deriving the label and clamping the
    /// score into 0-100. Non-finite scores are kept as missing.
    pub fn new(timestamp: NaiveDateTime, score: f64) -> Self {
        let score = if score.is_finite() {
            score.clamp(0.0, 100.0)
        } else {
            f64::NAN
        };

        Self {
            time: bucket_label(timestamp.hour(), timestamp.minute()),
            score,
            timestamp,
            color: None,
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: ScoreColor) -> Self {
        self.color = Some(color);
        self
    }

    /// The score if it is usable, clamped into 0-100
    pub fn valid_score(&self) -> Option<f64> {
        self.score
            .is_finite()
            .then(|| self.score.clamp(0.0, 100.0))
    }
}
