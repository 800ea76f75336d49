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

//! Loader for the colored next-day prediction files.
//!
//! The prediction job writes one `next_day_predictions_colored_YYYY-MM-DD.csv`
//! per day with a `Data` timestamp column, the predicted `Scor_pred` score and
//! an optional precomputed `Color`.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use greenslot_core::ScoreSource;
use greenslot_types::{ScoreColor, ScorePoint};
use tracing::{debug, info, warn};

use crate::errors::{AdapterError, AdapterResult};

pub const FILE_PREFIX: &str = "next_day_predictions_colored_";
const FILE_SUFFIX: &str = ".csv";

const TIMESTAMP_COLUMN: &str = "Data";
const SCORE_COLUMN: &str = "Scor_pred";
const COLOR_COLUMN: &str = "Color";

const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Date encoded in a prediction file name, if it follows the naming scheme
pub fn file_date(path: &Path) -> Option<NaiveDate> {
    let name = path.file_name()?.to_str()?;
    let date = name.strip_prefix(FILE_PREFIX)?.strip_suffix(FILE_SUFFIX)?;
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

/// Newest prediction file in `dir`, judged by the date in its name
pub fn latest_colored_csv(dir: impl AsRef<Path>) -> AdapterResult<PathBuf> {
    let dir = dir.as_ref();
    let entries = std::fs::read_dir(dir).map_err(|source| AdapterError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter_map(|path| file_date(&path).map(|date| (date, path)))
        .max_by_key(|(date, _)| *date)
        .map(|(date, path)| {
            debug!("Latest prediction file is for {}: {}", date, path.display());
            path
        })
        .ok_or_else(|| AdapterError::NoDataFile(dir.to_path_buf()))
}

/// Load a prediction file from disk
pub fn load_colored_csv(path: impl AsRef<Path>) -> AdapterResult<Vec<ScorePoint>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| AdapterError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let series = parse_colored_csv(file)?;
    info!("Loaded {} score points from {}", series.len(), path.display());
    Ok(series)
}

/// Parse prediction CSV content.
///
/// Rows with an unparsable timestamp or score are skipped. Scores are rounded
/// to two decimals and unknown colors are dropped. The result is ordered by
/// timestamp.
pub fn parse_colored_csv<R: Read>(input: R) -> AdapterResult<Vec<ScorePoint>> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(input);

    let headers = reader.headers()?.clone();
    let column = |name: &'static str| headers.iter().position(|h| h == name);
    let timestamp_idx =
        column(TIMESTAMP_COLUMN).ok_or(AdapterError::MissingColumn(TIMESTAMP_COLUMN))?;
    let score_idx = column(SCORE_COLUMN).ok_or(AdapterError::MissingColumn(SCORE_COLUMN))?;
    let color_idx = column(COLOR_COLUMN);

    let mut series = Vec::new();
    let mut skipped = 0usize;

    for result in reader.records() {
        let record = result?;

        let Some(timestamp) = record.get(timestamp_idx).and_then(parse_timestamp) else {
            skipped += 1;
            continue;
        };
        let Some(score) = record
            .get(score_idx)
            .and_then(|raw| raw.parse::<f64>().ok())
            .filter(|s| s.is_finite())
        else {
            skipped += 1;
            continue;
        };

        let mut point = ScorePoint::new(timestamp, round2(score));
        point.color = color_idx
            .and_then(|idx| record.get(idx))
            .and_then(ScoreColor::parse_lenient);
        series.push(point);
    }

    if skipped > 0 {
        warn!("Skipped {} malformed prediction rows", skipped);
    }

    series.sort_by_key(|point| point.timestamp);
    Ok(series)
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Score source backed by the prediction files in a directory or one file
#[derive(Debug, Clone)]
pub struct CsvScoreSource {
    location: CsvLocation,
}

#[derive(Debug, Clone)]
enum CsvLocation {
    File(PathBuf),
    LatestIn(PathBuf),
}

impl CsvScoreSource {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            location: CsvLocation::File(path.into()),
        }
    }

    /// Always read the newest file in `dir`
    pub fn latest_in(dir: impl Into<PathBuf>) -> Self {
        Self {
            location: CsvLocation::LatestIn(dir.into()),
        }
    }
}

impl ScoreSource for CsvScoreSource {
    fn load_series(&self) -> anyhow::Result<Vec<ScorePoint>> {
        let path = match &self.location {
            CsvLocation::File(path) => path.clone(),
            CsvLocation::LatestIn(dir) => latest_colored_csv(dir)?,
        };
        Ok(load_colored_csv(path)?)
    }

    fn name(&self) -> &str {
        "csv"
    }
}
