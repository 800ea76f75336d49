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

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the score and decision adapters
#[derive(Error, Debug)]
pub enum AdapterError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Required column '{0}' missing from CSV header")]
    MissingColumn(&'static str),

    #[error("No colored prediction file found in {0}")]
    NoDataFile(PathBuf),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Decision service returned error status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type AdapterResult<T> = Result<T, AdapterError>;
