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

//! Edge adapters: where GreenSlot's scores come from and where start
//! decisions go.

pub mod csv_source;
pub mod decision_client;
pub mod errors;

pub use csv_source::{
    CsvScoreSource, FILE_PREFIX, file_date, latest_colored_csv, load_colored_csv,
    parse_colored_csv,
};
pub use decision_client::HttpDecisionClient;
pub use errors::{AdapterError, AdapterResult};
