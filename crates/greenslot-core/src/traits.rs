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

//! Seams to the collaborators at the edges of the core.
//!
//! Algorithms only ever see resolved data; these traits are how the binary
//! plugs in a score feed and the start-decision backend.

use anyhow::Result;
use async_trait::async_trait;
use greenslot_types::{DecisionRequest, DecisionResponse, ScorePoint};

/// Source of one day's score series
pub trait ScoreSource: Send + Sync {
    /// Load the series, ordered by time
    fn load_series(&self) -> Result<Vec<ScorePoint>>;

    /// Get source name for logging
    fn name(&self) -> &str;
}

/// External service that decides whether an appliance starts now.
/// The threshold policy lives entirely behind this trait.
#[async_trait]
pub trait DecisionService: Send + Sync {
    /// Ask for a decision; transport and protocol failures are errors
    async fn request_decision(&self, request: &DecisionRequest) -> Result<DecisionResponse>;

    /// Get service name for logging
    fn name(&self) -> &str;
}
