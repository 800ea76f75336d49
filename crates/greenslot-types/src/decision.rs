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

//! Wire types for the external start-decision service.
//!
//! The service owns the policy for whether an appliance starts now. GreenSlot
//! only builds the request and interprets the answer into one of the outcomes
//! a user must be able to tell apart.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::score::{ScoreColor, deserialize_lenient_color};

/// Payload posted to the decision service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionRequest {
    /// Instant the decision is about, ISO-8601 with offset
    pub when: DateTime<FixedOffset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency: Option<bool>,
}

impl DecisionRequest {
    /// Regular scheduled start check
    pub fn scheduled(when: DateTime<FixedOffset>) -> Self {
        Self {
            when,
            emergency: None,
        }
    }

    /// Emergency override request
    pub fn emergency(when: DateTime<FixedOffset>) -> Self {
        Self {
            when,
            emergency: Some(true),
        }
    }
}

/// Interval details echoed back by the decision service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecisionDetails {
    #[serde(rename = "Start", default)]
    pub start: Option<String>,
    #[serde(rename = "End", default)]
    pub end: Option<String>,
    #[serde(rename = "Scor_pred", default)]
    pub score: Option<f64>,
    #[serde(
        rename = "Color",
        default,
        deserialize_with = "deserialize_lenient_color"
    )]
    pub color: Option<ScoreColor>,
}

/// Raw decision service response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecisionResponse {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub triggered: bool,
    #[serde(default)]
    pub inside_interval: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<DecisionDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// What the user is told after asking for a start
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DecisionOutcome {
    /// The appliance was started now
    Triggered { details: Option<DecisionDetails> },
    /// Inside an allowed interval, but conditions did not warrant starting
    InsideInterval { details: Option<DecisionDetails> },
    /// No interval data covers the requested instant
    Indeterminate,
    /// The service could not be reached or answered garbage. Never a trigger.
    Failed { reason: String },
}

impl DecisionOutcome {
    pub fn is_triggered(&self) -> bool {
        matches!(self, Self::Triggered { .. })
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// User-facing message.
    ///
    /// `InsideInterval` and `Indeterminate` intentionally share the neutral
    /// message; callers that need to tell them apart match on the variant.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Triggered { .. } => "Started now: conditions are favorable.",
            Self::InsideInterval { .. } | Self::Indeterminate => {
                "Not started: conditions do not call for an immediate start."
            }
            Self::Failed { .. } => "Could not reach the decision service. Nothing was started.",
        }
    }
}
