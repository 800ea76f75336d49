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

use anyhow::Result;
use chrono::{DateTime, FixedOffset};
use greenslot_types::{DecisionOutcome, DecisionRequest, DecisionResponse};
use tracing::{info, warn};

use crate::traits::DecisionService;

/// Map a service answer onto the outcome shown to the user.
///
/// A failed call or an `ok: false` answer is always `Failed`, even if the
/// body claims `triggered`.
pub fn interpret(response: Result<DecisionResponse>) -> DecisionOutcome {
    let response = match response {
        Ok(response) => response,
        Err(e) => {
            return DecisionOutcome::Failed {
                reason: format!("{e:#}"),
            };
        }
    };

    if !response.ok {
        return DecisionOutcome::Failed {
            reason: response
                .error
                .unwrap_or_else(|| "decision service reported failure".to_owned()),
        };
    }

    if response.triggered {
        DecisionOutcome::Triggered {
            details: response.details,
        }
    } else if response.inside_interval {
        DecisionOutcome::InsideInterval {
            details: response.details,
        }
    } else {
        DecisionOutcome::Indeterminate
    }
}

/// Front door for start requests, independent of the transport.
#[derive(Debug)]
pub struct DecisionGate<S> {
    service: S,
}

impl<S: DecisionService> DecisionGate<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Ask whether to start at `when`; never returns an error
    pub async fn decide(&self, when: DateTime<FixedOffset>, emergency: bool) -> DecisionOutcome {
        let request = if emergency {
            DecisionRequest::emergency(when)
        } else {
            DecisionRequest::scheduled(when)
        };

        let outcome = interpret(self.service.request_decision(&request).await);

        match &outcome {
            DecisionOutcome::Failed { reason } => {
                warn!("Decision via {} failed: {}", self.service.name(), reason);
            }
            other => info!(
                "Decision via {} for {} (emergency={}): {}",
                self.service.name(),
                when,
                emergency,
                other.message()
            ),
        }

        outcome
    }
}
