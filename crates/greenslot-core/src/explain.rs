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

//! Human-readable reasons attached to a recommended window.

use greenslot_types::{ScoreColor, TimeWindow};
use serde::Serialize;

// ============= Percentile wording =============

/// Short label for a window percentile ("top 5% today", "P42")
pub fn format_percentile(percentile: f64) -> String {
    let p = percentile.round();
    if p >= 90.0 {
        format!("top {}% today", 100.0 - p)
    } else if p >= 75.0 {
        "top 25% today".to_owned()
    } else {
        format!("P{p}")
    }
}

/// Share of the day this window beats, never below 1%
pub fn top_percent(percentile: f64) -> f64 {
    let p = if percentile.is_finite() { percentile } else { 0.0 };
    (100.0 - p).max(1.0)
}

/// Color a window would carry judging by its percentile alone
pub fn estimated_color(percentile: f64) -> ScoreColor {
    if percentile >= 70.0 {
        ScoreColor::Green
    } else if percentile >= 50.0 {
        ScoreColor::Yellow
    } else if percentile >= 25.0 {
        ScoreColor::Orange
    } else {
        ScoreColor::Red
    }
}

// ============= Emissions =============

/// Linear score-to-carbon-intensity model for one appliance cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmissionModel {
    /// gCO2/kWh at score 0
    pub intensity_at_0: f64,
    /// gCO2/kWh at score 100
    pub intensity_at_100: f64,
    pub kwh_per_cycle: f64,
    /// Car-equivalent emissions, g/km
    pub car_grams_per_km: f64,
}

impl Default for EmissionModel {
    fn default() -> Self {
        Self {
            intensity_at_0: 700.0,
            intensity_at_100: 50.0,
            kwh_per_cycle: 1.2,
            car_grams_per_km: 120.0,
        }
    }
}

impl EmissionModel {
    /// gCO2/kWh saved per score point gained
    pub fn grams_per_kwh_per_point(&self) -> f64 {
        (self.intensity_at_0 - self.intensity_at_100) / 100.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmissionsEstimate {
    pub grams: f64,
    pub car_km: f64,
}

impl EmissionsEstimate {
    pub fn format_mass(&self) -> String {
        if self.grams >= 1000.0 {
            format!("{:.2} kg", self.grams / 1000.0)
        } else {
            format!("{:.0} g", self.grams)
        }
    }

    pub fn format_distance(&self) -> String {
        if self.car_km < 1.0 {
            format!("{:.0} m", self.car_km * 1000.0)
        } else {
            format!("{:.1} km", self.car_km)
        }
    }
}

/// CO2 avoided by running in a window instead of now.
///
/// Only a positive score gain counts; an unknown delta saves nothing.
pub fn emissions_avoided(delta_vs_now: Option<f64>, model: &EmissionModel) -> EmissionsEstimate {
    let gain = delta_vs_now.filter(|d| d.is_finite()).unwrap_or(0.0).max(0.0);
    let grams = gain * model.grams_per_kwh_per_point() * model.kwh_per_cycle;

    EmissionsEstimate {
        grams,
        car_km: grams / model.car_grams_per_km,
    }
}

// ============= Reasons =============

/// Reasons to show under a recommended window
pub fn explain(window: &TimeWindow, model: &EmissionModel) -> Vec<String> {
    let color = estimated_color(window.percentile);
    let mut reasons = vec![format!(
        "Top {:.0}% of the day (P{:.0})",
        top_percent(window.percentile),
        window.percentile
    )];

    match window.delta_vs_now {
        Some(delta) => reasons.push(format!(
            "Average score {:.0}/100, {delta:+.2} vs now",
            window.avg_score
        )),
        None => reasons.push(format!("Average score {:.0}/100", window.avg_score)),
    }

    reasons.push(format!("{} Estimated color: {color}", color.dot()));
    reasons.push(format!(
        "Stability {} {} ({:.1} pt range), trend {} {}",
        window.stability.glyph(),
        window.stability.label(),
        window.stability_value,
        window.trend.glyph(),
        window.trend.label()
    ));

    if window.delta_vs_now.is_some() {
        let saved = emissions_avoided(window.delta_vs_now, model);
        reasons.push(format!(
            "Emissions avoided: ~{} (about {} by car, for {} kWh per cycle)",
            saved.format_mass(),
            saved.format_distance(),
            model.kwh_per_cycle
        ));
    }

    reasons
}
