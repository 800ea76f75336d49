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

use std::fmt::Write as _;

use comfy_table::{Attribute, Cell, Color, Table, presets::UTF8_FULL};
use greenslot_core::{
    EmissionModel, Recommendation, WindowSource, explain, format_percentile, point_percentile,
};
use greenslot_types::{DecisionOutcome, ScoreColor, ScorePoint};

fn table_color(color: ScoreColor) -> Color {
    match color {
        ScoreColor::Green => Color::Green,
        ScoreColor::Yellow => Color::Yellow,
        ScoreColor::Orange => Color::DarkYellow,
        ScoreColor::Red => Color::Red,
    }
}

fn header(labels: &[&str]) -> Vec<Cell> {
    labels
        .iter()
        .map(|label| Cell::new(label).add_attribute(Attribute::Bold))
        .collect()
}

/// Ranked windows plus the day context around them
pub fn format_recommendation(rec: &Recommendation, show_reasons: bool) -> String {
    let mut output = String::new();

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(header(&[
        "#",
        "Window",
        "Avg\nscore",
        "Percentile",
        "Δ vs\nnow",
        "Stability",
        "Trend",
    ]));

    for (rank, window) in rec.windows.iter().enumerate() {
        let span = format!("{} - {}", window.start, window.end);
        let span_cell = if rank == 0 {
            Cell::new(span)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold)
        } else {
            Cell::new(span)
        };

        table.add_row(vec![
            Cell::new(rank + 1),
            span_cell,
            Cell::new(format!("{:.1}", window.avg_score)),
            Cell::new(format_percentile(window.percentile)),
            Cell::new(
                window
                    .delta_vs_now
                    .map_or_else(|| "-".to_owned(), |d| format!("{d:+.1}")),
            ),
            Cell::new(format!(
                "{} {} ({:.1})",
                window.stability.glyph(),
                window.stability.label(),
                window.stability_value
            )),
            Cell::new(format!("{} {}", window.trend.glyph(), window.trend.label())),
        ]);
    }

    if rec.windows.is_empty() {
        output.push_str("No window of that length fits the day and constraints.\n");
    } else {
        output.push_str(&table.to_string());
        output.push('\n');
    }

    let source = match rec.source {
        WindowSource::Computed => "computed",
        WindowSource::Precomputed => "precomputed upstream",
    };
    let _ = writeln!(
        output,
        "Windows: {source} | Thresholds: P25 {:.1} / mid {:.1} / high {:.1}",
        rec.thresholds.p25, rec.thresholds.p_mid, rec.thresholds.p_high
    );

    match (&rec.current, rec.current_score) {
        (Some(current), Some(score)) => {
            let color = current
                .color
                .or_else(|| rec.colors.get(current.index).copied());
            let _ = writeln!(
                output,
                "Now ({}): {:.1} {}",
                current.key,
                score,
                color.map_or("", ScoreColor::dot)
            );
        }
        (None, Some(score)) => {
            let _ = writeln!(output, "Now: {score:.1}");
        }
        _ => output.push_str("Now: no score yet for the current bucket\n"),
    }

    if let Some(overview) = &rec.overview {
        let _ = writeln!(
            output,
            "Day range: {:.1} - {:.1} (mean {:.1}, {} points)",
            overview.min, overview.max, overview.mean, overview.valid_points
        );
        if overview.is_subtle {
            output.push_str("Differences today are small: any green window is fine.\n");
        }
        if let Some(better) = &overview.next_better {
            let _ = writeln!(
                output,
                "Next clearly better bucket: {} ({:.0}) in {} min",
                better.time, better.score, better.minutes_away
            );
        }
    }

    if show_reasons && let Some(best) = rec.windows.first() {
        output.push_str("\nWhy this window:\n");
        for reason in explain(best, &EmissionModel::default()) {
            let _ = writeln!(output, "  - {reason}");
        }
    }

    output
}

/// Hour-by-hour grid of bucket colors
pub fn format_timeline(series: &[ScorePoint], colors: &[ScoreColor]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(header(&["Hour", ":00", ":10", ":20", ":30", ":40", ":50"]));

    let mut rows: Vec<(String, Vec<Cell>)> = Vec::new();
    for (point, color) in series.iter().zip(colors) {
        let hour = point.time.get(..2).unwrap_or("??").to_owned();
        let cell = match point.valid_score() {
            Some(score) => Cell::new(format!(
                "{} {:.0} P{:.0}",
                color.dot(),
                score,
                point_percentile(series, score)
            ))
            .fg(table_color(*color)),
            None => Cell::new("-"),
        };

        match rows.last_mut() {
            Some((last_hour, cells)) if *last_hour == hour => cells.push(cell),
            _ => rows.push((hour, vec![cell])),
        }
    }

    for (hour, cells) in rows {
        let mut row = vec![Cell::new(format!("{hour}h")).add_attribute(Attribute::Bold)];
        row.extend(cells);
        table.add_row(row);
    }

    let mut output = table.to_string();
    output.push('\n');

    for color in ScoreColor::ALL {
        let count = colors.iter().filter(|c| **c == color).count();
        let _ = write!(
            output,
            "{} {} {}  ",
            color.dot(),
            color.localized_name(),
            count
        );
    }
    output.push('\n');
    output
}

pub fn format_decision(outcome: &DecisionOutcome) -> String {
    let mut output = String::from(outcome.message());
    output.push('\n');

    let details = match outcome {
        DecisionOutcome::Triggered { details } | DecisionOutcome::InsideInterval { details } => {
            details.as_ref()
        }
        DecisionOutcome::Indeterminate => None,
        DecisionOutcome::Failed { reason } => {
            let _ = writeln!(output, "Reason: {reason}");
            None
        }
    };

    if let Some(details) = details {
        let _ = writeln!(
            output,
            "Interval: {} - {} | Score: {} | Color: {}",
            details.start.as_deref().unwrap_or("?"),
            details.end.as_deref().unwrap_or("?"),
            details.score.map_or_else(|| "?".to_owned(), |s| format!("{s:.1}")),
            details.color.map_or("?", ScoreColor::as_str)
        );
    }

    output
}
