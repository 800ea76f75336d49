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

mod args;
mod formatters;

use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime};
use clap::Parser;
use greenslot_adapters::{CsvScoreSource, HttpDecisionClient};
use greenslot_core::{
    DecisionGate, GreenSlotConfig, PlanRequest, Planner, ScoreSource, SyntheticSource,
    timeline_colors,
};
use greenslot_types::{ScorePoint, TimeWindow, WindowConstraints};
use tracing::{debug, info};
use tracing_subscriber::FmtSubscriber;

use crate::args::{Cli, Commands, DecideArgs, SourceArgs, TimelineArgs, WindowsArgs};
use crate::formatters::{format_decision, format_recommendation, format_timeline};

fn main() -> Result<()> {
    // Respects RUST_LOG, defaults to info
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to install tracing subscriber")?;

    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Windows(args) => windows_command(args, load_config(config_path)?),
        Commands::Timeline(args) => timeline_command(&args, load_config(config_path)?),
        Commands::Decide(args) => decide_command(args, load_config(config_path)?),
        Commands::ExampleConfig => {
            print!("{}", GreenSlotConfig::example_toml());
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<GreenSlotConfig> {
    let config = match path {
        Some(path) => GreenSlotConfig::from_file(path)?,
        None => {
            debug!("No config file given, using defaults");
            GreenSlotConfig::default()
        }
    };
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn load_series(args: &SourceArgs, config: &GreenSlotConfig) -> Result<Vec<ScorePoint>> {
    let source: Box<dyn ScoreSource> = if args.demo {
        let date = match &args.date {
            Some(date) => NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .with_context(|| format!("Invalid --date '{date}', expected YYYY-MM-DD"))?,
            None => Local::now().date_naive(),
        };
        Box::new(SyntheticSource::new(date, args.seed))
    } else if let Some(path) = &args.csv {
        Box::new(CsvScoreSource::file(path))
    } else {
        let dir = args
            .data_dir
            .clone()
            .unwrap_or_else(|| config.data.directory.clone().into());
        Box::new(CsvScoreSource::latest_in(dir))
    };

    let series = source
        .load_series()
        .with_context(|| format!("Failed to load scores from {} source", source.name()))?;
    info!("Loaded {} points from {} source", series.len(), source.name());

    if series.is_empty() {
        bail!("The score source returned no usable points");
    }
    Ok(series)
}

/// "Now" on the series' own day, so the bucket lookup lines up
fn resolve_now(now: Option<&str>, series: &[ScorePoint]) -> Result<NaiveDateTime> {
    let time = match now {
        Some(raw) => NaiveTime::parse_from_str(raw, "%H:%M")
            .with_context(|| format!("Invalid --now '{raw}', expected HH:MM"))?,
        None => Local::now().time(),
    };
    let date = series
        .first()
        .map_or_else(|| Local::now().date_naive(), |p| p.timestamp.date());
    Ok(date.and_time(time))
}

fn windows_command(args: WindowsArgs, config: GreenSlotConfig) -> Result<()> {
    let series = load_series(&args.source, &config)?;

    let precomputed = args
        .precomputed
        .as_ref()
        .map(|path| -> Result<Vec<TimeWindow>> {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse windows from {}", path.display()))
        })
        .transpose()?;

    let mut constraints = WindowConstraints::default();
    constraints.earliest_after = args.earliest_after;
    constraints.latest_before = args.latest_before;
    constraints.deadline = args.deadline;

    let request = PlanRequest {
        duration_minutes: args.duration,
        constraints: (!constraints.is_empty()).then_some(constraints),
        now: Some(resolve_now(args.now.as_deref(), &series)?),
        current_score: args.current_score,
        top_n: args.top,
    };

    let rec = Planner::new(config).recommend(&series, &request, precomputed);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rec)?);
    } else {
        print!("{}", format_recommendation(&rec, args.explain));
    }
    Ok(())
}

fn timeline_command(args: &TimelineArgs, config: GreenSlotConfig) -> Result<()> {
    let series = load_series(&args.source, &config)?;
    let planner = Planner::new(config);
    let thresholds = planner.thresholds(&series);
    let colors = timeline_colors(&series, &thresholds);

    if args.json {
        let colored: Vec<ScorePoint> = series
            .iter()
            .zip(&colors)
            .map(|(point, color)| point.clone().with_color(*color))
            .collect();
        println!("{}", serde_json::to_string_pretty(&colored)?);
    } else {
        print!("{}", format_timeline(&series, &colors));
    }
    Ok(())
}

fn decide_command(args: DecideArgs, mut config: GreenSlotConfig) -> Result<()> {
    if let Some(url) = args.url {
        config.decision.base_url = url;
    }

    let when = match &args.when {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .with_context(|| format!("Invalid --when '{raw}', expected RFC 3339"))?,
        None => Local::now().fixed_offset(),
    };

    let client = HttpDecisionClient::from_config(&config.decision)?;
    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    let outcome = runtime.block_on(DecisionGate::new(client).decide(when, args.emergency));

    print!("{}", format_decision(&outcome));
    if outcome.is_failure() {
        bail!("Decision request failed");
    }
    Ok(())
}
