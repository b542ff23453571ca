//! Command-line parsing for the consumption outlook tool.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the synthesis/analysis code.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{ArgAction, Args, Parser, Subcommand};

use crate::domain::{NoiseBand, ReservoirSpec};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "wo", version, about = "Water consumption outlook and shortage forecaster")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` takes precedence.
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Synthesize history, forecast ahead, and report trend and shortage.
    Outlook(OutlookArgs),
    /// Run the outlook for several reservoirs in parallel.
    Batch(BatchArgs),
    /// Print the report and plot of a previously exported outlook JSON.
    Show(ShowArgs),
}

/// Options shared by every command that runs the pipeline.
#[derive(Debug, Args, Clone)]
pub struct SimArgs {
    /// Number of past days to synthesize.
    #[arg(long, default_value_t = 90)]
    pub history_days: usize,

    /// Number of future days to forecast.
    #[arg(long, default_value_t = 30)]
    pub forecast_days: usize,

    /// Random seed (a fresh one is drawn and logged when omitted).
    #[arg(long)]
    pub seed: Option<u64>,

    /// Anchor date (YYYY-MM-DD); history ends the day before. Defaults to the local date.
    #[arg(long, value_name = "DATE")]
    pub today: Option<NaiveDate>,

    /// Mean synthetic daily demand (m³). Env: WATER_BASE_CONSUMPTION.
    #[arg(long)]
    pub base_consumption: Option<f64>,

    /// Physical minimum daily demand (m³). Env: WATER_FLOOR_CONSUMPTION.
    #[arg(long)]
    pub floor_consumption: Option<f64>,

    /// Lower bound of historical noise (m³, inclusive).
    #[arg(long, default_value_t = NoiseBand::HISTORICAL.min, allow_negative_numbers = true)]
    pub history_noise_min: i64,

    /// Upper bound of historical noise (m³, inclusive).
    #[arg(long, default_value_t = NoiseBand::HISTORICAL.max, allow_negative_numbers = true)]
    pub history_noise_max: i64,

    /// Lower bound of forecast noise (m³, inclusive).
    #[arg(long, default_value_t = NoiseBand::FORECAST.min, allow_negative_numbers = true)]
    pub forecast_noise_min: i64,

    /// Upper bound of forecast noise (m³, inclusive).
    #[arg(long, default_value_t = NoiseBand::FORECAST.max, allow_negative_numbers = true)]
    pub forecast_noise_max: i64,
}

/// Options for a single outlook run.
#[derive(Debug, Args, Clone)]
pub struct OutlookArgs {
    #[command(flatten)]
    pub sim: SimArgs,

    /// Daily supply capacity (m³). Env: WATER_SUPPLY_CAPACITY.
    #[arg(short = 'c', long)]
    pub capacity: Option<f64>,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Export the full outlook (series, change, shortage) to JSON.
    #[arg(long = "export-json", value_name = "JSON")]
    pub export_json: Option<PathBuf>,
}

/// Options for a batch run.
#[derive(Debug, Args, Clone)]
pub struct BatchArgs {
    #[command(flatten)]
    pub sim: SimArgs,

    /// Reservoir as NAME=CAPACITY (repeatable).
    #[arg(short = 'r', long = "reservoir", value_name = "NAME=CAPACITY", required = true)]
    pub reservoirs: Vec<ReservoirSpec>,
}

/// Options for replaying a saved outlook.
#[derive(Debug, Args, Clone)]
pub struct ShowArgs {
    /// Outlook JSON file produced by `wo outlook --export-json`.
    #[arg(long, value_name = "JSON")]
    pub input: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_outlook_flags() {
        let cli = Cli::try_parse_from([
            "wo",
            "outlook",
            "--seed",
            "5",
            "--today",
            "2024-02-29",
            "--history-noise-min",
            "-10",
            "-c",
            "1400",
            "--no-plot",
        ])
        .unwrap();

        let Command::Outlook(args) = cli.command else {
            panic!("expected outlook");
        };
        assert_eq!(args.sim.seed, Some(5));
        assert_eq!(args.sim.today, NaiveDate::from_ymd_opt(2024, 2, 29));
        assert_eq!(args.sim.history_noise_min, -10);
        assert_eq!(args.sim.history_noise_max, 49);
        assert_eq!(args.sim.history_days, 90);
        assert_eq!(args.capacity, Some(1400.0));
        assert!(args.no_plot);
    }

    #[test]
    fn negative_days_are_rejected() {
        assert!(Cli::try_parse_from(["wo", "outlook", "--history-days", "-3"]).is_err());
    }

    #[test]
    fn batch_requires_reservoirs() {
        assert!(Cli::try_parse_from(["wo", "batch"]).is_err());

        let cli = Cli::try_parse_from(["wo", "batch", "-r", "north=1400", "-r", "south=1600"]).unwrap();
        let Command::Batch(args) = cli.command else {
            panic!("expected batch");
        };
        assert_eq!(args.reservoirs.len(), 2);
        assert_eq!(args.reservoirs[1].name, "south");
    }
}
