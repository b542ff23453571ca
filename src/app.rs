//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - sets up logging
//! - layers env overrides under CLI flags
//! - runs the outlook pipeline (single or batch)
//! - prints reports/plots
//! - writes optional exports

use chrono::Local;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::{BatchArgs, Command, OutlookArgs, ShowArgs, SimArgs};
use crate::config::EnvOverrides;
use crate::domain::{NoiseBand, OutlookConfig, SimulationParams};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `wo` binary.
pub fn run() -> Result<(), AppError> {
    // `wo` and `wo --seed 3` behave like `wo outlook ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    init_logging(cli.verbose);
    let env = EnvOverrides::from_env()?;

    match cli.command {
        Command::Outlook(args) => handle_outlook(args, &env),
        Command::Batch(args) => handle_batch(args, &env),
        Command::Show(args) => handle_show(args),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // A second init (e.g. from tests) keeps the first subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}

fn handle_outlook(args: OutlookArgs, env: &EnvOverrides) -> Result<(), AppError> {
    let config = outlook_config_from_args(&args, env);
    info!(
        history_days = config.history_days,
        forecast_days = config.forecast_days,
        today = %config.today,
        capacity = config.params.supply_capacity,
        "running outlook"
    );
    let out = pipeline::run_outlook(&config)?;

    println!("{}", crate::report::format_outlook(&out));

    if config.plot {
        let plot = crate::plot::render_outlook_plot(
            &out.history,
            &out.forecast,
            out.params.supply_capacity,
            config.plot_width,
            config.plot_height,
        );
        println!("{plot}");
    }

    if let Some(path) = &config.export_json {
        crate::io::write_outlook_json(path, &out)?;
        info!(path = %path.display(), "wrote outlook JSON");
    }

    Ok(())
}

fn handle_batch(args: BatchArgs, env: &EnvOverrides) -> Result<(), AppError> {
    let mut config = OutlookConfig::new(args.sim.today.unwrap_or_else(|| Local::now().date_naive()));
    apply_sim_args(&mut config, &args.sim, env);
    config.plot = false;

    let results = pipeline::run_batch(&args.reservoirs, &config)?;
    println!("{}", crate::report::format_batch(&results));
    Ok(())
}

fn handle_show(args: ShowArgs) -> Result<(), AppError> {
    let doc = crate::io::read_outlook_json(&args.input)?;
    let out = &doc.outlook;

    println!("{}", crate::report::format_outlook(out));
    let plot = crate::plot::render_outlook_plot(
        &out.history,
        &out.forecast,
        out.params.supply_capacity,
        args.width,
        args.height,
    );
    println!("{plot}");
    Ok(())
}

/// Build a run configuration from CLI flags layered over env overrides.
pub fn outlook_config_from_args(args: &OutlookArgs, env: &EnvOverrides) -> OutlookConfig {
    let mut config = OutlookConfig::new(args.sim.today.unwrap_or_else(|| Local::now().date_naive()));
    apply_sim_args(&mut config, &args.sim, env);

    if let Some(capacity) = args.capacity {
        config.params.supply_capacity = capacity;
    }
    config.plot = !args.no_plot;
    config.plot_width = args.width;
    config.plot_height = args.height;
    config.export_json = args.export_json.clone();
    config
}

fn apply_sim_args(config: &mut OutlookConfig, sim: &SimArgs, env: &EnvOverrides) {
    let params = env.apply(SimulationParams::default());
    config.params = SimulationParams {
        base_consumption: sim.base_consumption.unwrap_or(params.base_consumption),
        floor_consumption: sim.floor_consumption.unwrap_or(params.floor_consumption),
        historical_noise: NoiseBand::new(sim.history_noise_min, sim.history_noise_max),
        forecast_noise: NoiseBand::new(sim.forecast_noise_min, sim.forecast_noise_max),
        ..params
    };
    config.history_days = sim.history_days;
    config.forecast_days = sim.forecast_days;
    config.seed = sim.seed;
}

/// Subcommands the default-outlook rewrite must leave alone.
const SUBCOMMANDS: [&str; 3] = ["outlook", "batch", "show"];

/// A bare `wo`, or `wo` followed only by simulation flags, runs a single
/// outlook with the default 1500 m³ capacity: `wo --seed 3 -c 1400` is read as
/// `wo outlook --seed 3 -c 1400`. Top-level help/version requests, explicit
/// subcommands and anything that is not a flag pass through for clap to judge.
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let needs_outlook = match argv.get(1).map(String::as_str) {
        None => true,
        Some("-h" | "--help" | "-V" | "--version" | "help") => false,
        Some(first) if SUBCOMMANDS.contains(&first) => false,
        Some(first) => first.starts_with('-'),
    };
    if needs_outlook {
        argv.insert(1.min(argv.len()), "outlook".to_string());
    }
    argv
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn rewrite_defaults_to_outlook() {
        assert_eq!(rewrite_args(args(&["wo"])), args(&["wo", "outlook"]));
        assert_eq!(
            rewrite_args(args(&["wo", "--seed", "3"])),
            args(&["wo", "outlook", "--seed", "3"])
        );
        assert_eq!(rewrite_args(args(&["wo", "--help"])), args(&["wo", "--help"]));
        assert_eq!(rewrite_args(args(&["wo", "-V"])), args(&["wo", "-V"]));
        assert_eq!(rewrite_args(args(&["wo", "-v", "-c", "1400"])), args(&["wo", "outlook", "-v", "-c", "1400"]));
        assert_eq!(rewrite_args(args(&["wo", "show", "run.json"])), args(&["wo", "show", "run.json"]));
        // Unknown positional words are left for clap to reject.
        assert_eq!(rewrite_args(args(&["wo", "forecast"])), args(&["wo", "forecast"]));
        assert_eq!(
            rewrite_args(args(&["wo", "batch", "-r", "a=1"])),
            args(&["wo", "batch", "-r", "a=1"])
        );
    }

    #[test]
    fn logging_init_tolerates_repeat_calls() {
        init_logging(0);
        init_logging(2);
    }

    #[test]
    fn cli_flags_beat_env_beat_defaults() {
        let cli = Cli::try_parse_from([
            "wo",
            "outlook",
            "--today",
            "2024-01-10",
            "--base-consumption",
            "1300",
            "--capacity",
            "1450",
        ])
        .unwrap();
        let Command::Outlook(outlook) = cli.command else {
            panic!("expected outlook");
        };
        let env = EnvOverrides {
            base_consumption: Some(999.0),
            floor_consumption: Some(700.0),
            supply_capacity: Some(2000.0),
        };

        let config = outlook_config_from_args(&outlook, &env);
        assert_eq!(config.today, chrono::NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
        assert_eq!(config.params.base_consumption, 1300.0);
        assert_eq!(config.params.floor_consumption, 700.0);
        assert_eq!(config.params.supply_capacity, 1450.0);
        assert_eq!(config.params.historical_noise, NoiseBand::HISTORICAL);
        assert!(config.plot);
    }
}
