//! Shared outlook pipeline used by both the single-run and batch commands.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! historical synthesis -> {forecast, change} ; forecast -> shortage
//!
//! The CLI front-end can then focus on presentation.

use std::collections::HashSet;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use chrono::NaiveDate;
use rand::prelude::*;
use rand::rngs::StdRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::analysis::{compute_change, predict_shortage, summarize};
use crate::data::{generate_forecast, generate_historical};
use crate::domain::{
    ConsumptionPoint, OutlookConfig, OutlookSummary, ReservoirSpec, ShortageResult, SimulationParams,
};
use crate::error::AppError;

/// All computed outputs of a single outlook run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlookOutput {
    pub today: NaiveDate,
    /// Seed used for the run, when it was driven by a seeded RNG.
    pub seed: Option<u64>,
    pub params: SimulationParams,
    pub history: Vec<ConsumptionPoint>,
    pub forecast: Vec<ConsumptionPoint>,
    pub change_percent: i64,
    pub shortage: ShortageResult,
    pub history_summary: Option<OutlookSummary>,
    pub forecast_summary: Option<OutlookSummary>,
}

/// Outlook for one named reservoir in a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservoirOutlook {
    pub name: String,
    pub capacity: f64,
    pub outlook: OutlookOutput,
}

/// All reservoirs of a batch run plus the seed that reproduces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchOutput {
    /// Pass back via `--seed` to replay the whole batch.
    pub base_seed: u64,
    pub reservoirs: Vec<ReservoirOutlook>,
}

/// Execute the pipeline with a seeded RNG.
///
/// When `config.seed` is `None` a fresh seed is drawn and logged so the run can
/// be replayed with `--seed`.
pub fn run_outlook(config: &OutlookConfig) -> Result<OutlookOutput, AppError> {
    let seed = resolve_seed(config.seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut out = run_outlook_with_rng(
        &config.params,
        config.history_days,
        config.forecast_days,
        config.today,
        &mut rng,
    )?;
    out.seed = Some(seed);
    Ok(out)
}

/// Execute the pipeline with a caller-supplied random source.
pub fn run_outlook_with_rng<R: Rng + ?Sized>(
    params: &SimulationParams,
    history_days: usize,
    forecast_days: usize,
    today: NaiveDate,
    rng: &mut R,
) -> Result<OutlookOutput, AppError> {
    params.validate()?;

    // 1) Synthesize the past window.
    let history = generate_historical(history_days, today, params, rng)?;

    // 2) Project forward from its tail.
    let forecast = generate_forecast(forecast_days, &history, params, rng)?;

    // 3) Derived metrics.
    let change_percent = compute_change(&history);
    let shortage = predict_shortage(&forecast, params.supply_capacity)?;

    debug!(
        history = history.len(),
        forecast = forecast.len(),
        change_percent,
        shortage = shortage.will_have_shortage,
        "outlook computed"
    );

    Ok(OutlookOutput {
        today,
        seed: None,
        params: *params,
        history_summary: summarize(&history),
        forecast_summary: summarize(&forecast),
        history,
        forecast,
        change_percent,
        shortage,
    })
}

/// Compute outlooks for several reservoirs in parallel.
///
/// Each reservoir runs with its own `StdRng`, seeded from the run seed and the
/// reservoir name, so results do not depend on thread scheduling. Output order
/// matches `reservoirs`.
pub fn run_batch(reservoirs: &[ReservoirSpec], config: &OutlookConfig) -> Result<BatchOutput, AppError> {
    if reservoirs.is_empty() {
        return Err(AppError::usage("At least one reservoir is required."));
    }
    let mut seen = HashSet::new();
    for r in reservoirs {
        if !seen.insert(r.name.as_str()) {
            return Err(AppError::usage(format!("Duplicate reservoir name '{}'.", r.name)));
        }
    }

    let base_seed = resolve_seed(config.seed);
    info!(reservoirs = reservoirs.len(), base_seed, "running batch outlook");

    let outlooks = reservoirs
        .par_iter()
        .map(|r| -> Result<ReservoirOutlook, AppError> {
            let params = SimulationParams {
                supply_capacity: r.capacity,
                ..config.params
            };
            let seed = reservoir_seed(base_seed, &r.name);
            let mut rng = StdRng::seed_from_u64(seed);

            let mut outlook = run_outlook_with_rng(
                &params,
                config.history_days,
                config.forecast_days,
                config.today,
                &mut rng,
            )?;
            outlook.seed = Some(seed);

            Ok(ReservoirOutlook {
                name: r.name.clone(),
                capacity: r.capacity,
                outlook,
            })
        })
        .collect::<Result<Vec<_>, AppError>>()?;

    Ok(BatchOutput {
        base_seed,
        reservoirs: outlooks,
    })
}

fn resolve_seed(seed: Option<u64>) -> u64 {
    match seed {
        Some(s) => s,
        None => {
            let s: u64 = rand::thread_rng().r#gen();
            info!(seed = s, "no seed given; drew a fresh one");
            s
        }
    }
}

fn reservoir_seed(base_seed: u64, name: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    base_seed.hash(&mut hasher);
    name.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(seed: u64) -> OutlookConfig {
        let mut c = OutlookConfig::new(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        c.seed = Some(seed);
        c
    }

    #[test]
    fn outlook_wires_stages_together() {
        let out = run_outlook(&config(42)).unwrap();

        assert_eq!(out.seed, Some(42));
        assert_eq!(out.history.len(), 90);
        assert_eq!(out.forecast.len(), 30);
        assert_eq!(out.history.last().unwrap().date, NaiveDate::from_ymd_opt(2024, 5, 31).unwrap());
        assert_eq!(out.forecast[0].date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(out.change_percent, compute_change(&out.history));
        assert_eq!(out.shortage, predict_shortage(&out.forecast, 1500.0).unwrap());
        assert_eq!(out.history_summary.unwrap().n_points, 90);
    }

    #[test]
    fn same_seed_reproduces_run() {
        let a = run_outlook(&config(7)).unwrap();
        let b = run_outlook(&config(7)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_history_degrades_softly() {
        let mut c = config(1);
        c.history_days = 0;
        let out = run_outlook(&c).unwrap();
        assert!(out.history.is_empty());
        assert!(out.forecast.is_empty());
        assert_eq!(out.change_percent, 0);
        assert!(!out.shortage.will_have_shortage);
        assert!(out.forecast_summary.is_none());
    }

    #[test]
    fn invalid_params_are_rejected() {
        let mut c = config(1);
        c.params.supply_capacity = -1.0;
        assert_eq!(run_outlook(&c).unwrap_err().exit_code(), 2);
    }

    #[test]
    fn batch_is_ordered_and_reproducible() {
        let reservoirs: Vec<ReservoirSpec> = vec![
            "north=1400".parse().unwrap(),
            "south=1500".parse().unwrap(),
            "east=5000".parse().unwrap(),
        ];
        let a = run_batch(&reservoirs, &config(99)).unwrap();
        let b = run_batch(&reservoirs, &config(99)).unwrap();

        assert_eq!(a, b);
        assert_eq!(a.base_seed, 99);
        let names: Vec<&str> = a.reservoirs.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["north", "south", "east"]);
        assert_eq!(a.reservoirs[2].outlook.params.supply_capacity, 5000.0);
        assert!(!a.reservoirs[2].outlook.shortage.will_have_shortage);
        assert_ne!(a.reservoirs[0].outlook.seed, a.reservoirs[1].outlook.seed);
    }

    #[test]
    fn unseeded_batch_replays_from_reported_seed() {
        let reservoirs: Vec<ReservoirSpec> = vec!["north=1400".parse().unwrap(), "south=1600".parse().unwrap()];
        let mut unseeded = config(0);
        unseeded.seed = None;

        let first = run_batch(&reservoirs, &unseeded).unwrap();
        let replay = run_batch(&reservoirs, &config(first.base_seed)).unwrap();
        assert_eq!(first, replay);
    }

    #[test]
    fn batch_rejects_duplicates_and_empty() {
        let dup: Vec<ReservoirSpec> = vec!["a=1".parse().unwrap(), "a=2".parse().unwrap()];
        assert!(run_batch(&dup, &config(1)).is_err());
        assert!(run_batch(&[], &config(1)).is_err());
    }
}
