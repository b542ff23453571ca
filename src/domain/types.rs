//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - passed between pipeline stages without copying into other shapes
//! - exported to JSON for charting front-ends
//! - reloaded later for plotting

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Mean synthetic daily demand (m³).
pub const DEFAULT_BASE_CONSUMPTION: f64 = 1200.0;
/// Physical minimum daily demand (m³).
pub const DEFAULT_FLOOR_CONSUMPTION: f64 = 800.0;
/// Daily supply capacity used for shortage detection (m³).
pub const DEFAULT_SUPPLY_CAPACITY: f64 = 1500.0;

/// One day's recorded or synthesized consumption.
///
/// `date` serializes as `YYYY-MM-DD` (chrono's `NaiveDate` format).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConsumptionPoint {
    pub date: NaiveDate,
    /// Volume consumed that day, in cubic meters.
    pub value: f64,
}

impl ConsumptionPoint {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// Inclusive integer noise band, e.g. `-50..=49`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoiseBand {
    pub min: i64,
    pub max: i64,
}

impl NoiseBand {
    pub const HISTORICAL: NoiseBand = NoiseBand { min: -50, max: 49 };
    pub const FORECAST: NoiseBand = NoiseBand { min: -30, max: 29 };

    pub fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    pub fn is_valid(&self) -> bool {
        self.min <= self.max
    }
}

/// Named simulation constants.
///
/// Kept as data rather than literals so the engine can be tuned per locality.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationParams {
    pub base_consumption: f64,
    pub floor_consumption: f64,
    pub supply_capacity: f64,
    pub historical_noise: NoiseBand,
    pub forecast_noise: NoiseBand,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            base_consumption: DEFAULT_BASE_CONSUMPTION,
            floor_consumption: DEFAULT_FLOOR_CONSUMPTION,
            supply_capacity: DEFAULT_SUPPLY_CAPACITY,
            historical_noise: NoiseBand::HISTORICAL,
            forecast_noise: NoiseBand::FORECAST,
        }
    }
}

impl SimulationParams {
    /// Reject parameter sets that indicate caller misuse.
    pub fn validate(&self) -> Result<(), AppError> {
        if !self.base_consumption.is_finite() {
            return Err(AppError::usage("Base consumption must be a finite number."));
        }
        if !(self.floor_consumption.is_finite() && self.floor_consumption >= 0.0) {
            return Err(AppError::usage("Floor consumption must be finite and >= 0."));
        }
        if !(self.supply_capacity.is_finite() && self.supply_capacity > 0.0) {
            return Err(AppError::usage("Supply capacity must be finite and > 0."));
        }
        if !self.historical_noise.is_valid() {
            return Err(AppError::usage(format!(
                "Invalid historical noise band: {}..={}.",
                self.historical_noise.min, self.historical_noise.max
            )));
        }
        if !self.forecast_noise.is_valid() {
            return Err(AppError::usage(format!(
                "Invalid forecast noise band: {}..={}.",
                self.forecast_noise.min, self.forecast_noise.max
            )));
        }
        Ok(())
    }
}

/// Shortage verdict for a forecast series against a fixed capacity.
///
/// `Default` is the "no shortage" verdict.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ShortageResult {
    pub will_have_shortage: bool,
    /// First forecast day whose demand exceeds capacity.
    pub shortage_start_date: Option<NaiveDate>,
    /// Sum of per-day excess over capacity (m³).
    pub shortage_amount: f64,
    /// Excess as a percentage of total forecast demand.
    pub shortage_percentage: i64,
}

/// Descriptive statistics for a consumption series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutlookSummary {
    pub n_points: usize,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    pub total: f64,
    pub mean: f64,
    pub min_value: f64,
    pub peak_value: f64,
    pub peak_date: NaiveDate,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags, env overrides and defaults.
#[derive(Debug, Clone)]
pub struct OutlookConfig {
    pub params: SimulationParams,
    pub history_days: usize,
    pub forecast_days: usize,
    /// `None` draws a fresh seed for the run.
    pub seed: Option<u64>,
    /// The historical window ends the day before this date.
    pub today: NaiveDate,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    pub export_json: Option<PathBuf>,
}

impl OutlookConfig {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            params: SimulationParams::default(),
            history_days: 90,
            forecast_days: 30,
            seed: None,
            today,
            plot: true,
            plot_width: 100,
            plot_height: 20,
            export_json: None,
        }
    }
}

/// A named supply source used for batch outlooks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservoirSpec {
    pub name: String,
    pub capacity: f64,
}

impl std::str::FromStr for ReservoirSpec {
    type Err = AppError;

    /// Parse `NAME=CAPACITY`, e.g. `north=1450`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, capacity) = s
            .split_once('=')
            .ok_or_else(|| AppError::usage(format!("Expected NAME=CAPACITY, got '{s}'.")))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::usage(format!("Missing reservoir name in '{s}'.")));
        }
        let capacity: f64 = capacity
            .trim()
            .parse()
            .map_err(|e| AppError::usage(format!("Invalid capacity in '{s}': {e}")))?;
        if !(capacity.is_finite() && capacity > 0.0) {
            return Err(AppError::usage(format!("Capacity must be > 0 in '{s}'.")));
        }
        Ok(Self {
            name: name.to_string(),
            capacity,
        })
    }
}
