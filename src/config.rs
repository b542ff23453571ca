//! Environment overrides for simulation constants.
//!
//! Precedence is CLI flag > environment (including `.env`) > built-in default.

use std::env::VarError;

use crate::domain::SimulationParams;
use crate::error::AppError;

pub const ENV_BASE_CONSUMPTION: &str = "WATER_BASE_CONSUMPTION";
pub const ENV_FLOOR_CONSUMPTION: &str = "WATER_FLOOR_CONSUMPTION";
pub const ENV_SUPPLY_CAPACITY: &str = "WATER_SUPPLY_CAPACITY";

/// Values read from the environment; `None` means "not set".
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EnvOverrides {
    pub base_consumption: Option<f64>,
    pub floor_consumption: Option<f64>,
    pub supply_capacity: Option<f64>,
}

impl EnvOverrides {
    /// Load `.env` (if present) and read the process environment.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| match std::env::var(key) {
            Ok(v) => Ok(Some(v)),
            Err(VarError::NotPresent) => Ok(None),
            Err(e) => Err(AppError::usage(format!("Invalid {key}: {e}"))),
        })
    }

    /// Build overrides from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Result<Option<String>, AppError>,
    {
        let read = |key: &str| -> Result<Option<f64>, AppError> {
            let Some(raw) = lookup(key)? else {
                return Ok(None);
            };
            raw.trim()
                .parse::<f64>()
                .map(Some)
                .map_err(|e| AppError::usage(format!("Invalid {key}='{raw}': {e}")))
        };

        Ok(Self {
            base_consumption: read(ENV_BASE_CONSUMPTION)?,
            floor_consumption: read(ENV_FLOOR_CONSUMPTION)?,
            supply_capacity: read(ENV_SUPPLY_CAPACITY)?,
        })
    }

    /// Layer these overrides on top of `params`.
    pub fn apply(&self, params: SimulationParams) -> SimulationParams {
        SimulationParams {
            base_consumption: self.base_consumption.unwrap_or(params.base_consumption),
            floor_consumption: self.floor_consumption.unwrap_or(params.floor_consumption),
            supply_capacity: self.supply_capacity.unwrap_or(params.supply_capacity),
            ..params
        }
    }
}
