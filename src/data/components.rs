//! Deterministic demand components shared by the historical and forecast generators.

use std::f64::consts::PI;

use chrono::{Datelike, NaiveDate, Weekday};
use rand_distr::Uniform;

use crate::domain::NoiseBand;
use crate::error::AppError;

/// Longest series either generator will produce (about a century of days).
pub const MAX_SERIES_DAYS: usize = 36_600;

/// Amplitude of the annual demand swing (m³).
pub const SEASONAL_AMPLITUDE: f64 = 100.0;
/// Demand reduction on Saturdays and Sundays (m³).
pub const WEEKEND_EFFECT: f64 = -50.0;

/// Annual oscillation: `sin(month / 12 * 2π) * 100`, with `month` in `1..=12`.
pub fn seasonal_component(date: NaiveDate) -> f64 {
    let month_fraction = date.month() as f64 / 12.0;
    (month_fraction * 2.0 * PI).sin() * SEASONAL_AMPLITUDE
}

pub fn weekend_effect(date: NaiveDate) -> f64 {
    match date.weekday() {
        Weekday::Sat | Weekday::Sun => WEEKEND_EFFECT,
        _ => 0.0,
    }
}

/// Truncate to whole cubic meters and clamp to the physical minimum.
pub fn floor_value(raw: f64, floor: f64) -> f64 {
    raw.floor().max(floor)
}

/// Reject horizons no caller could mean before any buffer is sized from them.
pub fn check_horizon(days: usize) -> Result<(), AppError> {
    if days > MAX_SERIES_DAYS {
        return Err(AppError::usage(format!(
            "Horizon of {days} days exceeds the maximum of {MAX_SERIES_DAYS}."
        )));
    }
    Ok(())
}

/// Uniform integer noise over an inclusive band.
pub fn noise_distribution(band: NoiseBand) -> Result<Uniform<i64>, AppError> {
    if !band.is_valid() {
        return Err(AppError::usage(format!(
            "Noise band is empty: {}..={}.",
            band.min, band.max
        )));
    }
    Ok(Uniform::new_inclusive(band.min, band.max))
}
