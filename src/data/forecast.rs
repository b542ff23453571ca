//! Short-horizon forecast extrapolated from the tail of a historical series.

use chrono::Days;
use rand::Rng;
use rand_distr::Distribution;
use tracing::debug;

use crate::data::components::{
    check_horizon, floor_value, noise_distribution, seasonal_component, weekend_effect,
};
use crate::domain::{ConsumptionPoint, SimulationParams};
use crate::error::AppError;

/// Number of trailing historical days averaged into the forecast baseline.
pub const BASELINE_WINDOW: usize = 7;
/// Demand growth per forecast day (m³/day).
const FORECAST_TREND_PER_DAY: f64 = 2.0;

/// Mean of the last `BASELINE_WINDOW` values (or all of them for shorter series).
pub fn forecast_baseline(historical: &[ConsumptionPoint]) -> Option<f64> {
    if historical.is_empty() {
        return None;
    }
    let tail = &historical[historical.len().saturating_sub(BASELINE_WINDOW)..];
    Some(tail.iter().map(|p| p.value).sum::<f64>() / tail.len() as f64)
}

/// Generate `days` points for the days immediately after the last historical date.
///
/// An empty `historical` series has no anchor date or baseline, so the forecast
/// is empty as well.
pub fn generate_forecast<R: Rng + ?Sized>(
    days: usize,
    historical: &[ConsumptionPoint],
    params: &SimulationParams,
    rng: &mut R,
) -> Result<Vec<ConsumptionPoint>, AppError> {
    check_horizon(days)?;
    let (Some(last), Some(baseline)) = (historical.last(), forecast_baseline(historical)) else {
        return Ok(Vec::new());
    };
    if days == 0 {
        return Ok(Vec::new());
    }

    let noise_dist = noise_distribution(params.forecast_noise)?;
    let mut points = Vec::with_capacity(days);

    for i in 1..=days {
        let date = last
            .date
            .checked_add_days(Days::new(i as u64))
            .ok_or_else(|| AppError::new(4, format!("Date out of range: {} plus {i} days.", last.date)))?;

        let seasonal = seasonal_component(date);
        let weekend = weekend_effect(date);
        let noise = noise_dist.sample(rng) as f64;
        let trend = i as f64 * FORECAST_TREND_PER_DAY;

        let raw = baseline + seasonal + weekend + noise + trend;
        points.push(ConsumptionPoint::new(date, floor_value(raw, params.floor_consumption)));
    }

    debug!(days, baseline, anchor = %last.date, "generated forecast series");
    Ok(points)
}
