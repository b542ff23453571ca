//! Synthetic historical consumption.

use chrono::{Days, NaiveDate};
use rand::Rng;
use rand_distr::Distribution;
use tracing::debug;

use crate::data::components::{
    check_horizon, floor_value, noise_distribution, seasonal_component, weekend_effect,
};
use crate::domain::{ConsumptionPoint, SimulationParams};
use crate::error::AppError;

/// Upward drift per day across the generated window (m³/day).
const HISTORICAL_TREND_PER_DAY: f64 = 0.5;

/// Generate `days` points covering the days immediately before `today`, oldest first.
///
/// `today` itself is excluded. Each value is
/// `max(floor, floor(base + seasonal + weekend + noise + trend))` where the trend is
/// zero on the oldest day and grows by 0.5 m³ per day. Horizons above
/// `MAX_SERIES_DAYS` are rejected.
pub fn generate_historical<R: Rng + ?Sized>(
    days: usize,
    today: NaiveDate,
    params: &SimulationParams,
    rng: &mut R,
) -> Result<Vec<ConsumptionPoint>, AppError> {
    check_horizon(days)?;
    if days == 0 {
        return Ok(Vec::new());
    }

    let noise_dist = noise_distribution(params.historical_noise)?;
    let mut points = Vec::with_capacity(days);

    for i in (1..=days).rev() {
        let date = today
            .checked_sub_days(Days::new(i as u64))
            .ok_or_else(|| AppError::new(4, format!("Date out of range: {today} minus {i} days.")))?;

        let seasonal = seasonal_component(date);
        let weekend = weekend_effect(date);
        let noise = noise_dist.sample(rng) as f64;
        let trend = (days - i) as f64 * HISTORICAL_TREND_PER_DAY;

        let raw = params.base_consumption + seasonal + weekend + noise + trend;
        points.push(ConsumptionPoint::new(date, floor_value(raw, params.floor_consumption)));
    }

    debug!(days, first = %points[0].date, "generated historical series");
    Ok(points)
}
