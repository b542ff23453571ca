//! Shortage prediction against a fixed supply capacity.

use tracing::debug;

use crate::analysis::round_half_up;
use crate::domain::{ConsumptionPoint, ShortageResult};
use crate::error::AppError;

/// Scan `forecast` in chronological order and report demand above `capacity`.
///
/// The start date is the *first* day over capacity, not the worst one. The
/// percentage is the accumulated excess relative to total forecast demand.
/// A non-positive or non-finite `capacity` is caller misuse and is rejected.
pub fn predict_shortage(
    forecast: &[ConsumptionPoint],
    capacity: f64,
) -> Result<ShortageResult, AppError> {
    if !(capacity.is_finite() && capacity > 0.0) {
        return Err(AppError::usage(format!(
            "Supply capacity must be finite and > 0 (got {capacity})."
        )));
    }

    let mut shortage_start_date = None;
    let mut shortage_amount = 0.0;
    let mut total = 0.0;

    for p in forecast {
        total += p.value;
        if p.value > capacity {
            shortage_amount += p.value - capacity;
            if shortage_start_date.is_none() {
                shortage_start_date = Some(p.date);
            }
        }
    }

    let Some(start) = shortage_start_date else {
        return Ok(ShortageResult::default());
    };

    let shortage_percentage = if total > 0.0 {
        round_half_up(shortage_amount / total * 100.0)
    } else {
        0
    };

    debug!(%start, shortage_amount, shortage_percentage, "shortage detected");
    Ok(ShortageResult {
        will_have_shortage: true,
        shortage_start_date: Some(start),
        shortage_amount,
        shortage_percentage,
    })
}
