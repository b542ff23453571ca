//! Derived metrics over consumption series.
//!
//! These are pure functions of their inputs and draw no randomness.

pub mod change;
pub mod shortage;

pub use change::compute_change;
pub use shortage::predict_shortage;

use crate::domain::{ConsumptionPoint, OutlookSummary};

/// Round to the nearest integer, with halves rounded toward positive infinity.
pub fn round_half_up(x: f64) -> i64 {
    (x + 0.5).floor() as i64
}

/// Descriptive statistics for a series; `None` when it is empty.
pub fn summarize(series: &[ConsumptionPoint]) -> Option<OutlookSummary> {
    let first = series.first()?;
    let last = series.last()?;

    let mut total = 0.0;
    let mut min_value = f64::INFINITY;
    let mut peak = *first;
    for p in series {
        total += p.value;
        min_value = min_value.min(p.value);
        if p.value > peak.value {
            peak = *p;
        }
    }

    Some(OutlookSummary {
        n_points: series.len(),
        first_date: first.date,
        last_date: last.date,
        total,
        mean: total / series.len() as f64,
        min_value,
        peak_value: peak.value,
        peak_date: peak.date,
    })
}
