//! Trend change between the two most recent half-month windows.

use crate::analysis::round_half_up;
use crate::domain::ConsumptionPoint;

/// Total span compared (days).
pub const CHANGE_SPAN: usize = 30;

/// Percentage change of the recent 15-day mean versus the preceding 15-day mean.
///
/// Only the last 30 points are considered, split into two adjacent halves.
/// Returns `0` when fewer than 30 points exist or the previous mean is zero.
pub fn compute_change(historical: &[ConsumptionPoint]) -> i64 {
    if historical.len() < CHANGE_SPAN {
        return 0;
    }

    let last = &historical[historical.len() - CHANGE_SPAN..];
    let (previous, recent) = last.split_at(CHANGE_SPAN / 2);

    let previous_avg = mean(previous);
    let recent_avg = mean(recent);
    if previous_avg == 0.0 {
        return 0;
    }

    round_half_up((recent_avg - previous_avg) / previous_avg * 100.0)
}

fn mean(points: &[ConsumptionPoint]) -> f64 {
    points.iter().map(|p| p.value).sum::<f64>() / points.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn series(values: &[f64]) -> Vec<ConsumptionPoint> {
        let start = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| ConsumptionPoint::new(start + Duration::days(i as i64), v))
            .collect()
    }

    #[test]
    fn short_series_is_zero() {
        assert_eq!(compute_change(&series(&[1000.0; 10])), 0);
        assert_eq!(compute_change(&series(&[1000.0; 29])), 0);
        assert_eq!(compute_change(&[]), 0);
    }

    #[test]
    fn ten_percent_rise() {
        let mut values = vec![1000.0; 15];
        values.extend([1100.0; 15]);
        assert_eq!(compute_change(&series(&values)), 10);
    }

    #[test]
    fn only_last_thirty_points_count() {
        let mut values = vec![10.0; 40];
        values.extend([1000.0; 15]);
        values.extend([900.0; 15]);
        assert_eq!(compute_change(&series(&values)), -10);
    }

    #[test]
    fn zero_previous_window_is_zero() {
        let mut values = vec![0.0; 15];
        values.extend([1100.0; 15]);
        assert_eq!(compute_change(&series(&values)), 0);
    }

    #[test]
    fn is_idempotent() {
        let values: Vec<f64> = (0..45).map(|i| 900.0 + (i * 7 % 13) as f64 * 11.0).collect();
        let s = series(&values);
        assert_eq!(compute_change(&s), compute_change(&s));
    }
}
