//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - historical days: `o`
//! - forecast days: `*`, or `!` when above capacity
//! - supply capacity: `=` line

use crate::domain::ConsumptionPoint;

/// Render history + forecast against the capacity line.
pub fn render_outlook_plot(
    history: &[ConsumptionPoint],
    forecast: &[ConsumptionPoint],
    capacity: f64,
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (Some(first), Some(last)) = (
        history.first().or(forecast.first()),
        forecast.last().or(history.last()),
    ) else {
        return "Plot: (no data)\n".to_string();
    };

    let n = history.len() + forecast.len();
    let x_max = (n - 1).max(1) as f64;

    let (y_min, y_max) = y_range(history, forecast, capacity).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Capacity first so points overlay it.
    if capacity.is_finite() {
        let row = map_y(capacity, y_min, y_max, height);
        grid[row].fill('=');
    }

    let points = history
        .iter()
        .map(|p| (p, 'o'))
        .chain(forecast.iter().map(|p| (p, if p.value > capacity { '!' } else { '*' })));
    for (i, (p, ch)) in points.enumerate() {
        let x = map_x(i as f64, 0.0, x_max, width);
        let y = map_y(p.value, y_min, y_max, height);
        grid[y][x] = ch;
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: {}..{} | y=[{y_min:.0}, {y_max:.0}] m³ | capacity={capacity:.0}\n",
        first.date, last.date
    ));
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
    out.push_str("Legend: o history  * forecast  ! above capacity  = capacity\n");

    out
}

fn y_range(history: &[ConsumptionPoint], forecast: &[ConsumptionPoint], capacity: f64) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    for p in history.iter().chain(forecast) {
        min_y = min_y.min(p.value);
        max_y = max_y.max(p.value);
    }
    if capacity.is_finite() {
        min_y = min_y.min(capacity);
        max_y = max_y.max(capacity);
    }

    if min_y.is_finite() && max_y.is_finite() && max_y > min_y {
        Some((min_y, max_y))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(t: f64, t_min: f64, t_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((t - t_min) / (t_max - t_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}
