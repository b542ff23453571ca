//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the synthesis/analysis code stays clean and testable
//! - output changes are localized

use crate::app::pipeline::{BatchOutput, OutlookOutput};
use crate::domain::{OutlookSummary, ShortageResult};

/// Format the full outlook summary (run header + trend + shortage + series stats).
pub fn format_outlook(out: &OutlookOutput) -> String {
    let mut out_s = String::new();

    out_s.push_str("=== wo - Water Consumption Outlook ===\n");
    out_s.push_str(&format!("Today: {}\n", out.today));
    out_s.push_str(&format!(
        "Horizon: history={}d | forecast={}d\n",
        out.history.len(),
        out.forecast.len()
    ));
    if let Some(seed) = out.seed {
        out_s.push_str(&format!("Seed: {seed}\n"));
    }
    out_s.push_str(&format!(
        "Params: base={:.0} m³ | floor={:.0} m³ | capacity={:.0} m³\n",
        out.params.base_consumption, out.params.floor_consumption, out.params.supply_capacity
    ));

    out_s.push_str(&format!("\nTrend (last 15d vs previous 15d): {}\n", fmt_percent(out.change_percent)));

    out_s.push_str("\nShortage outlook:\n");
    out_s.push_str(&format_shortage(&out.shortage));

    out_s.push_str("\nHistory:\n");
    out_s.push_str(&format_summary(out.history_summary.as_ref()));
    out_s.push_str("\nForecast:\n");
    out_s.push_str(&format_summary(out.forecast_summary.as_ref()));

    out_s
}

fn format_shortage(s: &ShortageResult) -> String {
    match (s.will_have_shortage, s.shortage_start_date) {
        (true, Some(start)) => format!(
            "- SHORTAGE from {start}\n- excess: {:.0} m³ ({}% of forecast demand)\n",
            s.shortage_amount, s.shortage_percentage
        ),
        _ => "- no shortage expected\n".to_string(),
    }
}

fn format_summary(summary: Option<&OutlookSummary>) -> String {
    let Some(s) = summary else {
        return "- (empty)\n".to_string();
    };
    format!(
        "- {}..{} (n={})\n- total={:.0} m³ | mean={:.1} m³ | min={:.0} m³ | peak={:.0} m³ on {}\n",
        s.first_date, s.last_date, s.n_points, s.total, s.mean, s.min_value, s.peak_value, s.peak_date
    )
}

/// Format the batch table, one row per reservoir, headed by the replay seed.
pub fn format_batch(batch: &BatchOutput) -> String {
    let mut out = String::new();
    out.push_str(&format!("Seed: {} (replay with --seed)\n", batch.base_seed));
    out.push_str(
        format!(
            "{:<16} {:>10} {:>8} {:>9} {:>12} {:>12} {:>6}\n",
            "reservoir", "capacity", "change", "shortage", "start", "excess_m3", "pct"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(
        format!(
            "{:-<16} {:-<10} {:-<8} {:-<9} {:-<12} {:-<12} {:-<6}\n",
            "", "", "", "", "", "", ""
        )
        .trim_end(),
    );
    out.push('\n');

    for r in &batch.reservoirs {
        let s = &r.outlook.shortage;
        out.push_str(
            format!(
                "{:<16} {:>10.0} {:>8} {:>9} {:>12} {:>12.0} {:>6}\n",
                truncate(&r.name, 16),
                r.capacity,
                fmt_percent(r.outlook.change_percent),
                if s.will_have_shortage { "yes" } else { "no" },
                s.shortage_start_date.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string()),
                s.shortage_amount,
                format!("{}%", s.shortage_percentage),
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

fn fmt_percent(v: i64) -> String {
    if v > 0 { format!("+{v}%") } else { format!("{v}%") }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::{ReservoirOutlook, run_outlook_with_rng};
    use crate::domain::SimulationParams;
    use chrono::NaiveDate;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn outlook(capacity: f64) -> OutlookOutput {
        let params = SimulationParams {
            supply_capacity: capacity,
            ..SimulationParams::default()
        };
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        run_outlook_with_rng(&params, 60, 20, today, &mut StdRng::seed_from_u64(3)).unwrap()
    }

    #[test]
    fn outlook_report_mentions_verdict() {
        let calm = format_outlook(&outlook(1_000_000.0));
        assert!(calm.contains("Today: 2024-03-01"));
        assert!(calm.contains("no shortage expected"));

        // Every forecast day sits at or above the 800 m³ floor, so a tiny capacity always trips.
        let short = format_outlook(&outlook(1.0));
        assert!(short.contains("SHORTAGE from 2024-03-01"));
    }

    #[test]
    fn batch_table_has_one_row_per_reservoir() {
        let reservoirs = vec![
            ReservoirOutlook {
                name: "north".to_string(),
                capacity: 1.0,
                outlook: outlook(1.0),
            },
            ReservoirOutlook {
                name: "a-very-long-reservoir-name".to_string(),
                capacity: 1_000_000.0,
                outlook: outlook(1_000_000.0),
            },
        ];
        let table = format_batch(&BatchOutput {
            base_seed: 1234567,
            reservoirs,
        });
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "Seed: 1234567 (replay with --seed)");
        assert!(lines[1].starts_with("reservoir"));
        assert!(lines[3].starts_with("north"));
        assert!(lines[3].contains("yes"));
        assert!(lines[4].starts_with("a-very-long-res."));
        assert!(lines[4].contains(" no "));
    }

    #[test]
    fn percent_sign_convention() {
        assert_eq!(fmt_percent(4), "+4%");
        assert_eq!(fmt_percent(0), "0%");
        assert_eq!(fmt_percent(-3), "-3%");
    }
}
