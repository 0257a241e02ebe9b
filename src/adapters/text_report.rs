//! Plain-text tables for terminal output.

use crate::domain::aggregate::{DailyVolume, SymbolDailyVolume, SymbolSummary, TrendPoint};
use std::fmt::Write;

pub fn summary_table(rows: &[SymbolSummary]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<10} {:>14} {:>18} {:>14}",
        "symbol", "total_volume", "total_value", "net_position"
    );
    for r in rows {
        let _ = writeln!(
            out,
            "{:<10} {:>14} {:>18.2} {:>14}",
            r.symbol, r.total_volume, r.total_value, r.net_position
        );
    }
    out
}

pub fn busiest_day_line(day: Option<&DailyVolume>) -> String {
    match day {
        Some(d) => format!("{}  volume {}\n", d.date, d.volume),
        None => "no dated trades\n".to_string(),
    }
}

pub fn busiest_per_symbol_table(rows: &[SymbolDailyVolume]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<10} {:<12} {:>10}", "symbol", "date", "volume");
    for r in rows {
        let _ = writeln!(out, "{:<10} {:<12} {:>10}", r.symbol, r.date.to_string(), r.volume);
    }
    out
}

pub fn trend_table(symbol: &str, points: &[TrendPoint]) -> String {
    let mut out = format!("Trend for {}:\n", symbol);
    let _ = writeln!(out, "{:<12} {:>10} {:>10}", "date", "avg_price", "volume");
    for p in points {
        let _ = writeln!(
            out,
            "{:<12} {:>10.2} {:>10}",
            p.date.to_string(),
            p.avg_price,
            p.volume
        );
    }
    out
}

/// The three sections of the ad-hoc analysis.
pub fn analysis_report(
    summary: &[SymbolSummary],
    busiest: Option<&DailyVolume>,
    per_symbol: &[SymbolDailyVolume],
) -> String {
    let mut out = String::from("Summary per stock:\n");
    out.push_str(&summary_table(summary));
    out.push_str("\nBusiest trading day overall:\n");
    out.push_str(&busiest_day_line(busiest));
    out.push_str("\nBusiest day per stock:\n");
    out.push_str(&busiest_per_symbol_table(per_symbol));
    out
}
