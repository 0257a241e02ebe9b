//! Top-1 selections: busiest days, most-traded and highest-value symbols.
//!
//! Ties are broken explicitly: the earliest date wins for busiest-day
//! queries, the lexicographically smallest symbol wins otherwise. Top-1
//! queries over an empty trade set return `EmptyDataset`.

use super::aggregate::{self, DailyVolume, SymbolDailyVolume, round2};
use super::error::TradeStatsError;
use super::trade::TradeRecord;
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MostTraded {
    pub symbol: String,
    pub trades: u64,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BestSymbol {
    pub symbol: String,
    /// Rounded to 2dp.
    pub total_value: f64,
}

/// Pick the row with the greatest `score`; among equal scores the
/// earliest row in iteration order wins. Callers feed rows in ascending
/// key order, so this yields the smallest key on ties.
fn top_by<T, S, F>(rows: impl IntoIterator<Item = T>, score: F) -> Option<T>
where
    S: PartialOrd,
    F: Fn(&T) -> S,
{
    rows.into_iter().fold(None, |best, row| match best {
        None => Some(row),
        Some(current) => match score(&row).partial_cmp(&score(&current)) {
            Some(Ordering::Greater) => Some(row),
            _ => Some(current),
        },
    })
}

pub fn busiest_day(records: &[TradeRecord]) -> Result<DailyVolume, TradeStatsError> {
    top_by(aggregate::daily_volume(records), |d| d.volume).ok_or(
        TradeStatsError::EmptyDataset {
            query: "busiest day",
        },
    )
}

/// The maximum-volume date within each symbol's own records, one row per
/// symbol with at least one dated trade, ascending by symbol.
pub fn busiest_day_per_symbol(records: &[TradeRecord]) -> Vec<SymbolDailyVolume> {
    let mut result: Vec<SymbolDailyVolume> = Vec::new();
    for row in aggregate::symbol_daily_volume(records) {
        match result.last_mut() {
            Some(best) if best.symbol == row.symbol => {
                if row.volume > best.volume {
                    *best = row;
                }
            }
            _ => result.push(row),
        }
    }
    result
}

pub fn most_traded_symbol(records: &[TradeRecord]) -> Result<MostTraded, TradeStatsError> {
    top_by(aggregate::trade_counts(records), |(_, count)| *count)
        .map(|(symbol, trades)| MostTraded { symbol, trades })
        .ok_or(TradeStatsError::EmptyDataset {
            query: "most traded symbol",
        })
}

pub fn best_symbol_by_value(records: &[TradeRecord]) -> Result<BestSymbol, TradeStatsError> {
    top_by(aggregate::symbol_values(records), |(_, value)| *value)
        .map(|(symbol, total_value)| BestSymbol {
            symbol,
            total_value: round2(total_value),
        })
        .ok_or(TradeStatsError::EmptyDataset {
            query: "best symbol",
        })
}
