//! Grouping primitives and per-symbol / per-date summary tables.
//!
//! Every function here is a pure query over an immutable slice of
//! normalized trades. Group keys come back in ascending order. Records
//! without a date are skipped by date-keyed groupings only. Integer sums
//! saturate at the `i64` bounds instead of overflowing.

use super::error::TradeStatsError;
use super::trade::{Side, TradeRecord};
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};
use std::num::Saturating;
use std::ops::AddAssign;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SymbolSummary {
    pub symbol: String,
    pub total_volume: i64,
    pub total_value: f64,
    pub net_position: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DailyVolume {
    pub date: NaiveDate,
    pub volume: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SymbolDailyVolume {
    pub symbol: String,
    pub date: NaiveDate,
    pub volume: i64,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub avg_price: f64,
    pub volume: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BuySellBucket {
    pub symbol: String,
    pub date: NaiveDate,
    pub side: Side,
    pub volume: i64,
}

/// Round to 2 decimal places. Output-only; never feed the result back
/// into another sum.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Single-key sum-group. Records for which `key` returns `None` are skipped.
pub fn sum_by<K, V, FK, FV>(records: &[TradeRecord], key: FK, projection: FV) -> BTreeMap<K, V>
where
    K: Ord,
    V: AddAssign + Default,
    FK: Fn(&TradeRecord) -> Option<K>,
    FV: Fn(&TradeRecord) -> V,
{
    let mut groups: BTreeMap<K, V> = BTreeMap::new();
    for record in records {
        if let Some(k) = key(record) {
            *groups.entry(k).or_default() += projection(record);
        }
    }
    groups
}

fn by_symbol(r: &TradeRecord) -> Option<String> {
    Some(r.symbol.clone())
}

fn quantity(r: &TradeRecord) -> Saturating<i64> {
    Saturating(r.quantity)
}

fn signed_quantity(r: &TradeRecord) -> Saturating<i64> {
    Saturating(r.signed_quantity())
}

/// Volume, value and net position per symbol, built from three separate
/// sums inner-joined on symbol.
pub fn symbol_summary(records: &[TradeRecord]) -> Vec<SymbolSummary> {
    let volume = sum_by(records, by_symbol, quantity);
    let value = sum_by(records, by_symbol, TradeRecord::value);
    let position = sum_by(records, by_symbol, signed_quantity);

    volume
        .into_iter()
        .filter_map(|(symbol, Saturating(total_volume))| {
            let total_value = *value.get(&symbol)?;
            let Saturating(net_position) = *position.get(&symbol)?;
            Some(SymbolSummary {
                symbol,
                total_volume,
                total_value,
                net_position,
            })
        })
        .collect()
}

pub fn daily_volume(records: &[TradeRecord]) -> Vec<DailyVolume> {
    sum_by(records, |r| r.date, quantity)
        .into_iter()
        .map(|(date, Saturating(volume))| DailyVolume { date, volume })
        .collect()
}

/// One row per (symbol, date) pair actually observed.
pub fn symbol_daily_volume(records: &[TradeRecord]) -> Vec<SymbolDailyVolume> {
    sum_by(
        records,
        |r| r.date.map(|d| (r.symbol.clone(), d)),
        quantity,
    )
    .into_iter()
    .map(|((symbol, date), Saturating(volume))| SymbolDailyVolume {
        symbol,
        date,
        volume,
    })
    .collect()
}

#[derive(Default)]
struct PriceVolume {
    price_sum: f64,
    count: u64,
    volume: Saturating<i64>,
}

impl AddAssign for PriceVolume {
    fn add_assign(&mut self, rhs: Self) {
        self.price_sum += rhs.price_sum;
        self.count += rhs.count;
        self.volume += rhs.volume;
    }
}

/// Daily average price and volume for one symbol.
///
/// Fails with `SymbolNotFound` when the symbol has no records at all. A
/// symbol whose records are all undated yields an empty series.
pub fn symbol_trend(
    records: &[TradeRecord],
    symbol: &str,
) -> Result<Vec<TrendPoint>, TradeStatsError> {
    if !records.iter().any(|r| r.symbol == symbol) {
        return Err(TradeStatsError::symbol_not_found(symbol));
    }

    let groups = sum_by(
        records,
        |r| if r.symbol == symbol { r.date } else { None },
        |r| PriceVolume {
            price_sum: r.price,
            count: 1,
            volume: quantity(r),
        },
    );

    Ok(groups
        .into_iter()
        .map(|(date, pv)| TrendPoint {
            date,
            avg_price: round2(pv.price_sum / pv.count as f64),
            volume: pv.volume.0,
        })
        .collect())
}

/// Volume per (symbol, date, side). Unknown sides get their own bucket.
pub fn buy_sell_trend(records: &[TradeRecord]) -> Vec<BuySellBucket> {
    sum_by(
        records,
        |r| r.date.map(|d| (r.symbol.clone(), d, r.side.clone())),
        quantity,
    )
    .into_iter()
    .map(|((symbol, date, side), Saturating(volume))| BuySellBucket {
        symbol,
        date,
        side,
        volume,
    })
    .collect()
}

/// Unique symbols, ascending.
pub fn distinct_symbols(records: &[TradeRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.symbol.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Number of records per symbol.
pub fn trade_counts(records: &[TradeRecord]) -> BTreeMap<String, u64> {
    sum_by(records, by_symbol, |_| 1u64)
}

/// Unrounded Σ(quantity × price) per symbol.
pub fn symbol_values(records: &[TradeRecord]) -> BTreeMap<String, f64> {
    sum_by(records, by_symbol, TradeRecord::value)
}
