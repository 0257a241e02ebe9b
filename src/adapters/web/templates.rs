//! HTML templates using Askama.

use askama::Template;
use chrono::NaiveDate;

use crate::domain::aggregate::{BuySellBucket, DailyVolume, SymbolSummary, TrendPoint};
use crate::domain::ranking::{BestSymbol, MostTraded};
use crate::domain::trade::Side;

/// BUY and SELL volume for one symbol on one date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuySellDay {
    pub date: NaiveDate,
    pub buy: i64,
    pub sell: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuySellSeries {
    pub symbol: String,
    pub days: Vec<BuySellDay>,
}

/// Pivot buy/sell buckets into one series per symbol. A side missing on a
/// date shows as zero; sides other than BUY and SELL are not charted.
pub fn buy_sell_series(buckets: &[BuySellBucket]) -> Vec<BuySellSeries> {
    let mut series: Vec<BuySellSeries> = Vec::new();
    for b in buckets {
        if matches!(b.side, Side::Other(_)) {
            continue;
        }
        if series.last().is_none_or(|s| s.symbol != b.symbol) {
            series.push(BuySellSeries {
                symbol: b.symbol.clone(),
                days: Vec::new(),
            });
        }
        let Some(current) = series.last_mut() else {
            continue;
        };
        if current.days.last().is_none_or(|d| d.date != b.date) {
            current.days.push(BuySellDay {
                date: b.date,
                buy: 0,
                sell: 0,
            });
        }
        if let Some(day) = current.days.last_mut() {
            match b.side {
                Side::Buy => day.buy = b.volume,
                _ => day.sell = b.volume,
            }
        }
    }
    series
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate<'a> {
    pub trade_count: usize,
    pub summary: &'a [SymbolSummary],
    pub busiest: Option<DailyVolume>,
    pub most_traded: Option<MostTraded>,
    pub best: Option<BestSymbol>,
    pub buy_sell: Vec<BuySellSeries>,
}

#[derive(Template)]
#[template(path = "trend.html")]
pub struct TrendTemplate<'a> {
    pub symbol: &'a str,
    pub points: &'a [TrendPoint],
}
