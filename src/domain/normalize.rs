//! Timestamp parsing and date derivation for raw trades.

use super::trade::{RawTrade, Side, TradeRecord};
use chrono::NaiveDateTime;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse `YYYY-MM-DD HH:MM:SS`; anything else yields `None`.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw.trim(), TIMESTAMP_FORMAT).ok()
}

pub fn normalize_one(raw: RawTrade) -> TradeRecord {
    let timestamp = parse_timestamp(&raw.timestamp);
    TradeRecord {
        timestamp,
        date: timestamp.map(|ts| ts.date()),
        side: Side::parse(&raw.side),
        symbol: raw.symbol,
        quantity: raw.quantity,
        price: raw.price,
    }
}

/// 1:1, order-preserving. Unparseable timestamps are kept with a null date.
pub fn normalize(raw: &[RawTrade]) -> Vec<TradeRecord> {
    let records: Vec<TradeRecord> = raw.iter().cloned().map(normalize_one).collect();

    let undated = records.iter().filter(|r| r.date.is_none()).count();
    if undated > 0 {
        tracing::debug!(undated, total = records.len(), "trades with unparseable timestamps");
    }

    records
}
