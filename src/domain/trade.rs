//! Trade execution records.

use chrono::{NaiveDate, NaiveDateTime};
use std::fmt;

/// Side of an execution. Unknown values are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Side {
    Buy,
    Sell,
    Other(String),
}

impl Side {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "BUY" => Side::Buy,
            "SELL" => Side::Sell,
            other => Side::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
            Side::Other(s) => s,
        }
    }

    /// Buys count positive; every other side counts as a sell. Negation
    /// saturates, so `i64::MIN` maps to `i64::MAX`.
    pub fn signed(&self, quantity: i64) -> i64 {
        match self {
            Side::Buy => quantity,
            _ => quantity.saturating_neg(),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Side {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A trade as delivered by ingestion: five untyped-timestamp fields.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTrade {
    pub timestamp: String,
    pub symbol: String,
    pub side: String,
    pub quantity: i64,
    pub price: f64,
}

/// A normalized trade. `timestamp` and `date` are `None` when the raw
/// timestamp did not parse.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeRecord {
    pub timestamp: Option<NaiveDateTime>,
    pub date: Option<NaiveDate>,
    pub symbol: String,
    pub side: Side,
    pub quantity: i64,
    pub price: f64,
}

impl TradeRecord {
    /// quantity * price
    pub fn value(&self) -> f64 {
        self.quantity as f64 * self.price
    }

    pub fn signed_quantity(&self) -> i64 {
        self.side.signed(self.quantity)
    }
}
