#![allow(dead_code)]

use chrono::NaiveDate;
use std::sync::Mutex;
use tradestats::domain::error::TradeStatsError;
use tradestats::domain::normalize::normalize;
pub use tradestats::domain::trade::{RawTrade, TradeRecord};
use tradestats::ports::trade_port::TradePort;

/// In-memory trade source. `set_trades` simulates new rows arriving.
pub struct MockTradePort {
    trades: Mutex<Vec<RawTrade>>,
    pub error: Option<String>,
}

impl MockTradePort {
    pub fn new(trades: Vec<RawTrade>) -> Self {
        Self {
            trades: Mutex::new(trades),
            error: None,
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            trades: Mutex::new(Vec::new()),
            error: Some(reason.to_string()),
        }
    }

    pub fn set_trades(&self, trades: Vec<RawTrade>) {
        *self.trades.lock().unwrap() = trades;
    }
}

impl TradePort for MockTradePort {
    fn load_trades(&self) -> Result<Vec<RawTrade>, TradeStatsError> {
        if let Some(reason) = &self.error {
            return Err(TradeStatsError::Database {
                reason: reason.clone(),
            });
        }
        Ok(self.trades.lock().unwrap().clone())
    }
}

pub fn raw(ts: &str, symbol: &str, side: &str, quantity: i64, price: f64) -> RawTrade {
    RawTrade {
        timestamp: ts.to_string(),
        symbol: symbol.to_string(),
        side: side.to_string(),
        quantity,
        price,
    }
}

pub fn records(raw_trades: &[RawTrade]) -> Vec<TradeRecord> {
    normalize(raw_trades)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A small multi-symbol ledger over three days plus one undated row.
pub fn sample_ledger() -> Vec<RawTrade> {
    vec![
        raw("2024-01-02 09:30:00", "AAPL", "BUY", 100, 10.0),
        raw("2024-01-02 10:15:00", "AAPL", "SELL", 40, 12.0),
        raw("2024-01-02 11:00:00", "MSFT", "BUY", 200, 300.0),
        raw("2024-01-03 09:45:00", "MSFT", "SELL", 50, 305.5),
        raw("2024-01-03 14:00:00", "TSLA", "BUY", 80, 200.0),
        raw("2024-01-04 15:59:00", "AAPL", "BUY", 20, 11.0),
        raw("01/05/2024 10:00", "TSLA", "SELL", 30, 210.0),
    ]
}

pub const SAMPLE_CSV: &str = "Timestamp,Symbol,Side,Quantity,Price\n\
2024-01-02 09:30:00,AAPL,BUY,100,10.0\n\
2024-01-02 10:15:00,AAPL,SELL,40,12.0\n\
2024-01-02 11:00:00,MSFT,BUY,200,300.0\n\
2024-01-03 09:45:00,MSFT,SELL,50,305.5\n\
2024-01-03 14:00:00,TSLA,BUY,80,200.0\n\
2024-01-04 15:59:00,AAPL,BUY,20,11.0\n\
01/05/2024 10:00,TSLA,SELL,30,210.0\n";
