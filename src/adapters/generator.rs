//! Synthetic trade ledger generation.

use crate::domain::error::TradeStatsError;
use crate::domain::normalize::TIMESTAMP_FORMAT;
use crate::domain::trade::RawTrade;
use crate::ports::config_port::ConfigPort;
use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Weekday};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

pub const DEFAULT_SYMBOLS: [&str; 7] = ["AAPL", "GOOG", "MSFT", "AMZN", "TSLA", "NVDA", "META"];

/// Session bounds in minutes after midnight: 09:30 to 16:00 inclusive.
const SESSION_OPEN_MIN: u32 = 9 * 60 + 30;
const SESSION_CLOSE_MIN: u32 = 16 * 60;

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    pub symbols: Vec<String>,
    pub start_date: NaiveDate,
    pub days: u32,
    pub trades_per_day: u32,
    pub min_quantity: i64,
    pub max_quantity: i64,
    pub min_price: f64,
    pub max_price: f64,
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            symbols: DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
            days: 45,
            trades_per_day: 200,
            min_quantity: 10,
            max_quantity: 1000,
            min_price: 50.0,
            max_price: 500.0,
            seed: None,
        }
    }
}

fn invalid(key: &str, reason: impl Into<String>) -> TradeStatsError {
    TradeStatsError::ConfigInvalid {
        section: "generate".into(),
        key: key.into(),
        reason: reason.into(),
    }
}

impl GeneratorConfig {
    /// Read the `[generate]` section, filling gaps from the defaults.
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, TradeStatsError> {
        let defaults = Self::default();

        let symbols = match config.get_string("generate", "symbols") {
            Some(list) => list
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            None => defaults.symbols,
        };

        let start_date = match config.get_string("generate", "start_date") {
            Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
                .map_err(|_| invalid("start_date", "invalid date format (expected YYYY-MM-DD)"))?,
            None => defaults.start_date,
        };

        let seed = config
            .get_string("generate", "seed")
            .map(|s| s.trim().parse::<u64>())
            .transpose()
            .map_err(|e| invalid("seed", e.to_string()))?;

        let cfg = Self {
            symbols,
            start_date,
            days: config.get_int("generate", "days", defaults.days as i64).max(0) as u32,
            trades_per_day: config
                .get_int("generate", "trades_per_day", defaults.trades_per_day as i64)
                .max(0) as u32,
            min_quantity: config.get_int("generate", "min_quantity", defaults.min_quantity),
            max_quantity: config.get_int("generate", "max_quantity", defaults.max_quantity),
            min_price: config.get_double("generate", "min_price", defaults.min_price),
            max_price: config.get_double("generate", "max_price", defaults.max_price),
            seed,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), TradeStatsError> {
        if self.symbols.is_empty() {
            return Err(invalid("symbols", "at least one symbol is required"));
        }
        if self.min_quantity < 1 || self.min_quantity > self.max_quantity {
            return Err(invalid("min_quantity", "quantity range must be positive and ordered"));
        }
        if !(self.min_price > 0.0 && self.min_price < self.max_price) {
            return Err(invalid("min_price", "price range must be positive and ordered"));
        }
        Ok(())
    }
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Generate trades for each weekday in `[start_date, start_date + days)`.
pub fn generate_trades(config: &GeneratorConfig) -> Result<Vec<RawTrade>, TradeStatsError> {
    config.validate()?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut trades = Vec::new();
    for offset in 0..config.days {
        let day = config.start_date + Duration::days(offset as i64);
        if is_weekend(day) {
            continue;
        }
        for _ in 0..config.trades_per_day {
            let minute = rng.gen_range(SESSION_OPEN_MIN..=SESSION_CLOSE_MIN);
            let time = NaiveTime::from_hms_opt(minute / 60, minute % 60, 0).unwrap_or_default();
            let symbol = config
                .symbols
                .choose(&mut rng)
                .cloned()
                .unwrap_or_default();
            let side = if rng.gen_bool(0.5) { "BUY" } else { "SELL" };
            let quantity = rng.gen_range(config.min_quantity..=config.max_quantity);
            let price = rng.gen_range(config.min_price..config.max_price);

            trades.push(RawTrade {
                timestamp: day.and_time(time).format(TIMESTAMP_FORMAT).to_string(),
                symbol,
                side: side.to_string(),
                quantity,
                price: (price * 100.0).round() / 100.0,
            });
        }
    }

    tracing::info!(trades = trades.len(), days = config.days, "generated synthetic trades");
    Ok(trades)
}
