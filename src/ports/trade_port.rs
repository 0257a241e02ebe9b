//! Trade source and sink port traits.

use crate::domain::error::TradeStatsError;
use crate::domain::trade::RawTrade;

/// Reads the full trade ledger in the five-field ingestion schema.
pub trait TradePort {
    fn load_trades(&self) -> Result<Vec<RawTrade>, TradeStatsError>;
}

/// Persists trades. Returns the number of rows written.
pub trait TradeSink {
    fn store_trades(&self, trades: &[RawTrade]) -> Result<usize, TradeStatsError>;
}
