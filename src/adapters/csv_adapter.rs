//! CSV trade file adapter.
//!
//! Files carry a header row naming the five ingestion fields
//! (`Timestamp,Symbol,Side,Quantity,Price`); header names are matched
//! case-insensitively so both the capitalised export layout and the
//! lower-case store layout load.

use crate::domain::error::TradeStatsError;
use crate::domain::trade::RawTrade;
use crate::ports::trade_port::{TradePort, TradeSink};
use std::fs;
use std::path::PathBuf;

const COLUMNS: [&str; 5] = ["timestamp", "symbol", "side", "quantity", "price"];

pub struct CsvAdapter {
    path: PathBuf,
}

impl CsvAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

/// Parse trades from CSV text.
pub fn parse_trades(content: &str) -> Result<Vec<RawTrade>, TradeStatsError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = rdr.headers().map_err(|e| TradeStatsError::Ingest {
        line: 1,
        reason: format!("CSV header error: {}", e),
    })?;

    let mut index = [0usize; 5];
    for (slot, column) in index.iter_mut().zip(COLUMNS) {
        *slot = headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(column))
            .ok_or_else(|| TradeStatsError::Ingest {
                line: 1,
                reason: format!("missing {} column", column),
            })?;
    }
    let [ts_idx, symbol_idx, side_idx, qty_idx, price_idx] = index;

    let mut trades = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(|e| TradeStatsError::Ingest {
            line: e.position().map(|p| p.line()).unwrap_or(0),
            reason: format!("CSV parse error: {}", e),
        })?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        let field = |idx: usize, name: &str| {
            record.get(idx).ok_or_else(|| TradeStatsError::Ingest {
                line,
                reason: format!("missing {} value", name),
            })
        };

        let quantity: i64 =
            field(qty_idx, "quantity")?
                .parse()
                .map_err(|e| TradeStatsError::Ingest {
                    line,
                    reason: format!("invalid quantity value: {}", e),
                })?;

        let price: f64 = field(price_idx, "price")?
            .parse()
            .map_err(|e| TradeStatsError::Ingest {
                line,
                reason: format!("invalid price value: {}", e),
            })?;

        trades.push(RawTrade {
            timestamp: field(ts_idx, "timestamp")?.to_string(),
            symbol: field(symbol_idx, "symbol")?.to_string(),
            side: field(side_idx, "side")?.to_string(),
            quantity,
            price,
        });
    }

    Ok(trades)
}

impl TradePort for CsvAdapter {
    fn load_trades(&self) -> Result<Vec<RawTrade>, TradeStatsError> {
        let content = fs::read_to_string(&self.path).map_err(|e| TradeStatsError::Ingest {
            line: 0,
            reason: format!("failed to read {}: {}", self.path.display(), e),
        })?;
        let trades = parse_trades(&content)?;
        tracing::debug!(path = %self.path.display(), trades = trades.len(), "loaded trades from CSV");
        Ok(trades)
    }
}

impl TradeSink for CsvAdapter {
    /// Overwrites the file with the capitalised header layout. Prices are
    /// written at full precision.
    fn store_trades(&self, trades: &[RawTrade]) -> Result<usize, TradeStatsError> {
        let mut wtr = csv::Writer::from_path(&self.path).map_err(|e| TradeStatsError::Io(e.into()))?;
        wtr.write_record(["Timestamp", "Symbol", "Side", "Quantity", "Price"])
            .map_err(|e| TradeStatsError::Io(e.into()))?;
        for t in trades {
            let quantity = t.quantity.to_string();
            let price = t.price.to_string();
            wtr.write_record([
                t.timestamp.as_str(),
                t.symbol.as_str(),
                t.side.as_str(),
                quantity.as_str(),
                price.as_str(),
            ])
            .map_err(|e| TradeStatsError::Io(e.into()))?;
        }
        wtr.flush()?;
        Ok(trades.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = "Timestamp,Symbol,Side,Quantity,Price\n\
        2024-01-02 10:00:00,AAPL,BUY,100,10.0\n\
        2024-01-02 11:00:00,AAPL,SELL,40,12.0\n\
        not-a-date,MSFT,BUY,5,300.5\n";

    #[test]
    fn parses_capitalised_header() {
        let trades = parse_trades(SAMPLE).unwrap();
        assert_eq!(trades.len(), 3);
        assert_eq!(trades[0].timestamp, "2024-01-02 10:00:00");
        assert_eq!(trades[0].symbol, "AAPL");
        assert_eq!(trades[0].side, "BUY");
        assert_eq!(trades[0].quantity, 100);
        assert_eq!(trades[1].price, 12.0);
    }

    #[test]
    fn keeps_unparseable_timestamp_as_text() {
        let trades = parse_trades(SAMPLE).unwrap();
        assert_eq!(trades[2].timestamp, "not-a-date");
    }

    #[test]
    fn accepts_lowercase_reordered_header() {
        let content = "symbol,side,quantity,price,timestamp\nTSLA,SELL,3,200.0,2024-02-01 09:30:00\n";
        let trades = parse_trades(content).unwrap();
        assert_eq!(trades[0].symbol, "TSLA");
        assert_eq!(trades[0].timestamp, "2024-02-01 09:30:00");
    }

    #[test]
    fn missing_column_is_ingest_error() {
        let err = parse_trades("Timestamp,Symbol,Side,Quantity\n").unwrap_err();
        assert!(matches!(err, TradeStatsError::Ingest { line: 1, ref reason } if reason.contains("price")));
    }

    #[test]
    fn bad_quantity_reports_line() {
        let content = "Timestamp,Symbol,Side,Quantity,Price\n\
            2024-01-02 10:00:00,AAPL,BUY,100,10.0\n\
            2024-01-02 10:00:00,AAPL,BUY,lots,10.0\n";
        match parse_trades(content).unwrap_err() {
            TradeStatsError::Ingest { line, reason } => {
                assert_eq!(line, 3);
                assert!(reason.contains("quantity"));
            }
            other => panic!("expected Ingest, got {other}"),
        }
    }

    #[test]
    fn load_missing_file_is_error() {
        let dir = TempDir::new().unwrap();
        let adapter = CsvAdapter::new(dir.path().join("absent.csv"));
        assert!(adapter.load_trades().is_err());
    }

    #[test]
    fn store_then_load() {
        let dir = TempDir::new().unwrap();
        let adapter = CsvAdapter::new(dir.path().join("trades.csv"));
        let trades = parse_trades(SAMPLE).unwrap();

        assert_eq!(adapter.store_trades(&trades).unwrap(), 3);
        let loaded = adapter.load_trades().unwrap();
        assert_eq!(loaded, trades);
    }

    #[test]
    fn store_keeps_price_precision() {
        let dir = TempDir::new().unwrap();
        let adapter = CsvAdapter::new(dir.path().join("precise.csv"));
        let trade = RawTrade {
            timestamp: "2024-01-02 10:00:00".into(),
            symbol: "AAPL".into(),
            side: "BUY".into(),
            quantity: 3,
            price: 123.4567,
        };

        adapter.store_trades(std::slice::from_ref(&trade)).unwrap();
        assert_eq!(adapter.load_trades().unwrap(), vec![trade]);
    }
}
