//! SQLite trade store.

use crate::domain::error::TradeStatsError;
use crate::domain::trade::RawTrade;
use crate::ports::config_port::ConfigPort;
use crate::ports::trade_port::{TradePort, TradeSink};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::params;

pub struct SqliteAdapter {
    pool: Pool<SqliteConnectionManager>,
}

fn query_err(e: rusqlite::Error) -> TradeStatsError {
    TradeStatsError::DatabaseQuery {
        reason: e.to_string(),
    }
}

impl SqliteAdapter {
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, TradeStatsError> {
        let db_path = config.require_string("sqlite", "path")?;
        let pool_size = config.get_int("sqlite", "pool_size", 4);
        if pool_size < 1 {
            return Err(TradeStatsError::ConfigInvalid {
                section: "sqlite".into(),
                key: "pool_size".into(),
                reason: "must be at least 1".into(),
            });
        }

        let manager = SqliteConnectionManager::file(&db_path);
        let pool = Pool::builder()
            .max_size(pool_size as u32)
            .build(manager)
            .map_err(|e: r2d2::Error| TradeStatsError::Database {
                reason: e.to_string(),
            })?;

        tracing::debug!(path = %db_path, pool_size, "opened sqlite trade store");
        Ok(Self { pool })
    }

    pub fn in_memory() -> Result<Self, TradeStatsError> {
        let manager = SqliteConnectionManager::memory();
        let pool = Pool::builder()
            .max_size(1)
            .build(manager)
            .map_err(|e: r2d2::Error| TradeStatsError::Database {
                reason: e.to_string(),
            })?;

        Ok(Self { pool })
    }

    fn conn(&self) -> Result<PooledConnection<SqliteConnectionManager>, TradeStatsError> {
        self.pool.get().map_err(|e: r2d2::Error| TradeStatsError::Database {
            reason: e.to_string(),
        })
    }

    pub fn initialize_schema(&self) -> Result<(), TradeStatsError> {
        self.conn()?
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS trades (
                    timestamp TEXT,
                    symbol TEXT,
                    side TEXT,
                    quantity INTEGER,
                    price REAL
                );
                CREATE INDEX IF NOT EXISTS idx_trades_symbol ON trades(symbol);",
            )
            .map_err(query_err)
    }

    pub fn count(&self) -> Result<usize, TradeStatsError> {
        let n: i64 = self
            .conn()?
            .query_row("SELECT COUNT(*) FROM trades", [], |row| row.get(0))
            .map_err(query_err)?;
        Ok(n as usize)
    }
}

impl TradeSink for SqliteAdapter {
    /// Appends in a single transaction.
    fn store_trades(&self, trades: &[RawTrade]) -> Result<usize, TradeStatsError> {
        let mut conn = self.conn()?;
        let tx = conn.transaction().map_err(query_err)?;
        {
            let mut stmt = tx
                .prepare(
                    "INSERT INTO trades (timestamp, symbol, side, quantity, price)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                )
                .map_err(query_err)?;
            for t in trades {
                stmt.execute(params![t.timestamp, t.symbol, t.side, t.quantity, t.price])
                    .map_err(query_err)?;
            }
        }
        tx.commit().map_err(query_err)?;

        tracing::info!(rows = trades.len(), "stored trades");
        Ok(trades.len())
    }
}

impl TradePort for SqliteAdapter {
    /// All rows in insertion order.
    fn load_trades(&self) -> Result<Vec<RawTrade>, TradeStatsError> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare(
                "SELECT timestamp, symbol, side, quantity, price
                 FROM trades
                 ORDER BY rowid ASC",
            )
            .map_err(query_err)?;

        let rows = stmt
            .query_map([], |row| {
                Ok(RawTrade {
                    timestamp: row.get::<_, Option<String>>(0)?.unwrap_or_default(),
                    symbol: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                    side: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                    quantity: row.get(3)?,
                    price: row.get(4)?,
                })
            })
            .map_err(query_err)?;

        let mut trades = Vec::new();
        for row in rows {
            trades.push(row.map_err(query_err)?);
        }

        tracing::debug!(trades = trades.len(), "loaded trades from sqlite");
        Ok(trades)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EmptyConfig;

    impl ConfigPort for EmptyConfig {
        fn get_string(&self, _section: &str, _key: &str) -> Option<String> {
            None
        }
        fn get_int(&self, _section: &str, _key: &str, default: i64) -> i64 {
            default
        }
        fn get_double(&self, _section: &str, _key: &str, default: f64) -> f64 {
            default
        }
    }

    fn trade(ts: &str, symbol: &str, side: &str, quantity: i64, price: f64) -> RawTrade {
        RawTrade {
            timestamp: ts.into(),
            symbol: symbol.into(),
            side: side.into(),
            quantity,
            price,
        }
    }

    fn seeded() -> SqliteAdapter {
        let adapter = SqliteAdapter::in_memory().unwrap();
        adapter.initialize_schema().unwrap();
        adapter
    }

    #[test]
    fn from_config_missing_path() {
        let result = SqliteAdapter::from_config(&EmptyConfig);
        match result {
            Err(TradeStatsError::ConfigMissing { section, key }) => {
                assert_eq!(section, "sqlite");
                assert_eq!(key, "path");
            }
            Err(other) => panic!("expected ConfigMissing, got: {other}"),
            Ok(_) => panic!("expected error, got Ok"),
        }
    }

    #[test]
    fn initialize_schema_is_idempotent() {
        let adapter = seeded();
        adapter.initialize_schema().unwrap();
        assert_eq!(adapter.count().unwrap(), 0);
    }

    #[test]
    fn store_and_load_preserves_order() {
        let adapter = seeded();
        let trades = vec![
            trade("2024-01-02 10:00:00", "MSFT", "BUY", 10, 300.0),
            trade("2024-01-01 10:00:00", "AAPL", "SELL", 5, 150.25),
            trade("garbled", "AAPL", "HOLD", 1, 1.0),
        ];

        assert_eq!(adapter.store_trades(&trades).unwrap(), 3);
        let loaded = adapter.load_trades().unwrap();
        assert_eq!(loaded, trades);
    }

    #[test]
    fn store_appends() {
        let adapter = seeded();
        adapter
            .store_trades(&[trade("2024-01-02 10:00:00", "MSFT", "BUY", 10, 300.0)])
            .unwrap();
        adapter
            .store_trades(&[trade("2024-01-02 10:00:00", "MSFT", "BUY", 10, 300.0)])
            .unwrap();
        assert_eq!(adapter.count().unwrap(), 2);
    }

    #[test]
    fn load_without_schema_is_query_error() {
        let adapter = SqliteAdapter::in_memory().unwrap();
        assert!(matches!(
            adapter.load_trades(),
            Err(TradeStatsError::DatabaseQuery { .. })
        ));
    }
}
