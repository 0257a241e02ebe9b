//! Domain error types.

/// Top-level error type for tradestats.
#[derive(Debug, thiserror::Error)]
pub enum TradeStatsError {
    #[error("database error: {reason}")]
    Database { reason: String },

    #[error("database query error: {reason}")]
    DatabaseQuery { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("ingest error at line {line}: {reason}")]
    Ingest { line: u64, reason: String },

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("no trades available for {query}")]
    EmptyDataset { query: &'static str },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl TradeStatsError {
    pub fn symbol_not_found(symbol: impl Into<String>) -> Self {
        Self::SymbolNotFound {
            symbol: symbol.into(),
        }
    }

    /// True for "asked about something that does not exist" errors.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            TradeStatsError::SymbolNotFound { .. } | TradeStatsError::EmptyDataset { .. }
        )
    }
}

impl From<&TradeStatsError> for std::process::ExitCode {
    fn from(err: &TradeStatsError) -> Self {
        let code: u8 = match err {
            TradeStatsError::Io(_) => 1,
            TradeStatsError::ConfigParse { .. }
            | TradeStatsError::ConfigMissing { .. }
            | TradeStatsError::ConfigInvalid { .. } => 2,
            TradeStatsError::Database { .. } | TradeStatsError::DatabaseQuery { .. } => 3,
            TradeStatsError::Ingest { .. } => 4,
            TradeStatsError::SymbolNotFound { .. } | TradeStatsError::EmptyDataset { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_not_found_message_names_symbol() {
        let err = TradeStatsError::symbol_not_found("ZZZ");
        assert_eq!(err.to_string(), "symbol not found: ZZZ");
        assert!(err.is_not_found());
    }

    #[test]
    fn empty_dataset_is_not_found() {
        let err = TradeStatsError::EmptyDataset {
            query: "busiest day",
        };
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "no trades available for busiest day");
    }

    #[test]
    fn storage_errors_are_not_not_found() {
        let err = TradeStatsError::Database {
            reason: "locked".into(),
        };
        assert!(!err.is_not_found());
    }
}
