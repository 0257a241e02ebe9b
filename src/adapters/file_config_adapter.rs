//! INI file configuration adapter.

use crate::domain::error::TradeStatsError;
use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct FileConfigAdapter {
    config: Ini,
    base_dir: Option<PathBuf>,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TradeStatsError> {
        let path = path.as_ref();
        let mut config = Ini::new();
        config
            .load(path)
            .map_err(|reason| TradeStatsError::ConfigParse {
                file: path.display().to_string(),
                reason,
            })?;
        Ok(Self {
            config,
            base_dir: path.parent().map(Path::to_path_buf),
        })
    }

    pub fn from_string(content: &str) -> Result<Self, TradeStatsError> {
        let mut config = Ini::new();
        config
            .read(content.to_string())
            .map_err(|reason| TradeStatsError::ConfigParse {
                file: "<string>".into(),
                reason,
            })?;
        Ok(Self {
            config,
            base_dir: None,
        })
    }

    /// A path value; relative paths resolve against the config file's directory.
    pub fn get_path(&self, section: &str, key: &str) -> Option<PathBuf> {
        let raw = PathBuf::from(self.get_string(section, key)?);
        match &self.base_dir {
            Some(base) if raw.is_relative() && !base.as_os_str().is_empty() => Some(base.join(raw)),
            _ => Some(raw),
        }
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.config
            .getint(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        self.config
            .getfloat(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"
[sqlite]
path = trades.db
pool_size = 2

[web]
listen = 0.0.0.0:8000

[generate]
symbols = AAPL,MSFT
trades_per_day = 50
"#;

    #[test]
    fn reads_sections() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(adapter.get_string("sqlite", "path"), Some("trades.db".into()));
        assert_eq!(adapter.get_int("sqlite", "pool_size", 4), 2);
        assert_eq!(
            adapter.get_string("web", "listen"),
            Some("0.0.0.0:8000".into())
        );
        assert_eq!(adapter.get_int("generate", "trades_per_day", 200), 50);
    }

    #[test]
    fn missing_keys_fall_back() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(adapter.get_string("sqlite", "missing"), None);
        assert_eq!(adapter.get_int("generate", "days", 45), 45);
        assert_eq!(adapter.get_double("generate", "min_price", 50.0), 50.0);
    }

    #[test]
    fn non_numeric_values_fall_back() {
        let adapter = FileConfigAdapter::from_string("[sqlite]\npool_size = many\n").unwrap();
        assert_eq!(adapter.get_int("sqlite", "pool_size", 4), 4);
        assert_eq!(adapter.get_double("sqlite", "pool_size", 1.5), 1.5);
    }

    #[test]
    fn require_string_reports_section_and_key() {
        let adapter = FileConfigAdapter::from_string("[web]\n").unwrap();
        let err = adapter.require_string("sqlite", "path").unwrap_err();
        assert!(
            matches!(err, TradeStatsError::ConfigMissing { section, key } if section == "sqlite" && key == "path")
        );
    }

    #[test]
    fn from_file_resolves_relative_paths() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[ingest]\ncsv_path = data/trades.csv\n[sqlite]\npath = /abs/trades.db\n")
            .unwrap();
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();

        let base = file.path().parent().unwrap();
        assert_eq!(
            adapter.get_path("ingest", "csv_path"),
            Some(base.join("data/trades.csv"))
        );
        assert_eq!(
            adapter.get_path("sqlite", "path"),
            Some(PathBuf::from("/abs/trades.db"))
        );
    }

    #[test]
    fn from_string_paths_stay_relative() {
        let adapter = FileConfigAdapter::from_string("[ingest]\ncsv_path = trades.csv\n").unwrap();
        assert_eq!(
            adapter.get_path("ingest", "csv_path"),
            Some(PathBuf::from("trades.csv"))
        );
    }

    #[test]
    fn from_file_missing_is_config_parse_error() {
        let err = FileConfigAdapter::from_file("/nonexistent/path/config.ini").unwrap_err();
        assert!(matches!(err, TradeStatsError::ConfigParse { .. }));
    }
}
