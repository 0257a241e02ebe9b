//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::generator::{GeneratorConfig, generate_trades};
use crate::adapters::text_report;
use crate::domain::aggregate;
use crate::domain::error::TradeStatsError;
use crate::domain::normalize::normalize;
use crate::domain::ranking;
use crate::domain::trade::TradeRecord;
use crate::ports::config_port::ConfigPort;
use crate::ports::trade_port::{TradePort, TradeSink};

#[derive(Parser, Debug)]
#[command(name = "tradestats", about = "Trade ledger statistics")]
pub struct Cli {
    /// Log filter used when RUST_LOG is unset (e.g. "debug", "tradestats=trace")
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load a CSV trade file into the SQLite store
    Ingest {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Print per-symbol summary and busiest days
    Analyze {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// List distinct symbols
    Symbols {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Daily average price and volume for one symbol
    Trend {
        #[arg(long)]
        symbol: String,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Write a synthetic trade CSV
    Generate {
        #[arg(short, long)]
        output: PathBuf,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Start the web server
    Serve {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        csv: Option<PathBuf>,
    },
}

impl Command {
    fn config_path(&self) -> Option<&PathBuf> {
        match self {
            Command::Ingest { config, .. } | Command::Serve { config, .. } => Some(config),
            Command::Analyze { config, .. }
            | Command::Symbols { config, .. }
            | Command::Trend { config, .. }
            | Command::Generate { config, .. } => config.as_ref(),
        }
    }
}

pub fn run(cli: Cli) -> ExitCode {
    init_logging(resolve_log_level(&cli).as_str());

    let result = match cli.command {
        Command::Ingest { config, csv } => run_ingest(&config, csv.as_ref()),
        Command::Analyze { config, csv } => run_analyze(config.as_ref(), csv.as_ref()),
        Command::Symbols { config, csv } => run_symbols(config.as_ref(), csv.as_ref()),
        Command::Trend {
            symbol,
            config,
            csv,
        } => run_trend(&symbol, config.as_ref(), csv.as_ref()),
        Command::Generate {
            output,
            config,
            seed,
        } => run_generate(&output, config.as_ref(), seed),
        Command::Serve { config, csv } => run_serve(&config, csv.as_ref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

/// `--log-level`, then `[logging] level` from the command's config, then `info`.
fn resolve_log_level(cli: &Cli) -> String {
    if let Some(level) = &cli.log_level {
        return level.clone();
    }
    cli.command
        .config_path()
        .and_then(|p| FileConfigAdapter::from_file(p).ok())
        .and_then(|c| c.get_string("logging", "level"))
        .unwrap_or_else(|| "info".to_string())
}

/// Install the stderr subscriber. `RUST_LOG` overrides `default_level`.
pub fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    // A subscriber may already be installed (tests, embedding); keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, TradeStatsError> {
    tracing::info!(path = %path.display(), "loading config");
    FileConfigAdapter::from_file(path)
}

/// Pick the trade source: an explicit CSV wins, then `[sqlite] path`,
/// then `[ingest] csv_path`.
pub fn open_trade_port(
    config: Option<&FileConfigAdapter>,
    csv: Option<&PathBuf>,
) -> Result<Box<dyn TradePort + Send + Sync>, TradeStatsError> {
    if let Some(path) = csv {
        return Ok(Box::new(CsvAdapter::new(path.clone())));
    }

    let config = config.ok_or_else(|| TradeStatsError::ConfigMissing {
        section: "sqlite".into(),
        key: "path".into(),
    })?;

    #[cfg(feature = "sqlite")]
    if config.get_string("sqlite", "path").is_some() {
        let adapter = crate::adapters::sqlite_adapter::SqliteAdapter::from_config(config)?;
        adapter.initialize_schema()?;
        return Ok(Box::new(adapter));
    }

    match config.get_path("ingest", "csv_path") {
        Some(path) => Ok(Box::new(CsvAdapter::new(path))),
        None => Err(TradeStatsError::ConfigMissing {
            section: "sqlite".into(),
            key: "path".into(),
        }),
    }
}

pub fn load_records(port: &dyn TradePort) -> Result<Vec<TradeRecord>, TradeStatsError> {
    let raw = port.load_trades()?;
    let records = normalize(&raw);
    tracing::info!(records = records.len(), "trades loaded");
    Ok(records)
}

fn records_from(
    config_path: Option<&PathBuf>,
    csv: Option<&PathBuf>,
) -> Result<Vec<TradeRecord>, TradeStatsError> {
    let config = config_path.map(|p| load_config(p)).transpose()?;
    let port = open_trade_port(config.as_ref(), csv)?;
    load_records(port.as_ref())
}

/// The ad-hoc analysis: summary, busiest day overall, busiest day per symbol.
pub fn analyze(records: &[TradeRecord]) -> String {
    let summary = aggregate::symbol_summary(records);
    let busiest = ranking::busiest_day(records).ok();
    let per_symbol = ranking::busiest_day_per_symbol(records);
    text_report::analysis_report(&summary, busiest.as_ref(), &per_symbol)
}

fn run_ingest(config_path: &Path, csv: Option<&PathBuf>) -> Result<(), TradeStatsError> {
    let config = load_config(config_path)?;
    let csv_path = csv
        .cloned()
        .or_else(|| config.get_path("ingest", "csv_path"))
        .ok_or_else(|| TradeStatsError::ConfigMissing {
            section: "ingest".into(),
            key: "csv_path".into(),
        })?;

    let trades = CsvAdapter::new(csv_path.clone()).load_trades()?;
    tracing::info!(path = %csv_path.display(), trades = trades.len(), "read CSV");

    #[cfg(feature = "sqlite")]
    {
        let store = crate::adapters::sqlite_adapter::SqliteAdapter::from_config(&config)?;
        store.initialize_schema()?;
        let written = store.store_trades(&trades)?;
        println!("Inserted {} trades", written);
        Ok(())
    }

    #[cfg(not(feature = "sqlite"))]
    {
        let _ = (config, trades);
        Err(TradeStatsError::Database {
            reason: "sqlite feature is required for ingest".into(),
        })
    }
}

fn run_analyze(config: Option<&PathBuf>, csv: Option<&PathBuf>) -> Result<(), TradeStatsError> {
    let records = records_from(config, csv)?;
    print!("{}", analyze(&records));
    Ok(())
}

fn run_symbols(config: Option<&PathBuf>, csv: Option<&PathBuf>) -> Result<(), TradeStatsError> {
    let records = records_from(config, csv)?;
    for symbol in aggregate::distinct_symbols(&records) {
        println!("{}", symbol);
    }
    Ok(())
}

fn run_trend(
    symbol: &str,
    config: Option<&PathBuf>,
    csv: Option<&PathBuf>,
) -> Result<(), TradeStatsError> {
    let records = records_from(config, csv)?;
    let points = aggregate::symbol_trend(&records, symbol)?;
    print!("{}", text_report::trend_table(symbol, &points));
    Ok(())
}

fn run_generate(
    output: &Path,
    config_path: Option<&PathBuf>,
    seed: Option<u64>,
) -> Result<(), TradeStatsError> {
    let mut gen_config = match config_path {
        Some(p) => GeneratorConfig::from_config(&load_config(p)?)?,
        None => GeneratorConfig::default(),
    };
    if seed.is_some() {
        gen_config.seed = seed;
    }

    let trades = generate_trades(&gen_config)?;
    let written = CsvAdapter::new(output.to_path_buf()).store_trades(&trades)?;
    println!("Generated {} trades into {}", written, output.display());
    Ok(())
}

fn run_serve(config_path: &Path, csv: Option<&PathBuf>) -> Result<(), TradeStatsError> {
    #[cfg(feature = "web")]
    {
        use crate::adapters::web::{AppState, build_router};
        use crate::domain::snapshot::TradeSnapshot;
        use std::net::SocketAddr;
        use std::sync::Arc;

        let config = load_config(config_path)?;
        let port: Arc<dyn TradePort + Send + Sync> = Arc::from(open_trade_port(Some(&config), csv)?);
        let snapshot = Arc::new(TradeSnapshot::new(load_records(port.as_ref())?));

        let listen = config
            .get_string("web", "listen")
            .unwrap_or_else(|| "127.0.0.1:8000".to_string());
        let addr: SocketAddr = listen.parse().map_err(|_| TradeStatsError::ConfigInvalid {
            section: "web".into(),
            key: "listen".into(),
            reason: format!("not a socket address: {listen}"),
        })?;

        let router = build_router(AppState {
            snapshot,
            trade_port: port,
        });

        let runtime = tokio::runtime::Runtime::new()?;
        runtime.block_on(async {
            let listener = tokio::net::TcpListener::bind(addr).await?;
            tracing::info!(%addr, "web server listening");
            axum::serve(listener, router).await
        })?;
        Ok(())
    }

    #[cfg(not(feature = "web"))]
    {
        let _ = (config_path, csv);
        Err(TradeStatsError::ConfigInvalid {
            section: "web".into(),
            key: "listen".into(),
            reason: "web feature is required for serve".into(),
        })
    }
}
