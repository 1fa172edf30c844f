//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::config_validation::{validate_simulation_config, SECTION};
use crate::domain::error::SimError;
use crate::domain::indicator::rsi::rsi_series;
use crate::domain::simulation::{
    default_trader_specs, run_scenario, ScenarioConfig, SimulationResult, TraderSpec,
    DEFAULT_CODES, DEFAULT_STARTING_BALANCE,
};
use crate::domain::strategy::{TradeStrategy, RSI_WINDOW};
use crate::domain::trading_day::{format_cents, to_cents};
use crate::domain::universe::{load_universe, parse_codes};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

const RSI_SECTION: &str = "rsi";

#[derive(Parser, Debug)]
#[command(name = "stocksim", about = "Day-by-day trading strategy simulator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run every configured trader against every configured stock
    Simulate {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
        #[arg(long)]
        code: Option<String>,
        #[arg(long)]
        dry_run: bool,
    },
    /// Export the RSI series of one stock as CSV
    Rsi {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long)]
        data_dir: PathBuf,
        #[arg(long)]
        code: Option<String>,
        #[arg(short, long)]
        period: Option<usize>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show day count and date range for stock(s)
    Info {
        #[arg(short, long)]
        data_dir: PathBuf,
        #[arg(long)]
        code: Option<String>,
    },
    /// List stocks available in a data directory
    ListSymbols {
        #[arg(short, long)]
        data_dir: PathBuf,
    },
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct ScenarioOverrides {
    pub data_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub codes: Option<String>,
}

/// Install the stderr `tracing` subscriber. `RUST_LOG` overrides the `info` default.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Simulate {
            config,
            data_dir,
            output_dir,
            code,
            dry_run,
        } => run_simulate(
            config.as_deref(),
            ScenarioOverrides {
                data_dir,
                output_dir,
                codes: code,
            },
            dry_run,
        ),
        Command::Rsi {
            config,
            data_dir,
            code,
            period,
            output,
        } => run_rsi(
            config.as_deref(),
            &data_dir,
            code.as_deref(),
            period,
            output.as_deref(),
        ),
        Command::Info { data_dir, code } => run_info(&data_dir, code.as_deref()),
        Command::ListSymbols { data_dir } => run_list_symbols(&data_dir),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, SimError> {
    FileConfigAdapter::from_file(path).map_err(|e| SimError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })
}

pub fn build_scenario_config(
    config: &dyn ConfigPort,
    overrides: &ScenarioOverrides,
) -> Result<ScenarioConfig, SimError> {
    validate_simulation_config(config)?;

    let dir = |override_dir: &Option<PathBuf>, key: &str, default: &str| {
        override_dir
            .clone()
            .or_else(|| config.get_string(SECTION, key).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(default))
    };

    let codes = match overrides
        .codes
        .clone()
        .or_else(|| config.get_string(SECTION, "codes"))
    {
        Some(raw) => parse_codes(&raw).map_err(|e| SimError::ConfigInvalid {
            section: SECTION.to_string(),
            key: "codes".to_string(),
            reason: e.to_string(),
        })?,
        None => DEFAULT_CODES.iter().map(|c| c.to_string()).collect(),
    };

    let starting_balance = config
        .get_double(SECTION, "starting_balance")?
        .map_or(DEFAULT_STARTING_BALANCE, to_cents);

    let traders = match config.get_list(SECTION, "traders") {
        Some(specs) => specs
            .iter()
            .map(|s| {
                s.parse::<TradeStrategy>()
                    .map(TraderSpec::new)
                    .map_err(|reason| SimError::ConfigInvalid {
                        section: SECTION.to_string(),
                        key: "traders".to_string(),
                        reason,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?,
        None => default_trader_specs(),
    };

    Ok(ScenarioConfig {
        data_dir: dir(&overrides.data_dir, "data_dir", "."),
        output_dir: dir(&overrides.output_dir, "output_dir", "out"),
        codes,
        starting_balance,
        traders,
    })
}

/// Load every stock, run every trader over it, and persist each result table.
pub fn run_scenario_pipeline(
    data_port: &dyn DataPort,
    report_port: &dyn ReportPort,
    scenario: &ScenarioConfig,
) -> Result<Vec<SimulationResult>, SimError> {
    let universe = load_universe(data_port, &scenario.codes)?;
    if !universe.skipped.is_empty() {
        tracing::warn!(
            loaded = universe.series.len(),
            requested = scenario.codes.len(),
            skipped = %universe.skipped.join(","),
            "simulating a partial universe"
        );
    }

    let mut results = Vec::new();
    for mut series in universe.series {
        tracing::info!(
            stock = series.name(),
            days = series.len(),
            traders = scenario.traders.len(),
            "simulating"
        );
        let stock_results = run_scenario(&mut series, scenario.starting_balance, &scenario.traders)?;
        report_port.write_all(&stock_results)?;
        results.extend(stock_results);
    }
    Ok(results)
}

/// One line per run, e.g. `AAPL Holder: net worth 12000.00 (+20.00%)`.
pub fn format_summary(result: &SimulationResult) -> String {
    format!(
        "{} {}: net worth {} ({:+.2}%)",
        result.stock,
        result.trader,
        format_cents(result.final_net_worth()),
        result.total_return() * 100.0
    )
}

fn load_optional_config(config_path: Option<&Path>) -> Result<FileConfigAdapter, SimError> {
    match config_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading config");
            load_config(path)
        }
        None => FileConfigAdapter::from_string("").map_err(|reason| SimError::ConfigParse {
            file: "<defaults>".to_string(),
            reason,
        }),
    }
}

fn run_simulate(
    config_path: Option<&Path>,
    overrides: ScenarioOverrides,
    dry_run: bool,
) -> Result<(), SimError> {
    let config = load_optional_config(config_path)?;
    let scenario = build_scenario_config(&config, &overrides)?;

    if dry_run {
        print_scenario(&scenario);
        return Ok(());
    }

    let data_port = CsvAdapter::new(scenario.data_dir.clone());
    let report_port = CsvReportAdapter::new(scenario.output_dir.clone());
    let results = run_scenario_pipeline(&data_port, &report_port, &scenario)?;

    for result in &results {
        println!("{}", format_summary(result));
    }
    Ok(())
}

fn print_scenario(scenario: &ScenarioConfig) {
    println!("Scenario:");
    println!("  data_dir:         {}", scenario.data_dir.display());
    println!("  output_dir:       {}", scenario.output_dir.display());
    println!("  codes:            {}", scenario.codes.join(", "));
    println!("  starting_balance: {}", format_cents(scenario.starting_balance));
    println!("  traders:");
    for spec in &scenario.traders {
        println!("    {} ({})", spec.name, spec.strategy);
    }
    println!("\nDry run complete: configuration is valid");
}

pub fn write_rsi_csv<W: Write>(
    writer: W,
    data_port: &dyn DataPort,
    code: &str,
    period: usize,
) -> Result<usize, SimError> {
    if period == 0 {
        return Err(SimError::ConfigInvalid {
            section: RSI_SECTION.to_string(),
            key: "period".to_string(),
            reason: "period must be positive".to_string(),
        });
    }
    let series = data_port.load_series(code)?;
    let points = rsi_series(series.days(), period)?;

    let mut wtr = csv::Writer::from_writer(writer);
    let csv_err = |e: csv::Error| SimError::Io(io::Error::other(e));
    wtr.write_record(["Date", "RSI"]).map_err(csv_err)?;
    for (date, rsi) in &points {
        wtr.write_record([date.format("%Y-%m-%d").to_string(), rsi.to_string()])
            .map_err(csv_err)?;
    }
    wtr.flush()?;
    Ok(points.len())
}

/// Resolve the stock and period for an RSI export: flags first, then `[rsi]`.
pub fn resolve_rsi_request(
    config: &dyn ConfigPort,
    code: Option<&str>,
    period: Option<usize>,
) -> Result<(String, usize), SimError> {
    let code = code
        .map(str::to_string)
        .or_else(|| config.get_string(RSI_SECTION, "code"))
        .ok_or_else(|| SimError::ConfigMissing {
            section: RSI_SECTION.to_string(),
            key: "code".to_string(),
        })?;

    let period = match (period, config.get_int(RSI_SECTION, "period")?) {
        (Some(p), _) => p,
        (None, None) => RSI_WINDOW,
        (None, Some(raw)) => usize::try_from(raw).map_err(|_| SimError::ConfigInvalid {
            section: RSI_SECTION.to_string(),
            key: "period".to_string(),
            reason: format!("{} is not a valid period", raw),
        })?,
    };

    Ok((code.trim().to_uppercase(), period))
}

fn run_rsi(
    config_path: Option<&Path>,
    data_dir: &Path,
    code: Option<&str>,
    period: Option<usize>,
    output: Option<&Path>,
) -> Result<(), SimError> {
    let config = load_optional_config(config_path)?;
    let (code, period) = resolve_rsi_request(&config, code, period)?;
    let data_port = CsvAdapter::new(data_dir.to_path_buf());
    let rows = match output {
        Some(path) => write_rsi_csv(fs::File::create(path)?, &data_port, &code, period)?,
        None => write_rsi_csv(io::stdout().lock(), &data_port, &code, period)?,
    };
    tracing::info!(%code, period, rows, "exported RSI series");
    Ok(())
}

fn run_info(data_dir: &Path, code: Option<&str>) -> Result<(), SimError> {
    let data_port = CsvAdapter::new(data_dir.to_path_buf());
    let codes = match code {
        Some(c) => vec![c.to_uppercase()],
        None => data_port.list_symbols()?,
    };

    for c in &codes {
        match data_port.load_series(c) {
            Ok(series) => match (series.first_date(), series.last_date()) {
                (Some(first), Some(last)) => {
                    println!("{}: {} days, {} to {}", c, series.len(), first, last);
                }
                _ => eprintln!("{}: no data found", c),
            },
            Err(e) => eprintln!("error reading {}: {}", c, e),
        }
    }
    Ok(())
}

fn run_list_symbols(data_dir: &Path) -> Result<(), SimError> {
    let data_port = CsvAdapter::new(data_dir.to_path_buf());
    for symbol in data_port.list_symbols()? {
        println!("{}", symbol);
    }
    Ok(())
}
