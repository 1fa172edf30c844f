//! CLI integration tests for scenario orchestration.
//!
//! Tests cover:
//! - Config parsing (build_scenario_config) with defaults and overrides
//! - End-to-end simulate over real CSV files on disk
//! - RSI export
//! - Malformed input data fails the run; empty files are skipped

mod common;

use clap::Parser;
use common::*;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use stocksim::adapters::csv_adapter::CsvAdapter;
use stocksim::adapters::csv_report_adapter::CsvReportAdapter;
use stocksim::adapters::file_config_adapter::FileConfigAdapter;
use stocksim::cli::{self, ScenarioOverrides};
use stocksim::domain::error::SimError;
use stocksim::domain::simulation::{default_trader_specs, DEFAULT_STARTING_BALANCE};
use stocksim::domain::strategy::TradeStrategy;
use stocksim::domain::trading_day::format_cents;
use tempfile::TempDir;

const VALID_INI: &str = r#"
[simulation]
data_dir = prices
output_dir = results
codes = aapl, msft
starting_balance = 2500.50
traders = holder, ma:10, rsi
"#;

fn write_temp_ini(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Write `days` as a Yahoo-style CSV.
fn write_price_csv(dir: &Path, code: &str, days: &[TradingDay]) {
    let mut text = String::from("Date,Open,High,Low,Close,Adj Close,Volume\n");
    for d in days {
        text.push_str(&format!(
            "{},{},{},{},{},{},{}\n",
            d.date,
            format_cents(d.open),
            format_cents(d.high),
            format_cents(d.low),
            format_cents(d.close),
            format_cents(d.adj_close),
            d.volume
        ));
    }
    fs::write(dir.join(format!("{}.csv", code)), text).unwrap();
}

mod config_loading {
    use super::*;

    #[test]
    fn build_scenario_config_full() {
        let adapter = FileConfigAdapter::from_string(VALID_INI).unwrap();
        let scenario = cli::build_scenario_config(&adapter, &ScenarioOverrides::default()).unwrap();

        assert_eq!(scenario.data_dir, PathBuf::from("prices"));
        assert_eq!(scenario.output_dir, PathBuf::from("results"));
        assert_eq!(scenario.codes, vec!["AAPL", "MSFT"]);
        assert_eq!(scenario.starting_balance, 250_050);
        let names: Vec<&str> = scenario.traders.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Holder", "10-day MA Trader", "RSI Trader"]);
        assert_eq!(
            scenario.traders[1].strategy,
            TradeStrategy::MovingAverage { window: 10 }
        );
    }

    #[test]
    fn build_scenario_config_uses_defaults() {
        let adapter = FileConfigAdapter::from_string("[simulation]\n").unwrap();
        let scenario = cli::build_scenario_config(&adapter, &ScenarioOverrides::default()).unwrap();

        assert_eq!(scenario.data_dir, PathBuf::from("."));
        assert_eq!(scenario.output_dir, PathBuf::from("out"));
        assert_eq!(scenario.codes, vec!["AAPL", "AMZN", "GOOGL", "MSFT"]);
        assert_eq!(scenario.starting_balance, DEFAULT_STARTING_BALANCE);
        assert_eq!(scenario.traders, default_trader_specs());
    }

    #[test]
    fn overrides_take_precedence() {
        let adapter = FileConfigAdapter::from_string(VALID_INI).unwrap();
        let overrides = ScenarioOverrides {
            data_dir: Some(PathBuf::from("/data")),
            output_dir: Some(PathBuf::from("/out")),
            codes: Some("googl".to_string()),
        };
        let scenario = cli::build_scenario_config(&adapter, &overrides).unwrap();

        assert_eq!(scenario.data_dir, PathBuf::from("/data"));
        assert_eq!(scenario.output_dir, PathBuf::from("/out"));
        assert_eq!(scenario.codes, vec!["GOOGL"]);
    }

    #[test]
    fn invalid_override_codes_rejected() {
        let adapter = FileConfigAdapter::from_string("").unwrap();
        let overrides = ScenarioOverrides {
            codes: Some("AAPL,,MSFT".to_string()),
            ..ScenarioOverrides::default()
        };
        let err = cli::build_scenario_config(&adapter, &overrides).unwrap_err();
        assert!(matches!(&err, SimError::ConfigInvalid { key, .. } if key == "codes"));
    }

    #[test]
    fn unknown_trader_rejected() {
        let adapter =
            FileConfigAdapter::from_string("[simulation]\ntraders = holder, macd\n").unwrap();
        let err = cli::build_scenario_config(&adapter, &ScenarioOverrides::default()).unwrap_err();
        assert!(matches!(&err, SimError::ConfigInvalid { key, .. } if key == "traders"));
        assert_eq!(err.exit_status(), 2);
    }

    #[test]
    fn load_config_from_disk() {
        let file = write_temp_ini(VALID_INI);
        let adapter = cli::load_config(file.path()).unwrap();
        let scenario = cli::build_scenario_config(&adapter, &ScenarioOverrides::default()).unwrap();
        assert_eq!(scenario.codes.len(), 2);
    }

    #[test]
    fn load_config_missing_file() {
        let err = cli::load_config(Path::new("/nonexistent/stocksim.ini")).unwrap_err();
        assert!(matches!(err, SimError::ConfigParse { .. }));
    }
}

mod simulate_on_disk {
    use super::*;

    #[test]
    fn pipeline_writes_one_csv_per_stock_and_trader() {
        let dir = TempDir::new().unwrap();
        let data = dir.path().join("data");
        let out = dir.path().join("out");
        fs::create_dir_all(&data).unwrap();
        write_price_csv(&data, "AAPL", &generate_days("2017-01-02", 40, 11_500));
        write_price_csv(&data, "MSFT", &generate_days("2017-01-02", 40, 6_400));

        let adapter = FileConfigAdapter::from_string("[simulation]\ncodes = AAPL,MSFT\n").unwrap();
        let overrides = ScenarioOverrides {
            data_dir: Some(data.clone()),
            output_dir: Some(out.clone()),
            codes: None,
        };
        let scenario = cli::build_scenario_config(&adapter, &overrides).unwrap();
        let results = cli::run_scenario_pipeline(
            &CsvAdapter::new(data),
            &CsvReportAdapter::new(out.clone()),
            &scenario,
        )
        .unwrap();

        assert_eq!(results.len(), 8);
        for stock in ["AAPL", "MSFT"] {
            for trader in ["Holder", "RSI Trader", "5-day MA Trader", "20-day MA Trader"] {
                let path = out.join(format!("{} {}.csv", stock, trader));
                let text = fs::read_to_string(&path).unwrap();
                let mut lines = text.lines();
                assert_eq!(
                    lines.next(),
                    Some("Date,Balance,Shares,Share Price,Value of Shares")
                );
                assert_eq!(lines.count(), 40, "{}", path.display());
            }
        }
    }

    #[test]
    fn holder_report_rows() {
        let dir = TempDir::new().unwrap();
        let days = vec![
            make_day("2017-03-01", 10_000, 10_100),
            make_day("2017-03-02", 12_000, 11_900),
        ];
        write_price_csv(dir.path(), "AAPL", &days);

        let adapter = FileConfigAdapter::from_string(
            "[simulation]\ncodes = AAPL\nstarting_balance = 1050\ntraders = holder\n",
        )
        .unwrap();
        let overrides = ScenarioOverrides {
            data_dir: Some(dir.path().to_path_buf()),
            output_dir: Some(dir.path().join("out")),
            codes: None,
        };
        let scenario = cli::build_scenario_config(&adapter, &overrides).unwrap();
        cli::run_scenario_pipeline(
            &CsvAdapter::new(scenario.data_dir.clone()),
            &CsvReportAdapter::new(scenario.output_dir.clone()),
            &scenario,
        )
        .unwrap();

        let text = fs::read_to_string(dir.path().join("out").join("AAPL Holder.csv")).unwrap();
        assert_eq!(
            text,
            "Date,Balance,Shares,Share Price,Value of Shares\n\
             2017-03-01,50.00,10,100.00,1000.00\n\
             2017-03-02,50.00,10,120.00,1200.00\n"
        );
    }

    #[test]
    fn run_simulate_command_end_to_end() {
        let dir = TempDir::new().unwrap();
        write_price_csv(dir.path(), "GOOGL", &generate_days("2017-01-02", 25, 80_000));
        let out = dir.path().join("results");

        let args = [
            "stocksim".to_string(),
            "simulate".to_string(),
            "--data-dir".to_string(),
            dir.path().display().to_string(),
            "--output-dir".to_string(),
            out.display().to_string(),
            "--code".to_string(),
            "googl".to_string(),
        ];
        let _ = cli::run(cli::Cli::try_parse_from(args).unwrap());

        assert!(out.join("GOOGL Holder.csv").exists());
        assert!(out.join("GOOGL 20-day MA Trader.csv").exists());
    }

    #[test]
    fn malformed_stock_fails_the_whole_run() {
        let dir = TempDir::new().unwrap();
        write_price_csv(dir.path(), "AAPL", &generate_days("2017-01-02", 30, 11_500));
        fs::write(
            dir.path().join("MSFT.csv"),
            "Date,Open,High,Low,Close,Adj Close,Volume\n2017-03-01,null,64.10,63.20,63.90,63.90,1000\n",
        )
        .unwrap();
        let out = dir.path().join("out");
        let scenario = cli::build_scenario_config(
            &FileConfigAdapter::from_string("").unwrap(),
            &ScenarioOverrides {
                data_dir: Some(dir.path().to_path_buf()),
                output_dir: Some(out.clone()),
                codes: Some("AAPL,MSFT".to_string()),
            },
        )
        .unwrap();

        let err = cli::run_scenario_pipeline(
            &CsvAdapter::new(scenario.data_dir.clone()),
            &CsvReportAdapter::new(scenario.output_dir.clone()),
            &scenario,
        )
        .unwrap_err();

        assert!(matches!(err, SimError::DataFormat { .. }));
        assert_eq!(err.exit_status(), 3);
        assert!(!out.exists());
    }

    #[test]
    fn empty_stock_file_is_skipped() {
        let dir = TempDir::new().unwrap();
        write_price_csv(dir.path(), "AAPL", &generate_days("2017-01-02", 30, 11_500));
        write_price_csv(dir.path(), "MSFT", &[]);
        let out = dir.path().join("out");
        let scenario = cli::build_scenario_config(
            &FileConfigAdapter::from_string("[simulation]\ntraders = holder\n").unwrap(),
            &ScenarioOverrides {
                data_dir: Some(dir.path().to_path_buf()),
                output_dir: Some(out.clone()),
                codes: Some("AAPL,MSFT".to_string()),
            },
        )
        .unwrap();

        let results = cli::run_scenario_pipeline(
            &CsvAdapter::new(scenario.data_dir.clone()),
            &CsvReportAdapter::new(scenario.output_dir.clone()),
            &scenario,
        )
        .unwrap();

        assert_eq!(results.len(), 1);
        assert!(out.join("AAPL Holder.csv").exists());
        assert!(!out.join("MSFT Holder.csv").exists());
    }
}

mod rsi_export {
    use super::*;

    #[test]
    fn writes_header_and_valid_days_only() {
        let dir = TempDir::new().unwrap();
        let days: Vec<TradingDay> = (0..20)
            .map(|i| make_day(&format!("2024-01-{:02}", i + 1), 1_000, 1_000 + i * 10))
            .collect();
        write_price_csv(dir.path(), "AMZN", &days);

        let mut buf = Vec::new();
        let rows =
            cli::write_rsi_csv(&mut buf, &CsvAdapter::new(dir.path().to_path_buf()), "AMZN", 14)
                .unwrap();

        assert_eq!(rows, 5);
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Date,RSI");
        assert_eq!(lines[1], "2024-01-16,100");
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn zero_period_rejected() {
        let dir = TempDir::new().unwrap();
        write_price_csv(dir.path(), "AMZN", &generate_days("2024-01-01", 5, 1_000));
        let err = cli::write_rsi_csv(
            Vec::<u8>::new(),
            &CsvAdapter::new(dir.path().to_path_buf()),
            "AMZN",
            0,
        )
        .unwrap_err();
        assert!(matches!(&err, SimError::ConfigInvalid { key, .. } if key == "period"));
    }

    #[test]
    fn missing_stock_is_error() {
        let dir = TempDir::new().unwrap();
        let result = cli::write_rsi_csv(
            Vec::<u8>::new(),
            &CsvAdapter::new(dir.path().to_path_buf()),
            "NOPE",
            14,
        );
        assert!(result.is_err());
    }
}
