//! Simulation driver and scenario runner.
//!
//! A run resets the series, then for each day: advance, ask the trader for a
//! quantity, execute it, and record the post-trade ledger. Runs over the same
//! series are strictly sequential because they share its cursor.

use chrono::NaiveDate;
use std::path::PathBuf;

use super::error::SimError;
use super::price_series::PriceSeries;
use super::strategy::TradeStrategy;
use super::trader::Trader;

/// Stocks compared when no code list is configured.
pub const DEFAULT_CODES: [&str; 4] = ["AAPL", "AMZN", "GOOGL", "MSFT"];

/// 10000.00 in cents.
pub const DEFAULT_STARTING_BALANCE: i64 = 1_000_000;

/// Everything needed to run and persist a multi-stock comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioConfig {
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    pub codes: Vec<String>,
    pub starting_balance: i64,
    pub traders: Vec<TraderSpec>,
}

/// Post-trade state for one simulated day. Money is in cents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationRecord {
    pub date: NaiveDate,
    pub balance: i64,
    pub shares: i64,
    pub share_price: i64,
    pub share_value: i64,
}

impl SimulationRecord {
    pub fn net_worth(&self) -> i64 {
        self.balance + self.share_value
    }
}

/// One trader's full replay over one stock.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    pub stock: String,
    pub trader: String,
    pub strategy: TradeStrategy,
    pub starting_balance: i64,
    pub records: Vec<SimulationRecord>,
}

impl SimulationResult {
    /// Net worth after the last day, or the starting balance for an empty run.
    pub fn final_net_worth(&self) -> i64 {
        self.records
            .last()
            .map_or(self.starting_balance, |r| r.net_worth())
    }

    /// (final - start) / start
    pub fn total_return(&self) -> f64 {
        if self.starting_balance <= 0 {
            return 0.0;
        }
        (self.final_net_worth() - self.starting_balance) as f64 / self.starting_balance as f64
    }
}

/// Trader to build for each stock in a scenario.
#[derive(Debug, Clone, PartialEq)]
pub struct TraderSpec {
    pub name: String,
    pub strategy: TradeStrategy,
}

impl TraderSpec {
    pub fn new(strategy: TradeStrategy) -> Self {
        Self {
            name: strategy.display_name(),
            strategy,
        }
    }
}

impl From<TradeStrategy> for TraderSpec {
    fn from(strategy: TradeStrategy) -> Self {
        TraderSpec::new(strategy)
    }
}

/// Holder, RSI, 5-day MA and 20-day MA.
pub fn default_trader_specs() -> Vec<TraderSpec> {
    vec![
        TraderSpec::new(TradeStrategy::Holder),
        TraderSpec::new(TradeStrategy::rsi()),
        TraderSpec::new(TradeStrategy::MovingAverage { window: 5 }),
        TraderSpec::new(TradeStrategy::MovingAverage { window: 20 }),
    ]
}

pub fn run_simulation(
    series: &mut PriceSeries,
    trader: &mut Trader,
) -> Result<SimulationResult, SimError> {
    let starting_balance = trader.balance();
    series.reset();

    let mut records = Vec::with_capacity(series.len());
    for _ in 0..series.len() {
        series.advance_day()?;

        let quantity = trader.decide(series)?;
        if quantity > 0 {
            trader.buy(series, quantity);
        } else if quantity < 0 {
            trader.sell(series, -quantity);
        }

        let date = series.current_date().ok_or(SimError::OutOfRange {
            cursor: series.cursor(),
            window: 0,
            len: series.len(),
        })?;
        let share_price = series.current_share_price();
        records.push(SimulationRecord {
            date,
            balance: trader.balance(),
            shares: trader.shares(),
            share_price,
            share_value: trader.shares() * share_price,
        });
    }

    let result = SimulationResult {
        stock: series.name().to_string(),
        trader: trader.name().to_string(),
        strategy: trader.strategy(),
        starting_balance,
        records,
    };
    let indicator = result
        .strategy
        .indicator()
        .map_or_else(|| "none".to_string(), |i| i.to_string());
    tracing::info!(
        stock = %result.stock,
        trader = %result.trader,
        %indicator,
        days = result.records.len(),
        final_net_worth = result.final_net_worth(),
        "simulation complete"
    );
    Ok(result)
}

/// Run every trader in `specs` over `series`, each from a fresh ledger.
pub fn run_scenario(
    series: &mut PriceSeries,
    starting_balance: i64,
    specs: &[TraderSpec],
) -> Result<Vec<SimulationResult>, SimError> {
    specs
        .iter()
        .map(|spec| {
            let mut trader = Trader::new(spec.name.clone(), starting_balance, spec.strategy);
            run_simulation(series, &mut trader)
        })
        .collect()
}
