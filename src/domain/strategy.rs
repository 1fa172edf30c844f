//! Trade decision strategies.
//!
//! A strategy turns the current series state and a trader's ledger into a signed
//! share quantity: positive to buy, negative to sell, zero to hold.

use std::fmt;
use std::str::FromStr;

use super::error::SimError;
use super::indicator::IndicatorType;
use super::price_series::PriceSeries;
use super::trader::Trader;

/// Default RSI window in trading days.
pub const RSI_WINDOW: usize = 14;

/// Share of balance (buy) or holdings (sell) the moving-average strategy trades per day.
const MA_TRADE_FRACTION: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeStrategy {
    /// Spend the whole balance whenever at least one share is affordable.
    Holder,
    /// Buy below the trailing average, sell above it.
    MovingAverage { window: usize },
    /// Hold a share allocation proportional to RSI.
    Rsi { window: usize },
}

impl TradeStrategy {
    pub fn rsi() -> Self {
        TradeStrategy::Rsi { window: RSI_WINDOW }
    }

    /// Name used for reports, e.g. "5-day MA Trader".
    pub fn display_name(&self) -> String {
        match self {
            TradeStrategy::Holder => "Holder".to_string(),
            TradeStrategy::MovingAverage { window } => format!("{}-day MA Trader", window),
            TradeStrategy::Rsi { window } if *window == RSI_WINDOW => "RSI Trader".to_string(),
            TradeStrategy::Rsi { window } => format!("{}-day RSI Trader", window),
        }
    }

    /// Indicator the strategy reads, if any.
    pub fn indicator(&self) -> Option<IndicatorType> {
        match self {
            TradeStrategy::Holder => None,
            TradeStrategy::MovingAverage { window } => Some(IndicatorType::Sma(*window)),
            TradeStrategy::Rsi { window } => Some(IndicatorType::Rsi(*window)),
        }
    }

    /// Number of days the strategy holds before its indicator is available.
    pub fn warmup_days(&self) -> usize {
        self.indicator().map_or(0, |i| i.first_valid_cursor())
    }

    pub fn decide(&self, trader: &Trader, series: &PriceSeries) -> Result<i64, SimError> {
        let price = series.current_share_price();
        if price <= 0 {
            return Ok(0);
        }
        let in_warmup = match series.cursor() {
            Some(c) => c < self.warmup_days(),
            None => true,
        };

        match self {
            TradeStrategy::Holder => Ok((trader.balance() / price).max(0)),
            _ if in_warmup => Ok(0),
            TradeStrategy::MovingAverage { window } => {
                let average = series.moving_average(*window)?;
                let price = price as f64;
                if price < average {
                    Ok((MA_TRADE_FRACTION * trader.balance() as f64 / price).round() as i64)
                } else if price > average {
                    Ok((-MA_TRADE_FRACTION * trader.shares() as f64).round() as i64)
                } else {
                    Ok(0)
                }
            }
            TradeStrategy::Rsi { window } => {
                let fraction = series.relative_strength_index(*window)? / 100.0;
                let net_worth = trader.net_worth(series) as f64;
                let target = (fraction * net_worth / price as f64).round() as i64;
                Ok(target - trader.shares())
            }
        }
    }
}

impl fmt::Display for TradeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeStrategy::Holder => write!(f, "holder"),
            TradeStrategy::MovingAverage { window } => write!(f, "ma:{}", window),
            TradeStrategy::Rsi { window } => write!(f, "rsi:{}", window),
        }
    }
}

impl FromStr for TradeStrategy {
    type Err = String;

    /// Parses `holder`, `rsi`, `rsi:<days>` or `ma:<days>` (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        let (kind, arg) = match lower.split_once(':') {
            Some((k, a)) => (k.trim(), Some(a.trim())),
            None => (lower.as_str(), None),
        };

        let parse_window = |arg: &str| -> Result<usize, String> {
            match arg.parse::<usize>() {
                Ok(0) => Err(format!("window must be positive in '{}'", s.trim())),
                Ok(n) => Ok(n),
                Err(_) => Err(format!("invalid window '{}' in '{}'", arg, s.trim())),
            }
        };

        match (kind, arg) {
            ("holder", None) => Ok(TradeStrategy::Holder),
            ("rsi", None) => Ok(TradeStrategy::rsi()),
            ("rsi", Some(a)) => Ok(TradeStrategy::Rsi {
                window: parse_window(a)?,
            }),
            ("ma", Some(a)) => Ok(TradeStrategy::MovingAverage {
                window: parse_window(a)?,
            }),
            ("ma", None) => Err("moving average trader needs a window, e.g. 'ma:5'".to_string()),
            _ => Err(format!("unknown trader '{}'", s.trim())),
        }
    }
}
