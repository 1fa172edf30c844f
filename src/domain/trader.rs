//! Cash-and-shares ledger for one trader.
//!
//! Balance and share count change only through [`Trader::buy`] and
//! [`Trader::sell`], which clamp the request to what the ledger can cover and
//! execute it in one step. Neither can go negative.

use super::error::SimError;
use super::price_series::PriceSeries;
use super::strategy::TradeStrategy;

#[derive(Debug, Clone, PartialEq)]
pub struct Trader {
    name: String,
    balance: i64,
    shares: i64,
    strategy: TradeStrategy,
}

impl Trader {
    /// New trader with `starting_balance` cents and no shares.
    ///
    /// The balance is taken as given. A non-positive balance can never buy.
    pub fn new(name: impl Into<String>, starting_balance: i64, strategy: TradeStrategy) -> Self {
        Self {
            name: name.into(),
            balance: starting_balance,
            shares: 0,
            strategy,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn balance(&self) -> i64 {
        self.balance
    }

    pub fn shares(&self) -> i64 {
        self.shares
    }

    pub fn strategy(&self) -> TradeStrategy {
        self.strategy
    }

    /// balance + shares * current share price
    pub fn net_worth(&self, series: &PriceSeries) -> i64 {
        self.balance + self.shares * series.current_share_price()
    }

    /// Signed share quantity the strategy wants to trade today.
    pub fn decide(&self, series: &PriceSeries) -> Result<i64, SimError> {
        self.strategy.decide(self, series)
    }

    /// Buy up to `n` shares at the current price. Returns the quantity bought.
    pub fn buy(&mut self, series: &PriceSeries, n: i64) -> i64 {
        let price = series.current_share_price();
        if n <= 0 || price <= 0 {
            return 0;
        }
        let quantity = n.min(self.balance / price);
        if quantity <= 0 {
            return 0;
        }
        self.balance -= quantity * price;
        self.shares += quantity;
        tracing::debug!(
            trader = %self.name,
            requested = n,
            quantity,
            price,
            balance = self.balance,
            "buy"
        );
        quantity
    }

    /// Sell up to `n` shares at the current price. Returns the quantity sold.
    pub fn sell(&mut self, series: &PriceSeries, n: i64) -> i64 {
        let price = series.current_share_price();
        let quantity = n.min(self.shares);
        if quantity <= 0 {
            return 0;
        }
        self.balance += quantity * price;
        self.shares -= quantity;
        tracing::debug!(
            trader = %self.name,
            requested = n,
            quantity,
            price,
            balance = self.balance,
            "sell"
        );
        quantity
    }
}
