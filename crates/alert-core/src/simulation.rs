//! What-if price simulation: compare a user-entered price against the latest
//! market close and evaluate the rules on the resulting change.

use serde::{Deserialize, Serialize};

use crate::error::AlertError;
use crate::evaluate::{evaluate_breach, Breach};
use crate::rules::StockRule;

/// A user-entered hypothetical price for a symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationEntry {
    pub symbol: String,
    pub price: f64,
}

impl SimulationEntry {
    pub fn new(symbol: &str, price: f64) -> Result<Self, AlertError> {
        let symbol = symbol.trim().to_uppercase();
        if symbol.is_empty() {
            return Err(AlertError::EmptySymbol);
        }
        if price <= 0.0 {
            return Err(AlertError::InvalidPrice(price));
        }
        Ok(Self { symbol, price })
    }
}

/// Result of simulating one entry against the market price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationOutcome {
    pub symbol: String,
    pub market_price: f64,
    pub simulated_price: f64,
    pub price_diff: f64,
    pub change_percent: f64,
    pub breach: Option<Breach>,
}

/// Compute the simulated change against `market_price` and evaluate the
/// rules on it. Pure; callers must pass a positive market price (the latest
/// close of a non-empty history).
pub fn simulate_entry(
    entry: &SimulationEntry,
    market_price: f64,
    rules: &[StockRule],
) -> SimulationOutcome {
    let price_diff = entry.price - market_price;
    let change_percent = (price_diff / market_price) * 100.0;

    SimulationOutcome {
        symbol: entry.symbol.clone(),
        market_price,
        simulated_price: entry.price,
        price_diff,
        change_percent,
        breach: evaluate_breach(&entry.symbol, change_percent, rules),
    }
}
