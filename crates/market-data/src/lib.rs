//! Market data retrieval from Yahoo Finance: daily price history and company
//! info, a 1-hour in-process cache, and key-metric formatting.
//!
//! Fetch failure is a normal outcome here ([`StockData::Unavailable`]), not
//! an error to propagate; callers decide how to present it.

pub mod error;
pub mod metrics;
pub mod period;
pub mod service;
pub mod types;
pub mod yahoo;

pub use error::MarketDataError;
pub use metrics::{format_number, key_metrics, KeyMetric};
pub use period::Period;
pub use service::MarketDataService;
pub use types::{PriceBar, PriceHistory, StockData, StockInfo};
pub use yahoo::YahooFinanceClient;
