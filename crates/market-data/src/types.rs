//! Price history and company info models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One daily OHLCV bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// Chronologically ordered daily bars for one symbol.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PriceHistory {
    bars: Vec<PriceBar>,
}

impl PriceHistory {
    pub fn new(bars: Vec<PriceBar>) -> Self {
        Self { bars }
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Close of the most recent bar.
    pub fn latest_close(&self) -> Option<f64> {
        self.bars.last().map(|bar| bar.close)
    }

    /// Close of the bar before the most recent one.
    pub fn previous_close(&self) -> Option<f64> {
        if self.bars.len() < 2 {
            return None;
        }
        self.bars.get(self.bars.len() - 2).map(|bar| bar.close)
    }

    /// Absolute and percentage change of the latest close against the
    /// previous close. None with fewer than two bars or a zero previous
    /// close.
    pub fn latest_change(&self) -> Option<(f64, f64)> {
        let latest = self.latest_close()?;
        let previous = self.previous_close()?;
        if previous == 0.0 {
            return None;
        }
        let diff = latest - previous;
        Some((diff, diff / previous * 100.0))
    }
}

/// Company info mapping. Every field is optional; Yahoo omits keys freely.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StockInfo {
    pub long_name: Option<String>,
    pub volume: Option<u64>,
    pub market_cap: Option<f64>,
    pub trailing_pe: Option<f64>,
    pub fifty_two_week_high: Option<f64>,
    pub fifty_two_week_low: Option<f64>,
    pub average_volume: Option<u64>,
    pub dividend_yield: Option<f64>,
}

/// Outcome of a data lookup. Unavailable covers every failure mode: network,
/// unknown symbol, malformed payload.
#[derive(Debug, Clone, PartialEq)]
pub enum StockData {
    Available {
        history: PriceHistory,
        info: StockInfo,
    },
    Unavailable,
}

impl StockData {
    pub fn is_available(&self) -> bool {
        matches!(self, StockData::Available { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(close: f64) -> PriceBar {
        PriceBar {
            timestamp: Utc::now(),
            open: close,
            high: close,
            low: close,
            close,
            volume: 1_000,
        }
    }

    #[test]
    fn test_latest_change() {
        let history = PriceHistory::new(vec![bar(100.0), bar(95.0), bar(104.5)]);

        let (diff, pct) = history.latest_change().unwrap();
        assert!((diff - 9.5).abs() < 1e-9);
        assert!((pct - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_latest_change_needs_two_bars() {
        assert_eq!(PriceHistory::default().latest_change(), None);
        assert_eq!(PriceHistory::new(vec![bar(100.0)]).latest_change(), None);
    }

    #[test]
    fn test_closes() {
        let history = PriceHistory::new(vec![bar(1.0), bar(2.0)]);
        assert_eq!(history.latest_close(), Some(2.0));
        assert_eq!(history.previous_close(), Some(1.0));
    }
}
