//! Cached market-data lookups.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;

use crate::period::Period;
use crate::types::{PriceHistory, StockData, StockInfo};
use crate::yahoo::YahooFinanceClient;

const CACHE_TTL_SECS: i64 = 3600; // 1 hour

/// Internal cache entry with timestamp
struct CacheEntry<T> {
    data: T,
    cached_at: DateTime<Utc>,
}

/// Fetches price history and info for a symbol, serving repeat lookups from
/// a per-(symbol, period) cache for an hour. Failures are reported as
/// [`StockData::Unavailable`] and never cached.
pub struct MarketDataService {
    client: YahooFinanceClient,
    cache: DashMap<String, CacheEntry<(PriceHistory, StockInfo)>>,
}

impl MarketDataService {
    pub fn new() -> Self {
        Self {
            client: YahooFinanceClient::new(),
            cache: DashMap::new(),
        }
    }

    /// Look up history and info for `symbol` over `period`.
    pub async fn get_stock_data(&self, symbol: &str, period: Period) -> StockData {
        let key = cache_key(symbol, period);

        if let Some((history, info)) = self.cached(&key) {
            tracing::debug!("Cache hit for {}", key);
            return StockData::Available { history, info };
        }

        match self.fetch(symbol, period).await {
            Ok((history, info)) => {
                self.cache.insert(
                    key,
                    CacheEntry {
                        data: (history.clone(), info.clone()),
                        cached_at: Utc::now(),
                    },
                );
                StockData::Available { history, info }
            }
            Err(e) => {
                tracing::warn!("Market data unavailable for {}: {}", symbol, e);
                StockData::Unavailable
            }
        }
    }

    async fn fetch(
        &self,
        symbol: &str,
        period: Period,
    ) -> Result<(PriceHistory, StockInfo), crate::error::MarketDataError> {
        let history = self.client.fetch_history(symbol, period).await?;
        let info = self.client.fetch_info(symbol).await?;
        Ok((history, info))
    }

    /// Return the cached pair for `key` if it is still fresh.
    fn cached(&self, key: &str) -> Option<(PriceHistory, StockInfo)> {
        let entry = self.cache.get(key)?;
        if Utc::now().signed_duration_since(entry.cached_at)
            < Duration::seconds(CACHE_TTL_SECS)
        {
            Some(entry.data.clone())
        } else {
            None
        }
    }
}

impl Default for MarketDataService {
    fn default() -> Self {
        Self::new()
    }
}

fn cache_key(symbol: &str, period: Period) -> String {
    format!("{}:{}", symbol, period.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PriceBar;

    fn sample_pair() -> (PriceHistory, StockInfo) {
        let bar = PriceBar {
            timestamp: Utc::now(),
            open: 100.0,
            high: 101.0,
            low: 99.0,
            close: 100.5,
            volume: 1_000,
        };
        (PriceHistory::new(vec![bar]), StockInfo::default())
    }

    #[test]
    fn test_fresh_entry_is_served() {
        let service = MarketDataService::new();
        let key = cache_key("AAPL", Period::OneYear);
        service.cache.insert(
            key.clone(),
            CacheEntry {
                data: sample_pair(),
                cached_at: Utc::now(),
            },
        );

        let (history, _) = service.cached(&key).unwrap();
        assert_eq!(history.latest_close(), Some(100.5));
    }

    #[test]
    fn test_stale_entry_is_ignored() {
        let service = MarketDataService::new();
        let key = cache_key("AAPL", Period::OneYear);
        service.cache.insert(
            key.clone(),
            CacheEntry {
                data: sample_pair(),
                cached_at: Utc::now() - Duration::seconds(CACHE_TTL_SECS + 1),
            },
        );

        assert!(service.cached(&key).is_none());
    }

    #[test]
    fn test_periods_are_cached_separately() {
        let service = MarketDataService::new();
        service.cache.insert(
            cache_key("AAPL", Period::OneYear),
            CacheEntry {
                data: sample_pair(),
                cached_at: Utc::now(),
            },
        );

        assert!(service.cached(&cache_key("AAPL", Period::OneMonth)).is_none());
        assert!(service.cached(&cache_key("MSFT", Period::OneYear)).is_none());
    }
}
