//! Yahoo Finance HTTP client.
//!
//! Two endpoints: the chart endpoint for daily bars over a range, and the
//! quote endpoint for the info mapping. Response traversal is kept in pure
//! functions over `serde_json::Value` so it can be exercised with canned
//! payloads.

use chrono::DateTime;
use serde_json::Value;

use crate::error::MarketDataError;
use crate::period::Period;
use crate::types::{PriceBar, PriceHistory, StockInfo};

const QUOTE_URL: &str = "https://query2.finance.yahoo.com/v8/finance/quote";
const CHART_URL: &str = "https://query2.finance.yahoo.com/v8/finance/chart";

#[derive(Clone)]
pub struct YahooFinanceClient {
    client: reqwest::Client,
}

impl YahooFinanceClient {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { client }
    }

    /// Fetch daily bars for `symbol` over `period`.
    pub async fn fetch_history(
        &self,
        symbol: &str,
        period: Period,
    ) -> Result<PriceHistory, MarketDataError> {
        let url = format!(
            "{}/{}?range={}&interval=1d",
            CHART_URL,
            symbol,
            period.as_str()
        );

        let response = self.client.get(&url).send().await?;
        let json: Value = response.json().await?;

        parse_chart(symbol, &json)
    }

    /// Fetch the info mapping for `symbol`.
    pub async fn fetch_info(&self, symbol: &str) -> Result<StockInfo, MarketDataError> {
        let url = format!("{}?symbols={}", QUOTE_URL, symbol);

        let response = self.client.get(&url).send().await?;
        let json: Value = response.json().await?;

        parse_quote(symbol, &json)
    }
}

impl Default for YahooFinanceClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a chart-endpoint payload into a price history.
///
/// Rows with a null in any OHLCV column (halted days) are skipped.
pub(crate) fn parse_chart(symbol: &str, json: &Value) -> Result<PriceHistory, MarketDataError> {
    let chart = json
        .get("chart")
        .and_then(|v| v.get("result"))
        .and_then(|v| v.as_array())
        .and_then(|arr| arr.first())
        .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))?;

    let timestamps = chart
        .get("timestamp")
        .and_then(|v| v.as_array())
        .ok_or_else(|| MarketDataError::MalformedResponse("no timestamps".into()))?;

    let quote = chart
        .get("indicators")
        .and_then(|v| v.get("quote"))
        .and_then(|v| v.as_array())
        .and_then(|arr| arr.first())
        .ok_or_else(|| MarketDataError::MalformedResponse("no quote indicators".into()))?;

    let opens = series(quote, "open")?;
    let highs = series(quote, "high")?;
    let lows = series(quote, "low")?;
    let closes = series(quote, "close")?;
    let volumes = series(quote, "volume")?;

    let mut bars = Vec::with_capacity(timestamps.len());
    for i in 0..timestamps.len() {
        if let (Some(ts), Some(open), Some(high), Some(low), Some(close), Some(volume)) = (
            timestamps.get(i).and_then(Value::as_i64),
            opens.get(i).and_then(Value::as_f64),
            highs.get(i).and_then(Value::as_f64),
            lows.get(i).and_then(Value::as_f64),
            closes.get(i).and_then(Value::as_f64),
            volumes.get(i).and_then(Value::as_u64),
        ) {
            let timestamp = DateTime::from_timestamp(ts, 0)
                .ok_or_else(|| MarketDataError::MalformedResponse(format!("bad timestamp {}", ts)))?;
            bars.push(PriceBar {
                timestamp,
                open,
                high,
                low,
                close,
                volume,
            });
        }
    }

    if bars.is_empty() {
        return Err(MarketDataError::SymbolNotFound(symbol.to_string()));
    }

    Ok(PriceHistory::new(bars))
}

fn series<'a>(quote: &'a Value, name: &str) -> Result<&'a Vec<Value>, MarketDataError> {
    quote
        .get(name)
        .and_then(|v| v.as_array())
        .ok_or_else(|| MarketDataError::MalformedResponse(format!("no {} prices", name)))
}

/// Parse a quote-endpoint payload into the info mapping.
pub(crate) fn parse_quote(symbol: &str, json: &Value) -> Result<StockInfo, MarketDataError> {
    let quote = json
        .get("quoteResponse")
        .and_then(|v| v.get("result"))
        .and_then(|v| v.as_array())
        .and_then(|arr| arr.first())
        .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))?;

    Ok(StockInfo {
        long_name: quote
            .get("longName")
            .and_then(|v| v.as_str())
            .map(String::from),
        volume: quote.get("regularMarketVolume").and_then(|v| v.as_u64()),
        market_cap: quote.get("marketCap").and_then(|v| v.as_f64()),
        trailing_pe: quote.get("trailingPE").and_then(|v| v.as_f64()),
        fifty_two_week_high: quote.get("fiftyTwoWeekHigh").and_then(|v| v.as_f64()),
        fifty_two_week_low: quote.get("fiftyTwoWeekLow").and_then(|v| v.as_f64()),
        average_volume: quote
            .get("averageDailyVolume3Month")
            .and_then(|v| v.as_u64()),
        dividend_yield: quote.get("dividendYield").and_then(|v| v.as_f64()),
    })
}
