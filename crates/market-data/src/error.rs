use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarketDataError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("No data found for symbol {0}")]
    SymbolNotFound(String),

    #[error("Unknown period {0:?} (expected one of 1mo, 3mo, 6mo, 1y, 2y, 5y)")]
    UnknownPeriod(String),
}
