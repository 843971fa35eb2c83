use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AlertError {
    #[error("Stock symbol must not be empty")]
    EmptySymbol,

    #[error("Threshold must be between -100 and 100, got {0}")]
    ThresholdOutOfRange(f64),

    #[error("Invalid email address: {0}")]
    InvalidRecipient(String),

    #[error("Email address already registered: {0}")]
    DuplicateRecipient(String),

    #[error("Simulated price must be positive, got {0}")]
    InvalidPrice(f64),
}
