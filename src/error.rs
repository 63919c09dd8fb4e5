use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Errors {
    #[error("Minimum amount {0} is greater than maximum amount {1}")]
    InvalidAmountRange(Decimal, Decimal),
    #[error("Could not read sales data from {0}")]
    SourceUnavailable(String),
    #[error("Catalog request failed: {0}")]
    Catalog(#[from] reqwest::Error),
    #[error("Report output error: {0}")]
    Io(#[from] std::io::Error),
}
