//! Widget error types.

use rupantar_common::Currency;
use thiserror::Error;

/// Errors raised while obtaining a rate snapshot.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The rate document could not be retrieved at all.
    #[error("rate data unavailable: {0}")]
    Unavailable(String),

    /// The rate document was retrieved but could not be decoded.
    #[error("rate data malformed: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Malformed(err.to_string())
    }
}

/// Errors raised by a conversion request.
///
/// Both are terminal, user-visible outcomes for the request that produced
/// them; nothing here is retried automatically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// Conversion attempted before any snapshot loaded successfully.
    #[error("exchange rates have not loaded yet")]
    NotReady,

    /// The requested currency is absent from the loaded snapshot.
    #[error("no rate published for {0}")]
    UnknownCurrency(Currency),
}

/// Result type for conversion operations.
pub type ConvertResult<T> = Result<T, ConvertError>;
