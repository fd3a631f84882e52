//! Rate data sources and the published document format.

use std::collections::BTreeMap;

use async_trait::async_trait;
use rupantar_common::{parse_updated_at, Currency};
use serde::{Deserialize, Serialize};

use crate::error::FetchError;
use crate::snapshot::{RatePair, RateSnapshot};

/// The fetch boundary: anything that can produce a rate snapshot.
///
/// A source makes a single attempt per call; retrying is the caller's
/// decision. Transport failures (absence, non-2xx, I/O) surface as
/// [`FetchError::Unavailable`], undecodable payloads as
/// [`FetchError::Malformed`].
#[async_trait]
pub trait RateSource: Send + Sync {
    /// Fetch a fresh snapshot.
    async fn fetch(&self) -> Result<RateSnapshot, FetchError>;
}

/// The rate document as published upstream.
///
/// ```json
/// {
///   "updated": "2026-08-24T10:00:00+05:45",
///   "rates": { "USD": { "buy": 131.50, "sell": 132.55 } }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateDocument {
    /// Publication timestamp, RFC 3339 or a common datetime layout.
    pub updated: String,
    /// Quotes keyed by currency code as written upstream.
    pub rates: BTreeMap<String, RatePair>,
}

impl RateDocument {
    /// Decode a document from JSON text.
    pub fn parse(json: &str) -> Result<Self, FetchError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Convert into a snapshot, normalizing codes and the timestamp.
    pub fn into_snapshot(self) -> Result<RateSnapshot, FetchError> {
        let updated_at = parse_updated_at(&self.updated).ok_or_else(|| {
            FetchError::Malformed(format!("unparseable updated timestamp: {:?}", self.updated))
        })?;

        let rates = self
            .rates
            .into_iter()
            .map(|(code, pair)| (Currency::new(code), pair))
            .collect();

        Ok(RateSnapshot::new(updated_at, rates))
    }
}

/// A source that serves one fixed snapshot.
///
/// Covers embedded rate data and doubles as the happy-path test source.
pub struct StaticRateSource {
    snapshot: RateSnapshot,
}

impl StaticRateSource {
    /// Create a source over an existing snapshot.
    pub fn new(snapshot: RateSnapshot) -> Self {
        Self { snapshot }
    }

    /// Create a source by decoding a rate document.
    pub fn from_json(json: &str) -> Result<Self, FetchError> {
        RateDocument::parse(json)?.into_snapshot().map(Self::new)
    }
}

#[async_trait]
impl RateSource for StaticRateSource {
    async fn fetch(&self) -> Result<RateSnapshot, FetchError> {
        Ok(self.snapshot.clone())
    }
}

/// A source that always fails, for exercising the degraded path.
#[cfg(any(test, feature = "test-utils"))]
pub struct FailingRateSource {
    message: String,
}

#[cfg(any(test, feature = "test-utils"))]
impl FailingRateSource {
    /// Create a failing source with the given transport message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[async_trait]
impl RateSource for FailingRateSource {
    async fn fetch(&self) -> Result<RateSnapshot, FetchError> {
        Err(FetchError::Unavailable(self.message.clone()))
    }
}
