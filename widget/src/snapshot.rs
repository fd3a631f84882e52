//! Rate snapshots and the store that owns them.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;
use rupantar_common::{Currency, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::error::FetchError;
use crate::source::RateSource;

/// Buy/sell quote for one currency against the base currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatePair {
    /// Rate applied when buying the foreign currency.
    pub buy: Decimal,
    /// Rate applied when converting the foreign currency into the base.
    pub sell: Decimal,
}

/// An immutable capture of the published rates at a point in time.
///
/// Replaced wholesale on each successful load, never mutated in place.
/// Rates are keyed by code in alphabetical order, which is also the order
/// the table renders in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateSnapshot {
    /// When the upstream published this data.
    pub updated_at: Timestamp,
    /// Quotes keyed by currency code.
    pub rates: BTreeMap<Currency, RatePair>,
}

impl RateSnapshot {
    /// Create a new snapshot.
    pub fn new(updated_at: Timestamp, rates: BTreeMap<Currency, RatePair>) -> Self {
        Self { updated_at, rates }
    }

    /// Get the quote for a currency, if published.
    pub fn rate_for(&self, code: &Currency) -> Option<RatePair> {
        self.rates.get(code).copied()
    }

    /// Check whether a currency is published in this snapshot.
    pub fn contains(&self, code: &Currency) -> bool {
        self.rates.contains_key(code)
    }

    /// Number of published currencies.
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Check if the snapshot has no rates at all.
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

/// Load lifecycle of the rate store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// No load has resolved yet.
    Loading,
    /// The last load succeeded and a snapshot is held.
    Ready,
    /// The last load failed; no data is held.
    Failed,
}

impl LoadStatus {
    /// Check whether conversions may be served.
    pub fn is_ready(&self) -> bool {
        matches!(self, LoadStatus::Ready)
    }
}

struct StoreState {
    status: LoadStatus,
    snapshot: Option<Arc<RateSnapshot>>,
}

/// Holds the most recently loaded snapshot together with its load status.
///
/// Constructed once at startup and passed by reference to callers; state is
/// replaced atomically under a single write lock. Overlapping `load` calls
/// are not supported; callers serialize loads.
pub struct RateStore {
    source: Arc<dyn RateSource>,
    state: RwLock<StoreState>,
}

impl RateStore {
    /// Create a store that will fetch from the given source.
    pub fn new(source: Arc<dyn RateSource>) -> Self {
        Self {
            source,
            state: RwLock::new(StoreState {
                status: LoadStatus::Loading,
                snapshot: None,
            }),
        }
    }

    /// Fetch a snapshot from the source, one attempt.
    ///
    /// On success the held snapshot is replaced wholesale and the status
    /// becomes `Ready`. On failure the status becomes `Failed` and any
    /// previously held data is dropped, so nothing stale can render. A
    /// repeated call starts a fresh lifecycle; retrying is the caller's
    /// decision.
    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<Arc<RateSnapshot>, FetchError> {
        match self.source.fetch().await {
            Ok(snapshot) => {
                let snapshot = Arc::new(snapshot);
                {
                    let mut state = self.state.write();
                    state.snapshot = Some(Arc::clone(&snapshot));
                    state.status = LoadStatus::Ready;
                }
                info!(
                    currencies = snapshot.len(),
                    updated_at = %snapshot.updated_at,
                    "Rate snapshot loaded"
                );
                Ok(snapshot)
            }
            Err(err) => {
                {
                    let mut state = self.state.write();
                    state.snapshot = None;
                    state.status = LoadStatus::Failed;
                }
                warn!(error = %err, "Rate snapshot load failed");
                Err(err)
            }
        }
    }

    /// Current load status.
    pub fn status(&self) -> LoadStatus {
        self.state.read().status
    }

    /// The held snapshot, if the last load succeeded.
    pub fn snapshot(&self) -> Option<Arc<RateSnapshot>> {
        self.state.read().snapshot.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{FailingRateSource, StaticRateSource};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use rust_decimal_macros::dec;

    fn test_snapshot() -> RateSnapshot {
        let mut rates = BTreeMap::new();
        rates.insert(
            Currency::usd(),
            RatePair {
                buy: dec!(131.50),
                sell: dec!(132.55),
            },
        );
        RateSnapshot::new(rupantar_common::now(), rates)
    }

    /// Serves queued outcomes in order, one per fetch.
    struct SequenceSource {
        outcomes: Mutex<Vec<Result<RateSnapshot, FetchError>>>,
    }

    #[async_trait]
    impl RateSource for SequenceSource {
        async fn fetch(&self) -> Result<RateSnapshot, FetchError> {
            self.outcomes.lock().remove(0)
        }
    }

    #[test]
    fn test_new_store_is_loading_with_no_data() {
        let store = RateStore::new(Arc::new(StaticRateSource::new(test_snapshot())));
        assert_eq!(store.status(), LoadStatus::Loading);
        assert!(store.snapshot().is_none());
        assert!(!store.status().is_ready());
    }

    #[tokio::test]
    async fn test_successful_load_transitions_to_ready() {
        let store = RateStore::new(Arc::new(StaticRateSource::new(test_snapshot())));

        let snapshot = store.load().await.unwrap();

        assert_eq!(store.status(), LoadStatus::Ready);
        assert!(store.status().is_ready());
        assert_eq!(snapshot.len(), 1);
        assert!(store.snapshot().unwrap().contains(&Currency::usd()));
    }

    #[tokio::test]
    async fn test_failed_load_transitions_to_failed_with_no_data() {
        let store = RateStore::new(Arc::new(FailingRateSource::new("connection refused")));

        let err = store.load().await.unwrap_err();

        assert!(matches!(err, FetchError::Unavailable(_)));
        assert_eq!(store.status(), LoadStatus::Failed);
        assert!(store.snapshot().is_none());
    }

    #[tokio::test]
    async fn test_failed_reload_drops_previous_snapshot() {
        let source = SequenceSource {
            outcomes: Mutex::new(vec![
                Ok(test_snapshot()),
                Err(FetchError::Unavailable("gone".to_string())),
            ]),
        };
        let store = RateStore::new(Arc::new(source));

        store.load().await.unwrap();
        assert_eq!(store.status(), LoadStatus::Ready);

        store.load().await.unwrap_err();
        assert_eq!(store.status(), LoadStatus::Failed);
        assert!(store.snapshot().is_none());
    }

    #[tokio::test]
    async fn test_reload_replaces_snapshot_wholesale() {
        let mut second = test_snapshot();
        second.rates.insert(
            Currency::new("EUR"),
            RatePair {
                buy: dec!(154.10),
                sell: dec!(155.20),
            },
        );

        let source = SequenceSource {
            outcomes: Mutex::new(vec![Ok(test_snapshot()), Ok(second)]),
        };
        let store = RateStore::new(Arc::new(source));

        let first = store.load().await.unwrap();
        assert_eq!(first.len(), 1);

        let replaced = store.load().await.unwrap();
        assert_eq!(replaced.len(), 2);
        assert_eq!(store.snapshot().unwrap().len(), 2);
    }

    #[test]
    fn test_rate_lookup() {
        let snapshot = test_snapshot();
        let pair = snapshot.rate_for(&Currency::usd()).unwrap();
        assert_eq!(pair.sell, dec!(132.55));
        assert!(snapshot.rate_for(&Currency::new("XYZ")).is_none());
        assert!(!snapshot.is_empty());
    }
}
