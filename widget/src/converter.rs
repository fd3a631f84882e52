//! The converter controller.
//!
//! Wires the store, engine and scheduler to a [`RateView`] and applies the
//! degraded-display policy: a failed fetch blanks both the rates table and
//! the result with alert styling, an unknown currency touches only the
//! result, and a conversion before rates arrive shows a quiet placeholder.

use std::sync::Arc;

use parking_lot::Mutex;
use rupantar_common::{descriptor, format_updated_at, two_decimals};
use tracing::{info, instrument, warn};

use crate::config::ConverterConfig;
use crate::engine::{ConversionEngine, ConversionRequest};
use crate::error::{ConvertError, FetchError};
use crate::scheduler::{Trigger, UpdateScheduler};
use crate::snapshot::{RateSnapshot, RateStore};
use crate::source::RateSource;
use crate::view::{RateRow, RateView, StyleHint, ViewArea};

/// Notice shown in the rates-table area when the fetch fails.
const RATES_UNAVAILABLE: &str = "Exchange rates are currently unavailable";
/// Notice shown in the result area when the fetch fails.
const RESULT_UNAVAILABLE: &str = "Conversion unavailable";

/// The main controller that drives the widget.
///
/// The host forwards its trigger-boundary events to the matching method:
/// explicit actions, currency changes and confirmed input recompute
/// immediately, continuous edits recompute after the quiet period. Each
/// request becomes the "latest" one and is re-rendered when a load succeeds,
/// so the result catches up as soon as rates arrive.
pub struct Converter {
    engine: ConversionEngine,
    store: Arc<RateStore>,
    scheduler: UpdateScheduler,
    view: Arc<Mutex<dyn RateView>>,
    last_request: Mutex<Option<ConversionRequest>>,
}

impl Converter {
    /// Create a converter over the given source and view.
    pub fn new(
        config: ConverterConfig,
        source: Arc<dyn RateSource>,
        view: Arc<Mutex<dyn RateView>>,
    ) -> Self {
        Self {
            engine: ConversionEngine::new(config.base),
            store: Arc::new(RateStore::new(source)),
            scheduler: UpdateScheduler::new(config.quiet_period),
            view,
            last_request: Mutex::new(None),
        }
    }

    /// The store holding the current snapshot and load status.
    pub fn store(&self) -> &RateStore {
        &self.store
    }

    /// Fetch rates and render the outcome, one attempt.
    ///
    /// On success the table and updated-at line render, and the most recent
    /// request (if any) is recomputed against the fresh snapshot. On failure
    /// both the table and result areas show an unavailable notice with alert
    /// styling, and the error is returned so the host can decide to retry.
    #[instrument(skip(self))]
    pub async fn load_rates(&self) -> Result<(), FetchError> {
        match self.store.load().await {
            Ok(snapshot) => {
                {
                    let mut view = self.view.lock();
                    view.show_updated_at(&format_updated_at(snapshot.updated_at));
                    view.show_rates_table(&table_rows(&snapshot));
                }
                info!(currencies = snapshot.len(), "Rates rendered");

                let pending = self.last_request.lock().clone();
                if let Some(request) = pending {
                    render_conversion(&self.engine, &self.store, &self.view, &request);
                }
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "Rendering unavailable state");
                let mut view = self.view.lock();
                view.show_unavailable(ViewArea::RatesTable, RATES_UNAVAILABLE, StyleHint::Alert);
                view.show_unavailable(ViewArea::Result, RESULT_UNAVAILABLE, StyleHint::Alert);
                Err(err)
            }
        }
    }

    /// Explicit convert action: recompute now.
    pub fn convert_requested(&self, request: ConversionRequest) {
        self.recompute(Trigger::Immediate, request);
    }

    /// Currency selection changed: recompute now.
    pub fn currency_selected(&self, request: ConversionRequest) {
        self.recompute(Trigger::Immediate, request);
    }

    /// Input confirmed (enter-style): recompute now.
    pub fn amount_confirmed(&self, request: ConversionRequest) {
        self.recompute(Trigger::Immediate, request);
    }

    /// Continuous input change: recompute after the quiet period.
    pub fn amount_edited(&self, request: ConversionRequest) {
        self.recompute(Trigger::Debounced, request);
    }

    /// Whether a debounced recompute is waiting out its quiet period.
    pub fn has_pending_recompute(&self) -> bool {
        self.scheduler.has_pending()
    }

    fn recompute(&self, kind: Trigger, request: ConversionRequest) {
        *self.last_request.lock() = Some(request.clone());

        let engine = self.engine.clone();
        let store = Arc::clone(&self.store);
        let view = Arc::clone(&self.view);
        self.scheduler.trigger(kind, move || {
            render_conversion(&engine, &store, &view, &request);
        });
    }
}

/// Run one conversion and fan its outcome out to the view.
fn render_conversion(
    engine: &ConversionEngine,
    store: &RateStore,
    view: &Arc<Mutex<dyn RateView>>,
    request: &ConversionRequest,
) {
    let mut view = view.lock();
    match engine.convert(store, request) {
        Ok(conversion) => {
            view.show_result(&conversion.formatted_amount);
            view.show_rate_description(&conversion.rate_description);
        }
        // Rates simply haven't arrived yet; a quiet placeholder, not a fault.
        Err(err @ ConvertError::NotReady) => {
            view.show_unavailable(ViewArea::Result, &err.to_string(), StyleHint::Normal);
        }
        Err(err @ ConvertError::UnknownCurrency(_)) => {
            view.show_unavailable(ViewArea::Result, &err.to_string(), StyleHint::Alert);
        }
    }
}

/// Build display rows for every published currency, in code order.
fn table_rows(snapshot: &RateSnapshot) -> Vec<RateRow> {
    snapshot
        .rates
        .iter()
        .map(|(code, pair)| {
            let desc = descriptor(code);
            RateRow {
                flag: desc.flag,
                code: code.code().to_string(),
                name: desc.name,
                buy: two_decimals(pair.buy),
                sell: two_decimals(pair.sell),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{FailingRateSource, StaticRateSource};
    use crate::view::{RecordingView, ViewEvent};
    use std::time::Duration;
    use tokio::time::sleep;

    const SAMPLE: &str = r#"{
        "updated": "2026-08-24T10:00:00+05:45",
        "rates": {
            "USD": { "buy": 131.50, "sell": 132.55 },
            "EUR": { "buy": 154.10, "sell": 155.20 }
        }
    }"#;

    fn converter_with(source: Arc<dyn RateSource>) -> (Converter, RecordingView) {
        let recorder = RecordingView::new();
        let view: Arc<Mutex<dyn RateView>> = Arc::new(Mutex::new(recorder.clone()));
        let converter = Converter::new(ConverterConfig::default(), source, view);
        (converter, recorder)
    }

    fn loaded_converter() -> (Converter, RecordingView) {
        converter_with(Arc::new(StaticRateSource::from_json(SAMPLE).unwrap()))
    }

    #[tokio::test]
    async fn test_successful_load_renders_table_and_updated_line() {
        let (converter, recorder) = loaded_converter();

        converter.load_rates().await.unwrap();

        let events = recorder.events();
        assert_eq!(
            events[0],
            ViewEvent::UpdatedAt("2026-08-24 04:15 UTC".to_string())
        );
        match &events[1] {
            ViewEvent::RatesTable(rows) => {
                // Alphabetical by code.
                assert_eq!(rows.len(), 2);
                assert_eq!(rows[0].code, "EUR");
                assert_eq!(rows[0].name, "Euro");
                assert_eq!(rows[0].buy, "154.10");
                assert_eq!(rows[1].code, "USD");
                assert_eq!(rows[1].sell, "132.55");
            }
            other => panic!("expected a table render, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_failed_load_blanks_both_areas_with_alert_styling() {
        let (converter, recorder) =
            converter_with(Arc::new(FailingRateSource::new("connection refused")));

        converter.load_rates().await.unwrap_err();

        assert_eq!(
            recorder.events(),
            vec![
                ViewEvent::Unavailable {
                    area: ViewArea::RatesTable,
                    message: RATES_UNAVAILABLE.to_string(),
                    style: StyleHint::Alert,
                },
                ViewEvent::Unavailable {
                    area: ViewArea::Result,
                    message: RESULT_UNAVAILABLE.to_string(),
                    style: StyleHint::Alert,
                },
            ]
        );
        assert_eq!(recorder.table_renders(), 0);
    }

    #[tokio::test]
    async fn test_immediate_conversion_renders_result_and_description() {
        let (converter, recorder) = loaded_converter();
        converter.load_rates().await.unwrap();

        converter.convert_requested(ConversionRequest::new("USD", "10"));

        assert_eq!(recorder.last_result().as_deref(), Some("Rs. 1,325.50"));
        assert!(recorder.events().contains(&ViewEvent::RateDescription(
            "1 USD = NPR 132.55".to_string()
        )));
    }

    #[tokio::test]
    async fn test_unknown_currency_touches_only_the_result_area() {
        let (converter, recorder) = loaded_converter();
        converter.load_rates().await.unwrap();
        let tables_before = recorder.table_renders();

        converter.convert_requested(ConversionRequest::new("XYZ", "10"));

        assert_eq!(
            recorder.events().last(),
            Some(&ViewEvent::Unavailable {
                area: ViewArea::Result,
                message: "no rate published for XYZ".to_string(),
                style: StyleHint::Alert,
            })
        );
        assert_eq!(recorder.table_renders(), tables_before);
    }

    #[tokio::test]
    async fn test_conversion_before_load_shows_quiet_placeholder() {
        let (converter, recorder) = loaded_converter();

        converter.convert_requested(ConversionRequest::new("USD", "10"));

        assert_eq!(
            recorder.events(),
            vec![ViewEvent::Unavailable {
                area: ViewArea::Result,
                message: "exchange rates have not loaded yet".to_string(),
                style: StyleHint::Normal,
            }]
        );
    }

    #[tokio::test]
    async fn test_load_replays_the_most_recent_request() {
        let (converter, recorder) = loaded_converter();

        converter.convert_requested(ConversionRequest::new("USD", "2"));
        assert!(recorder.last_result().is_none());

        converter.load_rates().await.unwrap();

        assert_eq!(recorder.last_result().as_deref(), Some("Rs. 265.10"));
    }

    #[tokio::test]
    async fn test_edits_debounce_to_the_last_amount() {
        let source = Arc::new(StaticRateSource::from_json(SAMPLE).unwrap());
        let recorder = RecordingView::new();
        let view: Arc<Mutex<dyn RateView>> = Arc::new(Mutex::new(recorder.clone()));
        let config = ConverterConfig {
            quiet_period: Duration::from_millis(50),
            ..ConverterConfig::default()
        };
        let converter = Converter::new(config, source, view);
        converter.load_rates().await.unwrap();
        let events_after_load = recorder.events().len();

        for raw in ["1", "10", "100"] {
            converter.amount_edited(ConversionRequest::new("USD", raw));
        }
        assert!(converter.has_pending_recompute());

        sleep(Duration::from_millis(200)).await;

        // One recompute: a result plus its description, nothing more.
        assert_eq!(recorder.events().len(), events_after_load + 2);
        assert_eq!(recorder.last_result().as_deref(), Some("Rs. 13,255.00"));
    }

    #[tokio::test]
    async fn test_currency_change_preempts_a_pending_edit() {
        let (converter, recorder) = loaded_converter();
        converter.load_rates().await.unwrap();

        converter.amount_edited(ConversionRequest::new("USD", "10"));
        converter.currency_selected(ConversionRequest::new("EUR", "10"));

        assert_eq!(recorder.last_result().as_deref(), Some("Rs. 1,552.00"));
        assert!(!converter.has_pending_recompute());

        // The superseded edit never fires.
        sleep(Duration::from_millis(400)).await;
        assert_eq!(recorder.last_result().as_deref(), Some("Rs. 1,552.00"));
    }
}
