//! The presentation boundary.
//!
//! The core never touches the DOM; it hands rendered strings and style hints
//! to a [`RateView`] and the host decides what to do with them.

use tracing::{info, warn};

/// Styling hint attached to an unavailable notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleHint {
    /// Quiet placeholder, nothing is wrong.
    Normal,
    /// Error styling.
    Alert,
}

/// The display area an unavailable notice targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewArea {
    /// The conversion result display.
    Result,
    /// The rates table.
    RatesTable,
}

/// One rendered row of the rates table.
///
/// All fields are display-ready strings; `buy` and `sell` carry exactly two
/// decimal digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateRow {
    /// Flag glyph.
    pub flag: String,
    /// Currency code.
    pub code: String,
    /// Human-readable currency name.
    pub name: String,
    /// Buy rate against the base currency.
    pub buy: String,
    /// Sell rate against the base currency.
    pub sell: String,
}

/// Trait for receiving rendered widget output.
pub trait RateView: Send {
    /// Show a formatted conversion result.
    fn show_result(&mut self, text: &str);
    /// Show a per-unit rate description.
    fn show_rate_description(&mut self, text: &str);
    /// Show the formatted "last updated" line.
    fn show_updated_at(&mut self, text: &str);
    /// Render the rates table.
    fn show_rates_table(&mut self, rows: &[RateRow]);
    /// Show an unavailable notice in the given area.
    fn show_unavailable(&mut self, area: ViewArea, message: &str, style: StyleHint);
}

/// Default view that logs output but doesn't render it.
pub struct LoggingView;

impl RateView for LoggingView {
    fn show_result(&mut self, text: &str) {
        info!(result = %text, "Conversion result");
    }

    fn show_rate_description(&mut self, text: &str) {
        info!(description = %text, "Rate description");
    }

    fn show_updated_at(&mut self, text: &str) {
        info!(updated_at = %text, "Rates updated");
    }

    fn show_rates_table(&mut self, rows: &[RateRow]) {
        info!(rows = rows.len(), "Rates table rendered");
    }

    fn show_unavailable(&mut self, area: ViewArea, message: &str, style: StyleHint) {
        warn!(area = ?area, style = ?style, message = %message, "Unavailable notice");
    }
}

/// One recorded call to a [`RecordingView`].
#[cfg(any(test, feature = "test-utils"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    /// `show_result` call.
    Result(String),
    /// `show_rate_description` call.
    RateDescription(String),
    /// `show_updated_at` call.
    UpdatedAt(String),
    /// `show_rates_table` call.
    RatesTable(Vec<RateRow>),
    /// `show_unavailable` call.
    Unavailable {
        area: ViewArea,
        message: String,
        style: StyleHint,
    },
}

/// View double that records every call for later assertions.
///
/// Clones share one event log, so a test can keep a handle while the
/// converter owns the view.
#[cfg(any(test, feature = "test-utils"))]
#[derive(Clone, Default)]
pub struct RecordingView {
    events: std::sync::Arc<parking_lot::Mutex<Vec<ViewEvent>>>,
}

#[cfg(any(test, feature = "test-utils"))]
impl RecordingView {
    /// Create a recording view with an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    pub fn events(&self) -> Vec<ViewEvent> {
        self.events.lock().clone()
    }

    /// How many times the rates table was rendered.
    pub fn table_renders(&self) -> usize {
        self.events
            .lock()
            .iter()
            .filter(|event| matches!(event, ViewEvent::RatesTable(_)))
            .count()
    }

    /// The most recently shown result text, if any.
    pub fn last_result(&self) -> Option<String> {
        self.events.lock().iter().rev().find_map(|event| match event {
            ViewEvent::Result(text) => Some(text.clone()),
            _ => None,
        })
    }
}

#[cfg(any(test, feature = "test-utils"))]
impl RateView for RecordingView {
    fn show_result(&mut self, text: &str) {
        self.events.lock().push(ViewEvent::Result(text.to_string()));
    }

    fn show_rate_description(&mut self, text: &str) {
        self.events
            .lock()
            .push(ViewEvent::RateDescription(text.to_string()));
    }

    fn show_updated_at(&mut self, text: &str) {
        self.events.lock().push(ViewEvent::UpdatedAt(text.to_string()));
    }

    fn show_rates_table(&mut self, rows: &[RateRow]) {
        self.events.lock().push(ViewEvent::RatesTable(rows.to_vec()));
    }

    fn show_unavailable(&mut self, area: ViewArea, message: &str, style: StyleHint) {
        self.events.lock().push(ViewEvent::Unavailable {
            area,
            message: message.to_string(),
            style,
        });
    }
}
