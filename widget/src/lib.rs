//! Rupantar Widget Core
//!
//! Conversion-and-formatting engine for the Rupantar NPR exchange-rates
//! widget, together with its reactive update policy and degraded display
//! states.
//!
//! # Features
//!
//! - Rate snapshot store with a load lifecycle and wholesale replacement
//! - Pure conversion engine using the published sell rate
//! - Lakh/crore rupee formatting via `rupantar-common`
//! - Debounced recompute scheduling for keystroke-driven input
//! - View and source trait boundaries, so the host owns DOM and transport
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use parking_lot::Mutex;
//! use rupantar_widget::{Converter, ConverterConfig, ConversionRequest, LoggingView, StaticRateSource};
//!
//! let source = Arc::new(StaticRateSource::from_json(rate_json)?);
//! let view = Arc::new(Mutex::new(LoggingView));
//! let converter = Converter::new(ConverterConfig::default(), source, view);
//!
//! converter.load_rates().await?;
//! converter.convert_requested(ConversionRequest::new("USD", "100"));
//! ```

pub mod config;
pub mod converter;
pub mod engine;
pub mod error;
pub mod scheduler;
pub mod snapshot;
pub mod source;
pub mod view;

pub use config::ConverterConfig;
pub use converter::Converter;
pub use engine::{Conversion, ConversionEngine, ConversionRequest};
pub use error::{ConvertError, ConvertResult, FetchError};
pub use scheduler::{Trigger, UpdateScheduler};
pub use snapshot::{LoadStatus, RatePair, RateSnapshot, RateStore};
pub use source::{RateDocument, RateSource, StaticRateSource};
pub use view::{LoggingView, RateRow, RateView, StyleHint, ViewArea};

#[cfg(any(test, feature = "test-utils"))]
pub use source::FailingRateSource;
#[cfg(any(test, feature = "test-utils"))]
pub use view::{RecordingView, ViewEvent};
