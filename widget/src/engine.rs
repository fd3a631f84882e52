//! Conversion of foreign amounts into the base currency.

use rupantar_common::{format_rupees, two_decimals, Currency};
use rust_decimal::Decimal;
use tracing::{debug, instrument};

use crate::error::{ConvertError, ConvertResult};
use crate::snapshot::{RateSnapshot, RateStore};

/// A conversion request as entered by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    /// Currency to convert from.
    pub currency: Currency,
    /// Amount text exactly as entered.
    pub raw_amount: String,
}

impl ConversionRequest {
    /// Create a new request.
    pub fn new(currency: impl Into<Currency>, raw_amount: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
            raw_amount: raw_amount.into(),
        }
    }
}

/// Outcome of a successful conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    /// Converted value in the base currency, unrounded.
    pub value: Decimal,
    /// Display amount, grouped and prefixed.
    pub formatted_amount: String,
    /// Per-unit rate line, e.g. `1 USD = NPR 132.55`.
    pub rate_description: String,
}

/// Converts request amounts into the base currency at the sell rate.
#[derive(Debug, Clone)]
pub struct ConversionEngine {
    base: Currency,
}

impl ConversionEngine {
    /// Create an engine producing output in the given base currency.
    pub fn new(base: Currency) -> Self {
        Self { base }
    }

    /// The base currency conversions produce output in.
    pub fn base(&self) -> &Currency {
        &self.base
    }

    /// Convert against the store's current snapshot.
    ///
    /// Fails with [`ConvertError::NotReady`] unless the store holds a
    /// successfully loaded snapshot.
    pub fn convert(&self, store: &RateStore, request: &ConversionRequest) -> ConvertResult<Conversion> {
        if !store.status().is_ready() {
            return Err(ConvertError::NotReady);
        }
        let snapshot = store.snapshot().ok_or(ConvertError::NotReady)?;
        self.convert_snapshot(&snapshot, request)
    }

    /// Convert against an explicit snapshot.
    ///
    /// Pure: rounding happens only inside formatting, so `value` carries
    /// the full-precision product.
    #[instrument(skip(self, snapshot, request), fields(currency = %request.currency))]
    pub fn convert_snapshot(
        &self,
        snapshot: &RateSnapshot,
        request: &ConversionRequest,
    ) -> ConvertResult<Conversion> {
        let pair = snapshot
            .rate_for(&request.currency)
            .ok_or_else(|| ConvertError::UnknownCurrency(request.currency.clone()))?;

        let amount = parse_amount(&request.raw_amount);
        let value = amount * pair.sell;

        Ok(Conversion {
            value,
            formatted_amount: format_rupees(value),
            rate_description: format!(
                "1 {} = {} {}",
                request.currency,
                self.base,
                two_decimals(pair.sell)
            ),
        })
    }
}

/// Parse a raw amount string.
///
/// Empty or unparseable input degrades to zero rather than erroring, so the
/// result display never breaks mid-edit.
pub fn parse_amount(raw: &str) -> Decimal {
    let trimmed = raw.trim();
    match trimmed.parse::<Decimal>() {
        Ok(amount) => amount,
        Err(_) => {
            if !trimmed.is_empty() {
                debug!(raw = %raw, "Amount not parseable, treating as zero");
            }
            Decimal::ZERO
        }
    }
}
