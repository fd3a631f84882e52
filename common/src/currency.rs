//! Currency codes and their static display metadata.

use serde::{Deserialize, Serialize};
use std::fmt;

/// ISO 4217 currency code.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Currency(String);

impl Currency {
    /// Create a new currency from code.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().trim().to_uppercase())
    }

    /// Get the currency code.
    pub fn code(&self) -> &str {
        &self.0
    }

    /// The base currency all conversions produce output in.
    pub fn npr() -> Self {
        Self::new("NPR")
    }

    pub fn usd() -> Self {
        Self::new("USD")
    }

    pub fn inr() -> Self {
        Self::new("INR")
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Currency {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Flag glyph used for currencies without a curated entry.
pub const UNKNOWN_FLAG: &str = "\u{1F3F3}\u{FE0F}";

/// Static display metadata for a currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyDescriptor {
    /// The currency code.
    pub code: Currency,
    /// Human-readable currency name.
    pub name: String,
    /// Flag glyph shown next to the code.
    pub flag: String,
    /// Conventional currency symbol.
    pub symbol: String,
}

/// Look up the display metadata for a currency.
///
/// Total over all codes: currencies outside the published table fall back to
/// the raw code as name and symbol with a neutral flag, so a row can always
/// be rendered.
pub fn descriptor(code: &Currency) -> CurrencyDescriptor {
    let (name, flag, symbol) = match code.code() {
        "NPR" => ("Nepalese Rupee", "\u{1F1F3}\u{1F1F5}", "Rs."),
        "USD" => ("U.S. Dollar", "\u{1F1FA}\u{1F1F8}", "$"),
        "EUR" => ("Euro", "\u{1F1EA}\u{1F1FA}", "\u{20AC}"),
        "GBP" => ("Pound Sterling", "\u{1F1EC}\u{1F1E7}", "\u{00A3}"),
        "CHF" => ("Swiss Franc", "\u{1F1E8}\u{1F1ED}", "CHF"),
        "AUD" => ("Australian Dollar", "\u{1F1E6}\u{1F1FA}", "A$"),
        "CAD" => ("Canadian Dollar", "\u{1F1E8}\u{1F1E6}", "C$"),
        "SGD" => ("Singapore Dollar", "\u{1F1F8}\u{1F1EC}", "S$"),
        "JPY" => ("Japanese Yen", "\u{1F1EF}\u{1F1F5}", "\u{00A5}"),
        "CNY" => ("Chinese Yuan", "\u{1F1E8}\u{1F1F3}", "\u{00A5}"),
        "INR" => ("Indian Rupee", "\u{1F1EE}\u{1F1F3}", "\u{20B9}"),
        "SAR" => ("Saudi Riyal", "\u{1F1F8}\u{1F1E6}", "SR"),
        "QAR" => ("Qatari Riyal", "\u{1F1F6}\u{1F1E6}", "QR"),
        "AED" => ("UAE Dirham", "\u{1F1E6}\u{1F1EA}", "AED"),
        "MYR" => ("Malaysian Ringgit", "\u{1F1F2}\u{1F1FE}", "RM"),
        "KRW" => ("South Korean Won", "\u{1F1F0}\u{1F1F7}", "\u{20A9}"),
        "THB" => ("Thai Baht", "\u{1F1F9}\u{1F1ED}", "\u{0E3F}"),
        "HKD" => ("Hong Kong Dollar", "\u{1F1ED}\u{1F1F0}", "HK$"),
        "DKK" => ("Danish Krone", "\u{1F1E9}\u{1F1F0}", "kr"),
        "SEK" => ("Swedish Krona", "\u{1F1F8}\u{1F1EA}", "kr"),
        "KWD" => ("Kuwaiti Dinar", "\u{1F1F0}\u{1F1FC}", "KD"),
        "BHD" => ("Bahraini Dinar", "\u{1F1E7}\u{1F1ED}", "BD"),
        _ => {
            return CurrencyDescriptor {
                code: code.clone(),
                name: code.code().to_string(),
                flag: UNKNOWN_FLAG.to_string(),
                symbol: code.code().to_string(),
            }
        }
    };

    CurrencyDescriptor {
        code: code.clone(),
        name: name.to_string(),
        flag: flag.to_string(),
        symbol: symbol.to_string(),
    }
}
