//! Converter configuration.

use std::time::Duration;

use rupantar_common::Currency;

/// Configuration for the converter.
#[derive(Debug, Clone)]
pub struct ConverterConfig {
    /// Base currency conversions produce output in.
    pub base: Currency,
    /// Quiet period a debounced recompute waits out.
    pub quiet_period: Duration,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            base: Currency::npr(),
            quiet_period: Duration::from_millis(300),
        }
    }
}

impl ConverterConfig {
    /// Validate configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.base.code().is_empty() {
            return Err("Base currency cannot be empty".to_string());
        }

        if self.quiet_period.is_zero() {
            return Err("Quiet period cannot be zero".to_string());
        }

        Ok(())
    }
}
