//! Rupantar Common Types
//!
//! This crate contains the shared types used across the Rupantar converter:
//! currency codes with their display metadata, the rupee number formatter,
//! and timestamp helpers for the rate document's `updated` field.

pub mod currency;
pub mod format;
pub mod time;

pub use currency::*;
pub use format::*;
pub use time::*;
