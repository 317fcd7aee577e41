//! Feature Encoding Engine
//!
//! Deterministic transform from raw flight records to the fixed-width
//! feature matrix consumed by the delay model, plus the delay-label rule
//! applied to training rows.

mod catalog;
mod encoder;
mod labels;

pub use catalog::{mes_column, opera_column, tipovuelo_column, FEATURE_CATALOG, FEATURE_DIMENSION};
pub use encoder::{FeatureEncoder, FeatureVector};
pub use labels::{departure_delay_minutes, DELAY_THRESHOLD_MINUTES};

use thiserror::Error;

/// Errors for malformed encoder input.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Batches must contain at least one record
    #[error("cannot encode an empty batch")]
    EmptyBatch,
    /// A training row is missing a departure timestamp
    #[error("row {row} is missing required field {field}")]
    MissingField { row: usize, field: &'static str },
    /// A departure timestamp does not match "YYYY-MM-DD HH:MM:SS"
    #[error("row {row}: cannot parse {field} value {value:?}")]
    BadTimestamp {
        row: usize,
        field: &'static str,
        value: String,
    },
}
