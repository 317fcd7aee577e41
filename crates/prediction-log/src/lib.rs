//! Prediction Log
//!
//! Bounded in-memory record of predictions served by the API, for the
//! recent-activity endpoint and operational inspection.

mod repository;

pub use repository::{PredictionRecord, Repository};

use thiserror::Error;

/// Errors from the prediction log.
#[derive(Debug, Error)]
pub enum LogError {
    /// The interior lock was poisoned by a panicking writer
    #[error("prediction log lock poisoned: {0}")]
    Poisoned(String),
}
