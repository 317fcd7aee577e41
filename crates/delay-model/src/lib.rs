//! Delay Classifier
//!
//! Wraps a trainable gradient-boosted ensemble behind a fit/predict
//! contract, owning class-imbalance correction at fit time and the
//! majority-class fallback used before any model has been fitted.

mod boost;
mod classifier;

pub use boost::{BoostConfig, Booster};
pub use classifier::{DelayClassifier, UNTRAINED_DELAY_PROBABILITY, UNTRAINED_ONTIME_PROBABILITY};

use thiserror::Error;

/// Errors during fitting or persistence.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Feature and label row counts disagree
    #[error("features and labels disagree: {features} rows vs {labels} labels")]
    ShapeMismatch { features: usize, labels: usize },

    /// No positive examples, so the class weight is undefined
    #[error("training set has no positive (delayed) examples")]
    DegenerateTrainingSet,

    /// Reading or writing the model blob failed
    #[error("model persistence failed: {0}")]
    Io(#[from] std::io::Error),

    /// The model blob could not be encoded or decoded
    #[error("model blob codec failed: {0}")]
    Codec(#[from] postcard::Error),
}
