//! Delay Classifier State Machine
//!
//! `Untrained --fit--> Trained`. Prediction is valid in both states: before
//! any fit the classifier answers with the majority class (all on-time) so
//! the serving path can be exercised end-to-end, and after a fit it defers
//! to the boosted ensemble. Re-fitting replaces the trained state wholesale.

use std::fs;
use std::path::Path;

use feature_encoder::FeatureVector;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::boost::{BoostConfig, Booster};
use crate::ModelError;

/// Probability of the on-time class reported before any fit.
pub const UNTRAINED_ONTIME_PROBABILITY: f64 = 0.81;
/// Probability of the delayed class reported before any fit.
pub const UNTRAINED_DELAY_PROBABILITY: f64 = 0.19;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TrainedModel {
    booster: Booster,
    scale_pos_weight: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
enum ModelState {
    Untrained,
    Trained(TrainedModel),
}

/// Binary classifier for departure delays over the fixed feature schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DelayClassifier {
    config: BoostConfig,
    state: ModelState,
}

impl Default for DelayClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl DelayClassifier {
    /// Create an untrained classifier with default hyperparameters.
    pub fn new() -> Self {
        Self::with_config(BoostConfig::default())
    }

    /// Create an untrained classifier with explicit hyperparameters.
    pub fn with_config(config: BoostConfig) -> Self {
        Self {
            config,
            state: ModelState::Untrained,
        }
    }

    /// Whether a fit has completed.
    pub fn is_trained(&self) -> bool {
        matches!(self.state, ModelState::Trained(_))
    }

    /// The positive-class weight computed at fit time, if trained.
    pub fn scale_pos_weight(&self) -> Option<f64> {
        match &self.state {
            ModelState::Untrained => None,
            ModelState::Trained(model) => Some(model.scale_pos_weight),
        }
    }

    /// Fit the classifier, replacing any previously trained state.
    ///
    /// The positive class is reweighted by `count(on-time) / count(delayed)`
    /// so the booster is not dominated by the majority class. Validation
    /// happens before any mutation: a failed fit leaves the previous state
    /// intact.
    pub fn fit(&mut self, features: &[FeatureVector], labels: &[u8]) -> Result<(), ModelError> {
        if features.len() != labels.len() {
            return Err(ModelError::ShapeMismatch {
                features: features.len(),
                labels: labels.len(),
            });
        }

        let positives = labels.iter().filter(|&&y| y == 1).count();
        if positives == 0 {
            return Err(ModelError::DegenerateTrainingSet);
        }
        let negatives = labels.len() - positives;
        let scale_pos_weight = negatives as f64 / positives as f64;

        info!(
            rows = labels.len(),
            positives, scale_pos_weight, "fitting delay classifier"
        );

        let weights: Vec<f64> = labels
            .iter()
            .map(|&y| if y == 1 { scale_pos_weight } else { 1.0 })
            .collect();
        let booster = Booster::fit(self.config.clone(), features, labels, &weights);

        self.state = ModelState::Trained(TrainedModel {
            booster,
            scale_pos_weight,
        });
        Ok(())
    }

    /// Hard 0/1 prediction per row, in input order.
    ///
    /// Untrained classifiers answer all zeros (majority class).
    pub fn predict(&self, features: &[FeatureVector]) -> Vec<u8> {
        match &self.state {
            ModelState::Untrained => {
                debug!(rows = features.len(), "predicting with untrained fallback");
                vec![0; features.len()]
            }
            ModelState::Trained(model) => features
                .iter()
                .map(|row| u8::from(model.booster.probability(row) > 0.5))
                .collect(),
        }
    }

    /// Per-row `(p_on_time, p_delayed)` pairs, each summing to 1.0.
    pub fn predict_proba(&self, features: &[FeatureVector]) -> Vec<(f64, f64)> {
        match &self.state {
            ModelState::Untrained => {
                vec![(UNTRAINED_ONTIME_PROBABILITY, UNTRAINED_DELAY_PROBABILITY); features.len()]
            }
            ModelState::Trained(model) => features
                .iter()
                .map(|row| {
                    let p = model.booster.probability(row);
                    (1.0 - p, p)
                })
                .collect(),
        }
    }

    /// Persist the full classifier state as an opaque binary blob.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ModelError> {
        let blob = postcard::to_allocvec(self)?;
        fs::write(path.as_ref(), blob)?;
        info!(path = %path.as_ref().display(), "saved delay classifier");
        Ok(())
    }

    /// Load a classifier previously written by [`DelayClassifier::save`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let blob = fs::read(path.as_ref())?;
        let classifier: DelayClassifier = postcard::from_bytes(&blob)?;
        info!(
            path = %path.as_ref().display(),
            trained = classifier.is_trained(),
            "loaded delay classifier"
        );
        Ok(classifier)
    }
}
