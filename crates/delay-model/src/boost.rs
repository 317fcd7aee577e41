//! Gradient-Boosted Decision Stumps
//!
//! Binary logistic boosting over the fixed indicator schema. Each round
//! fits one depth-1 tree to the weighted gradient, using Newton leaf
//! weights with L2 regularization. Training is fully deterministic for a
//! given config: features are scanned in index order, ties keep the lowest
//! index, and row subsampling (when enabled) draws from a seeded xorshift
//! generator.

use feature_encoder::{FeatureVector, FEATURE_DIMENSION};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Booster hyperparameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoostConfig {
    /// Number of boosting rounds
    pub trees: usize,
    /// Shrinkage applied to every leaf weight
    pub learning_rate: f64,
    /// L2 regularization on leaf weights
    pub l2: f64,
    /// Row sampling ratio per round (1.0 = use every row)
    pub subsample: f64,
    /// Seed for the subsampling generator
    pub seed: u64,
}

impl Default for BoostConfig {
    fn default() -> Self {
        Self {
            trees: 200,
            learning_rate: 0.01,
            l2: 1.0,
            subsample: 1.0,
            seed: 1,
        }
    }
}

/// One boosting round: a single split on one indicator column.
///
/// Leaf values are stored with the learning rate already applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Stump {
    feature: usize,
    /// Leaf weight when the indicator is 0
    off_value: f64,
    /// Leaf weight when the indicator is 1
    on_value: f64,
}

impl Stump {
    fn value(&self, row: &FeatureVector) -> f64 {
        if row.values[self.feature] > 0.5 {
            self.on_value
        } else {
            self.off_value
        }
    }
}

/// A fitted stump ensemble.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booster {
    config: BoostConfig,
    stumps: Vec<Stump>,
}

impl Booster {
    /// Fit an ensemble to binary labels with per-row sample weights.
    ///
    /// Callers guarantee `features`, `labels` and `weights` are parallel
    /// and non-empty.
    pub fn fit(
        config: BoostConfig,
        features: &[FeatureVector],
        labels: &[u8],
        weights: &[f64],
    ) -> Self {
        let rows = features.len();
        let mut rng = XorShift64::new(config.seed);
        let mut margins = vec![0.0f64; rows];
        let mut stumps = Vec::with_capacity(config.trees);

        for round in 0..config.trees {
            // Weighted gradient and hessian of the logistic loss.
            let mut grad = vec![0.0f64; rows];
            let mut hess = vec![0.0f64; rows];
            let mut in_sample = vec![true; rows];
            for i in 0..rows {
                if config.subsample < 1.0 {
                    in_sample[i] = rng.next_f64() < config.subsample;
                }
                if in_sample[i] {
                    let p = sigmoid(margins[i]);
                    grad[i] = weights[i] * (f64::from(labels[i]) - p);
                    hess[i] = weights[i] * p * (1.0 - p);
                }
            }

            let total_grad: f64 = grad.iter().sum();
            let total_hess: f64 = hess.iter().sum();

            let mut best: Option<(f64, Stump)> = None;
            for feature in 0..FEATURE_DIMENSION {
                let mut on_grad = 0.0;
                let mut on_hess = 0.0;
                for i in 0..rows {
                    if in_sample[i] && features[i].values[feature] > 0.5 {
                        on_grad += grad[i];
                        on_hess += hess[i];
                    }
                }
                let off_grad = total_grad - on_grad;
                let off_hess = total_hess - on_hess;

                let gain = leaf_gain(off_grad, off_hess, config.l2)
                    + leaf_gain(on_grad, on_hess, config.l2)
                    - leaf_gain(total_grad, total_hess, config.l2);

                // Strict comparison keeps the lowest feature index on ties.
                if best.as_ref().map_or(true, |(g, _)| gain > *g) {
                    best = Some((
                        gain,
                        Stump {
                            feature,
                            off_value: config.learning_rate * off_grad / (off_hess + config.l2),
                            on_value: config.learning_rate * on_grad / (on_hess + config.l2),
                        },
                    ));
                }
            }

            let (gain, stump) = best.expect("catalog has at least one feature");
            if gain <= 0.0 {
                debug!(round, "no split improves the loss; stopping early");
                break;
            }

            for (i, margin) in margins.iter_mut().enumerate() {
                *margin += stump.value(&features[i]);
            }
            stumps.push(stump);
        }

        debug!(rounds = stumps.len(), rows, "booster fitted");
        Booster { config, stumps }
    }

    /// Raw additive margin for one row.
    pub fn margin(&self, row: &FeatureVector) -> f64 {
        self.stumps.iter().map(|stump| stump.value(row)).sum()
    }

    /// Probability of the positive (delayed) class for one row.
    pub fn probability(&self, row: &FeatureVector) -> f64 {
        sigmoid(self.margin(row))
    }

    /// Number of fitted rounds (early stopping may trim this).
    pub fn rounds(&self) -> usize {
        self.stumps.len()
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

fn leaf_gain(grad: f64, hess: f64, l2: f64) -> f64 {
    grad * grad / (hess + l2)
}

/// xorshift64 generator for deterministic row subsampling.
struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    fn new(seed: u64) -> Self {
        // xorshift state must be non-zero
        Self {
            state: seed.max(1),
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}
