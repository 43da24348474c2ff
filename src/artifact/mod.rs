/// Pre-fitted artifacts: capability traits, fitted implementations, and the
/// session store that loads them once.
///
/// The inference pipeline only sees the [`Scaler`] and [`Classifier`]
/// traits; the JSON-backed types in [`fitted`] are one interchangeable
/// implementation of them.

pub mod fitted;
pub mod store;

use thiserror::Error;

use crate::data::model::FEATURE_COUNT;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failure inside an artifact call (transform or predict).
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("artifact was fitted with {found} features, expected {expected}")]
    ShapeMismatch { expected: usize, found: usize },
    #[error("artifact has degenerate parameters: {0}")]
    Degenerate(String),
}

// ---------------------------------------------------------------------------
// Capability traits
// ---------------------------------------------------------------------------

/// A fitted feature scaler: maps a raw measurement row to model space.
pub trait Scaler {
    fn transform(&self, row: [f64; FEATURE_COUNT]) -> Result<[f64; FEATURE_COUNT], ArtifactError>;
}

/// A fitted classifier over the four-feature row.
pub trait Classifier {
    /// The predicted grade label.
    fn predict(&self, row: [f64; FEATURE_COUNT]) -> Result<String, ArtifactError>;

    /// Per-class probabilities, in the classifier's class order.
    fn predict_probability(&self, row: [f64; FEATURE_COUNT]) -> Result<Vec<f64>, ArtifactError>;
}
