use std::fmt;

use crate::artifact::{Classifier, Scaler};
use crate::data::model::FeatureVector;

// ---------------------------------------------------------------------------
// PredictionResult – the terminal outcome of one inference request
// ---------------------------------------------------------------------------

/// Why no prediction could be produced. All of these are non-fatal; the
/// session stays usable and the next attempt may succeed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnavailableReason {
    ModelMissing,
    ScalingFailed,
    PredictionFailed,
}

impl fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            UnavailableReason::ModelMissing => "classifier artifact is not loaded",
            UnavailableReason::ScalingFailed => "feature scaling failed",
            UnavailableReason::PredictionFailed => "classifier prediction failed",
        };
        f.write_str(msg)
    }
}

/// Outcome of one prediction request. Never mutated after construction.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionResult {
    Classified { grade: String, confidence: f64 },
    Unavailable { reason: UnavailableReason },
}

// ---------------------------------------------------------------------------
// The pipeline
// ---------------------------------------------------------------------------

/// Run one inference request: scale (if a scaler is loaded), classify, and
/// derive the confidence as the maximum per-class probability.
///
/// Fallback matrix:
/// * no classifier            → `Unavailable{ModelMissing}`, scaler ignored
/// * scaler present but fails → `Unavailable{ScalingFailed}`
/// * scaler absent            → the raw vector is classified as-is
/// * classifier call fails    → `Unavailable{PredictionFailed}`
///
/// Deterministic: fixed artifacts and a fixed vector always produce the
/// same result.
pub fn predict(
    vector: &FeatureVector,
    scaler: Option<&dyn Scaler>,
    classifier: Option<&dyn Classifier>,
) -> PredictionResult {
    let Some(classifier) = classifier else {
        return PredictionResult::Unavailable {
            reason: UnavailableReason::ModelMissing,
        };
    };

    let row = match scaler {
        Some(scaler) => match scaler.transform(vector.as_array()) {
            Ok(scaled) => scaled,
            Err(e) => {
                log::warn!("scaling failed: {e}");
                return PredictionResult::Unavailable {
                    reason: UnavailableReason::ScalingFailed,
                };
            }
        },
        // Degraded but defined: classify the raw measurements.
        None => vector.as_array(),
    };

    let grade = match classifier.predict(row) {
        Ok(grade) => grade,
        Err(e) => {
            log::warn!("prediction failed: {e}");
            return PredictionResult::Unavailable {
                reason: UnavailableReason::PredictionFailed,
            };
        }
    };

    let confidence = match classifier.predict_probability(row) {
        Ok(probs) => match probs.iter().copied().reduce(f64::max) {
            Some(max) => max,
            None => {
                log::warn!("classifier returned no class probabilities");
                return PredictionResult::Unavailable {
                    reason: UnavailableReason::PredictionFailed,
                };
            }
        },
        Err(e) => {
            log::warn!("probability estimation failed: {e}");
            return PredictionResult::Unavailable {
                reason: UnavailableReason::PredictionFailed,
            };
        }
    };

    PredictionResult::Classified { grade, confidence }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::artifact::fitted::{SoftmaxClassifier, StandardScaler};
    use crate::artifact::ArtifactError;
    use crate::data::model::FEATURE_COUNT;

    fn vector() -> FeatureVector {
        FeatureVector {
            mass: 150.0,
            firmness: 4.2,
            sugar_content: 6.1,
            skin_thickness: 0.3,
        }
    }

    fn scaler() -> StandardScaler {
        StandardScaler {
            mean: vec![100.0, 4.0, 6.0, 0.5],
            scale: vec![50.0, 1.0, 2.0, 0.1],
        }
    }

    fn classifier() -> SoftmaxClassifier {
        SoftmaxClassifier {
            classes: vec!["Export".into(), "Local Premium".into(), "Industrial".into()],
            coefficients: vec![
                vec![1.0, 0.5, 0.5, -0.5],
                vec![0.2, 0.2, 0.2, 0.2],
                vec![-1.0, -0.5, -0.5, 0.5],
            ],
            intercepts: vec![0.1, 0.0, -0.1],
        }
    }

    /// Records the row it was handed, so tests can assert what the
    /// classifier actually saw.
    struct SpyClassifier {
        seen: RefCell<Vec<[f64; FEATURE_COUNT]>>,
    }

    impl SpyClassifier {
        fn new() -> Self {
            SpyClassifier {
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl Classifier for SpyClassifier {
        fn predict(&self, row: [f64; FEATURE_COUNT]) -> Result<String, ArtifactError> {
            self.seen.borrow_mut().push(row);
            Ok("Export".into())
        }

        fn predict_probability(
            &self,
            row: [f64; FEATURE_COUNT],
        ) -> Result<Vec<f64>, ArtifactError> {
            self.seen.borrow_mut().push(row);
            Ok(vec![0.7, 0.2, 0.1])
        }
    }

    struct FailingClassifier;

    impl Classifier for FailingClassifier {
        fn predict(&self, _row: [f64; FEATURE_COUNT]) -> Result<String, ArtifactError> {
            Err(ArtifactError::Degenerate("broken".into()))
        }

        fn predict_probability(
            &self,
            _row: [f64; FEATURE_COUNT],
        ) -> Result<Vec<f64>, ArtifactError> {
            Err(ArtifactError::Degenerate("broken".into()))
        }
    }

    #[test]
    fn no_classifier_is_model_missing() {
        let s = scaler();
        let result = predict(&vector(), Some(&s), None);
        assert_eq!(
            result,
            PredictionResult::Unavailable {
                reason: UnavailableReason::ModelMissing
            }
        );
        // Scaler state is irrelevant without a classifier.
        let result = predict(&vector(), None, None);
        assert_eq!(
            result,
            PredictionResult::Unavailable {
                reason: UnavailableReason::ModelMissing
            }
        );
    }

    #[test]
    fn scaler_failure_is_scaling_failed() {
        let bad = StandardScaler {
            mean: vec![0.0; 2],
            scale: vec![1.0; 2],
        };
        let c = classifier();
        let result = predict(&vector(), Some(&bad), Some(&c));
        assert_eq!(
            result,
            PredictionResult::Unavailable {
                reason: UnavailableReason::ScalingFailed
            }
        );
    }

    #[test]
    fn absent_scaler_passes_raw_vector_in_fixed_order() {
        let spy = SpyClassifier::new();
        predict(&vector(), None, Some(&spy));
        let seen = spy.seen.borrow();
        assert!(!seen.is_empty());
        for row in seen.iter() {
            assert_eq!(*row, [150.0, 4.2, 6.1, 0.3]);
        }
    }

    #[test]
    fn present_scaler_transforms_before_classifying() {
        let spy = SpyClassifier::new();
        let s = scaler();
        predict(&vector(), Some(&s), Some(&spy));
        let seen = spy.seen.borrow();
        let expected = s.transform(vector().as_array()).unwrap();
        for row in seen.iter() {
            assert_eq!(*row, expected);
        }
    }

    #[test]
    fn classifier_failure_is_prediction_failed() {
        let result = predict(&vector(), None, Some(&FailingClassifier));
        assert_eq!(
            result,
            PredictionResult::Unavailable {
                reason: UnavailableReason::PredictionFailed
            }
        );
    }

    #[test]
    fn confidence_is_max_probability() {
        let spy = SpyClassifier::new();
        let result = predict(&vector(), None, Some(&spy));
        assert_eq!(
            result,
            PredictionResult::Classified {
                grade: "Export".into(),
                confidence: 0.7
            }
        );
    }

    #[test]
    fn classified_confidence_is_in_unit_interval() {
        let s = scaler();
        let c = classifier();
        match predict(&vector(), Some(&s), Some(&c)) {
            PredictionResult::Classified { confidence, .. } => {
                assert!((0.0..=1.0).contains(&confidence));
            }
            other => panic!("expected Classified, got {other:?}"),
        }
    }

    #[test]
    fn repeated_calls_are_identical() {
        let s = scaler();
        let c = classifier();
        let first = predict(&vector(), Some(&s), Some(&c));
        for _ in 0..10 {
            assert_eq!(predict(&vector(), Some(&s), Some(&c)), first);
        }
    }
}
