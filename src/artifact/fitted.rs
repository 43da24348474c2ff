use serde::{Deserialize, Serialize};

use super::{ArtifactError, Classifier, Scaler};
use crate::data::model::FEATURE_COUNT;

// ---------------------------------------------------------------------------
// StandardScaler – fitted per-feature standardisation
// ---------------------------------------------------------------------------

/// A fitted standard scaler: `(x - mean) / scale` per feature, in training
/// order. Serialised as JSON alongside the classifier artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl Scaler for StandardScaler {
    fn transform(&self, row: [f64; FEATURE_COUNT]) -> Result<[f64; FEATURE_COUNT], ArtifactError> {
        if self.mean.len() != FEATURE_COUNT {
            return Err(ArtifactError::ShapeMismatch {
                expected: FEATURE_COUNT,
                found: self.mean.len(),
            });
        }
        if self.scale.len() != FEATURE_COUNT {
            return Err(ArtifactError::ShapeMismatch {
                expected: FEATURE_COUNT,
                found: self.scale.len(),
            });
        }

        let mut out = [0.0; FEATURE_COUNT];
        for i in 0..FEATURE_COUNT {
            let s = self.scale[i];
            if !s.is_finite() || s == 0.0 {
                return Err(ArtifactError::Degenerate(format!(
                    "scale[{i}] = {s} is not usable"
                )));
            }
            out[i] = (row[i] - self.mean[i]) / s;
        }
        Ok(out)
    }
}

// ---------------------------------------------------------------------------
// SoftmaxClassifier – fitted multinomial logistic regression
// ---------------------------------------------------------------------------

/// A fitted multinomial logistic-regression classifier: one weight row and
/// intercept per class, probabilities via softmax over the class scores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoftmaxClassifier {
    /// Class labels, in the order of `coefficients` / `intercepts`.
    pub classes: Vec<String>,
    /// Per-class weight rows, each of length [`FEATURE_COUNT`].
    pub coefficients: Vec<Vec<f64>>,
    pub intercepts: Vec<f64>,
}

impl SoftmaxClassifier {
    /// Raw per-class scores (`w · x + b`).
    fn decision(&self, row: [f64; FEATURE_COUNT]) -> Result<Vec<f64>, ArtifactError> {
        if self.classes.is_empty() {
            return Err(ArtifactError::Degenerate("classifier has no classes".into()));
        }
        if self.coefficients.len() != self.classes.len()
            || self.intercepts.len() != self.classes.len()
        {
            return Err(ArtifactError::Degenerate(format!(
                "{} classes but {} weight rows and {} intercepts",
                self.classes.len(),
                self.coefficients.len(),
                self.intercepts.len()
            )));
        }

        let mut scores = Vec::with_capacity(self.classes.len());
        for (weights, intercept) in self.coefficients.iter().zip(&self.intercepts) {
            if weights.len() != FEATURE_COUNT {
                return Err(ArtifactError::ShapeMismatch {
                    expected: FEATURE_COUNT,
                    found: weights.len(),
                });
            }
            let score: f64 = weights.iter().zip(&row).map(|(w, x)| w * x).sum::<f64>() + intercept;
            scores.push(score);
        }
        Ok(scores)
    }
}

impl Classifier for SoftmaxClassifier {
    fn predict(&self, row: [f64; FEATURE_COUNT]) -> Result<String, ArtifactError> {
        let scores = self.decision(row)?;
        // First maximum wins on ties.
        let mut best = 0;
        for (i, s) in scores.iter().enumerate().skip(1) {
            if *s > scores[best] {
                best = i;
            }
        }
        Ok(self.classes[best].clone())
    }

    fn predict_probability(&self, row: [f64; FEATURE_COUNT]) -> Result<Vec<f64>, ArtifactError> {
        let scores = self.decision(row)?;
        // Shift by the max score so exp() cannot overflow.
        let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
        let sum: f64 = exps.iter().sum();
        if !sum.is_finite() || sum == 0.0 {
            return Err(ArtifactError::Degenerate(
                "class scores do not normalise".into(),
            ));
        }
        Ok(exps.into_iter().map(|e| e / sum).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scaler() -> StandardScaler {
        StandardScaler {
            mean: vec![100.0, 4.0, 6.0, 0.5],
            scale: vec![10.0, 1.0, 2.0, 0.1],
        }
    }

    fn classifier() -> SoftmaxClassifier {
        SoftmaxClassifier {
            classes: vec!["Export".into(), "Industrial".into()],
            coefficients: vec![vec![1.0, 0.0, 0.0, 0.0], vec![-1.0, 0.0, 0.0, 0.0]],
            intercepts: vec![0.0, 0.0],
        }
    }

    #[test]
    fn transform_standardises_each_feature() {
        let scaled = scaler().transform([110.0, 4.0, 8.0, 0.4]).unwrap();
        let expected = [1.0, 0.0, 1.0, -1.0];
        for (got, want) in scaled.iter().zip(&expected) {
            assert!((got - want).abs() < 1e-9, "got {got}, want {want}");
        }
    }

    #[test]
    fn transform_rejects_wrong_width() {
        let s = StandardScaler {
            mean: vec![0.0; 3],
            scale: vec![1.0; 3],
        };
        assert!(matches!(
            s.transform([0.0; FEATURE_COUNT]),
            Err(ArtifactError::ShapeMismatch { found: 3, .. })
        ));
    }

    #[test]
    fn transform_rejects_zero_scale() {
        let s = StandardScaler {
            mean: vec![0.0; 4],
            scale: vec![1.0, 0.0, 1.0, 1.0],
        };
        assert!(matches!(
            s.transform([0.0; FEATURE_COUNT]),
            Err(ArtifactError::Degenerate(_))
        ));
    }

    #[test]
    fn predict_picks_highest_score() {
        let c = classifier();
        assert_eq!(c.predict([2.0, 0.0, 0.0, 0.0]).unwrap(), "Export");
        assert_eq!(c.predict([-2.0, 0.0, 0.0, 0.0]).unwrap(), "Industrial");
    }

    #[test]
    fn probabilities_sum_to_one_and_match_argmax() {
        let c = classifier();
        let probs = c.predict_probability([2.0, 0.0, 0.0, 0.0]).unwrap();
        assert_eq!(probs.len(), 2);
        assert!((probs.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert!(probs[0] > probs[1]);
    }

    #[test]
    fn extreme_scores_do_not_overflow() {
        let c = SoftmaxClassifier {
            classes: vec!["A".into(), "B".into()],
            coefficients: vec![vec![1000.0, 0.0, 0.0, 0.0], vec![0.0; 4]],
            intercepts: vec![0.0, 0.0],
        };
        let probs = c.predict_probability([10.0, 0.0, 0.0, 0.0]).unwrap();
        assert!(probs.iter().all(|p| p.is_finite()));
        assert!((probs[0] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn mismatched_class_tables_are_degenerate() {
        let c = SoftmaxClassifier {
            classes: vec!["A".into(), "B".into()],
            coefficients: vec![vec![0.0; 4]],
            intercepts: vec![0.0],
        };
        assert!(matches!(
            c.predict([0.0; FEATURE_COUNT]),
            Err(ArtifactError::Degenerate(_))
        ));
    }
}
