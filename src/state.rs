use crate::artifact::store::ArtifactStore;
use crate::color::GradePalette;
use crate::data::model::FeatureVector;
use crate::inference::{self, PredictionResult};
use crate::present::{self, ExportRow};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// The store is loaded once in `main` and never mutated here; everything
/// else is per-interaction state.
pub struct AppState {
    /// Dataset and artifacts, read-only for the session.
    pub store: ArtifactStore,

    /// Plot colours for every grade in the dataset.
    pub palette: GradePalette,

    /// Current slider values. Defaults to the dataset medians.
    pub input: FeatureVector,

    /// Outcome of the last explicit prediction trigger (None before the
    /// first one).
    pub prediction: Option<PredictionResult>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Build the session state around a loaded store.
    pub fn new(store: ArtifactStore) -> Self {
        let palette = GradePalette::new(store.dataset().grades());
        let input = store.dataset().median_vector();
        Self {
            store,
            palette,
            input,
            prediction: None,
            status_message: None,
        }
    }

    /// Run the inference pipeline on the current input. Triggered only by
    /// the explicit Predict action, never by slider movement.
    pub fn run_prediction(&mut self) {
        let result = inference::predict(
            &self.input,
            self.store.scaler(),
            self.store.classifier(),
        );
        self.status_message = match &result {
            PredictionResult::Classified { grade, .. } => {
                log::info!("predicted grade {grade}");
                None
            }
            PredictionResult::Unavailable { reason } => Some(format!("No prediction: {reason}")),
        };
        self.prediction = Some(result);
    }

    /// Reset the sliders to the dataset medians.
    pub fn reset_input(&mut self) {
        self.input = self.store.dataset().median_vector();
    }

    /// The current input and last prediction as an export row, once a
    /// prediction has been triggered.
    pub fn export_row(&self) -> Option<ExportRow> {
        self.prediction
            .as_ref()
            .map(|result| present::to_export_row(&self.input, result))
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::artifact::store::ArtifactPaths;
    use crate::inference::UnavailableReason;
    use crate::present;

    const CSV: &str = "mass,firmness,sugar_content,skin_thickness,grade\n\
                       80.0,2.0,4.0,0.6,Industrial\n\
                       140.0,4.0,6.0,0.4,Local Premium\n\
                       200.0,5.0,8.0,0.2,Export\n";

    const SCALER: &str = r#"{"mean":[140.0,3.7,6.0,0.4],"scale":[49.0,1.2,1.6,0.16]}"#;

    const CLASSIFIER: &str = r#"{
        "classes": ["Export", "Industrial", "Local Premium"],
        "coefficients": [
            [1.5, 1.0, 1.0, -1.0],
            [-1.5, -1.0, -1.0, 1.0],
            [0.1, 0.1, 0.1, -0.1]
        ],
        "intercepts": [0.0, 0.0, 0.5]
    }"#;

    fn paths_in(dir: &Path) -> ArtifactPaths {
        ArtifactPaths {
            dataset: dir.join("tomato_dataset.csv"),
            classifier: dir.join("tomato_classifier.json"),
            scaler: dir.join("tomato_scaler.json"),
        }
    }

    fn state_with(dataset: bool, scaler: bool, classifier: bool) -> AppState {
        let dir = tempfile::tempdir().unwrap();
        let paths = paths_in(dir.path());
        if dataset {
            std::fs::write(&paths.dataset, CSV).unwrap();
        }
        if scaler {
            std::fs::write(&paths.scaler, SCALER).unwrap();
        }
        if classifier {
            std::fs::write(&paths.classifier, CLASSIFIER).unwrap();
        }
        AppState::new(ArtifactStore::load(&paths).unwrap())
    }

    #[test]
    fn defaults_are_dataset_medians() {
        let state = state_with(true, true, true);
        assert_eq!(state.input.mass, 140.0);
        assert_eq!(state.input.firmness, 4.0);
        assert!(state.prediction.is_none());
        assert!(state.export_row().is_none());
    }

    #[test]
    fn full_pipeline_classifies_and_formats() {
        let mut state = state_with(true, true, true);
        state.input = FeatureVector {
            mass: 150.0,
            firmness: 4.2,
            sugar_content: 6.1,
            skin_thickness: 0.3,
        };
        state.run_prediction();

        let result = state.prediction.clone().unwrap();
        let PredictionResult::Classified { grade, confidence } = &result else {
            panic!("expected Classified, got {result:?}");
        };
        assert!(!grade.is_empty());
        assert!((0.0..=1.0).contains(confidence));

        let card = present::format(&result);
        assert!(card.confidence_percent.ends_with('%'));
        // "XX.XX%" – exactly two decimals.
        let digits = card.confidence_percent.trim_end_matches('%');
        let (_, frac) = digits.split_once('.').unwrap();
        assert_eq!(frac.len(), 2);
        assert!(state.status_message.is_none());
    }

    #[test]
    fn missing_artifacts_degrade_but_keep_session_usable() {
        let mut state = state_with(true, false, false);
        state.run_prediction();
        assert_eq!(
            state.prediction,
            Some(PredictionResult::Unavailable {
                reason: UnavailableReason::ModelMissing
            })
        );
        assert!(state.status_message.is_some());

        // Export still produces a row with the exact feature values.
        let row = state.export_row().unwrap();
        assert_eq!(row.prediction, "");
        assert_eq!(row.confidence, "");
        assert_eq!(row.mass, state.input.mass);

        // A later attempt is not blocked.
        state.run_prediction();
        assert!(state.prediction.is_some());
    }

    #[test]
    fn missing_scaler_still_classifies() {
        let mut state = state_with(true, false, true);
        state.run_prediction();
        assert!(matches!(
            state.prediction,
            Some(PredictionResult::Classified { .. })
        ));
    }

    #[test]
    fn missing_dataset_halts_before_any_prediction() {
        let dir = tempfile::tempdir().unwrap();
        let paths = paths_in(dir.path());
        std::fs::write(&paths.scaler, SCALER).unwrap();
        std::fs::write(&paths.classifier, CLASSIFIER).unwrap();
        // No AppState can be constructed, so no prediction is possible.
        assert!(ArtifactStore::load(&paths).is_err());
    }

    #[test]
    fn reset_restores_medians() {
        let mut state = state_with(true, true, true);
        state.input.mass = 999.0;
        state.reset_input();
        assert_eq!(state.input.mass, 140.0);
    }
}
