use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use super::fitted::{SoftmaxClassifier, StandardScaler};
use super::{Classifier, Scaler};
use crate::data::loader::{self, DatasetError};
use crate::data::model::ReferenceDataset;

// ---------------------------------------------------------------------------
// Session file locations
// ---------------------------------------------------------------------------

pub const DEFAULT_DATASET: &str = "tomato_dataset.csv";
pub const DEFAULT_CLASSIFIER: &str = "tomato_classifier.json";
pub const DEFAULT_SCALER: &str = "tomato_scaler.json";

/// Where the session's dataset and artifact files live.
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub dataset: PathBuf,
    pub classifier: PathBuf,
    pub scaler: PathBuf,
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        ArtifactPaths {
            dataset: PathBuf::from(DEFAULT_DATASET),
            classifier: PathBuf::from(DEFAULT_CLASSIFIER),
            scaler: PathBuf::from(DEFAULT_SCALER),
        }
    }
}

// ---------------------------------------------------------------------------
// ArtifactStore – everything loaded once per session
// ---------------------------------------------------------------------------

/// The dataset and optional fitted artifacts, loaded once at startup and
/// read-only afterwards.
///
/// The dataset is mandatory: without it there are no slider bounds, so a
/// load failure is fatal. Either artifact may be missing or unreadable;
/// that is an expected state and the session continues in degraded mode.
pub struct ArtifactStore {
    dataset: ReferenceDataset,
    scaler: Option<Box<dyn Scaler>>,
    classifier: Option<Box<dyn Classifier>>,
}

impl std::fmt::Debug for ArtifactStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArtifactStore")
            .field("dataset", &self.dataset)
            .field("scaler", &self.scaler.as_ref().map(|_| "dyn Scaler"))
            .field("classifier", &self.classifier.as_ref().map(|_| "dyn Classifier"))
            .finish()
    }
}

impl ArtifactStore {
    /// Load the dataset (fatal on failure) and both artifacts (best-effort).
    pub fn load(paths: &ArtifactPaths) -> Result<Self, DatasetError> {
        let dataset = loader::load_dataset(&paths.dataset)?;
        log::info!(
            "loaded {} reference records with grades {:?}",
            dataset.len(),
            dataset.grades()
        );

        let scaler = load_artifact::<StandardScaler>(&paths.scaler, "scaler")
            .map(|s| Box::new(s) as Box<dyn Scaler>);
        let classifier = load_artifact::<SoftmaxClassifier>(&paths.classifier, "classifier")
            .map(|c| Box::new(c) as Box<dyn Classifier>);

        Ok(ArtifactStore {
            dataset,
            scaler,
            classifier,
        })
    }

    pub fn dataset(&self) -> &ReferenceDataset {
        &self.dataset
    }

    pub fn scaler(&self) -> Option<&dyn Scaler> {
        self.scaler.as_deref()
    }

    pub fn classifier(&self) -> Option<&dyn Classifier> {
        self.classifier.as_deref()
    }
}

/// Read and deserialise one artifact file. Any failure — missing file,
/// unreadable JSON, wrong schema — yields `None`; the caller treats the
/// artifact as absent.
fn load_artifact<T: DeserializeOwned>(path: &Path, what: &str) -> Option<T> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            log::warn!("{what} not loaded from {}: {e}", path.display());
            return None;
        }
    };
    match serde_json::from_str(&text) {
        Ok(artifact) => {
            log::info!("loaded {what} from {}", path.display());
            Some(artifact)
        }
        Err(e) => {
            log::warn!("{what} at {} is not usable: {e}", path.display());
            None
        }
    }
}
