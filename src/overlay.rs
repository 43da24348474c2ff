use crate::data::model::{FeatureField, FeatureVector, ReferenceDataset};

// ---------------------------------------------------------------------------
// Axis pairings
// ---------------------------------------------------------------------------

/// Which two fields a scatter overlay plots against each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisPair {
    pub x: FeatureField,
    pub y: FeatureField,
}

/// Mass against firmness, the first fixed comparison view.
pub const MASS_FIRMNESS: AxisPair = AxisPair {
    x: FeatureField::Mass,
    y: FeatureField::Firmness,
};

/// Sugar content against skin thickness, the second fixed comparison view.
pub const SUGAR_SKIN: AxisPair = AxisPair {
    x: FeatureField::SugarContent,
    y: FeatureField::SkinThickness,
};

// ---------------------------------------------------------------------------
// Overlay – reference points plus the current input marker
// ---------------------------------------------------------------------------

/// One reference record projected onto the chosen axis pair.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayPoint {
    pub x: f64,
    pub y: f64,
    pub grade: String,
}

/// The assembled comparison view: every reference record as a labelled
/// point, and the current input as a marker. Pure data, no rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub axes: AxisPair,
    pub points: Vec<OverlayPoint>,
    pub marker: [f64; 2],
}

/// Project the dataset and the current input onto an axis pair. The dataset
/// is only read; points keep file order.
pub fn build_overlay(
    vector: &FeatureVector,
    dataset: &ReferenceDataset,
    axes: AxisPair,
) -> Overlay {
    let points = dataset
        .records()
        .iter()
        .map(|r| {
            let features = r.features();
            OverlayPoint {
                x: features.value(axes.x),
                y: features.value(axes.y),
                grade: r.grade.clone(),
            }
        })
        .collect();

    Overlay {
        axes,
        points,
        marker: [vector.value(axes.x), vector.value(axes.y)],
    }
}
