use anyhow::Context;
use eframe::egui::Color32;
use serde::Serialize;

use crate::color::{self, NEUTRAL};
use crate::data::model::FeatureVector;
use crate::inference::PredictionResult;

/// Label shown when no prediction is available.
pub const NOT_AVAILABLE: &str = "Not available";

// ---------------------------------------------------------------------------
// DisplayCard – the result as rendered in the UI
// ---------------------------------------------------------------------------

/// Display-ready rendering of a [`PredictionResult`].
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayCard {
    pub label: String,
    pub confidence_percent: String,
    pub color: Color32,
}

/// Format a prediction for display. Confidence always renders with exactly
/// two decimals; unknown grades get the neutral badge colour.
pub fn format(result: &PredictionResult) -> DisplayCard {
    match result {
        PredictionResult::Classified { grade, confidence } => DisplayCard {
            label: grade.clone(),
            confidence_percent: percent(*confidence),
            color: color::grade_color(grade),
        },
        PredictionResult::Unavailable { .. } => DisplayCard {
            label: NOT_AVAILABLE.to_string(),
            confidence_percent: percent(0.0),
            color: NEUTRAL,
        },
    }
}

fn percent(confidence: f64) -> String {
    format!("{:.2}%", confidence * 100.0)
}

// ---------------------------------------------------------------------------
// ExportRow – the downloadable CSV record
// ---------------------------------------------------------------------------

/// One flattened row for the CSV download: the input measurements plus the
/// rendered prediction. Unavailable predictions leave the last two columns
/// empty rather than dropping the row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow {
    pub mass: f64,
    pub firmness: f64,
    pub sugar_content: f64,
    pub skin_thickness: f64,
    pub prediction: String,
    pub confidence: String,
}

/// Flatten the input vector and its prediction into an export row.
pub fn to_export_row(vector: &FeatureVector, result: &PredictionResult) -> ExportRow {
    let (prediction, confidence) = match result {
        PredictionResult::Classified { grade, confidence } => {
            (grade.clone(), percent(*confidence))
        }
        PredictionResult::Unavailable { .. } => (String::new(), String::new()),
    };
    ExportRow {
        mass: vector.mass,
        firmness: vector.firmness,
        sugar_content: vector.sugar_content,
        skin_thickness: vector.skin_thickness,
        prediction,
        confidence,
    }
}

/// Render an export row as CSV text (header plus one record).
pub fn export_csv(row: &ExportRow) -> anyhow::Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.serialize(row).context("serialising export row")?;
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("flushing export row: {e}"))?;
    String::from_utf8(bytes).context("export row is not UTF-8")
}
