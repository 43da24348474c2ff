use std::path::Path;

use anyhow::{Context, bail};
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{ReferenceDataset, TomatoRecord};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failure to load the reference dataset. Always fatal: without the dataset
/// there are no slider bounds and the session cannot start.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("dataset file not found: {0}")]
    NotFound(String),
    #[error("dataset could not be loaded: {0:#}")]
    Invalid(#[from] anyhow::Error),
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the reference dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – header row `mass,firmness,sugar_content,skin_thickness,grade`
/// * `.json` – `[{ "mass": 150.0, ..., "grade": "Export" }, ...]`
pub fn load_dataset(path: &Path) -> Result<ReferenceDataset, DatasetError> {
    if !path.exists() {
        return Err(DatasetError::NotFound(path.display().to_string()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        other => return Err(anyhow::anyhow!("unsupported dataset extension: .{other}").into()),
    };

    if records.is_empty() {
        return Err(anyhow::anyhow!("dataset {} contains no records", path.display()).into());
    }

    Ok(ReferenceDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> anyhow::Result<Vec<TomatoRecord>> {
    let mut reader = csv::Reader::from_path(path).context("opening dataset CSV")?;

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<TomatoRecord>().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        records.push(record);
    }
    Ok(records)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')` layout.
fn load_json(path: &Path) -> anyhow::Result<Vec<TomatoRecord>> {
    let text = std::fs::read_to_string(path).context("reading dataset JSON")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing dataset JSON")?;

    let rows = root.as_array().context("expected top-level JSON array")?;

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        if !row.is_object() {
            bail!("row {i} is not a JSON object");
        }
        let record: TomatoRecord =
            serde_json::from_value(row.clone()).with_context(|| format!("row {i}"))?;
        records.push(record);
    }
    Ok(records)
}
