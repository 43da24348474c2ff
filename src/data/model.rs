use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of features the scaler and classifier were fitted with.
pub const FEATURE_COUNT: usize = 4;

// ---------------------------------------------------------------------------
// FeatureField – typed enumeration of the four measurement columns
// ---------------------------------------------------------------------------

/// One of the four measurement fields, in training order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureField {
    Mass,
    Firmness,
    SugarContent,
    SkinThickness,
}

impl FeatureField {
    /// All fields in the order the artifacts were fitted with.
    pub const ALL: [FeatureField; FEATURE_COUNT] = [
        FeatureField::Mass,
        FeatureField::Firmness,
        FeatureField::SugarContent,
        FeatureField::SkinThickness,
    ];

    /// Column name as it appears in the dataset file.
    pub fn column_name(self) -> &'static str {
        match self {
            FeatureField::Mass => "mass",
            FeatureField::Firmness => "firmness",
            FeatureField::SugarContent => "sugar_content",
            FeatureField::SkinThickness => "skin_thickness",
        }
    }

    /// Human-readable label with unit, for slider captions.
    pub fn label(self) -> &'static str {
        match self {
            FeatureField::Mass => "Mass (g)",
            FeatureField::Firmness => "Firmness (N)",
            FeatureField::SugarContent => "Sugar content (°Bx)",
            FeatureField::SkinThickness => "Skin thickness (mm)",
        }
    }
}

impl fmt::Display for FeatureField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

// ---------------------------------------------------------------------------
// FeatureVector – one model-ready input record
// ---------------------------------------------------------------------------

/// The four measurements of a single tomato, in fixed schema order.
///
/// The field order is the order the scaler and classifier were fitted with;
/// [`FeatureVector::as_array`] is the only path from named fields to the
/// numeric row the artifacts see, so the order cannot drift per call site.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    pub mass: f64,
    pub firmness: f64,
    pub sugar_content: f64,
    pub skin_thickness: f64,
}

impl FeatureVector {
    /// The vector as a fixed-order numeric row (training order).
    pub fn as_array(&self) -> [f64; FEATURE_COUNT] {
        [self.mass, self.firmness, self.sugar_content, self.skin_thickness]
    }

    /// Value of a single field.
    pub fn value(&self, field: FeatureField) -> f64 {
        match field {
            FeatureField::Mass => self.mass,
            FeatureField::Firmness => self.firmness,
            FeatureField::SugarContent => self.sugar_content,
            FeatureField::SkinThickness => self.skin_thickness,
        }
    }

    /// Mutable access to a single field, for slider bindings.
    pub fn value_mut(&mut self, field: FeatureField) -> &mut f64 {
        match field {
            FeatureField::Mass => &mut self.mass,
            FeatureField::Firmness => &mut self.firmness,
            FeatureField::SugarContent => &mut self.sugar_content,
            FeatureField::SkinThickness => &mut self.skin_thickness,
        }
    }
}

// ---------------------------------------------------------------------------
// TomatoRecord – one row of the reference dataset
// ---------------------------------------------------------------------------

/// A historical tomato record: four measurements plus the ground-truth grade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TomatoRecord {
    pub mass: f64,
    pub firmness: f64,
    pub sugar_content: f64,
    pub skin_thickness: f64,
    pub grade: String,
}

impl TomatoRecord {
    /// The measurement part of the record as a [`FeatureVector`].
    pub fn features(&self) -> FeatureVector {
        FeatureVector {
            mass: self.mass,
            firmness: self.firmness,
            sugar_content: self.sugar_content,
            skin_thickness: self.skin_thickness,
        }
    }
}

// ---------------------------------------------------------------------------
// FieldStats – observed range and median of one measurement column
// ---------------------------------------------------------------------------

/// Min / max / median of one field across the reference dataset.
/// Drives the bounds and default value of the corresponding slider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldStats {
    pub min: f64,
    pub max: f64,
    pub median: f64,
}

impl FieldStats {
    fn from_values(mut values: Vec<f64>) -> Self {
        values.sort_by(f64::total_cmp);
        let min = values.first().copied().unwrap_or(0.0);
        let max = values.last().copied().unwrap_or(0.0);
        let median = if values.is_empty() {
            0.0
        } else {
            let mid = values.len() / 2;
            if values.len() % 2 == 0 {
                (values[mid - 1] + values[mid]) / 2.0
            } else {
                values[mid]
            }
        };
        FieldStats { min, max, median }
    }
}

// ---------------------------------------------------------------------------
// ReferenceDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full reference dataset with pre-computed grade and field indices.
/// Immutable after load; used for slider bounds, sample browsing, and the
/// scatter overlays, never mutated by inference.
#[derive(Debug, Clone)]
pub struct ReferenceDataset {
    records: Vec<TomatoRecord>,
    grades: Vec<String>,
    stats: [FieldStats; FEATURE_COUNT],
}

impl ReferenceDataset {
    /// Build the grade list and per-field stats from the loaded records.
    pub fn from_records(records: Vec<TomatoRecord>) -> Self {
        let mut grades: Vec<String> = records.iter().map(|r| r.grade.clone()).collect();
        grades.sort();
        grades.dedup();

        let stats = FeatureField::ALL.map(|field| {
            FieldStats::from_values(records.iter().map(|r| r.features().value(field)).collect())
        });

        ReferenceDataset {
            records,
            grades,
            stats,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records, in file order.
    pub fn records(&self) -> &[TomatoRecord] {
        &self.records
    }

    /// Sorted unique grade labels observed in the dataset.
    pub fn grades(&self) -> &[String] {
        &self.grades
    }

    /// Observed range and median of one field.
    pub fn field_stats(&self, field: FeatureField) -> FieldStats {
        self.stats[FeatureField::ALL.iter().position(|&f| f == field).unwrap_or(0)]
    }

    /// Per-field medians as a vector, the default slider position.
    pub fn median_vector(&self) -> FeatureVector {
        FeatureVector {
            mass: self.field_stats(FeatureField::Mass).median,
            firmness: self.field_stats(FeatureField::Firmness).median,
            sugar_content: self.field_stats(FeatureField::SugarContent).median,
            skin_thickness: self.field_stats(FeatureField::SkinThickness).median,
        }
    }

    /// The first `n` records, for the sample browser.
    pub fn sample(&self, n: usize) -> &[TomatoRecord] {
        &self.records[..self.records.len().min(n)]
    }
}
