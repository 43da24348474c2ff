use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Fixed grade colours
// ---------------------------------------------------------------------------

/// Fallback colour for grades outside the known table and for unavailable
/// predictions.
pub const NEUTRAL: Color32 = Color32::from_rgb(0x9c, 0xa3, 0xaf);

/// The three known grade categories and their badge colours.
pub const KNOWN_GRADES: [(&str, Color32); 3] = [
    ("Export", Color32::from_rgb(0xe7, 0x4c, 0x3c)),
    ("Local Premium", Color32::from_rgb(0x27, 0xae, 0x60)),
    ("Industrial", Color32::from_rgb(0x34, 0x98, 0xdb)),
];

/// Badge colour for a grade label; anything outside the known table maps to
/// [`NEUTRAL`], never an error.
pub fn grade_color(grade: &str) -> Color32 {
    KNOWN_GRADES
        .iter()
        .find(|(name, _)| *name == grade)
        .map(|(_, color)| *color)
        .unwrap_or(NEUTRAL)
}

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// GradePalette – plot colours for every grade in the dataset
// ---------------------------------------------------------------------------

/// Plot colours for the grades observed in the reference dataset: known
/// grades keep their fixed badge colour, any others get generated hues so
/// the scatter series stay distinguishable.
#[derive(Debug, Clone)]
pub struct GradePalette {
    mapping: BTreeMap<String, Color32>,
}

impl GradePalette {
    /// Build a palette covering `grades` (typically
    /// `ReferenceDataset::grades()`).
    pub fn new(grades: &[String]) -> Self {
        let unknown: Vec<&String> = grades
            .iter()
            .filter(|g| KNOWN_GRADES.iter().all(|(name, _)| *name != g.as_str()))
            .collect();
        let generated = generate_palette(unknown.len());

        let mut mapping: BTreeMap<String, Color32> = grades
            .iter()
            .map(|g| (g.clone(), grade_color(g)))
            .collect();
        for (grade, color) in unknown.into_iter().zip(generated) {
            mapping.insert(grade.clone(), color);
        }

        GradePalette { mapping }
    }

    /// Look up the plot colour for a grade.
    pub fn color_for(&self, grade: &str) -> Color32 {
        self.mapping.get(grade).copied().unwrap_or(NEUTRAL)
    }
}
