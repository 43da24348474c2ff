//! Generates a synthetic reference dataset plus matching fitted artifacts
//! (`tomato_dataset.csv`, `tomato_scaler.json`, `tomato_classifier.json`)
//! so the app runs out of the box.

use serde_json::json;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// (mean, std_dev) per feature, training order: mass, firmness, sugar, skin.
type GradeProfile = [(f64, f64); 4];

fn main() {
    let mut rng = SimpleRng::new(42);

    let profiles: Vec<(&str, GradeProfile)> = vec![
        (
            "Export",
            [(170.0, 15.0), (4.5, 0.4), (7.5, 0.6), (0.30, 0.05)],
        ),
        (
            "Local Premium",
            [(130.0, 15.0), (3.8, 0.4), (6.0, 0.6), (0.45, 0.07)],
        ),
        (
            "Industrial",
            [(95.0, 12.0), (2.5, 0.5), (4.5, 0.6), (0.60, 0.08)],
        ),
    ];
    let per_grade = 50usize;

    // ---- Generate records ----
    let mut rows: Vec<([f64; 4], &str)> = Vec::new();
    for (grade, profile) in &profiles {
        for _ in 0..per_grade {
            let mut features = [0.0; 4];
            for (i, &(mean, std_dev)) in profile.iter().enumerate() {
                // All four measurements are physically positive.
                features[i] = rng.gauss(mean, std_dev).max(0.01);
            }
            rows.push((features, grade));
        }
    }

    // ---- Write the dataset CSV ----
    let dataset_path = "tomato_dataset.csv";
    let mut writer = csv::Writer::from_path(dataset_path).expect("Failed to create dataset file");
    writer
        .write_record(["mass", "firmness", "sugar_content", "skin_thickness", "grade"])
        .expect("Failed to write header");
    for (features, grade) in &rows {
        let mut record: Vec<String> = features.iter().map(|v| format!("{v:.3}")).collect();
        record.push(grade.to_string());
        writer.write_record(&record).expect("Failed to write row");
    }
    writer.flush().expect("Failed to flush dataset file");

    // ---- Fit the scaler on the generated data ----
    let n = rows.len() as f64;
    let mut mean = [0.0; 4];
    for (features, _) in &rows {
        for i in 0..4 {
            mean[i] += features[i] / n;
        }
    }
    let mut scale = [0.0; 4];
    for (features, _) in &rows {
        for i in 0..4 {
            scale[i] += (features[i] - mean[i]).powi(2) / n;
        }
    }
    for s in &mut scale {
        *s = s.sqrt().max(1e-9);
    }

    let scaler_path = "tomato_scaler.json";
    let scaler = json!({ "mean": mean, "scale": scale });
    std::fs::write(
        scaler_path,
        serde_json::to_string_pretty(&scaler).expect("Failed to serialise scaler"),
    )
    .expect("Failed to write scaler file");

    // ---- Classifier weights in scaled space ----
    // Export sits high on mass/firmness/sugar and low on skin thickness,
    // Industrial is the mirror image, Local Premium lies between.
    let classifier_path = "tomato_classifier.json";
    let classifier = json!({
        "classes": ["Export", "Local Premium", "Industrial"],
        "coefficients": [
            [2.0, 1.5, 1.5, -1.5],
            [0.0, 0.0, 0.0, 0.0],
            [-2.0, -1.5, -1.5, 1.5]
        ],
        "intercepts": [-0.5, 0.8, -0.5]
    });
    std::fs::write(
        classifier_path,
        serde_json::to_string_pretty(&classifier).expect("Failed to serialise classifier"),
    )
    .expect("Failed to write classifier file");

    println!(
        "Wrote {} records to {dataset_path}, plus {scaler_path} and {classifier_path}",
        rows.len()
    );
}
