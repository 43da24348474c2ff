/// Data layer: core types and dataset loading.
///
/// Architecture:
/// ```text
///  .csv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → ReferenceDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────────────┐
///   │ ReferenceDataset  │  Vec<TomatoRecord>, grade + field stats index
///   └──────────────────┘
/// ```

pub mod loader;
pub mod model;
