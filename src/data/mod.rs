/// Data layer: bundled sample, core types, and the train/holdout split.
///
/// Architecture:
/// ```text
///  bundled sample (compiled in)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  DatasetSource → Dataset (569 × 30, labels {0,1})
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  split    │  seeded shuffle → Split { train, holdout }
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod split;
