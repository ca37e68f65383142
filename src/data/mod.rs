/// Data layer: catalog types, loading, and aggregation.
///
/// Architecture:
/// ```text
///  colors / themes / sets  (.csv / .parquet / .json)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse tables → Catalog
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Catalog  │  Vec<Color>, Vec<Theme>, Vec<CatalogSet>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  stats    │  counts, rankings, per-year groupings, joins
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod stats;
