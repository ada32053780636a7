/// Data layer: cleaning pipeline, category index and queries.
///
/// Architecture:
/// ```text
///   .csv / .tsv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → RawRow per record
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ normalize  │  text → Coerced<f64> / Coerced<NaiveDate>
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  clean    │  drop rows without id/date, derive year + genres (extract)
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ MovieDataset  │  Vec<Movie>, genre index (index), cached by content (cache)
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  year range + genres → matches, top rated, per-year counts
///   └──────────┘
/// ```

pub mod analysis;
pub mod cache;
pub mod clean;
pub mod extract;
pub mod filter;
pub mod index;
pub mod literal;
pub mod loader;
pub mod model;
pub mod normalize;
