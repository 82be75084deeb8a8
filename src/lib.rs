//! perfilar - Dataset Profiling and Quality Heuristics in Pure Rust
//!
//! Analyzes a tabular dataset (rows × named columns, mixed
//! numeric/categorical/missing data) and produces descriptive statistics
//! plus a structured quality assessment: per-column profiles,
//! missingness, pairwise correlation, categorical frequency tables, and a
//! composite quality score in `[0, 1]` from configurable heuristics.
//!
//! # Design Principles
//!
//! 1. **Engine only** - no file I/O, plotting, or report rendering;
//!    collaborators consume the typed outputs
//! 2. **Pure Rust** - Arrow `RecordBatch` throughout, no FFI
//! 3. **Immutable snapshots** - every operation is a pure function over a
//!    read-only [`Dataset`]; concurrent analyses are safe by construction
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use arrow::array::{Float64Array, StringArray};
//! use perfilar::{analyze, AnalysisOptions, Dataset};
//!
//! let dataset = Dataset::from_columns(vec![
//!     ("age", Arc::new(Float64Array::from(vec![Some(10.0), Some(20.0), None])) as _),
//!     ("city", Arc::new(StringArray::from(vec![Some("A"), Some("B"), Some("A")])) as _),
//! ])
//! .unwrap();
//!
//! let analysis = analyze(&dataset, &AnalysisOptions::default()).unwrap();
//! println!("quality score: {:.2}", analysis.flags.quality_score);
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
// Allow common test patterns
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::cast_lossless,
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::float_cmp,
        clippy::redundant_clone
    )
)]
// Allow some pedantic lints for cleaner code
#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::module_name_repetitions)]

pub mod analyze;
pub mod categories;
pub mod correlation;
pub mod dataset;
pub mod error;
pub mod missing;
pub mod profile;
pub mod quality;

// Re-exports for convenience
// Re-export arrow types commonly needed to build datasets
pub use arrow::{
    array::RecordBatch,
    datatypes::{Schema, SchemaRef},
};

pub use analyze::{analyze, Analysis, AnalysisOptions};
pub use categories::{top_categories, CategoryCount, TopCategories, TopCategoriesReport};
pub use correlation::{correlation_matrix, CorrelationMatrix};
pub use dataset::{CellValue, Dataset};
pub use error::{Error, Result};
pub use missing::{missing_table, MissingStats, MissingTable};
pub use profile::{
    dtype_of, profile_column, summarize, ColumnProfile, DatasetSummary, DtypeKind, NumericSummary,
};
pub use quality::{
    DataAccess, QualityConfig, QualityEvaluator, QualityFlags, MAX_COLUMNS, MAX_MISSING_SHARE,
    MIN_ROWS,
};
