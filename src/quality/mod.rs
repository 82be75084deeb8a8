//! Quality heuristics over dataset summaries.
//!
//! Evaluates a battery of independent heuristics (row count, column
//! count, missingness, constant columns, high-cardinality categoricals,
//! zero-heavy numeric columns) and combines them into a single bounded
//! quality score. Heuristics derive from [`crate::profile::DatasetSummary`]
//! and [`crate::missing::MissingTable`] wherever possible; only the
//! zero-share scan needs raw data, and it degrades to its safe default
//! when the caller can offer a summary only.

mod heuristics;


pub use heuristics::{
    DataAccess, QualityConfig, QualityEvaluator, QualityFlags, MAX_COLUMNS, MAX_MISSING_SHARE,
    MIN_ROWS,
};
