//! Column and dataset profiling.
//!
//! The column profiler ([`profile_column`]) classifies one column and
//! computes its descriptive statistics; the summarizer ([`summarize`])
//! runs it over every column of a dataset. Columns carry no dependency on
//! each other, so the summarizer is a single sequential pass in schema
//! order.

mod column;
mod summary;


pub use column::{dtype_of, profile_column, ColumnProfile, DtypeKind, NumericSummary};
pub use summary::{summarize, DatasetSummary};
