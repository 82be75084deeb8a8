//! Whole-dataset summarization.

use serde::{Deserialize, Serialize};

use crate::{
    dataset::Dataset,
    error::Result,
    profile::column::{profile_column, ColumnProfile},
};

/// Aggregated profile of an entire dataset.
///
/// Holds one [`ColumnProfile`] per input column, in schema order. Built
/// once per analysis call and read-only afterward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    /// Number of rows.
    pub n_rows: usize,
    /// Number of columns.
    pub n_cols: usize,
    /// Per-column profiles, order-preserving.
    pub columns: Vec<ColumnProfile>,
}

impl DatasetSummary {
    /// Look up a column profile by name.
    pub fn column(&self, name: &str) -> Option<&ColumnProfile> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Iterate over the column profiles in schema order.
    pub fn iter(&self) -> impl Iterator<Item = &ColumnProfile> {
        self.columns.iter()
    }
}

/// Summarizes a dataset by profiling every column in schema order.
///
/// # Errors
///
/// Any column extraction failure aborts the whole summary; partial
/// profiles would corrupt downstream quality scoring.
pub fn summarize(dataset: &Dataset) -> Result<DatasetSummary> {
    let schema = dataset.schema();
    let mut columns = Vec::with_capacity(schema.fields().len());

    for (index, field) in schema.fields().iter().enumerate() {
        let values = dataset.column_values(index)?;
        columns.push(profile_column(field.name(), &values));
    }

    Ok(DatasetSummary {
        n_rows: dataset.n_rows(),
        n_cols: columns.len(),
        columns,
    })
}
