//! Missing-value analysis.
//!
//! Computes a per-column table of missing counts and shares. Every column
//! appears in the table, and [`MissingTable::get`] treats an absent name
//! as the zero entry, so "no missing data" is always distinguishable from
//! a failed lookup.

// Shares are ratios of row counts
#![allow(clippy::cast_precision_loss)]

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{dataset::Dataset, error::Result};

/// Missing-value statistics for one column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MissingStats {
    /// Number of missing cells.
    pub count: usize,
    /// `count / n_rows`, or 0.0 when the dataset has no rows.
    pub share: f64,
}

/// Per-column missing-value table, in schema order.
#[derive(Debug, Clone, Serialize)]
pub struct MissingTable {
    entries: Vec<(String, MissingStats)>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl MissingTable {
    fn from_entries(entries: Vec<(String, MissingStats)>) -> Self {
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, (name, _))| (name.clone(), i))
            .collect();
        Self { entries, index }
    }

    /// Look up a column's missing statistics.
    ///
    /// Never fails: an unknown column name yields the zero entry.
    pub fn get(&self, name: &str) -> MissingStats {
        self.index
            .get(name)
            .map(|&i| self.entries[i].1)
            .unwrap_or_default()
    }

    /// The maximum missing share across all columns, 0.0 for an empty
    /// table.
    pub fn max_share(&self) -> f64 {
        self.entries
            .iter()
            .map(|(_, stats)| stats.share)
            .fold(0.0, f64::max)
    }

    /// Names of columns whose missing share strictly exceeds `share`,
    /// in schema order.
    pub fn columns_above(&self, share: f64) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(_, stats)| stats.share > share)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Iterate over `(column, stats)` entries in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, MissingStats)> {
        self.entries.iter().map(|(name, stats)| (name.as_str(), *stats))
    }

    /// Number of entries in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Computes the missing-value table for a dataset.
///
/// # Errors
///
/// Returns an error if a column cannot be extracted; no partial table is
/// produced.
pub fn missing_table(dataset: &Dataset) -> Result<MissingTable> {
    let n_rows = dataset.n_rows();
    let schema = dataset.schema();
    let mut entries = Vec::with_capacity(schema.fields().len());

    for (index, field) in schema.fields().iter().enumerate() {
        let values = dataset.column_values(index)?;
        let count = values.iter().filter(|v| v.is_missing()).count();
        let share = if n_rows == 0 {
            0.0
        } else {
            count as f64 / n_rows as f64
        };
        entries.push((field.name().clone(), MissingStats { count, share }));
    }

    Ok(MissingTable::from_entries(entries))
}
