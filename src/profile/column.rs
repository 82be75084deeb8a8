//! Per-column profiling.
//!
//! The column profiler classifies a column, counts missing markers and
//! distinct values, and computes a numeric summary where one exists.

// Statistical computation over widened f64 values
#![allow(clippy::cast_precision_loss)]

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::dataset::CellValue;

/// Broad classification of a column's contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DtypeKind {
    /// Every non-missing cell is a number.
    Numeric,
    /// At least one non-missing cell is text.
    Categorical,
    /// No non-missing cells at all.
    Other,
}

impl std::fmt::Display for DtypeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Numeric => write!(f, "numeric"),
            Self::Categorical => write!(f, "categorical"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Summary statistics over the finite numeric cells of a column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    /// Minimum value.
    pub min: f64,
    /// Maximum value.
    pub max: f64,
    /// Arithmetic mean.
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
}

/// Descriptive profile of a single column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnProfile {
    /// Column name, unique within a dataset.
    pub name: String,
    /// Broad type classification.
    pub dtype: DtypeKind,
    /// Count of missing markers.
    pub n_missing: usize,
    /// Count of distinct non-missing values.
    pub n_unique: usize,
    /// Numeric summary, present only for numeric columns with at least
    /// one finite value.
    pub numeric: Option<NumericSummary>,
}

impl ColumnProfile {
    /// Check whether every non-missing cell holds the same value.
    ///
    /// Requires at least one non-missing cell; an all-missing column is
    /// not constant.
    pub fn is_constant(&self) -> bool {
        self.n_unique == 1
    }
}

/// Hashable identity of a non-missing cell, used for distinct counting.
///
/// Numbers are keyed by their bit pattern with negative zero folded into
/// zero, so `0.0` and `-0.0` count as one value.
#[derive(PartialEq, Eq, Hash)]
enum CellKey<'a> {
    Number(u64),
    Text(&'a str),
}

fn cell_key(value: &CellValue) -> Option<CellKey<'_>> {
    match value {
        CellValue::Number(n) => {
            let bits = if *n == 0.0 { 0.0f64.to_bits() } else { n.to_bits() };
            Some(CellKey::Number(bits))
        }
        CellValue::Text(s) => Some(CellKey::Text(s)),
        CellValue::Missing => None,
    }
}

/// Classifies a column from its cells.
///
/// A column with no non-missing cells is [`DtypeKind::Other`]; one where
/// every non-missing cell is numeric is [`DtypeKind::Numeric`]; anything
/// else is [`DtypeKind::Categorical`].
pub fn dtype_of(values: &[CellValue]) -> DtypeKind {
    let mut saw_number = false;
    for value in values {
        match value {
            CellValue::Missing => {}
            CellValue::Number(_) => saw_number = true,
            CellValue::Text(_) => return DtypeKind::Categorical,
        }
    }
    if saw_number {
        DtypeKind::Numeric
    } else {
        DtypeKind::Other
    }
}

/// Profiles a single column.
///
/// Pure over its input: the same cells always produce the same profile,
/// and the numeric summary is absent rather than NaN when no finite
/// numeric cells exist.
pub fn profile_column(name: &str, values: &[CellValue]) -> ColumnProfile {
    let n_missing = values.iter().filter(|v| v.is_missing()).count();

    let mut seen = HashSet::new();
    for value in values {
        if let Some(key) = cell_key(value) {
            seen.insert(key);
        }
    }
    let n_unique = seen.len();

    let dtype = dtype_of(values);
    let numeric = if dtype == DtypeKind::Numeric {
        numeric_summary(values)
    } else {
        None
    };

    ColumnProfile {
        name: name.to_string(),
        dtype,
        n_missing,
        n_unique,
        numeric,
    }
}

fn numeric_summary(values: &[CellValue]) -> Option<NumericSummary> {
    let numbers: Vec<f64> = values
        .iter()
        .filter_map(CellValue::as_number)
        .filter(|n| n.is_finite())
        .collect();

    if numbers.is_empty() {
        return None;
    }

    let n = numbers.len() as f64;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut sum = 0.0;
    for &value in &numbers {
        min = min.min(value);
        max = max.max(value);
        sum += value;
    }
    let mean = sum / n;

    let variance = numbers.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

    Some(NumericSummary {
        min,
        max,
        mean,
        std_dev: variance.sqrt(),
    })
}
