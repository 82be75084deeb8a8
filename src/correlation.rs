//! Pairwise correlation among numeric columns.
//!
//! Computes Pearson correlation for every pair of numeric columns, each
//! pair over the rows where both cells are present and finite. With fewer
//! than two numeric columns the result is the explicitly empty matrix,
//! which callers must read as "not computable" rather than zero
//! correlation.

// Statistical computation over widened f64 values
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]

use serde::Serialize;

use crate::{
    dataset::{CellValue, Dataset},
    error::Result,
    profile::{dtype_of, DtypeKind},
};

/// Square, symmetric correlation matrix over numeric columns.
///
/// The diagonal is 1.0. A pair with fewer than two complete rows, or with
/// zero variance on either side, holds NaN.
#[derive(Debug, Clone, Serialize)]
pub struct CorrelationMatrix {
    columns: Vec<String>,
    /// Row-major coefficients, `columns.len() * columns.len()` entries.
    values: Vec<f64>,
}

impl CorrelationMatrix {
    fn empty() -> Self {
        Self {
            columns: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Returns true if the matrix is not computable (fewer than two
    /// numeric columns in the source dataset).
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// The numeric column names covered by this matrix, in schema order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of columns along one side of the matrix.
    pub fn size(&self) -> usize {
        self.columns.len()
    }

    /// The coefficient for a pair of columns, `None` if either name is
    /// not part of the matrix.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        Some(self.values[i * self.columns.len() + j])
    }
}

/// Computes the pairwise Pearson correlation matrix over the numeric
/// columns of a dataset.
///
/// # Errors
///
/// Returns an error if a column cannot be extracted.
pub fn correlation_matrix(dataset: &Dataset) -> Result<CorrelationMatrix> {
    let schema = dataset.schema();
    let mut names = Vec::new();
    let mut columns: Vec<Vec<Option<f64>>> = Vec::new();

    for (index, field) in schema.fields().iter().enumerate() {
        let values = dataset.column_values(index)?;
        if dtype_of(&values) == DtypeKind::Numeric {
            names.push(field.name().clone());
            columns.push(
                values
                    .iter()
                    .map(|v| v.as_number().filter(|n| n.is_finite()))
                    .collect(),
            );
        }
    }

    if names.len() < 2 {
        return Ok(CorrelationMatrix::empty());
    }

    let n = names.len();
    let mut values = vec![f64::NAN; n * n];
    for i in 0..n {
        values[i * n + i] = 1.0;
        for j in (i + 1)..n {
            let r = pearson(&columns[i], &columns[j]);
            values[i * n + j] = r;
            values[j * n + i] = r;
        }
    }

    Ok(CorrelationMatrix {
        columns: names,
        values,
    })
}

/// Pearson correlation over the rows where both columns are present.
fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> f64 {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y)
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .collect();

    if pairs.len() < 2 {
        return f64::NAN;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(a, _)| a).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, b)| b).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (a, b) in &pairs {
        let dx = a - mean_x;
        let dy = b - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denom = (var_x * var_y).sqrt();
    if denom == 0.0 {
        return f64::NAN;
    }

    (cov / denom).clamp(-1.0, 1.0)
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use std::sync::Arc;

    use arrow::array::{ArrayRef, Float64Array, StringArray};

    use super::*;

    fn numeric(values: Vec<Option<f64>>) -> ArrayRef {
        Arc::new(Float64Array::from(values))
    }

    #[test]
    fn test_perfect_positive_correlation() {
        let dataset = Dataset::from_columns(vec![
            ("x", numeric(vec![Some(1.0), Some(2.0), Some(3.0)])),
            ("y", numeric(vec![Some(10.0), Some(20.0), Some(30.0)])),
        ])
        .unwrap();

        let matrix = correlation_matrix(&dataset).unwrap();
        assert!(!matrix.is_empty());
        assert!((matrix.get("x", "y").unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_perfect_negative_correlation() {
        let dataset = Dataset::from_columns(vec![
            ("x", numeric(vec![Some(1.0), Some(2.0), Some(3.0)])),
            ("y", numeric(vec![Some(3.0), Some(2.0), Some(1.0)])),
        ])
        .unwrap();

        let matrix = correlation_matrix(&dataset).unwrap();
        assert!((matrix.get("x", "y").unwrap() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_symmetry_and_diagonal() {
        let dataset = Dataset::from_columns(vec![
            ("a", numeric(vec![Some(1.0), Some(5.0), Some(2.0), Some(4.0)])),
            ("b", numeric(vec![Some(2.0), Some(1.0), Some(7.0), Some(3.0)])),
            ("c", numeric(vec![Some(9.0), Some(2.0), Some(4.0), Some(4.0)])),
        ])
        .unwrap();

        let matrix = correlation_matrix(&dataset).unwrap();
        assert_eq!(matrix.size(), 3);
        for name in ["a", "b", "c"] {
            assert_eq!(matrix.get(name, name).unwrap(), 1.0);
        }
        for x in ["a", "b", "c"] {
            for y in ["a", "b", "c"] {
                assert_eq!(matrix.get(x, y).unwrap(), matrix.get(y, x).unwrap());
            }
        }
    }

    #[test]
    fn test_pairwise_missing_rows_ignored() {
        // Complete pairs: (1, 10), (2, 20), (3, 30)
        let dataset = Dataset::from_columns(vec![
            (
                "x",
                numeric(vec![Some(1.0), Some(2.0), Some(3.0), None, Some(9.0)]),
            ),
            (
                "y",
                numeric(vec![Some(10.0), Some(20.0), Some(30.0), Some(5.0), None]),
            ),
        ])
        .unwrap();

        let matrix = correlation_matrix(&dataset).unwrap();
        assert!((matrix.get("x", "y").unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_fewer_than_two_numeric_columns_is_empty() {
        let one_numeric = Dataset::from_columns(vec![
            ("x", numeric(vec![Some(1.0), Some(2.0)])),
            (
                "city",
                Arc::new(StringArray::from(vec!["A", "B"])) as ArrayRef,
            ),
        ])
        .unwrap();

        let matrix = correlation_matrix(&one_numeric).unwrap();
        assert!(matrix.is_empty());
        assert_eq!(matrix.size(), 0);
        assert!(matrix.get("x", "x").is_none());

        assert!(correlation_matrix(&Dataset::empty()).unwrap().is_empty());
    }

    #[test]
    fn test_constant_column_pair_is_nan() {
        let dataset = Dataset::from_columns(vec![
            ("x", numeric(vec![Some(1.0), Some(2.0), Some(3.0)])),
            ("flat", numeric(vec![Some(5.0), Some(5.0), Some(5.0)])),
        ])
        .unwrap();

        let matrix = correlation_matrix(&dataset).unwrap();
        assert!(matrix.get("x", "flat").unwrap().is_nan());
        assert_eq!(matrix.get("flat", "flat").unwrap(), 1.0);
    }

    #[test]
    fn test_too_few_complete_pairs_is_nan() {
        let dataset = Dataset::from_columns(vec![
            ("x", numeric(vec![Some(1.0), None, Some(3.0)])),
            ("y", numeric(vec![Some(10.0), Some(20.0), None])),
        ])
        .unwrap();

        let matrix = correlation_matrix(&dataset).unwrap();
        assert!(matrix.get("x", "y").unwrap().is_nan());
    }

    #[test]
    fn test_coefficients_bounded() {
        let dataset = Dataset::from_columns(vec![
            ("a", numeric(vec![Some(1.0), Some(2.0), Some(2.5), Some(4.0)])),
            ("b", numeric(vec![Some(1.1), Some(1.9), Some(2.4), Some(4.2)])),
        ])
        .unwrap();

        let matrix = correlation_matrix(&dataset).unwrap();
        let r = matrix.get("a", "b").unwrap();
        assert!((-1.0..=1.0).contains(&r));
    }
}
