//! Top-K frequency tables for categorical columns.
//!
//! For each column the column profiler classifies as categorical or
//! other, counts non-missing values and keeps the `top_k` most frequent,
//! ties broken by first appearance in the column. At most `max_columns`
//! columns are processed, in schema order; the rest are silently skipped.

use std::collections::HashMap;

use serde::Serialize;

use crate::{
    dataset::Dataset,
    error::{Error, Result},
    profile::{dtype_of, DtypeKind},
};

/// One `(value, count)` entry of a frequency table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    /// The category value as displayed.
    pub value: String,
    /// Number of occurrences.
    pub count: usize,
}

/// Frequency table for one column: at most `top_k` entries, sorted by
/// descending count, ties in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopCategories {
    /// Source column name.
    pub column: String,
    /// The `(value, count)` entries.
    pub entries: Vec<CategoryCount>,
}

/// Frequency tables for the processed categorical columns, in schema
/// order. Empty when the dataset has no categorical columns, which is a
/// valid, meaningful result.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TopCategoriesReport {
    tables: Vec<TopCategories>,
}

impl TopCategoriesReport {
    /// Look up the table for a column.
    pub fn get(&self, column: &str) -> Option<&TopCategories> {
        self.tables.iter().find(|t| t.column == column)
    }

    /// Iterate over the tables in schema order.
    pub fn iter(&self) -> impl Iterator<Item = &TopCategories> {
        self.tables.iter()
    }

    /// Number of tables in the report.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Returns true if no categorical column was processed.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// Computes top-K frequency tables for the categorical columns of a
/// dataset.
///
/// # Errors
///
/// Returns [`Error::InvalidConfig`] when `top_k < 1`, before any work is
/// done, and propagates column extraction failures.
pub fn top_categories(
    dataset: &Dataset,
    max_columns: usize,
    top_k: usize,
) -> Result<TopCategoriesReport> {
    if top_k < 1 {
        return Err(Error::invalid_config("top_k must be at least 1"));
    }

    let schema = dataset.schema();
    let mut tables = Vec::new();

    for (index, field) in schema.fields().iter().enumerate() {
        if tables.len() == max_columns {
            break;
        }

        let values = dataset.column_values(index)?;
        if dtype_of(&values) == DtypeKind::Numeric {
            continue;
        }

        // First-seen insertion order makes the stable sort break count
        // ties by first appearance
        let mut entries: Vec<CategoryCount> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();
        for value in &values {
            let Some(text) = value.display() else { continue };
            match positions.get(&text) {
                Some(&i) => entries[i].count += 1,
                None => {
                    positions.insert(text.clone(), entries.len());
                    entries.push(CategoryCount {
                        value: text,
                        count: 1,
                    });
                }
            }
        }

        entries.sort_by(|a, b| b.count.cmp(&a.count));
        entries.truncate(top_k);

        tables.push(TopCategories {
            column: field.name().clone(),
            entries,
        });
    }

    Ok(TopCategoriesReport { tables })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use arrow::array::{ArrayRef, Float64Array, NullArray, StringArray};

    use super::*;

    fn strings(values: Vec<Option<&str>>) -> ArrayRef {
        Arc::new(StringArray::from(values))
    }

    fn sample_dataset() -> Dataset {
        Dataset::from_columns(vec![
            (
                "age",
                Arc::new(Float64Array::from(vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0)]))
                    as ArrayRef,
            ),
            (
                "city",
                strings(vec![Some("A"), Some("B"), Some("A"), None]),
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_counts_and_order() {
        let report = top_categories(&sample_dataset(), 10, 5).unwrap();

        assert_eq!(report.len(), 1);
        let city = report.get("city").unwrap();
        assert_eq!(
            city.entries,
            vec![
                CategoryCount {
                    value: "A".to_string(),
                    count: 2
                },
                CategoryCount {
                    value: "B".to_string(),
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn test_top_k_truncation() {
        let dataset = Dataset::from_columns(vec![(
            "c",
            strings(vec![Some("x"), Some("y"), Some("z"), Some("x")]),
        )])
        .unwrap();

        let report = top_categories(&dataset, 10, 2).unwrap();
        let table = report.get("c").unwrap();
        assert_eq!(table.entries.len(), 2);
        assert_eq!(table.entries[0].value, "x");
    }

    #[test]
    fn test_ties_break_by_first_seen() {
        let dataset = Dataset::from_columns(vec![(
            "c",
            strings(vec![Some("b"), Some("a"), Some("a"), Some("b"), Some("c")]),
        )])
        .unwrap();

        let report = top_categories(&dataset, 10, 5).unwrap();
        let values: Vec<&str> = report
            .get("c")
            .unwrap()
            .entries
            .iter()
            .map(|e| e.value.as_str())
            .collect();
        // "b" appears before "a" in the column, both with count 2
        assert_eq!(values, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_missing_values_excluded() {
        let dataset = Dataset::from_columns(vec![(
            "c",
            strings(vec![Some("a"), None, None, Some("a")]),
        )])
        .unwrap();

        let report = top_categories(&dataset, 10, 5).unwrap();
        let table = report.get("c").unwrap();
        assert_eq!(table.entries.len(), 1);
        assert_eq!(table.entries[0].count, 2);
    }

    #[test]
    fn test_max_columns_cap() {
        let dataset = Dataset::from_columns(vec![
            ("c1", strings(vec![Some("a")])),
            ("c2", strings(vec![Some("b")])),
            ("c3", strings(vec![Some("c")])),
        ])
        .unwrap();

        let report = top_categories(&dataset, 2, 5).unwrap();
        assert_eq!(report.len(), 2);
        assert!(report.get("c1").is_some());
        assert!(report.get("c2").is_some());
        assert!(report.get("c3").is_none());

        let empty = top_categories(&dataset, 0, 5).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_all_missing_column_gets_empty_table() {
        let dataset =
            Dataset::from_columns(vec![("void", Arc::new(NullArray::new(3)) as ArrayRef)])
                .unwrap();

        let report = top_categories(&dataset, 10, 5).unwrap();
        let table = report.get("void").unwrap();
        assert!(table.entries.is_empty());
    }

    #[test]
    fn test_numeric_columns_skipped_without_consuming_cap() {
        let report = top_categories(&sample_dataset(), 1, 5).unwrap();
        assert_eq!(report.len(), 1);
        assert!(report.get("city").is_some());
    }

    #[test]
    fn test_top_k_zero_is_config_error() {
        let result = top_categories(&sample_dataset(), 10, 0);
        assert!(matches!(result, Err(Error::InvalidConfig { .. })));
    }

    #[test]
    fn test_no_categorical_columns_is_empty_report() {
        let dataset = Dataset::from_columns(vec![(
            "x",
            Arc::new(Float64Array::from(vec![Some(1.0)])) as ArrayRef,
        )])
        .unwrap();

        let report = top_categories(&dataset, 10, 5).unwrap();
        assert!(report.is_empty());
    }
}
