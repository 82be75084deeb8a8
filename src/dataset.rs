//! Dataset snapshot types.
//!
//! Provides the [`Dataset`] snapshot the analysis engines read and the
//! [`CellValue`] view of individual cells. A `Dataset` is an immutable
//! collection of Arrow `RecordBatch`es with a consistent schema; no engine
//! mutates it, so concurrent analyses of the same snapshot are safe by
//! construction.

// Integer cell values are widened to f64 for profiling
#![allow(clippy::cast_precision_loss)]

use std::sync::Arc;

use arrow::{
    array::{
        Array, ArrayRef, BooleanArray, Float32Array, Float64Array, Int16Array, Int32Array,
        Int64Array, Int8Array, LargeStringArray, RecordBatch, StringArray, UInt16Array,
        UInt32Array, UInt64Array, UInt8Array,
    },
    datatypes::{DataType, Field, Schema, SchemaRef},
    util::display::array_value_to_string,
};

use crate::error::{Error, Result};

/// The engine's view of a single cell.
///
/// Every Arrow cell maps to exactly one of these variants: numeric arrays
/// become [`CellValue::Number`], string and boolean arrays become
/// [`CellValue::Text`], and nulls become [`CellValue::Missing`].
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// A numeric value, widened to f64.
    Number(f64),
    /// A textual value.
    Text(String),
    /// The missing-value marker.
    Missing,
}

impl CellValue {
    /// Check whether this cell is the missing marker.
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Get the numeric value, if this cell is numeric.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Render the cell for frequency counting.
    ///
    /// Whole numbers print without a fractional part so that a mixed column
    /// counts `3` and `3.0` as the same category. Missing cells render as
    /// `None`.
    pub fn display(&self) -> Option<String> {
        match self {
            Self::Number(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 => {
                #[allow(clippy::cast_possible_truncation)]
                let whole = *n as i64;
                Some(whole.to_string())
            }
            Self::Number(n) => Some(n.to_string()),
            Self::Text(s) => Some(s.clone()),
            Self::Missing => None,
        }
    }
}

/// An immutable tabular snapshot backed by Arrow RecordBatches.
///
/// This is the single input type every engine consumes. Row count is the
/// sum of batch rows; all batches must share one schema, so every column
/// has the same length by construction.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use arrow::array::Float64Array;
/// use perfilar::Dataset;
///
/// let dataset = Dataset::from_columns(vec![(
///     "age",
///     Arc::new(Float64Array::from(vec![Some(10.0), None])) as _,
/// )])
/// .unwrap();
/// assert_eq!(dataset.n_rows(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Dataset {
    batches: Vec<RecordBatch>,
    schema: SchemaRef,
    row_count: usize,
}

impl Dataset {
    /// Creates a dataset from a vector of RecordBatches.
    ///
    /// An empty vector produces the empty dataset (zero rows, zero
    /// columns).
    ///
    /// # Errors
    ///
    /// Returns an error if the batches have inconsistent schemas.
    pub fn new(batches: Vec<RecordBatch>) -> Result<Self> {
        let Some(first) = batches.first() else {
            return Ok(Self::empty());
        };
        let schema = first.schema();

        for (i, batch) in batches.iter().enumerate().skip(1) {
            if batch.schema() != schema {
                return Err(Error::schema_mismatch(format!(
                    "batch {} has a different schema than batch 0",
                    i
                )));
            }
        }

        let row_count = batches.iter().map(|b| b.num_rows()).sum();

        Ok(Self {
            batches,
            schema,
            row_count,
        })
    }

    /// Creates a dataset from a single RecordBatch.
    ///
    /// # Errors
    ///
    /// Infallible today; kept fallible for parity with [`Dataset::new`].
    pub fn from_batch(batch: RecordBatch) -> Result<Self> {
        Self::new(vec![batch])
    }

    /// Creates a dataset from named columns.
    ///
    /// All fields are marked nullable since the engines treat nulls as the
    /// missing marker.
    ///
    /// # Errors
    ///
    /// Returns an error if the arrays do not all have the same length; no
    /// partial dataset is produced.
    pub fn from_columns(columns: Vec<(&str, ArrayRef)>) -> Result<Self> {
        if columns.is_empty() {
            return Ok(Self::empty());
        }

        let fields: Vec<Field> = columns
            .iter()
            .map(|(name, array)| Field::new(*name, array.data_type().clone(), true))
            .collect();
        let arrays: Vec<ArrayRef> = columns.into_iter().map(|(_, array)| array).collect();

        let batch = RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays)?;
        Self::from_batch(batch)
    }

    /// The empty dataset: zero rows, zero columns.
    pub fn empty() -> Self {
        Self {
            batches: Vec::new(),
            schema: Arc::new(Schema::empty()),
            row_count: 0,
        }
    }

    /// Returns the number of rows.
    pub fn n_rows(&self) -> usize {
        self.row_count
    }

    /// Returns the number of columns.
    pub fn n_cols(&self) -> usize {
        self.schema.fields().len()
    }

    /// Returns true if the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    /// Returns the schema of the dataset.
    pub fn schema(&self) -> SchemaRef {
        Arc::clone(&self.schema)
    }

    /// Returns the column names in schema order.
    pub fn column_names(&self) -> Vec<&str> {
        self.schema
            .fields()
            .iter()
            .map(|f| f.name().as_str())
            .collect()
    }

    /// Returns the index of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.schema.index_of(name).ok()
    }

    /// Returns the underlying batches.
    pub fn batches(&self) -> &[RecordBatch] {
        &self.batches
    }

    /// Extracts one column as a flat sequence of cells, in row order
    /// across all batches.
    ///
    /// # Errors
    ///
    /// Returns an error if the index is out of bounds or a cell cannot be
    /// rendered.
    pub fn column_values(&self, index: usize) -> Result<Vec<CellValue>> {
        if index >= self.n_cols() {
            return Err(Error::ColumnIndexOutOfBounds {
                index,
                n_cols: self.n_cols(),
            });
        }

        let mut values = Vec::with_capacity(self.row_count);
        for batch in &self.batches {
            let array = batch.column(index);
            for row in 0..array.len() {
                values.push(cell_at(array, row)?);
            }
        }
        Ok(values)
    }

    /// Extracts one column by name.
    ///
    /// # Errors
    ///
    /// Returns an error if no column has the given name.
    pub fn column_values_by_name(&self, name: &str) -> Result<Vec<CellValue>> {
        let index = self
            .column_index(name)
            .ok_or_else(|| Error::column_not_found(name))?;
        self.column_values(index)
    }
}

/// Renders the cell at `row` of `array` as a [`CellValue`].
fn cell_at(array: &ArrayRef, row: usize) -> Result<CellValue> {
    // NullArray reports no validity buffer, so check the type first
    if matches!(array.data_type(), DataType::Null) || array.is_null(row) {
        return Ok(CellValue::Missing);
    }

    let any = array.as_any();
    let cell = if let Some(a) = any.downcast_ref::<Float64Array>() {
        CellValue::Number(a.value(row))
    } else if let Some(a) = any.downcast_ref::<Float32Array>() {
        CellValue::Number(f64::from(a.value(row)))
    } else if let Some(a) = any.downcast_ref::<Int64Array>() {
        CellValue::Number(a.value(row) as f64)
    } else if let Some(a) = any.downcast_ref::<Int32Array>() {
        CellValue::Number(f64::from(a.value(row)))
    } else if let Some(a) = any.downcast_ref::<Int16Array>() {
        CellValue::Number(f64::from(a.value(row)))
    } else if let Some(a) = any.downcast_ref::<Int8Array>() {
        CellValue::Number(f64::from(a.value(row)))
    } else if let Some(a) = any.downcast_ref::<UInt64Array>() {
        CellValue::Number(a.value(row) as f64)
    } else if let Some(a) = any.downcast_ref::<UInt32Array>() {
        CellValue::Number(f64::from(a.value(row)))
    } else if let Some(a) = any.downcast_ref::<UInt16Array>() {
        CellValue::Number(f64::from(a.value(row)))
    } else if let Some(a) = any.downcast_ref::<UInt8Array>() {
        CellValue::Number(f64::from(a.value(row)))
    } else if let Some(a) = any.downcast_ref::<StringArray>() {
        CellValue::Text(a.value(row).to_string())
    } else if let Some(a) = any.downcast_ref::<LargeStringArray>() {
        CellValue::Text(a.value(row).to_string())
    } else if let Some(a) = any.downcast_ref::<BooleanArray>() {
        CellValue::Text(a.value(row).to_string())
    } else {
        CellValue::Text(array_value_to_string(array, row)?)
    };
    Ok(cell)
}
