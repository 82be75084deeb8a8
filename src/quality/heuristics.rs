//! Heuristic evaluation and the composite quality score.

// Shares are ratios of row counts
#![allow(clippy::cast_precision_loss)]

use serde::{Deserialize, Serialize};

use crate::{
    dataset::{CellValue, Dataset},
    error::{Error, Result},
    missing::MissingTable,
    profile::{DatasetSummary, DtypeKind},
};

/// Datasets with fewer rows than this trigger `too_few_rows`.
pub const MIN_ROWS: usize = 100;

/// Datasets with more columns than this trigger `too_many_columns`.
pub const MAX_COLUMNS: usize = 100;

/// Columns with a missing share above this trigger `too_many_missing`.
pub const MAX_MISSING_SHARE: f64 = 0.5;

/// Score deduction per triggered boolean heuristic. Six heuristics at
/// 0.15 each deduct at most 0.9, so no single heuristic can push the
/// score below zero, and equal penalties keep the score monotone in the
/// set of triggered heuristics.
const HEURISTIC_PENALTY: f64 = 0.15;

/// What the heuristics engine may read during evaluation.
///
/// Raw-dependent heuristics (the zero-share scan) run only under
/// [`DataAccess::Full`]; under [`DataAccess::SummaryOnly`] they degrade
/// to their safe defaults instead of failing.
#[derive(Debug, Clone, Copy)]
pub enum DataAccess<'a> {
    /// The raw dataset is available alongside the summary.
    Full(&'a Dataset),
    /// Only the summary and missing table are available.
    SummaryOnly,
}

/// Configurable thresholds for the quality heuristics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityConfig {
    /// Categorical columns with more distinct values than this are
    /// flagged (default: 50).
    pub high_cardinality_threshold: usize,
    /// Numeric columns whose exact-zero share exceeds this are flagged
    /// (default: 0.5).
    pub zero_share_threshold: f64,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            high_cardinality_threshold: 50,
            zero_share_threshold: 0.5,
        }
    }
}

impl QualityConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] when `high_cardinality_threshold`
    /// is zero or `zero_share_threshold` is outside `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        if self.high_cardinality_threshold < 1 {
            return Err(Error::invalid_config(
                "high_cardinality_threshold must be at least 1",
            ));
        }
        if !(0.0..=1.0).contains(&self.zero_share_threshold) {
            return Err(Error::invalid_config(
                "zero_share_threshold must be within [0, 1]",
            ));
        }
        Ok(())
    }
}

/// Result of one heuristic evaluation: every flag as a typed field, plus
/// the thresholds used, for report transparency. Built fresh per call and
/// never mutated afterward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityFlags {
    /// `n_rows < 100`.
    pub too_few_rows: bool,
    /// `n_cols > 100`.
    pub too_many_columns: bool,
    /// Maximum missing share across all columns.
    pub max_missing_share: f64,
    /// `max_missing_share > 0.5`.
    pub too_many_missing: bool,
    /// Columns with exactly one distinct non-missing value.
    pub constant_columns: Vec<String>,
    /// Whether `constant_columns` is non-empty.
    pub has_constant_columns: bool,
    /// Categorical columns with more distinct values than the threshold.
    pub high_cardinality_columns: Vec<String>,
    /// Whether `high_cardinality_columns` is non-empty.
    pub has_high_cardinality_categoricals: bool,
    /// Numeric columns whose exact-zero share exceeds the threshold.
    pub zero_heavy_columns: Vec<String>,
    /// Maximum exact-zero share across numeric columns.
    pub max_zero_share: f64,
    /// Whether `zero_heavy_columns` is non-empty.
    pub has_many_zero_values: bool,
    /// The cardinality threshold the evaluation used.
    pub high_cardinality_threshold: usize,
    /// The zero-share threshold the evaluation used.
    pub zero_share_threshold: f64,
    /// Composite score in `[0.0, 1.0]`.
    pub quality_score: f64,
}

impl QualityFlags {
    /// Number of triggered boolean heuristics.
    pub fn triggered_count(&self) -> usize {
        [
            self.too_few_rows,
            self.too_many_columns,
            self.too_many_missing,
            self.has_constant_columns,
            self.has_high_cardinality_categoricals,
            self.has_many_zero_values,
        ]
        .iter()
        .filter(|&&flag| flag)
        .count()
    }
}

/// Quality heuristics evaluator.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use arrow::array::Float64Array;
/// use perfilar::{missing_table, summarize, DataAccess, Dataset, QualityEvaluator};
///
/// let dataset = Dataset::from_columns(vec![(
///     "x",
///     Arc::new(Float64Array::from(vec![Some(1.0), Some(2.0)])) as _,
/// )])
/// .unwrap();
/// let summary = summarize(&dataset).unwrap();
/// let missing = missing_table(&dataset).unwrap();
///
/// let flags = QualityEvaluator::new().evaluate(&summary, &missing, DataAccess::Full(&dataset));
/// assert!(flags.too_few_rows);
/// assert!((0.0..=1.0).contains(&flags.quality_score));
/// ```
#[derive(Debug, Clone, Default)]
pub struct QualityEvaluator {
    config: QualityConfig,
}

impl QualityEvaluator {
    /// Create an evaluator with default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an evaluator from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] when the configuration is
    /// invalid; evaluation itself assumes a valid configuration.
    pub fn from_config(config: QualityConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Set the high-cardinality threshold.
    #[must_use]
    pub fn with_high_cardinality_threshold(mut self, threshold: usize) -> Self {
        self.config.high_cardinality_threshold = threshold;
        self
    }

    /// Set the zero-share threshold.
    #[must_use]
    pub fn with_zero_share_threshold(mut self, threshold: f64) -> Self {
        self.config.zero_share_threshold = threshold;
        self
    }

    /// Evaluate every heuristic and compute the composite score.
    ///
    /// All heuristics run unconditionally and independently; a dataset
    /// with zero rows short-circuits every share-based heuristic to its
    /// defined zero/false value instead of dividing by zero.
    pub fn evaluate(
        &self,
        summary: &DatasetSummary,
        missing: &MissingTable,
        data: DataAccess<'_>,
    ) -> QualityFlags {
        let too_few_rows = summary.n_rows < MIN_ROWS;
        let too_many_columns = summary.n_cols > MAX_COLUMNS;

        let max_missing_share = missing.max_share();
        let too_many_missing = max_missing_share > MAX_MISSING_SHARE;

        // n_unique == 1 implies at least one non-missing value
        let constant_columns: Vec<String> = summary
            .iter()
            .filter(|p| p.is_constant())
            .map(|p| p.name.clone())
            .collect();
        let has_constant_columns = !constant_columns.is_empty();

        let high_cardinality_columns: Vec<String> = summary
            .iter()
            .filter(|p| {
                p.dtype == DtypeKind::Categorical
                    && p.n_unique > self.config.high_cardinality_threshold
            })
            .map(|p| p.name.clone())
            .collect();
        let has_high_cardinality_categoricals = !high_cardinality_columns.is_empty();

        let (zero_heavy_columns, max_zero_share) = match data {
            DataAccess::Full(dataset) => {
                let shares = zero_shares(dataset, summary);
                let max = shares.iter().map(|(_, s)| *s).fold(0.0, f64::max);
                let heavy = shares
                    .into_iter()
                    .filter(|(_, share)| *share > self.config.zero_share_threshold)
                    .map(|(name, _)| name)
                    .collect();
                (heavy, max)
            }
            DataAccess::SummaryOnly => (Vec::new(), 0.0),
        };
        let has_many_zero_values = !zero_heavy_columns.is_empty();

        let triggered = [
            too_few_rows,
            too_many_columns,
            too_many_missing,
            has_constant_columns,
            has_high_cardinality_categoricals,
            has_many_zero_values,
        ]
        .iter()
        .filter(|&&flag| flag)
        .count();
        let quality_score = (1.0 - triggered as f64 * HEURISTIC_PENALTY).clamp(0.0, 1.0);

        QualityFlags {
            too_few_rows,
            too_many_columns,
            max_missing_share,
            too_many_missing,
            constant_columns,
            has_constant_columns,
            high_cardinality_columns,
            has_high_cardinality_categoricals,
            zero_heavy_columns,
            max_zero_share,
            has_many_zero_values,
            high_cardinality_threshold: self.config.high_cardinality_threshold,
            zero_share_threshold: self.config.zero_share_threshold,
            quality_score,
        }
    }
}

/// Exact-zero share per numeric column, in summary order.
///
/// A column whose cells cannot be extracted degrades to "no entry" so the
/// remaining heuristics keep their results.
fn zero_shares(dataset: &Dataset, summary: &DatasetSummary) -> Vec<(String, f64)> {
    let n_rows = dataset.n_rows();
    if n_rows == 0 {
        return Vec::new();
    }

    let mut shares = Vec::new();
    for profile in summary.iter().filter(|p| p.dtype == DtypeKind::Numeric) {
        let Ok(values) = dataset.column_values_by_name(&profile.name) else {
            continue;
        };
        let zeros = values
            .iter()
            .filter(|v| matches!(v, CellValue::Number(n) if *n == 0.0))
            .count();
        shares.push((profile.name.clone(), zeros as f64 / n_rows as f64));
    }
    shares
}
