//! One-call analysis over a dataset snapshot.
//!
//! Composes the summarizer, missingness analyzer, correlation engine,
//! categorical frequency engine, and quality heuristics into the single
//! bundle a report or plotting collaborator reads.

use serde::Serialize;

use crate::{
    categories::{top_categories, TopCategoriesReport},
    correlation::{correlation_matrix, CorrelationMatrix},
    dataset::Dataset,
    error::{Error, Result},
    missing::{missing_table, MissingTable},
    profile::{summarize, DatasetSummary},
    quality::{DataAccess, QualityConfig, QualityEvaluator, QualityFlags},
};

/// Options for a full analysis run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisOptions {
    /// Entries kept per categorical frequency table (default: 5, must be
    /// ≥ 1).
    pub top_k: usize,
    /// Cap on categorical columns processed for frequency tables
    /// (default: 20).
    pub max_columns: usize,
    /// Missing-share threshold a report collaborator uses to highlight
    /// problematic columns (default: 0.1, must be in `[0, 1]`). Never
    /// part of the scoring formula.
    pub min_missing_share: f64,
    /// Thresholds for the quality heuristics.
    pub quality: QualityConfig,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            top_k: 5,
            max_columns: 20,
            min_missing_share: 0.1,
            quality: QualityConfig::default(),
        }
    }
}

impl AnalysisOptions {
    /// Validate the options.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] when `top_k < 1`,
    /// `min_missing_share` lies outside `[0, 1]`, or the quality
    /// configuration is invalid.
    pub fn validate(&self) -> Result<()> {
        if self.top_k < 1 {
            return Err(Error::invalid_config("top_k must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.min_missing_share) {
            return Err(Error::invalid_config(
                "min_missing_share must be within [0, 1]",
            ));
        }
        self.quality.validate()
    }
}

/// The complete engine output for one dataset snapshot.
///
/// Consumers must tolerate an empty correlation matrix and an empty
/// frequency report as valid, meaningful results.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    /// Whole-dataset summary with per-column profiles.
    pub summary: DatasetSummary,
    /// Per-column missing-value table.
    pub missing: MissingTable,
    /// Pairwise correlation among numeric columns.
    pub correlation: CorrelationMatrix,
    /// Top-K frequency tables for categorical columns.
    pub top_categories: TopCategoriesReport,
    /// Quality heuristics and the composite score.
    pub flags: QualityFlags,
    /// The `min_missing_share` the run was configured with.
    pub min_missing_share: f64,
}

impl Analysis {
    /// Columns whose missing share exceeds the configured
    /// `min_missing_share`, in schema order.
    pub fn problematic_missing_columns(&self) -> Vec<&str> {
        self.missing.columns_above(self.min_missing_share)
    }
}

/// Runs every engine over one dataset snapshot.
///
/// # Errors
///
/// Returns an error if the options are invalid or the dataset is
/// malformed; degenerate datasets (empty, no numeric columns, all-missing
/// columns) analyze cleanly.
pub fn analyze(dataset: &Dataset, options: &AnalysisOptions) -> Result<Analysis> {
    options.validate()?;

    let summary = summarize(dataset)?;
    let missing = missing_table(dataset)?;
    let correlation = correlation_matrix(dataset)?;
    let top_categories = top_categories(dataset, options.max_columns, options.top_k)?;
    let flags = QualityEvaluator::from_config(options.quality.clone())?.evaluate(
        &summary,
        &missing,
        DataAccess::Full(dataset),
    );

    Ok(Analysis {
        summary,
        missing,
        correlation,
        top_categories,
        flags,
        min_missing_share: options.min_missing_share,
    })
}
