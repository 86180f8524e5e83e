use std::path::PathBuf;

use thiserror::Error;

use crate::allan::FitKind;
use crate::types::AxisId;

/// Errors raised by the loader, the extractor and the report writers
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Failed to read {path}: {source}")]
    InputRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Input parse error on line {line}: {reason}")]
    InputParse { line: usize, reason: String },

    #[error("Skip factor must be at least 1 (got {0})")]
    InvalidSkip(usize),

    #[error("Breakpoint period {period} not found in the period column")]
    BreakpointNotFound { period: f64 },

    #[error("{fit} regression failed for {axis}: {source}")]
    RegressionFailure {
        axis: AxisId,
        fit: FitKind,
        #[source]
        source: FitError,
    },

    #[error("Failed to write {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize summary: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Why a power-law regression could not produce a line
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FitError {
    #[error("segment has {distinct} distinct period value(s), need at least 2")]
    TooFewPoints { distinct: usize },

    #[error("non-positive value at index {index} (period={period}, deviation={deviation})")]
    NonPositive {
        index: usize,
        period: f64,
        deviation: f64,
    },

    #[error("period and deviation lengths differ ({periods} vs {deviations})")]
    LengthMismatch { periods: usize, deviations: usize },

    #[error("regression produced a non-finite line (slope={slope}, intercept={intercept})")]
    NonFinite { slope: f64, intercept: f64 },
}

/// Rendering failure for a diagnostic plot. Never fatal to the run.
#[derive(Error, Debug)]
#[error("Failed to render {path}: {message}")]
pub struct PlotError {
    pub path: PathBuf,
    pub message: String,
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;
