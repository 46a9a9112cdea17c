//! Typed failures of the core pipeline stages.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal stage failures. The binary aborts the run on any of these.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("cannot read input file '{}': {reason}", .path.display())]
    InputAccess { path: PathBuf, reason: String },

    #[error("input schema: {0}")]
    Schema(String),

    #[error("no annual observations left for '{region}' after cleaning; check the data and the filter settings")]
    EmptyResult { region: String },

    #[error("numeric failure: {0}")]
    Numeric(String),
}

/// Conversion failure of a single cell or period label. Local: the row is dropped.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ParseError {
    #[error("not a number: {0:?}")]
    InvalidNumber(String),

    #[error("negative earnings value: {0}")]
    Negative(f64),

    #[error("no 4-digit year in period label {0:?}")]
    InvalidYear(String),
}
