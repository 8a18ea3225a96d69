use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("failed to load census table from {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("census table {path} is missing required column `{column}`")]
    Schema { path: PathBuf, column: &'static str },
    /// A subset used as a denominator (or as the input to a mode) has no rows.
    #[error("cannot compute {metric}: no rows in {subset}")]
    EmptyPartition {
        metric: &'static str,
        subset: &'static str,
    },
    #[error("invalid report config {path}: {message}")]
    Config { path: PathBuf, message: String },
}

impl ReportError {
    pub(crate) fn empty(metric: &'static str, subset: &'static str) -> Self {
        ReportError::EmptyPartition { metric, subset }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
