use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid json in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// The attempt budget ran out without a feasible draw. Retryable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("could not find valid categories after {attempts} attempts ({vocabulary} labels available)")]
pub struct GenerationFailed {
    pub attempts: usize,
    pub vocabulary: usize,
}

/// Why a proposed rows/cols split is not a playable puzzle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SplitError {
    #[error("Category \"{0}\" not found in current vocabulary")]
    UnknownCategory(String),
    #[error("Category \"{0}\" is used more than once")]
    DuplicateCategory(String),
    #[error("No entity exists for cell ({row}, {col})")]
    EmptyCell { row: String, col: String },
}
