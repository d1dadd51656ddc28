//! Error types for feature selection.

use thiserror::Error;

/// Top-level error type for loading data, scoring subsets and running searches.
#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Feature {feature} requested but instances only have {available} features")]
    FeatureOutOfRange { feature: usize, available: usize },

    #[error("Feature index 0 is invalid; feature indices start at 1")]
    ZeroFeatureIndex,

    #[error("Cannot search over a dataset with no features")]
    NoFeatures,

    #[error("Invalid algorithm choice: {0:?} (expected 1/forward or 2/backward)")]
    InvalidAlgorithm(String),

    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl SelectionError {
    pub fn dataset(msg: impl Into<String>) -> Self {
        Self::Dataset(msg.into())
    }

    pub fn parse(line: usize, msg: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: msg.into(),
        }
    }
}

impl From<figment::Error> for SelectionError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

pub type Result<T> = std::result::Result<T, SelectionError>;
