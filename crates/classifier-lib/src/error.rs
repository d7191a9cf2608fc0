//! Error types for dataset loading, model fitting and artifact handling

use std::path::PathBuf;
use thiserror::Error;

/// Problems with the labeled training dataset
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("dataset must be a JSON array of objects: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("dataset contains no records")]
    Empty,

    #[error(
        "record {index} must contain 'description' and 'category' fields (missing: {fields})",
        fields = .missing.join(", ")
    )]
    MissingFields { index: usize, missing: Vec<String> },

    #[error("record {index}: field '{field}' must be a string")]
    InvalidField { index: usize, field: String },

    #[error("record {index}: field '{field}' is empty")]
    EmptyField { index: usize, field: String },

    #[error("test fraction {0} must be between 0 and 1")]
    InvalidTestFraction(f64),

    #[error("split of {total} records leaves no training data")]
    EmptyTrainingSet { total: usize },
}

/// Problems fitting or running the classification pipeline
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("no usable terms in training texts (all empty or stop words)")]
    EmptyVocabulary,

    #[error("cannot fit on zero training rows")]
    NoTrainingData,

    #[error("got {features} feature rows but {labels} labels")]
    LengthMismatch { features: usize, labels: usize },

    #[error("feature index {index} out of range for {n_features} features")]
    FeatureOutOfRange { index: usize, n_features: usize },

    #[error("model has no classes")]
    NoClasses,
}

/// Problems persisting or restoring the model artifact
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to access model artifact {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("model artifact {path:?} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize model: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Umbrella error for the training routine
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Classifier(#[from] ClassifierError),

    #[error(transparent)]
    Artifact(#[from] ArtifactError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
