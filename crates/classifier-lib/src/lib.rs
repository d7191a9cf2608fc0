//! Expense description classifier library
//!
//! This crate provides the core functionality for:
//! - Loading and validating labeled expense datasets
//! - Fitting a TF-IDF + multinomial Naive Bayes pipeline
//! - Evaluating the pipeline on a held-out split
//! - Persisting and restoring the fitted pipeline

pub mod artifact;
pub mod dataset;
pub mod error;
pub mod metrics;
pub mod models;
pub mod pipeline;
pub mod text;
pub mod trainer;

pub use artifact::DEFAULT_ARTIFACT_PATH;
pub use error::{ArtifactError, ClassifierError, DatasetError, Error};
pub use metrics::{ClassMetrics, ClassificationReport};
pub use models::*;
pub use pipeline::{Pipeline, TextClassifier};
pub use trainer::{train, TrainConfig, TrainOutcome};
