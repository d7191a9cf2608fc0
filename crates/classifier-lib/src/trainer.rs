//! Offline training: load, split, fit, evaluate, persist

use crate::artifact::{self, DEFAULT_ARTIFACT_PATH};
use crate::dataset::{load_dataset, train_test_split, DEFAULT_SPLIT_SEED, DEFAULT_TEST_FRACTION};
use crate::error::Result;
use crate::metrics::ClassificationReport;
use crate::pipeline::Pipeline;
use std::path::PathBuf;
use tracing::{info, warn};

/// Default dataset location
pub const DEFAULT_DATASET_PATH: &str = "training_data.json";

/// Configuration for a training run
#[derive(Debug, Clone)]
pub struct TrainConfig {
    /// JSON array of labeled examples
    pub dataset_path: PathBuf,
    /// Where the fitted pipeline is written
    pub artifact_path: PathBuf,
    /// Fraction of records held out for evaluation
    pub test_fraction: f64,
    /// Seed for the shuffle before splitting
    pub seed: u64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from(DEFAULT_DATASET_PATH),
            artifact_path: PathBuf::from(DEFAULT_ARTIFACT_PATH),
            test_fraction: DEFAULT_TEST_FRACTION,
            seed: DEFAULT_SPLIT_SEED,
        }
    }
}

/// Result of a completed training run
#[derive(Debug, Clone)]
pub struct TrainOutcome {
    pub pipeline: Pipeline,
    pub report: ClassificationReport,
    pub train_size: usize,
    pub test_size: usize,
    pub artifact_path: PathBuf,
}

/// Run the full training routine and persist the artifact
///
/// The evaluation report is informational only: the artifact is written
/// whatever the scores are.
pub fn train(config: &TrainConfig) -> Result<TrainOutcome> {
    info!(dataset = %config.dataset_path.display(), "Starting training run");

    let examples = load_dataset(&config.dataset_path)?;
    let (train_set, test_set) = train_test_split(examples, config.test_fraction, config.seed)?;

    let texts: Vec<&str> = train_set.iter().map(|e| e.description.as_str()).collect();
    let labels: Vec<&str> = train_set.iter().map(|e| e.category.as_str()).collect();
    let pipeline = Pipeline::fit(&texts, &labels)?;

    let report = evaluate(&pipeline, &test_set)?;
    info!(
        accuracy = report.accuracy,
        test_size = test_set.len(),
        "Evaluation completed"
    );
    if test_set.is_empty() {
        warn!("No held-out records; evaluation report is empty");
    }

    artifact::save(&pipeline, &config.artifact_path)?;

    Ok(TrainOutcome {
        pipeline,
        report,
        train_size: train_set.len(),
        test_size: test_set.len(),
        artifact_path: config.artifact_path.clone(),
    })
}

/// Score a fitted pipeline against labeled examples without refitting
pub fn evaluate(
    pipeline: &Pipeline,
    examples: &[crate::models::LabeledExample],
) -> Result<ClassificationReport> {
    let y_true: Vec<&str> = examples.iter().map(|e| e.category.as_str()).collect();
    let y_pred = examples
        .iter()
        .map(|e| pipeline.predict_one(&e.description))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(ClassificationReport::compute(&y_true, &y_pred))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DatasetError, Error};
    use crate::pipeline::TextClassifier;
    use serde_json::json;
    use tempfile::TempDir;

    fn write_dataset(dir: &TempDir) -> PathBuf {
        let mut records = Vec::new();
        for (desc, cat) in [
            ("Uber ride to airport", "Transport"),
            ("Lyft ride home", "Transport"),
            ("Taxi ride to office", "Transport"),
            ("Bus ticket downtown", "Transport"),
            ("Train ticket to city", "Transport"),
            ("Grocery shopping at Walmart", "Groceries"),
            ("Groceries from Costco", "Groceries"),
            ("Fresh vegetables grocery", "Groceries"),
            ("Walmart grocery run", "Groceries"),
            ("Supermarket groceries", "Groceries"),
            ("Netflix subscription", "Entertainment"),
            ("Spotify subscription", "Entertainment"),
            ("Movie tickets cinema", "Entertainment"),
            ("Hulu subscription", "Entertainment"),
            ("Concert tickets", "Entertainment"),
        ] {
            records.push(json!({ "description": desc, "category": cat }));
        }
        let path = dir.path().join("training_data.json");
        std::fs::write(&path, serde_json::to_string(&records).unwrap()).unwrap();
        path
    }

    fn config(dir: &TempDir) -> TrainConfig {
        TrainConfig {
            dataset_path: write_dataset(dir),
            artifact_path: dir.path().join(DEFAULT_ARTIFACT_PATH),
            ..TrainConfig::default()
        }
    }

    #[test]
    fn test_train_writes_artifact() {
        let dir = TempDir::new().unwrap();
        let config = config(&dir);
        let outcome = train(&config).unwrap();

        assert_eq!(outcome.train_size, 12);
        assert_eq!(outcome.test_size, 3);
        assert_eq!(outcome.report.total_support, 3);
        assert!(config.artifact_path.exists());

        let restored = artifact::load(&config.artifact_path).unwrap();
        assert_eq!(restored.classes(), outcome.pipeline.classes());
    }

    #[test]
    fn test_predictions_use_training_labels() {
        let dir = TempDir::new().unwrap();
        let outcome = train(&config(&dir)).unwrap();
        for text in ["Lyft ride downtown", "random words", "", "Netflix"] {
            let label = outcome.pipeline.predict(text).unwrap();
            assert!(outcome.pipeline.classes().contains(&label));
        }
    }

    #[test]
    fn test_training_is_reproducible() {
        let dir = TempDir::new().unwrap();
        let config = config(&dir);
        let first = train(&config).unwrap();
        let second = train(&config).unwrap();
        assert_eq!(first.report, second.report);
    }

    #[test]
    fn test_missing_fields_abort_before_writing() {
        let dir = TempDir::new().unwrap();
        let dataset = dir.path().join("bad.json");
        std::fs::write(&dataset, r#"[{"description": "Uber ride"}]"#).unwrap();
        let config = TrainConfig {
            dataset_path: dataset,
            artifact_path: dir.path().join("model.pkl"),
            ..TrainConfig::default()
        };

        let err = train(&config).unwrap_err();
        assert!(matches!(err, Error::Dataset(DatasetError::MissingFields { .. })));
        assert!(!config.artifact_path.exists());
    }
}
