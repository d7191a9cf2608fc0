//! Fit, evaluate and persist the classifier

use anyhow::{Context, Result};
use classifier_lib::{train, TrainConfig, TrainOutcome};
use serde::Serialize;

use crate::output::{print_json, print_report, print_success, print_warning, OutputFormat};

/// JSON summary of a training run
#[derive(Serialize)]
struct TrainSummary<'a> {
    train_size: usize,
    test_size: usize,
    classes: &'a [String],
    artifact_path: String,
    report: &'a classifier_lib::ClassificationReport,
}

impl<'a> TrainSummary<'a> {
    fn new(outcome: &'a TrainOutcome) -> Self {
        Self {
            train_size: outcome.train_size,
            test_size: outcome.test_size,
            classes: outcome.pipeline.classes(),
            artifact_path: outcome.artifact_path.display().to_string(),
            report: &outcome.report,
        }
    }
}

/// Run a training job and report the evaluation
pub fn run_training(config: &TrainConfig, format: OutputFormat) -> Result<()> {
    let outcome = train(config).with_context(|| {
        format!("Training on {} failed", config.dataset_path.display())
    })?;

    match format {
        OutputFormat::Json => print_json(&TrainSummary::new(&outcome)),
        OutputFormat::Table | OutputFormat::Text => {
            println!(
                "Trained on {} samples, evaluated on {} ({} classes)",
                outcome.train_size,
                outcome.test_size,
                outcome.pipeline.classes().len()
            );
            if outcome.test_size == 0 {
                print_warning("No held-out samples; report is empty");
            }
            print_report(&outcome.report, format);
            print_success(&format!(
                "Model saved to '{}'",
                outcome.artifact_path.display()
            ));
        }
    }

    Ok(())
}
