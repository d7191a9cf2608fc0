//! One-off prediction from a saved artifact

use anyhow::{Context, Result};
use classifier_lib::{artifact, PredictResponse, TextClassifier};
use std::path::Path;

use crate::output::{print_info, print_json, OutputFormat};

/// Load the artifact at `model` and print the category of `description`
pub fn predict(model: &Path, description: &str, format: OutputFormat) -> Result<()> {
    if description.is_empty() {
        anyhow::bail!("Missing description");
    }

    let pipeline = artifact::load(model)
        .with_context(|| format!("Failed to load model artifact {}", model.display()))?;
    let category = pipeline.predict(description)?;

    match format {
        OutputFormat::Json => print_json(&PredictResponse { category }),
        OutputFormat::Table | OutputFormat::Text => {
            print_info(&format!("Category: {}", category));
        }
    }

    Ok(())
}
