//! Labeled dataset loading, validation and train/test splitting

use crate::error::DatasetError;
use crate::models::LabeledExample;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info};

/// Default held-out fraction
pub const DEFAULT_TEST_FRACTION: f64 = 0.2;

/// Default split seed
pub const DEFAULT_SPLIT_SEED: u64 = 42;

const REQUIRED_FIELDS: [&str; 2] = ["description", "category"];

/// Load a JSON array of `{description, category}` records
///
/// Every record must carry both fields as non-empty strings; the first
/// offending record aborts the load.
pub fn load_dataset(path: impl AsRef<Path>) -> Result<Vec<LabeledExample>, DatasetError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let examples = parse_dataset(&content)?;
    info!(path = %path.display(), records = examples.len(), "Dataset loaded");
    Ok(examples)
}

/// Parse and validate dataset JSON text
pub fn parse_dataset(content: &str) -> Result<Vec<LabeledExample>, DatasetError> {
    let records: Vec<serde_json::Map<String, Value>> = serde_json::from_str(content)?;
    if records.is_empty() {
        return Err(DatasetError::Empty);
    }

    records
        .iter()
        .enumerate()
        .map(|(index, record)| validate_record(index, record))
        .collect()
}

fn validate_record(
    index: usize,
    record: &serde_json::Map<String, Value>,
) -> Result<LabeledExample, DatasetError> {
    let missing: Vec<String> = REQUIRED_FIELDS
        .iter()
        .filter(|field| !record.contains_key(**field))
        .map(|field| field.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(DatasetError::MissingFields { index, missing });
    }

    let field = |name: &str| -> Result<String, DatasetError> {
        let value = record[name].as_str().ok_or_else(|| DatasetError::InvalidField {
            index,
            field: name.to_string(),
        })?;
        if value.is_empty() {
            return Err(DatasetError::EmptyField {
                index,
                field: name.to_string(),
            });
        }
        Ok(value.to_string())
    };

    Ok(LabeledExample {
        description: field("description")?,
        category: field("category")?,
    })
}

/// Shuffle with a seeded RNG and split into `(train, test)`
///
/// The test subset holds `ceil(n * test_fraction)` records.
pub fn train_test_split(
    mut examples: Vec<LabeledExample>,
    test_fraction: f64,
    seed: u64,
) -> Result<(Vec<LabeledExample>, Vec<LabeledExample>), DatasetError> {
    if !(0.0..1.0).contains(&test_fraction) {
        return Err(DatasetError::InvalidTestFraction(test_fraction));
    }

    let total = examples.len();
    let n_test = ((total as f64) * test_fraction).ceil() as usize;
    if n_test >= total {
        return Err(DatasetError::EmptyTrainingSet { total });
    }

    let mut rng = StdRng::seed_from_u64(seed);
    examples.shuffle(&mut rng);

    let test = examples.split_off(total - n_test);

    debug!(
        train = examples.len(),
        test = test.len(),
        seed,
        "Dataset split"
    );

    Ok((examples, test))
}
