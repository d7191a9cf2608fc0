//! Persistence of the fitted pipeline
//!
//! The artifact is the serde_json encoding of [`Pipeline`]. It carries no
//! version tag; saving truncates whatever was at the path before.

use crate::error::ArtifactError;
use crate::pipeline::Pipeline;
use serde::de::Error as _;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Well-known artifact location shared by trainer and server
pub const DEFAULT_ARTIFACT_PATH: &str = "expense_classifier.pkl";

/// Write `pipeline` to `path`, overwriting any existing file
pub fn save(pipeline: &Pipeline, path: impl AsRef<Path>) -> Result<(), ArtifactError> {
    let path = path.as_ref();
    let io_err = |source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, pipeline).map_err(ArtifactError::Serialize)?;
    writer.flush().map_err(io_err)?;

    info!(path = %path.display(), classes = pipeline.classes().len(), "Model artifact saved");
    Ok(())
}

/// Read a pipeline previously written by [`save`]
pub fn load(path: impl AsRef<Path>) -> Result<Pipeline, ArtifactError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let pipeline: Pipeline =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| ArtifactError::Corrupt {
            path: path.to_path_buf(),
            source,
        })?;

    pipeline
        .check_shape()
        .map_err(|reason| ArtifactError::Corrupt {
            path: path.to_path_buf(),
            source: serde_json::Error::custom(reason),
        })?;

    info!(path = %path.display(), classes = pipeline.classes().len(), "Model artifact loaded");
    Ok(pipeline)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::TextClassifier;
    use tempfile::TempDir;

    fn fitted() -> Pipeline {
        Pipeline::fit(
            &["Uber ride", "Taxi ride", "Netflix subscription", "Hulu subscription"],
            &["Transport", "Transport", "Entertainment", "Entertainment"],
        )
        .unwrap()
    }

    #[test]
    fn test_reloaded_pipeline_predicts_identically() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_ARTIFACT_PATH);
        let pipeline = fitted();
        save(&pipeline, &path).unwrap();

        let restored = load(&path).unwrap();
        assert_eq!(restored.classes(), pipeline.classes());
        for text in ["Lyft ride", "Disney subscription", "", "unknown words"] {
            assert_eq!(restored.predict(text).unwrap(), pipeline.predict(text).unwrap());
        }
    }

    #[test]
    fn test_save_overwrites_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("model.pkl");
        std::fs::write(&path, "stale contents that are much longer than nothing").unwrap();

        save(&fitted(), &path).unwrap();
        assert!(load(&path).is_ok());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load(dir.path().join("absent.pkl")).unwrap_err();
        assert!(matches!(err, ArtifactError::Io { .. }));
    }

    fn write_tampered(path: &Path, tamper: impl FnOnce(&mut serde_json::Value)) {
        let mut value = serde_json::to_value(fitted()).unwrap();
        tamper(&mut value);
        std::fs::write(path, value.to_string()).unwrap();
    }

    #[test]
    fn test_load_rejects_inconsistent_shapes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tampered.pkl");

        let tampering: [fn(&mut serde_json::Value); 4] = [
            |v| {
                v["vectorizer"]["idf"].as_array_mut().unwrap().pop();
            },
            |v| {
                v["classifier"]["classes"].as_array_mut().unwrap().pop();
            },
            |v| {
                v["classifier"]["feature_log_prob"][0]
                    .as_array_mut()
                    .unwrap()
                    .pop();
            },
            |v| {
                v["vectorizer"]["vocabulary"]["ride"] = serde_json::json!(999);
            },
        ];

        for tamper in tampering {
            write_tampered(&path, tamper);
            let err = load(&path).unwrap_err();
            assert!(matches!(err, ArtifactError::Corrupt { .. }), "got {err}");
        }
    }

    #[test]
    fn test_load_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("corrupt.pkl");
        std::fs::write(&path, b"\x80\x04not a model").unwrap();
        let err = load(&path).unwrap_err();
        assert!(matches!(err, ArtifactError::Corrupt { .. }));
    }
}
