//! Two-stage text classification pipeline: TF-IDF then Naive Bayes

mod naive_bayes;
mod tfidf;

pub use naive_bayes::{MultinomialNb, DEFAULT_ALPHA};
pub use tfidf::{SparseVector, TfidfVectorizer};

use crate::error::ClassifierError;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info};

/// Trait for text classification implementations
pub trait TextClassifier: Send + Sync {
    /// Predict one label per input text
    fn predict_batch(&self, texts: &[&str]) -> Result<Vec<String>>;

    /// Predict the label of a single text
    fn predict(&self, text: &str) -> Result<String> {
        self.predict_batch(&[text])?
            .into_iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("Classifier returned no prediction"))
    }
}

/// Fitted vectorizer and classifier, used as one unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pipeline {
    vectorizer: TfidfVectorizer,
    classifier: MultinomialNb,
}

impl Pipeline {
    /// Fit the vectorizer on `texts`, then the classifier on the vectorized texts
    pub fn fit<S: AsRef<str>, L: AsRef<str>>(
        texts: &[S],
        labels: &[L],
    ) -> Result<Self, ClassifierError> {
        if texts.len() != labels.len() {
            return Err(ClassifierError::LengthMismatch {
                features: texts.len(),
                labels: labels.len(),
            });
        }

        let start = Instant::now();
        let vectorizer = TfidfVectorizer::fit(texts)?;
        let features = vectorizer.transform_batch(texts);
        let classifier = MultinomialNb::fit(&features, labels, vectorizer.n_features())?;

        info!(
            samples = texts.len(),
            features = vectorizer.n_features(),
            classes = classifier.classes().len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Pipeline fitted"
        );

        Ok(Self {
            vectorizer,
            classifier,
        })
    }

    /// Labels this pipeline can predict
    pub fn classes(&self) -> &[String] {
        self.classifier.classes()
    }

    /// Verify that the vectorizer and classifier describe the same feature layout
    pub fn check_shape(&self) -> Result<(), String> {
        self.vectorizer.check_shape()?;
        self.classifier.check_shape(self.vectorizer.n_features())
    }

    pub fn vectorizer(&self) -> &TfidfVectorizer {
        &self.vectorizer
    }

    /// Predict a label without going through the trait's `anyhow` surface
    pub fn predict_one(&self, text: &str) -> Result<&str, ClassifierError> {
        let row = self.vectorizer.transform(text);
        self.classifier.predict(&row)
    }
}

impl TextClassifier for Pipeline {
    fn predict_batch(&self, texts: &[&str]) -> Result<Vec<String>> {
        let labels = texts
            .iter()
            .map(|text| self.predict_one(text).map(str::to_string))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(batch = texts.len(), "Inference completed");
        Ok(labels)
    }
}
