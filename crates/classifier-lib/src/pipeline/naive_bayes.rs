//! Multinomial Naive Bayes over TF-IDF rows

use super::tfidf::SparseVector;
use crate::error::ClassifierError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Additive (Laplace) smoothing
pub const DEFAULT_ALPHA: f64 = 1.0;

/// Fitted multinomial Naive Bayes model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultinomialNb {
    /// Labels in sorted order
    classes: Vec<String>,
    class_log_prior: Vec<f64>,
    /// `[class][feature]` log P(feature | class)
    feature_log_prob: Vec<Vec<f64>>,
}

impl MultinomialNb {
    pub fn fit<S: AsRef<str>>(
        features: &[SparseVector],
        labels: &[S],
        n_features: usize,
    ) -> Result<Self, ClassifierError> {
        Self::fit_with_alpha(features, labels, n_features, DEFAULT_ALPHA)
    }

    pub fn fit_with_alpha<S: AsRef<str>>(
        features: &[SparseVector],
        labels: &[S],
        n_features: usize,
        alpha: f64,
    ) -> Result<Self, ClassifierError> {
        if features.len() != labels.len() {
            return Err(ClassifierError::LengthMismatch {
                features: features.len(),
                labels: labels.len(),
            });
        }
        if features.is_empty() {
            return Err(ClassifierError::NoTrainingData);
        }

        let mut by_class: BTreeMap<&str, (usize, Vec<f64>)> = BTreeMap::new();
        for (row, label) in features.iter().zip(labels) {
            let (count, totals) = by_class
                .entry(label.as_ref())
                .or_insert_with(|| (0, vec![0.0; n_features]));
            *count += 1;
            for &(idx, weight) in row {
                let slot = totals.get_mut(idx).ok_or(ClassifierError::FeatureOutOfRange {
                    index: idx,
                    n_features,
                })?;
                *slot += weight;
            }
        }

        let n_rows = features.len() as f64;
        let mut classes = Vec::with_capacity(by_class.len());
        let mut class_log_prior = Vec::with_capacity(by_class.len());
        let mut feature_log_prob = Vec::with_capacity(by_class.len());

        for (label, (count, totals)) in by_class {
            let denom = totals.iter().sum::<f64>() + alpha * n_features as f64;
            classes.push(label.to_string());
            class_log_prior.push((count as f64 / n_rows).ln());
            feature_log_prob.push(totals.iter().map(|c| ((c + alpha) / denom).ln()).collect());
        }

        Ok(Self {
            classes,
            class_log_prior,
            feature_log_prob,
        })
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Check that per-class tables agree with each other and with `n_features`
    pub fn check_shape(&self, n_features: usize) -> Result<(), String> {
        if self.classes.is_empty() {
            return Err("model has no classes".to_string());
        }
        if self.class_log_prior.len() != self.classes.len()
            || self.feature_log_prob.len() != self.classes.len()
        {
            return Err(format!(
                "{} classes but {} priors and {} likelihood rows",
                self.classes.len(),
                self.class_log_prior.len(),
                self.feature_log_prob.len()
            ));
        }
        if let Some(row) = self.feature_log_prob.iter().find(|row| row.len() != n_features) {
            return Err(format!(
                "likelihood row has {} features, expected {}",
                row.len(),
                n_features
            ));
        }
        Ok(())
    }

    /// Joint log likelihood of `row` under each class, in class order
    pub fn joint_log_likelihood(&self, row: &SparseVector) -> Vec<f64> {
        self.class_log_prior
            .iter()
            .zip(&self.feature_log_prob)
            .map(|(prior, log_prob)| {
                prior
                    + row
                        .iter()
                        .filter_map(|&(idx, x)| log_prob.get(idx).map(|lp| x * lp))
                        .sum::<f64>()
            })
            .collect()
    }

    /// Most probable class; ties go to the first class in sorted order
    pub fn predict(&self, row: &SparseVector) -> Result<&str, ClassifierError> {
        let scores = self.joint_log_likelihood(row);
        let mut best: Option<(usize, f64)> = None;
        for (idx, score) in scores.into_iter().enumerate() {
            match best {
                Some((_, top)) if score <= top => {}
                _ => best = Some((idx, score)),
            }
        }
        best.map(|(idx, _)| self.classes[idx].as_str())
            .ok_or(ClassifierError::NoClasses)
    }
}
