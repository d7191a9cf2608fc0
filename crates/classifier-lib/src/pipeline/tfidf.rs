//! TF-IDF vectorization
//!
//! Vocabulary and idf weights are learned once in [`TfidfVectorizer::fit`]
//! and frozen afterwards. Term indices follow lexicographic order of the
//! terms, so fitting the same corpus always yields the same feature layout.

use crate::error::ClassifierError;
use crate::text::tokenize;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Sparse feature row: `(term index, weight)` pairs sorted by index
pub type SparseVector = Vec<(usize, f64)>;

/// TF-IDF vectorizer with smoothed idf and L2-normalized rows
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Learn vocabulary and idf from training texts
    pub fn fit<S: AsRef<str>>(texts: &[S]) -> Result<Self, ClassifierError> {
        let documents: Vec<Vec<String>> = texts.iter().map(|t| tokenize(t.as_ref())).collect();

        let terms: BTreeSet<&str> = documents
            .iter()
            .flat_map(|doc| doc.iter().map(String::as_str))
            .collect();
        if terms.is_empty() {
            return Err(ClassifierError::EmptyVocabulary);
        }

        let vocabulary: BTreeMap<String, usize> = terms
            .into_iter()
            .enumerate()
            .map(|(idx, term)| (term.to_string(), idx))
            .collect();

        let mut doc_freq = vec![0usize; vocabulary.len()];
        for doc in &documents {
            let unique: BTreeSet<usize> = doc
                .iter()
                .filter_map(|t| vocabulary.get(t).copied())
                .collect();
            for idx in unique {
                doc_freq[idx] += 1;
            }
        }

        let n_docs = documents.len() as f64;
        let idf = doc_freq
            .into_iter()
            .map(|df| ((1.0 + n_docs) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        tracing::debug!(
            n_docs = documents.len(),
            n_terms = vocabulary.len(),
            "Fitted TF-IDF vocabulary"
        );

        Ok(Self { vocabulary, idf })
    }

    /// Number of features (vocabulary size)
    pub fn n_features(&self) -> usize {
        self.idf.len()
    }

    /// Index of `term` in the feature layout
    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    /// Learned idf weight per feature index
    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    /// Convert a text into an L2-normalized TF-IDF row
    ///
    /// Unknown terms are ignored; a text with no known terms yields an
    /// empty row.
    pub fn transform(&self, text: &str) -> SparseVector {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for token in tokenize(text) {
            if let Some(&idx) = self.vocabulary.get(&token) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut row: SparseVector = counts
            .into_iter()
            .map(|(idx, tf)| (idx, tf * self.idf[idx]))
            .collect();

        let norm = row.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, w) in row.iter_mut() {
                *w /= norm;
            }
        }
        row
    }

    /// Check that every vocabulary index has an idf weight
    pub fn check_shape(&self) -> Result<(), String> {
        if self.vocabulary.len() != self.idf.len() {
            return Err(format!(
                "vocabulary has {} terms but idf has {} weights",
                self.vocabulary.len(),
                self.idf.len()
            ));
        }
        let n_features = self.idf.len();
        if let Some((term, idx)) = self.vocabulary.iter().find(|(_, idx)| **idx >= n_features) {
            return Err(format!("term '{}' has out-of-range index {}", term, idx));
        }
        Ok(())
    }

    pub fn transform_batch<S: AsRef<str>>(&self, texts: &[S]) -> Vec<SparseVector> {
        texts.iter().map(|t| self.transform(t.as_ref())).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_is_sorted() {
        let v = TfidfVectorizer::fit(&["uber ride", "netflix subscription"]).unwrap();
        assert_eq!(v.n_features(), 4);
        assert_eq!(v.term_index("netflix"), Some(0));
        assert_eq!(v.term_index("ride"), Some(1));
        assert_eq!(v.term_index("subscription"), Some(2));
        assert_eq!(v.term_index("uber"), Some(3));
    }

    #[test]
    fn test_smoothed_idf() {
        let v = TfidfVectorizer::fit(&["btc moon", "btc crash", "eth moon"]).unwrap();
        let btc = v.idf()[v.term_index("btc").unwrap()];
        let eth = v.idf()[v.term_index("eth").unwrap()];
        assert!((btc - ((4.0f64 / 3.0).ln() + 1.0)).abs() < 1e-12);
        assert!((eth - (2.0f64.ln() + 1.0)).abs() < 1e-12);
        assert!(eth > btc);
    }

    #[test]
    fn test_transform_is_l2_normalized() {
        let v = TfidfVectorizer::fit(&["coffee beans", "coffee shop", "grocery store"]).unwrap();
        let row = v.transform("Coffee coffee beans");
        let norm: f64 = row.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-9);
        assert!(row.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn test_transform_unknown_terms_is_empty() {
        let v = TfidfVectorizer::fit(&["uber ride"]).unwrap();
        assert!(v.transform("completely unseen words").is_empty());
        assert!(v.transform("").is_empty());
    }

    #[test]
    fn test_fit_empty_vocabulary() {
        let empty: [&str; 0] = [];
        assert!(matches!(TfidfVectorizer::fit(&empty), Err(ClassifierError::EmptyVocabulary)));
        assert!(matches!(
            TfidfVectorizer::fit(&["the of", "a"]),
            Err(ClassifierError::EmptyVocabulary)
        ));
    }
}
