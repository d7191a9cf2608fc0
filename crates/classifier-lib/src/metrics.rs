//! Evaluation report for a held-out subset
//!
//! Per-label precision, recall, F1 and support plus accuracy, macro and
//! weighted averages. Zero denominators report 0.0.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Scores for one label or one average row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassMetrics {
    pub label: String,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    pub support: usize,
}

/// Classification report over true and predicted labels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationReport {
    pub classes: Vec<ClassMetrics>,
    pub accuracy: f64,
    pub macro_avg: ClassMetrics,
    pub weighted_avg: ClassMetrics,
    pub total_support: usize,
}

fn ratio(num: usize, denom: usize) -> f64 {
    if denom == 0 {
        0.0
    } else {
        num as f64 / denom as f64
    }
}

fn f1(precision: f64, recall: f64) -> f64 {
    if precision + recall == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    }
}

impl ClassificationReport {
    /// Compute the report; labels are the sorted union of both inputs
    pub fn compute<T: AsRef<str>, P: AsRef<str>>(y_true: &[T], y_pred: &[P]) -> Self {
        let pairs: Vec<(&str, &str)> = y_true
            .iter()
            .map(AsRef::as_ref)
            .zip(y_pred.iter().map(AsRef::as_ref))
            .collect();

        let labels: BTreeSet<&str> = pairs.iter().flat_map(|&(t, p)| [t, p]).collect();

        let classes: Vec<ClassMetrics> = labels
            .into_iter()
            .map(|label| {
                let tp = pairs.iter().filter(|&&(t, p)| t == label && p == label).count();
                let predicted = pairs.iter().filter(|&&(_, p)| p == label).count();
                let support = pairs.iter().filter(|&&(t, _)| t == label).count();
                let precision = ratio(tp, predicted);
                let recall = ratio(tp, support);
                ClassMetrics {
                    label: label.to_string(),
                    precision,
                    recall,
                    f1_score: f1(precision, recall),
                    support,
                }
            })
            .collect();

        let total = pairs.len();
        let correct = pairs.iter().filter(|&&(t, p)| t == p).count();

        let n_classes = classes.len().max(1) as f64;
        let macro_avg = ClassMetrics {
            label: "macro avg".to_string(),
            precision: classes.iter().map(|c| c.precision).sum::<f64>() / n_classes,
            recall: classes.iter().map(|c| c.recall).sum::<f64>() / n_classes,
            f1_score: classes.iter().map(|c| c.f1_score).sum::<f64>() / n_classes,
            support: total,
        };

        let weighted = |metric: fn(&ClassMetrics) -> f64| -> f64 {
            if total == 0 {
                return 0.0;
            }
            classes
                .iter()
                .map(|c| metric(c) * c.support as f64)
                .sum::<f64>()
                / total as f64
        };
        let weighted_avg = ClassMetrics {
            label: "weighted avg".to_string(),
            precision: weighted(|c| c.precision),
            recall: weighted(|c| c.recall),
            f1_score: weighted(|c| c.f1_score),
            support: total,
        };

        Self {
            classes,
            accuracy: ratio(correct, total),
            macro_avg,
            weighted_avg,
            total_support: total,
        }
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .classes
            .iter()
            .map(|c| c.label.chars().count())
            .chain(std::iter::once("weighted avg".len()))
            .max()
            .unwrap_or(0);

        writeln!(
            f,
            "{:>width$} {:>9} {:>9} {:>9} {:>9}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        writeln!(f)?;
        for row in &self.classes {
            write_row(f, row, width)?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:>width$} {:>9} {:>9} {:>9.2} {:>9}",
            "accuracy", "", "", self.accuracy, self.total_support
        )?;
        write_row(f, &self.macro_avg, width)?;
        write_row(f, &self.weighted_avg, width)
    }
}

fn write_row(f: &mut fmt::Formatter<'_>, row: &ClassMetrics, width: usize) -> fmt::Result {
    writeln!(
        f,
        "{:>width$} {:>9.2} {:>9.2} {:>9.2} {:>9}",
        row.label, row.precision, row.recall, row.f1_score, row.support
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_perfect_predictions() {
        let y = ["Transport", "Groceries", "Transport"];
        let report = ClassificationReport::compute(&y, &y);
        assert!(approx(report.accuracy, 1.0));
        assert!(report.classes.iter().all(|c| approx(c.f1_score, 1.0)));
        assert_eq!(report.total_support, 3);
    }

    #[test]
    fn test_per_class_scores() {
        let y_true = ["a", "a", "b", "b"];
        let y_pred = ["a", "b", "b", "b"];
        let report = ClassificationReport::compute(&y_true, &y_pred);

        let a = &report.classes[0];
        assert_eq!(a.label, "a");
        assert!(approx(a.precision, 1.0));
        assert!(approx(a.recall, 0.5));
        assert!(approx(a.f1_score, 2.0 / 3.0));
        assert_eq!(a.support, 2);

        let b = &report.classes[1];
        assert!(approx(b.precision, 2.0 / 3.0));
        assert!(approx(b.recall, 1.0));
        assert!(approx(report.accuracy, 0.75));
        assert!(approx(report.macro_avg.precision, (1.0 + 2.0 / 3.0) / 2.0));
    }

    #[test]
    fn test_predicted_only_label_has_zero_support() {
        let report = ClassificationReport::compute(&["a", "a"], &["a", "c"]);
        let c = report.classes.iter().find(|c| c.label == "c").unwrap();
        assert_eq!(c.support, 0);
        assert!(approx(c.precision, 0.0));
        assert!(approx(c.recall, 0.0));
        // weighted average ignores zero-support rows
        assert!(approx(report.weighted_avg.recall, 0.5));
    }

    #[test]
    fn test_empty_inputs() {
        let empty: [&str; 0] = [];
        let report = ClassificationReport::compute(&empty, &empty);
        assert!(report.classes.is_empty());
        assert!(approx(report.accuracy, 0.0));
    }

    #[test]
    fn test_display_contains_rows() {
        let report =
            ClassificationReport::compute(&["Transport", "Groceries"], &["Transport", "Transport"]);
        let text = report.to_string();
        assert!(text.contains("precision"));
        assert!(text.contains("Groceries"));
        assert!(text.contains("accuracy"));
        assert!(text.contains("weighted avg"));
        assert!(text.contains("0.50"));
    }
}
