//! Output formatting utilities

use clap::ValueEnum;
use classifier_lib::{ClassMetrics, ClassificationReport};
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Table format (default)
    #[default]
    Table,
    /// Plain text report
    Text,
    /// JSON format
    Json,
}

/// Row of the classification report table
#[derive(Tabled)]
struct ReportRow {
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Precision")]
    precision: String,
    #[tabled(rename = "Recall")]
    recall: String,
    #[tabled(rename = "F1-score")]
    f1_score: String,
    #[tabled(rename = "Support")]
    support: usize,
}

impl ReportRow {
    fn from_metrics(m: &ClassMetrics) -> Self {
        Self {
            label: m.label.clone(),
            precision: format_score(m.precision),
            recall: format_score(m.recall),
            f1_score: color_score(m.f1_score),
            support: m.support,
        }
    }
}

/// Print a classification report in the requested format
pub fn print_report(report: &ClassificationReport, format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            let mut rows: Vec<ReportRow> =
                report.classes.iter().map(ReportRow::from_metrics).collect();
            rows.push(ReportRow::from_metrics(&report.macro_avg));
            rows.push(ReportRow::from_metrics(&report.weighted_avg));

            println!("{}", "Classification Report:".bold());
            println!("{}", Table::new(rows).with(Style::rounded()));
            println!(
                "Accuracy: {} ({} held-out samples)",
                color_score(report.accuracy),
                report.total_support
            );
        }
        OutputFormat::Text => {
            println!("Classification Report:");
            println!("{}", report);
        }
        OutputFormat::Json => print_json(report),
    }
}

/// Print any serializable value as pretty JSON
pub fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => print_error(&format!("Failed to serialize output: {}", e)),
    }
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

/// Format a score with two decimals
pub fn format_score(score: f64) -> String {
    format!("{:.2}", score)
}

/// Color a score based on value
pub fn color_score(score: f64) -> String {
    let formatted = format_score(score);
    if score >= 0.8 {
        formatted.green().to_string()
    } else if score >= 0.6 {
        formatted.yellow().to_string()
    } else {
        formatted.red().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(0.5), "0.50");
        assert_eq!(format_score(1.0), "1.00");
        assert_eq!(format_score(2.0 / 3.0), "0.67");
    }

    #[test]
    fn test_color_score_keeps_value() {
        colored::control::set_override(false);
        assert_eq!(color_score(0.91), "0.91");
        assert_eq!(color_score(0.1), "0.10");
    }
}
