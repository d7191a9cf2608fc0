//! Expense Classifier training CLI
//!
//! Fits the TF-IDF + Naive Bayes pipeline from a labeled dataset,
//! prints the held-out evaluation and writes the model artifact the
//! prediction service loads.

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use classifier_lib::{
    dataset::{DEFAULT_SPLIT_SEED, DEFAULT_TEST_FRACTION},
    trainer::DEFAULT_DATASET_PATH,
    TrainConfig, DEFAULT_ARTIFACT_PATH,
};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Expense Classifier training CLI
#[derive(Parser)]
#[command(name = "train-classifier")]
#[command(author, version, about = "Train and query the Expense Classifier", long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(long, short, global = true, default_value = "table")]
    pub format: output::OutputFormat,

    /// Enable verbose output
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fit the pipeline, print the evaluation report and save the model
    Train {
        /// Labeled dataset (JSON array of {description, category})
        #[arg(long, env = "EXPENSE_DATA", default_value = DEFAULT_DATASET_PATH)]
        data: PathBuf,

        /// Where to write the model artifact
        #[arg(long, short, env = "EXPENSE_MODEL", default_value = DEFAULT_ARTIFACT_PATH)]
        output: PathBuf,

        /// Fraction of records held out for evaluation
        #[arg(long, default_value_t = DEFAULT_TEST_FRACTION)]
        test_size: f64,

        /// Seed for the train/test shuffle
        #[arg(long, default_value_t = DEFAULT_SPLIT_SEED)]
        seed: u64,
    },

    /// Predict the category of a description with a saved model
    Predict {
        /// Model artifact to load
        #[arg(long, short, env = "EXPENSE_MODEL", default_value = DEFAULT_ARTIFACT_PATH)]
        model: PathBuf,

        /// Expense description to classify
        description: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .compact()
        .init();

    if let Err(e) = run(cli) {
        output::print_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Train {
            data,
            output,
            test_size,
            seed,
        } => {
            let config = TrainConfig {
                dataset_path: data,
                artifact_path: output,
                test_fraction: test_size,
                seed,
            };
            debug!(?config, "Parsed training configuration");
            commands::train::run_training(&config, cli.format)
        }
        Commands::Predict { model, description } => {
            commands::predict::predict(&model, &description, cli.format)
        }
    }
}
