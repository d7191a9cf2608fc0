//! Expense category prediction service
//!
//! Serves a pipeline fitted by the trainer over `POST /predict-category`.

pub mod api;
pub mod config;
