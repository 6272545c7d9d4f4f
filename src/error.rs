//! Error types for launch-timeline.
//!
//! Scheduling math never fails; errors only come from constructing
//! inverted date ranges and from reading or writing phase plans.

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlanError {
    /// A range or span whose end precedes its start.
    #[error("inverted date range: {start} is after {end}")]
    InvertedRange { start: NaiveDate, end: NaiveDate },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// CSV header row lacks a required column.
    #[error("CSV is missing required columns. Found headers: {found:?}. Need columns for: phase name, duration in days.")]
    MissingColumns { found: Vec<String> },

    #[error("no valid phases found in {path:?} ({skipped} rows skipped)")]
    NoValidRows { path: PathBuf, skipped: usize },

    #[error("could not determine a configuration directory for this platform")]
    NoConfigDir,
}

pub type Result<T> = std::result::Result<T, PlanError>;
