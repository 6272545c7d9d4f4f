//! Integrity checks for projects received from storage.
//!
//! Schedules built by [`compute_ranges`](crate::engine::compute_ranges) are
//! valid by construction. Records loaded from elsewhere may not be, so the
//! persistence layer can run these checks before trusting them. Detects:
//! - Duplicate phase keys
//! - Inverted ranges
//! - Gaps or overlaps between consecutive phases
//! - A last phase that does not end on the anchor date

use std::collections::HashSet;

use crate::model::{PhaseConfig, Project};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two phases share the same key.
    DuplicateKey,
    /// A phase ends before it starts.
    InvertedRange,
    /// Consecutive phases leave a gap or overlap.
    NotContiguous,
    /// The last phase does not end on the anchor date.
    NotAnchored,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Checks a project's phase schedule against its anchor date.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_project(project: &Project) -> ValidationResult {
    let mut errors = Vec::new();
    let phases: Vec<_> = project.phases.iter().collect();

    let mut keys = HashSet::new();
    for p in &phases {
        if !keys.insert(p.key.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateKey,
                format!("Duplicate phase key: {}", p.key),
            ));
        }
        if p.range.end < p.range.start {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvertedRange,
                format!("Phase '{}' ends {} before it starts {}", p.key, p.range.end, p.range.start),
            ));
        }
    }

    for pair in phases.windows(2) {
        if pair[0].range.end.succ_opt() != Some(pair[1].range.start) {
            errors.push(ValidationError::new(
                ValidationErrorKind::NotContiguous,
                format!(
                    "Phase '{}' starts {} but '{}' ends {}",
                    pair[1].key, pair[1].range.start, pair[0].key, pair[0].range.end
                ),
            ));
        }
    }

    if let Some(last) = phases.last() {
        if last.range.end != project.anchor_date {
            errors.push(ValidationError::new(
                ValidationErrorKind::NotAnchored,
                format!(
                    "Last phase '{}' ends {} instead of the event date {}",
                    last.key, last.range.end, project.anchor_date
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Checks that every key in a phase plan is unique and non-empty.
pub fn validate_plan(plan: &[PhaseConfig]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut keys = HashSet::new();
    for phase in plan {
        if phase.key.trim().is_empty() || !keys.insert(phase.key.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateKey,
                format!("Missing or duplicate phase key: '{}'", phase.key),
            ));
        }
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
