//! Input validation for rostering runs.
//!
//! Checks structural integrity of members, session dates, and constraints
//! before generation. Detects:
//! - Duplicate member IDs
//! - Duplicate session dates
//! - Group size bounds out of order
//! - Empty rosters and empty date lists
//!
//! Validation is advisory. The generator never calls it and never fails:
//! it normalises bad bounds and turns empty inputs into empty plans.
//! Callers that want to tell "nothing to schedule" apart from a real
//! result run this first.

use crate::models::{CalendarDate, Constraints, Member};
use std::collections::HashSet;
use thiserror::Error;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two members share the same ID.
    DuplicateMemberId,
    /// A session date is listed more than once.
    DuplicateSessionDate,
    /// `min_group_size` is zero or exceeds `max_group_size`.
    InvalidGroupSize,
    /// No members were supplied.
    EmptyRoster,
    /// No session dates were supplied.
    NoSessionDates,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the inputs of a rostering run.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(
    members: &[Member],
    dates: &[CalendarDate],
    constraints: &Constraints,
) -> ValidationResult {
    let mut errors = Vec::new();

    if members.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyRoster,
            "No members to schedule",
        ));
    }

    if dates.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoSessionDates,
            "No session dates to schedule",
        ));
    }

    let mut member_ids = HashSet::new();
    for m in members {
        if !member_ids.insert(m.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateMemberId,
                format!("Duplicate member ID: {}", m.id),
            ));
        }
    }

    let mut seen_dates = HashSet::new();
    for d in dates {
        if !seen_dates.insert(d) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateSessionDate,
                format!("Duplicate session date: {d}"),
            ));
        }
    }

    if constraints.min_group_size == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidGroupSize,
            "Minimum group size must be at least 1",
        ));
    }
    if constraints.max_group_size < constraints.min_group_size {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidGroupSize,
            format!(
                "Maximum group size {} is below minimum {}",
                constraints.max_group_size, constraints.min_group_size
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
