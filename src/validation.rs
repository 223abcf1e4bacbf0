//! Input validation for allocation requests and policies.
//!
//! The allocator assumes pre-validated input. These checks run first
//! and collect every problem rather than stopping at the first:
//! - Worker count below 1
//! - Shift length outside (0, 24] hours
//! - Requests with an empty category name
//! - Policies with unusable rates, reference shift or tail window

use thiserror::Error;

use crate::models::{AllocationPolicy, TailWindow, WorkRequest};

/// Longest permitted shift (hours).
pub const MAX_SHIFT_HOURS: f64 = 24.0;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Error)]
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
    /// Roster size is not a positive integer.
    WorkerCountOutOfRange,
    /// Shift length is not in (0, 24].
    ShiftHoursOutOfRange,
    /// A request has no category name.
    EmptyCategoryName,
    /// The allocation policy cannot be applied.
    InvalidPolicy,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the caller-supplied inputs of one allocation.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(
    requests: &[WorkRequest],
    worker_count: usize,
    shift_hours: f64,
) -> ValidationResult {
    let mut errors = Vec::new();

    if worker_count < 1 {
        errors.push(ValidationError::new(
            ValidationErrorKind::WorkerCountOutOfRange,
            "Available people must be a positive integer.",
        ));
    }

    if !(shift_hours > 0.0 && shift_hours <= MAX_SHIFT_HOURS) {
        errors.push(ValidationError::new(
            ValidationErrorKind::ShiftHoursOutOfRange,
            format!("Working hours must be greater than 0 and at most 24 (got {shift_hours})."),
        ));
    }

    for (idx, request) in requests.iter().enumerate() {
        if request.name.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyCategoryName,
                format!("Task {} must have a name.", idx + 1),
            ));
        }
    }

    finish(errors)
}

/// Validates an allocation policy.
///
/// Checks:
/// 1. Reference shift is positive and finite
/// 2. Every rate is finite and non-negative
/// 3. The priority order has no repeated category
/// 4. The fixed duty is named
/// 5. The tail window is finite and non-negative
/// 6. The tail category is not also the flagship
pub fn validate_policy(policy: &AllocationPolicy) -> ValidationResult {
    let mut errors = Vec::new();
    let invalid = |message: String| ValidationError::new(ValidationErrorKind::InvalidPolicy, message);

    let reference = policy.rates.reference_shift_hours;
    if !(reference.is_finite() && reference > 0.0) {
        errors.push(invalid(format!(
            "Reference shift must be a positive number of hours (got {reference})."
        )));
    }

    let mut rates: Vec<(&String, &f64)> = policy.rates.rates.iter().collect();
    rates.sort_by(|a, b| a.0.cmp(b.0));
    for (name, rate) in rates {
        if !(rate.is_finite() && *rate >= 0.0) {
            errors.push(invalid(format!("Rate for '{name}' must be non-negative (got {rate}).")));
        }
    }

    for (idx, name) in policy.priority_order.iter().enumerate() {
        if policy.priority_order[..idx].contains(name) {
            errors.push(invalid(format!("Category '{name}' appears twice in the priority order.")));
        }
    }

    if let Some(fixed) = &policy.fixed_duty {
        if fixed.label.trim().is_empty() {
            errors.push(invalid("Fixed duty must have a name.".to_string()));
        }
    }

    if let Some(partial) = &policy.partial_shift {
        if let TailWindow::Hours(hours) = partial.tail {
            if !(hours.is_finite() && hours >= 0.0) {
                errors.push(invalid(format!(
                    "Reserved tail must be a non-negative number of hours (got {hours})."
                )));
            }
        }
        if policy.flagship.as_deref() == Some(partial.category.as_str()) {
            errors.push(invalid(format!(
                "Category '{}' cannot be both the flagship and the tail category.",
                partial.category
            )));
        }
    }

    finish(errors)
}

fn finish(errors: Vec<ValidationError>) -> ValidationResult {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
