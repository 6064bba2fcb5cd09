//! Input validation for dispatch problems.
//!
//! Checks structural integrity of resources and shifts before a model is
//! built. Detects:
//! - Duplicate IDs
//! - Timeslots outside the horizon
//! - Demanded skills no resource holds
//! - Resources without skills
//!
//! All problems are collected; validation never stops at the first one.

use crate::models::DispatchProblem;
use std::collections::{BTreeSet, HashSet};

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
    /// Two entities share the same ID.
    DuplicateId,
    /// A shift lies outside `1..=horizon`.
    TimeslotOutOfRange,
    /// A skill is demanded but no resource holds it.
    UncoverableDemand,
    /// A resource holds no skill.
    EmptySkillSet,
    /// An unavailable timeslot lies outside `1..=horizon`.
    UnavailableOutOfRange,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the input data for a dispatch problem.
///
/// Checks:
/// 1. No duplicate resource IDs
/// 2. No duplicate shift IDs
/// 3. Every resource holds at least one skill
/// 4. Every unavailable timeslot lies in the horizon
/// 5. Every shift timeslot lies in the horizon
/// 6. Every demanded skill is held by at least one resource
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(problem: &DispatchProblem) -> ValidationResult {
    let mut errors = Vec::new();
    let horizon = problem.horizon;

    let mut resource_ids = HashSet::new();
    for r in &problem.resources {
        if !resource_ids.insert(r.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate resource ID: {}", r.id),
            ));
        }
        if r.skills.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptySkillSet,
                format!("Resource '{}' has no skills", r.id),
            ));
        }
        for slot in &r.unavailable {
            if !slot.within_horizon(horizon) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnavailableOutOfRange,
                    format!(
                        "Resource '{}' is unavailable at timeslot {slot}, outside 1..={horizon}",
                        r.id
                    ),
                ));
            }
        }
    }

    let mut shift_ids = HashSet::new();
    for s in &problem.shifts {
        if !shift_ids.insert(s.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate shift ID: {}", s.id),
            ));
        }
        if !s.timeslot.within_horizon(horizon) {
            errors.push(ValidationError::new(
                ValidationErrorKind::TimeslotOutOfRange,
                format!(
                    "Shift '{}' at timeslot {}, outside 1..={horizon}",
                    s.id, s.timeslot
                ),
            ));
        }
    }

    let held: BTreeSet<&str> = problem
        .resources
        .iter()
        .flat_map(|r| r.skills.iter().map(String::as_str))
        .collect();
    for skill in problem.demanded_skills() {
        if !held.contains(skill) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UncoverableDemand,
                format!("Skill '{skill}' is demanded but no resource holds it"),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
