//! Crate error type.
//!
//! Only conditions that prevent a model from being built are errors.
//! Infeasibility and solver timeouts are regular outcomes, reported as
//! [`DispatchOutcome::NoSolution`](crate::dispatcher::DispatchOutcome).

use thiserror::Error;

use crate::config::ConfigError;
use crate::validation::ValidationError;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("invalid input: {} problem(s), first: {}", .0.len(), first_message(.0))]
    Validation(Vec<ValidationError>),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

fn first_message(errors: &[ValidationError]) -> &str {
    errors.first().map(|e| e.message.as_str()).unwrap_or("none")
}
