//! Error types for u-courseplan.

use thiserror::Error;

use crate::models::Course;
use crate::validation::ValidationError;

/// Main error type for planning operations.
#[derive(Debug, Error)]
pub enum PlanError {
    /// A referenced course is missing from the catalog.
    #[error("Unknown course: {0}")]
    UnknownCourse(Course),

    /// The prerequisite graph reachable from the goals contains a cycle.
    #[error("Cyclic prerequisites involving {0}")]
    CyclicPrerequisite(Course),

    /// Catalog checks failed.
    #[error("Invalid catalog: {}", summarize(.0))]
    Validation(Vec<ValidationError>),

    /// Invalid planner configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The search was stopped by its termination condition.
    #[error("Planning cancelled after {steps} steps")]
    Cancelled { steps: u64 },
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<Vec<ValidationError>> for PlanError {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::Validation(errors)
    }
}

/// Result type alias for planning operations.
pub type Result<T> = std::result::Result<T, PlanError>;
