//! Grading error types.

use std::path::PathBuf;

use qcore_sim::SimError;
use thiserror::Error;

/// Result type for grading operations.
pub type GradeResult<T> = Result<T, GradeError>;

/// Errors that can occur while loading exercises or grading submissions.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GradeError {
    /// No exercise with this id. An expected outcome for bad ids.
    #[error("Exercise '{0}' not found")]
    ExerciseNotFound(String),

    /// The exercise's target type has no grading rule.
    #[error("Exercise '{exercise_id}' has unsupported target type '{target_type}'")]
    UnsupportedTargetType {
        /// Exercise id.
        exercise_id: String,
        /// The target type as written in the catalog.
        target_type: String,
    },

    /// The target data lacks the field its target type needs.
    #[error("Exercise '{exercise_id}' is missing target data '{field}'")]
    MissingTargetData {
        /// Exercise id.
        exercise_id: String,
        /// Name of the missing field.
        field: &'static str,
    },

    /// An exercise record is malformed.
    #[error("Invalid exercise '{exercise_id}': {reason}")]
    InvalidExercise {
        /// Exercise id (may be empty).
        exercise_id: String,
        /// What is wrong with it.
        reason: String,
    },

    /// The exercise catalog could not be read.
    #[error("Failed to read exercises from {}: {source}", path.display())]
    Io {
        /// Catalog path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The exercise catalog is not valid JSON.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Simulating the submission failed.
    #[error(transparent)]
    Simulation(#[from] SimError),
}

impl GradeError {
    /// Whether this is a plain lookup miss rather than a failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, GradeError::ExerciseNotFound(_))
    }
}
