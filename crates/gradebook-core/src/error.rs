//! Gradebook snapshot error types.
//!
//! Grading itself never fails. These errors only arise while assembling a
//! [`Gradebook`](crate::snapshot::Gradebook) from its parts, and travel inside
//! `anyhow::Error` out of the parser so callers can downcast them.

use thiserror::Error;

/// A structural problem that makes a gradebook snapshot unusable.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SnapshotError {
    /// Two assignments share a title.
    #[error("duplicate assignment title: {0}")]
    DuplicateAssignment(String),

    /// Two roster entries share a student id.
    #[error("duplicate student id: {0}")]
    DuplicateStudent(String),

    /// An assignment's max score is zero, negative, or not a number.
    #[error("assignment '{title}' has invalid max score {max_score}")]
    InvalidMaxScore { title: String, max_score: f64 },

    /// A score record holds NaN or an infinity.
    #[error("score for '{student_id}' on '{assignment}' is not a finite number: {score}")]
    NonFiniteScore {
        student_id: String,
        assignment: String,
        score: f64,
    },
}

impl SnapshotError {
    /// The assignment title or student id the error refers to.
    pub fn subject(&self) -> &str {
        match self {
            SnapshotError::DuplicateAssignment(title) => title,
            SnapshotError::DuplicateStudent(id) => id,
            SnapshotError::InvalidMaxScore { title, .. } => title,
            SnapshotError::NonFiniteScore { student_id, .. } => student_id,
        }
    }
}
