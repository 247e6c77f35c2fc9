// Error taxonomy for the teacher store and API
//
// Validation -> 400, NotFound -> 404, Persistence -> 500 (see api.rs)

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TeacherError {
    /// Request input could not be parsed (body, path id, or search filter)
    #[error("invalid {field}: {message}")]
    Validation { field: String, message: String },

    /// No teacher exists with this identifier
    #[error("teacher {id} not found")]
    NotFound { id: i64 },

    /// The underlying SQLite call failed
    #[error("database error: {0}")]
    Persistence(#[from] rusqlite::Error),

    /// A previous holder of the shared connection panicked
    #[error("database connection lock poisoned")]
    LockPoisoned,
}

impl TeacherError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        TeacherError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn not_found(id: i64) -> Self {
        TeacherError::NotFound { id }
    }

    /// Stable machine-readable code used in error bodies
    pub fn code(&self) -> &'static str {
        match self {
            TeacherError::Validation { .. } => "VALIDATION_ERROR",
            TeacherError::NotFound { .. } => "NOT_FOUND",
            TeacherError::Persistence(_) | TeacherError::LockPoisoned => "PERSISTENCE_ERROR",
        }
    }
}

pub type Result<T> = std::result::Result<T, TeacherError>;
