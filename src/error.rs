use thiserror::Error;

/// Rejection of a snapshot that cannot be matched. Raised before any
/// proposal is processed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchingError {
    #[error("project {key} has a non-positive or oversized capacity ({capacity})")]
    InvalidCapacity { key: String, capacity: i64 },

    #[error("duplicate project key: {0}")]
    DuplicateProject(String),

    #[error("duplicate student identifier: {0}")]
    DuplicateStudent(String),

    #[error("student {identifier} has a non-finite GPA")]
    InvalidGpa { identifier: String },
}

pub type Result<T> = std::result::Result<T, MatchingError>;
