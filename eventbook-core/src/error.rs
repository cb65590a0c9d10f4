//! Error types for eventbook.

use thiserror::Error;

/// Errors that can occur in eventbook operations.
#[derive(Error, Debug)]
pub enum EventBookError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Event not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Persistence(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Rejected input: missing fields, bad formats, or impossible time windows.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill in the following fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid {field} '{value}'. Expected 24-hour HH:MM")]
    InvalidTime { field: &'static str, value: String },

    #[error("Event must start in the future")]
    StartInPast,

    #[error("End time must be after start time")]
    EndNotAfterStart,

    #[error("Please enter a valid email address ('{0}')")]
    InvalidEmail(String),

    #[error("Could not generate a unique id after {0} attempts")]
    DuplicateId(usize),
}

/// Result type alias for eventbook operations.
pub type EventBookResult<T> = Result<T, EventBookError>;
