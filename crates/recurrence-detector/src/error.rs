//! Error types for recurrence-detector operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DetectError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid RRULE: {0}")]
    InvalidRule(String),
}

pub type Result<T> = std::result::Result<T, DetectError>;
