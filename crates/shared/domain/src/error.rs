//! Domain-level errors.
//!
//! These errors represent business rule violations raised by the record types.
//! They are independent of storage and presentation concerns.

use thiserror::Error;

/// Domain-specific errors for business rule violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed for a field or input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Entity already exists (conflict)
    #[error("{0} already exists")]
    Conflict(String),

    /// Login id or password did not match
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Credentials matched a banned singer
    #[error("This account is suspended")]
    AccountSuspended,

    /// Order assignment attempted without a judge
    #[error("Please select a judge first")]
    NoJudgeSelected,

    /// Score input was not an integer in range
    #[error("Invalid score: {0}")]
    InvalidScore(String),

    /// Order has already been scored
    #[error("Order is already completed")]
    OrderCompleted,

    /// Internal domain error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::Validation(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>) -> Self {
        DomainError::NotFound(entity.into())
    }

    /// Create a conflict error
    pub fn conflict(entity: impl Into<String>) -> Self {
        DomainError::Conflict(entity.into())
    }

    /// Create an invalid score error
    pub fn invalid_score(input: impl Into<String>) -> Self {
        DomainError::InvalidScore(input.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        DomainError::Internal(msg.into())
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
