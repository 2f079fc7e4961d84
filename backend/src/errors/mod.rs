//! Global application error types and handlers.
//!
//! This module defines the error types used across the backend: the
//! directory-level errors raised by account storage and the service errors
//! surfaced to HTTP handlers.

use thiserror::Error;

/// Errors raised by an account directory implementation.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// An account with this email is already stored.
    #[error("Account already exists for email: {0}")]
    DuplicateEmail(String),
    /// The underlying store failed to read or write.
    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl DirectoryError {
    /// Converts an sqlx error, recognising unique-constraint violations on `email`.
    pub fn from_sqlx(error: sqlx::Error, email: &str) -> Self {
        let is_unique_violation = error
            .as_database_error()
            .is_some_and(|db_error| db_error.is_unique_violation());

        if is_unique_violation {
            Self::DuplicateEmail(email.to_string())
        } else {
            Self::Storage(error.into())
        }
    }
}

/// Service error surfaced by the credential service.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Account already exists: {email}")]
    DuplicateAccount { email: String },

    /// Returned for both unknown emails and wrong passwords.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Persistence error: {source}")]
    Persistence { source: anyhow::Error },

    #[error("Internal error: {message}")]
    InternalError { message: String },
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn duplicate_account(email: impl Into<String>) -> Self {
        Self::DuplicateAccount {
            email: email.into(),
        }
    }

    pub fn persistence(source: impl Into<anyhow::Error>) -> Self {
        Self::Persistence {
            source: source.into(),
        }
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }
}

impl From<DirectoryError> for ServiceError {
    fn from(error: DirectoryError) -> Self {
        match error {
            DirectoryError::DuplicateEmail(email) => Self::duplicate_account(email),
            DirectoryError::Storage(source) => Self::persistence(source),
        }
    }
}
