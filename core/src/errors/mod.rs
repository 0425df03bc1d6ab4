//! Domain-specific error types and error handling.

mod types;

// Re-export all error types
pub use types::{ConflictField, ReservationError, ValidationError};

use thiserror::Error;

/// External collaborator a request depended on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dependency {
    Store,
    Mail,
}

impl std::fmt::Display for Dependency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dependency::Store => write!(f, "store"),
            Dependency::Mail => write!(f, "mail"),
        }
    }
}

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Reservation(#[from] ReservationError),

    #[error("{dependency} unavailable: {message}")]
    DependencyUnavailable { dependency: Dependency, message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    /// Store failure with a message
    pub fn store(message: impl Into<String>) -> Self {
        DomainError::DependencyUnavailable {
            dependency: Dependency::Store,
            message: message.into(),
        }
    }

    /// Mail transport failure with a message
    pub fn mail(message: impl Into<String>) -> Self {
        DomainError::DependencyUnavailable {
            dependency: Dependency::Mail,
            message: message.into(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
