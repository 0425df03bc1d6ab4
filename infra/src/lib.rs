//! # Infrastructure Layer
//!
//! Concrete implementations of the core crate's storage and mail seams.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Database**: MySQL repositories using SQLx, plus the embedded schema migrations
//! - **Mail**: SMTP transport using lettre, and a recording mock transport
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

use pr_core::errors::DomainError;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Mail module - SMTP and mock transports
pub mod mail;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection or query error
    #[cfg(feature = "mysql")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration error
    #[cfg(feature = "mysql")]
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Mail transport error
    #[error("Mail error: {0}")]
    Mail(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        match err {
            InfrastructureError::Mail(message) => DomainError::mail(message),
            InfrastructureError::Config(message) => DomainError::Internal { message },
            #[cfg(feature = "mysql")]
            other => DomainError::store(other.to_string()),
        }
    }
}
