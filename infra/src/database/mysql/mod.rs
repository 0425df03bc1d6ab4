//! MySQL implementations of the core repository traits

mod attempt_repository_impl;
mod reservation_repository_impl;

pub use attempt_repository_impl::MySqlAttemptRepository;
pub use reservation_repository_impl::MySqlReservationRepository;

use pr_core::errors::DomainError;
use uuid::Uuid;

/// Map a query failure to the domain's store error
pub(crate) fn store_error(context: &str, e: sqlx::Error) -> DomainError {
    tracing::error!(error = %e, "{}", context);
    DomainError::store(format!("{}: {}", context, e))
}

/// Map a column read failure
pub(crate) fn column_error(column: &str, e: sqlx::Error) -> DomainError {
    DomainError::Internal {
        message: format!("Failed to get {}: {}", column, e),
    }
}

pub(crate) fn parse_uuid(value: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(value).map_err(|e| DomainError::Internal {
        message: format!("Invalid UUID: {}", e),
    })
}
