//! Mapping of domain errors to HTTP responses
//!
//! Every error leaves the API as an [`ErrorResponse`] body. Store and mail
//! failures are logged with their cause and reported without it.

use actix_web::{
    error::{InternalError, JsonPayloadError},
    http::{header, StatusCode},
    HttpRequest, HttpResponse,
};
use std::collections::HashMap;
use validator::ValidationErrors;

use pr_core::errors::{Dependency, DomainError, ReservationError, ValidationError};

use crate::dto::ErrorResponse;

/// Convert a domain error into its HTTP response
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    match error {
        DomainError::Validation(validation) => handle_validation_error(validation),
        DomainError::Reservation(reservation) => handle_reservation_error(reservation),
        DomainError::DependencyUnavailable { dependency, message } => {
            tracing::error!(dependency = %dependency, error = %message, "Dependency unavailable");
            let code = match dependency {
                Dependency::Store => "store_unavailable",
                Dependency::Mail => "mail_unavailable",
            };
            ErrorResponse::new(code, "Service temporarily unavailable. Please try again later")
                .to_response(StatusCode::SERVICE_UNAVAILABLE)
        }
        DomainError::Internal { message } => {
            tracing::error!(error = %message, "Internal error");
            ErrorResponse::new("internal_error", "An internal error occurred")
                .to_response(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

fn handle_validation_error(error: &ValidationError) -> HttpResponse {
    let mut response = ErrorResponse::new("validation_error", error.to_string());
    if let Some(field) = error.field() {
        response = response.with_detail("field", field);
    }
    response.to_response(StatusCode::BAD_REQUEST)
}

fn handle_reservation_error(error: &ReservationError) -> HttpResponse {
    let message = error.to_string();
    match error {
        ReservationError::Conflict { field } => ErrorResponse::new("conflict", message)
            .with_detail("field", field.as_str())
            .to_response(StatusCode::CONFLICT),
        ReservationError::RateLimited { minutes } => {
            let body = ErrorResponse::new("rate_limit_exceeded", message)
                .with_detail("retry_after_minutes", *minutes);
            HttpResponse::TooManyRequests()
                .insert_header((header::RETRY_AFTER, (minutes.max(&0) * 60).to_string()))
                .json(body)
        }
        ReservationError::InvalidCredential => {
            ErrorResponse::new("invalid_credential", message).to_response(StatusCode::BAD_REQUEST)
        }
        ReservationError::AlreadyVerified => {
            ErrorResponse::new("already_verified", message).to_response(StatusCode::BAD_REQUEST)
        }
        ReservationError::CodeExpired => {
            ErrorResponse::new("code_expired", message).to_response(StatusCode::BAD_REQUEST)
        }
    }
}

/// 400 response listing the messages of each failing DTO field
pub fn handle_dto_validation(errors: &ValidationErrors) -> HttpResponse {
    let details: HashMap<String, serde_json::Value> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errors)| {
            let messages: Vec<String> = errors
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            (field.to_string(), serde_json::json!(messages))
        })
        .collect();

    ErrorResponse::new("validation_error", "Invalid request data")
        .with_details(details)
        .to_response(StatusCode::BAD_REQUEST)
}

/// Error handler for `web::JsonConfig`
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = match &err {
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
            ErrorResponse::new("payload_too_large", "Request body is too large")
                .to_response(StatusCode::PAYLOAD_TOO_LARGE)
        }
        JsonPayloadError::ContentType => {
            ErrorResponse::new("unsupported_media_type", "Expected an application/json body")
                .to_response(StatusCode::UNSUPPORTED_MEDIA_TYPE)
        }
        other => ErrorResponse::new("invalid_request", "Malformed JSON body")
            .with_detail("reason", other.to_string())
            .to_response(StatusCode::BAD_REQUEST),
    };

    InternalError::from_response(err, response).into()
}

/// 401 for the cron and report endpoints
pub fn unauthorized() -> HttpResponse {
    ErrorResponse::new("unauthorized", "Unauthorized").to_response(StatusCode::UNAUTHORIZED)
}
