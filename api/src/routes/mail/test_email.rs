use actix_web::{http::StatusCode, web, HttpResponse};

use pr_core::errors::{Dependency, DomainError};
use pr_core::services::SampleEmail;

use crate::app::AppState;
use crate::dto::{ErrorResponse, TestEmailRequest, TestEmailResponse};
use crate::handlers::handle_domain_error;

const DEFAULT_FIRST_NAME: &str = "Test User";

fn presence(value: &Option<String>) -> &'static str {
    if value.is_some() {
        "set"
    } else {
        "missing"
    }
}

/// Handler for POST /api/test-email
///
/// Sends a sample verification or stats email through the live transport.
/// Body `{"type": "verification" | "stats", "email"?: "...", "firstName"?: "..."}`.
///
/// ## Errors
/// - 400: mail credentials missing, or unknown `type`
/// - 500: the transport refused the message
pub async fn send_test_email(
    state: web::Data<AppState>,
    request: web::Json<TestEmailRequest>,
) -> HttpResponse {
    let mail = &state.mail_config;
    if !mail.is_configured() {
        return ErrorResponse::new("mail_not_configured", "Email configuration missing")
            .with_detail("GMAIL_USER", presence(&mail.username))
            .with_detail("GMAIL_APP_PASSWORD", presence(&mail.app_password))
            .to_response(StatusCode::BAD_REQUEST);
    }

    let request = request.into_inner();
    let Ok(kind) = request.kind.parse::<SampleEmail>() else {
        return ErrorResponse::new("invalid_request", "Invalid type. Use 'verification' or 'stats'")
            .to_response(StatusCode::BAD_REQUEST);
    };

    let override_to = request.email.filter(|email| !email.trim().is_empty());
    let recipient = match (override_to, kind) {
        (Some(email), _) => email,
        (None, SampleEmail::Verification) => mail.username.clone().unwrap_or_default(),
        (None, SampleEmail::Stats) => state.reporter.recipient().to_string(),
    };
    let first_name = request
        .first_name
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_FIRST_NAME.to_string());

    match state
        .mail_diagnostics
        .send_sample(kind, &recipient, &first_name)
        .await
    {
        Ok(message_id) => {
            let message = match kind {
                SampleEmail::Verification => "Test verification email sent successfully",
                SampleEmail::Stats => "Test stats email sent successfully",
            };
            HttpResponse::Ok().json(TestEmailResponse {
                success: true,
                message: message.to_string(),
                sent_to: recipient,
                message_id,
            })
        }
        Err(DomainError::DependencyUnavailable {
            dependency: Dependency::Mail,
            message,
        }) => ErrorResponse::new("mail_send_failed", "Failed to send test email")
            .with_detail("error", message)
            .to_response(StatusCode::INTERNAL_SERVER_ERROR),
        Err(error) => handle_domain_error(&error),
    }
}
