use actix_web::{web, HttpRequest, HttpResponse};

use pr_core::services::VerifyRequest;
use pr_shared::email::mask_email;

use crate::app::AppState;
use crate::dto::{VerifyCodeRequest, VerifyCodeResponse};
use crate::handlers::{extract_client_ip, handle_domain_error};

/// Handler for POST /api/verify
///
/// Body `{"email": "...", "verificationCode": "123456"}`. The caller IP
/// feeds the failed-attempt lockout.
///
/// ## Errors
/// - 400: missing input, unknown email or wrong code, already verified, expired
/// - 429: locked out after repeated failures (`Retry-After` set)
pub async fn verify(
    req: HttpRequest,
    state: web::Data<AppState>,
    request: web::Json<VerifyCodeRequest>,
) -> HttpResponse {
    let request = request.into_inner();

    let client_ip = extract_client_ip(&req);
    let masked_email = mask_email(&request.email);

    match state
        .verification_service
        .verify(VerifyRequest::new(
            request.email,
            request.verification_code,
            client_ip.clone(),
        ))
        .await
    {
        Ok(summary) => {
            tracing::info!(email = %masked_email, ip = %client_ip, "Reservation verified");
            HttpResponse::Ok().json(VerifyCodeResponse {
                success: true,
                message: "Phone number reservation verified successfully!".to_string(),
                reservation: summary.into(),
            })
        }
        Err(error) => {
            tracing::warn!(
                email = %masked_email,
                ip = %client_ip,
                error = %error,
                "Verification failed"
            );
            handle_domain_error(&error)
        }
    }
}
