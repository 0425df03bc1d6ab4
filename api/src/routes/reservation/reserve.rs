use actix_web::{web, HttpResponse};
use validator::Validate;

use pr_core::services::SubmitReservation;
use pr_shared::email::mask_email;

use crate::app::AppState;
use crate::dto::{ReserveRequest, ReserveResponse};
use crate::handlers::{handle_domain_error, handle_dto_validation};

/// Handler for POST /api/reserve
///
/// # Request Body
///
/// ```json
/// {
///     "firstName": "Ada",
///     "lastName": "Obi",
///     "email": "ada@gmail.com",
///     "phoneNumber": "+2348012345678",
///     "country": "Nigeria",
///     "photo": { "fileName": "me.png", "contentType": "image/png", "data": "<base64>" }
/// }
/// ```
///
/// # Response
///
/// ## Success (201 Created)
/// ```json
/// {
///     "success": true,
///     "message": "Reservation created. Please check your email for verification code.",
///     "reservationId": "550e8400-e29b-41d4-a716-446655440000"
/// }
/// ```
///
/// ## Errors
/// - 400: missing field, non-Gmail address, bad phone or photo
/// - 409: phone number or email already reserved
/// - 503: store unavailable
pub async fn reserve(
    state: web::Data<AppState>,
    request: web::Json<ReserveRequest>,
) -> HttpResponse {
    let request = request.into_inner();

    if let Err(errors) = request.validate() {
        tracing::warn!(?errors, "Reservation request failed validation");
        return handle_dto_validation(&errors);
    }

    let masked_email = mask_email(&request.email);
    tracing::info!(email = %masked_email, country = %request.country, "Processing reservation");

    match state
        .reservation_service
        .submit(SubmitReservation::from(request))
        .await
    {
        Ok(receipt) => {
            if !receipt.email_sent {
                tracing::warn!(
                    reservation_id = %receipt.reservation_id,
                    "Reservation stored but verification email was not sent"
                );
            }
            HttpResponse::Created().json(ReserveResponse {
                success: true,
                message: "Reservation created. Please check your email for verification code."
                    .to_string(),
                reservation_id: receipt.reservation_id,
            })
        }
        Err(error) => {
            tracing::warn!(email = %masked_email, error = %error, "Reservation rejected");
            handle_domain_error(&error)
        }
    }
}
