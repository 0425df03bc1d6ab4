//! Request and response bodies for the reservation endpoints.
//!
//! Field names are camelCase on the wire to match the web form.

use pr_core::domain::ReservationSummary;
use pr_core::services::{PhotoUpload, SubmitReservation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Photo attached to a reservation
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoPayload {
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
    /// Base64 payload or a `data:` URL
    #[serde(default)]
    pub data: String,
}

/// Body of `POST /api/reserve`
///
/// Missing fields deserialize as empty so the reservation service can
/// report which one is absent.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReserveRequest {
    #[serde(default)]
    #[validate(length(max = 100, message = "First name must be at most 100 characters"))]
    pub first_name: String,

    #[serde(default)]
    #[validate(length(max = 100, message = "Last name must be at most 100 characters"))]
    pub last_name: String,

    #[serde(default)]
    #[validate(length(max = 255, message = "Email must be at most 255 characters"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(max = 32, message = "Phone number must be at most 32 characters"))]
    pub phone_number: String,

    #[serde(default)]
    #[validate(length(max = 100, message = "Country must be at most 100 characters"))]
    pub country: String,

    #[serde(default)]
    pub photo: Option<PhotoPayload>,
}

impl From<ReserveRequest> for SubmitReservation {
    fn from(request: ReserveRequest) -> Self {
        SubmitReservation {
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            phone_number: request.phone_number,
            country: request.country,
            photo: request.photo.map(|photo| PhotoUpload {
                file_name: photo.file_name,
                content_type: photo.content_type,
                data: photo.data,
            }),
        }
    }
}

/// 201 body of `POST /api/reserve`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReserveResponse {
    pub success: bool,
    pub message: String,
    pub reservation_id: Uuid,
}

/// Body of `POST /api/verify`
///
/// No length caps here; the lockout check must see every attempt.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyCodeRequest {
    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub verification_code: String,
}

/// Public fields of a verified reservation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationView {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub country: String,
}

impl From<ReservationSummary> for ReservationView {
    fn from(summary: ReservationSummary) -> Self {
        Self {
            id: summary.id,
            first_name: summary.first_name,
            last_name: summary.last_name,
            phone_number: summary.phone_number,
            country: summary.country,
        }
    }
}

/// 200 body of `POST /api/verify`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyCodeResponse {
    pub success: bool,
    pub message: String,
    pub reservation: ReservationView,
}
