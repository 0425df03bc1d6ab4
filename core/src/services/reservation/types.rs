//! Input and output types for reservation submission

use uuid::Uuid;

/// Photo as received from the client
#[derive(Debug, Clone, Default)]
pub struct PhotoUpload {
    pub file_name: Option<String>,
    /// MIME type; may be omitted when `data` is a `data:` URL
    pub content_type: Option<String>,
    /// Base64 payload or a full `data:<mime>;base64,<payload>` URL
    pub data: String,
}

/// Raw applicant submission
#[derive(Debug, Clone, Default)]
pub struct SubmitReservation {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub country: String,
    pub photo: Option<PhotoUpload>,
}

/// Result of a successful submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationReceipt {
    pub reservation_id: Uuid,
    /// Whether the verification email was handed to the transport
    pub email_sent: bool,
}
