//! Bodies for the mail diagnostics endpoint.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/test-email`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestEmailRequest {
    /// `"verification"` or `"stats"`
    #[serde(rename = "type", default)]
    pub kind: String,

    /// Recipient override
    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub first_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestEmailResponse {
    pub success: bool,
    pub message: String,
    pub sent_to: String,
    pub message_id: String,
}
