//! Request types for the verification service

/// A verification attempt as received from a client
#[derive(Debug, Clone)]
pub struct VerifyRequest {
    pub email: String,
    pub code: String,
    /// Caller IP, `"unknown"` when it cannot be determined
    pub ip_address: String,
}

impl VerifyRequest {
    pub fn new(email: impl Into<String>, code: impl Into<String>, ip_address: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            code: code.into(),
            ip_address: ip_address.into(),
        }
    }
}
