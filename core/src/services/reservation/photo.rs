//! Photo payload decoding and validation

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::domain::entities::Photo;
use crate::errors::ValidationError;

use super::types::PhotoUpload;

fn invalid(reason: impl Into<String>) -> ValidationError {
    ValidationError::InvalidPhoto {
        reason: reason.into(),
    }
}

/// Decode an uploaded photo, enforcing an `image/*` type and a size cap
pub fn decode_photo(upload: &PhotoUpload, max_bytes: usize) -> Result<Photo, ValidationError> {
    let data = upload.data.trim();

    let (embedded_type, payload) = match data.strip_prefix("data:") {
        Some(rest) => {
            let (header, payload) = rest
                .split_once(',')
                .ok_or_else(|| invalid("malformed data URL"))?;
            let mime = header
                .strip_suffix(";base64")
                .ok_or_else(|| invalid("data URL must be base64 encoded"))?;
            (Some(mime.to_string()), payload)
        }
        None => (None, data),
    };

    let content_type = upload
        .content_type
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .or(embedded_type)
        .ok_or_else(|| invalid("missing content type"))?
        .to_ascii_lowercase();

    if !content_type.starts_with("image/") || content_type.len() == "image/".len() {
        return Err(invalid("only image files are accepted"));
    }

    // Reject before decoding when the encoded form is already too large
    if payload.len() / 4 * 3 > max_bytes + 2 {
        return Err(invalid("photo exceeds the size limit"));
    }

    let bytes = STANDARD
        .decode(payload)
        .map_err(|_| invalid("photo is not valid base64"))?;

    if bytes.is_empty() {
        return Err(invalid("photo is empty"));
    }
    if bytes.len() > max_bytes {
        return Err(invalid("photo exceeds the size limit"));
    }

    Ok(Photo {
        file_name: upload
            .file_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string),
        content_type,
        data: bytes,
    })
}
