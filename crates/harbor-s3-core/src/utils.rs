//! Small helpers shared across operation handlers.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use rand::RngExt;

use crate::error::S3ServiceError;

/// Generate a new multipart upload ID: 64 hex characters of randomness.
#[must_use]
pub fn generate_upload_id() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill(&mut bytes);
    hex::encode(bytes)
}

/// Generate a request ID for response headers: 32 hex characters.
#[must_use]
pub fn generate_request_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Encode a listing position into an opaque continuation token.
#[must_use]
pub fn encode_continuation_token(key: &str) -> String {
    BASE64_STANDARD.encode(key)
}

/// Decode a continuation token back into a listing position.
///
/// # Errors
///
/// Returns [`S3ServiceError::InvalidArgument`] if the token is not valid
/// base64 or does not decode to UTF-8.
pub fn decode_continuation_token(token: &str) -> Result<String, S3ServiceError> {
    let bytes = BASE64_STANDARD
        .decode(token)
        .map_err(|_| S3ServiceError::InvalidArgument {
            message: "The continuation token provided is incorrect".to_owned(),
        })?;
    String::from_utf8(bytes).map_err(|_| S3ServiceError::InvalidArgument {
        message: "The continuation token provided is incorrect".to_owned(),
    })
}

/// Parse an HTTP `Range` header into an inclusive `(start, end)` byte pair.
///
/// Supports the three `bytes=` forms: `N-M`, `N-` (to end), and `-N`
/// (last N bytes). The end position is clamped to `content_length - 1`.
///
/// # Errors
///
/// Returns [`S3ServiceError::InvalidRange`] for malformed headers or ranges
/// that start beyond the end of the object.
pub fn parse_range_header(range: &str, content_length: u64) -> Result<(u64, u64), S3ServiceError> {
    let spec = range.strip_prefix("bytes=").ok_or(S3ServiceError::InvalidRange)?;

    let (start_str, end_str) = spec.split_once('-').ok_or(S3ServiceError::InvalidRange)?;

    if start_str.is_empty() {
        // Suffix form: last N bytes.
        let suffix_len: u64 = end_str.parse().map_err(|_| S3ServiceError::InvalidRange)?;
        if suffix_len == 0 || content_length == 0 {
            return Err(S3ServiceError::InvalidRange);
        }
        let start = content_length.saturating_sub(suffix_len);
        return Ok((start, content_length - 1));
    }

    let start: u64 = start_str.parse().map_err(|_| S3ServiceError::InvalidRange)?;
    if start >= content_length {
        return Err(S3ServiceError::InvalidRange);
    }

    let end = if end_str.is_empty() {
        content_length - 1
    } else {
        let end: u64 = end_str.parse().map_err(|_| S3ServiceError::InvalidRange)?;
        if end < start {
            return Err(S3ServiceError::InvalidRange);
        }
        end.min(content_length - 1)
    };

    Ok((start, end))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
