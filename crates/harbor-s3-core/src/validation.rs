//! Request validation.
//!
//! Bucket name rules follow the
//! [Amazon S3 naming documentation](https://docs.aws.amazon.com/AmazonS3/latest/userguide/bucketnamingrules.html).

use std::net::Ipv4Addr;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use digest::Digest;
use md5::Md5;

use crate::error::S3ServiceError;

/// Minimum bucket name length.
const MIN_BUCKET_NAME_LEN: usize = 3;

/// Maximum bucket name length.
const MAX_BUCKET_NAME_LEN: usize = 63;

/// Maximum object key length in bytes.
const MAX_KEY_BYTES: usize = 1024;

/// Validate an S3 bucket name.
///
/// Rules:
/// - 3-63 characters long
/// - Only lowercase letters, numbers, hyphens, and dots
/// - Must start and end with a letter or number
/// - No consecutive dots (`..`)
/// - Not formatted as an IPv4 address
///
/// # Errors
///
/// Returns [`S3ServiceError::InvalidBucketName`] if any rule is violated.
///
/// # Examples
///
/// ```
/// use harbor_s3_core::validation::validate_bucket_name;
///
/// assert!(validate_bucket_name("my-valid-bucket").is_ok());
/// assert!(validate_bucket_name("AB").is_err());
/// ```
pub fn validate_bucket_name(name: &str) -> Result<(), S3ServiceError> {
    let len = name.len();

    if !(MIN_BUCKET_NAME_LEN..=MAX_BUCKET_NAME_LEN).contains(&len) {
        return Err(S3ServiceError::InvalidBucketName {
            name: name.to_owned(),
            reason: format!(
                "Bucket name must be between {MIN_BUCKET_NAME_LEN} and {MAX_BUCKET_NAME_LEN} characters long"
            ),
        });
    }

    if !name
        .bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-' || b == b'.')
    {
        return Err(S3ServiceError::InvalidBucketName {
            name: name.to_owned(),
            reason: "Bucket name must only contain lowercase letters, numbers, hyphens, and dots"
                .to_owned(),
        });
    }

    let first = name.as_bytes()[0];
    let last = name.as_bytes()[len - 1];
    if !(first.is_ascii_lowercase() || first.is_ascii_digit())
        || !(last.is_ascii_lowercase() || last.is_ascii_digit())
    {
        return Err(S3ServiceError::InvalidBucketName {
            name: name.to_owned(),
            reason: "Bucket name must start and end with a letter or number".to_owned(),
        });
    }

    if name.contains("..") {
        return Err(S3ServiceError::InvalidBucketName {
            name: name.to_owned(),
            reason: "Bucket name must not contain consecutive dots".to_owned(),
        });
    }

    if name.parse::<Ipv4Addr>().is_ok() {
        return Err(S3ServiceError::InvalidBucketName {
            name: name.to_owned(),
            reason: "Bucket name must not be formatted as an IP address".to_owned(),
        });
    }

    Ok(())
}

/// Validate an S3 object key: 1-1024 bytes of UTF-8.
///
/// # Errors
///
/// Returns [`S3ServiceError::InvalidArgument`] if the key is empty or
/// exceeds 1024 bytes.
///
/// # Examples
///
/// ```
/// use harbor_s3_core::validation::validate_object_key;
///
/// assert!(validate_object_key("photos/2026/image.jpg").is_ok());
/// assert!(validate_object_key("").is_err());
/// ```
pub fn validate_object_key(key: &str) -> Result<(), S3ServiceError> {
    if key.is_empty() {
        return Err(S3ServiceError::InvalidArgument {
            message: "Object key must not be empty".to_owned(),
        });
    }

    if key.len() > MAX_KEY_BYTES {
        return Err(S3ServiceError::InvalidArgument {
            message: format!("Object key must not exceed {MAX_KEY_BYTES} bytes"),
        });
    }

    Ok(())
}

/// Validate a `Content-MD5` header against the request body.
///
/// The header carries the base64-encoded MD5 of the body. A missing header
/// is fine; a present one must decode and match.
///
/// # Errors
///
/// Returns [`S3ServiceError::InvalidArgument`] if the header is not valid
/// base64 or does not match the body digest.
pub fn validate_content_md5(content_md5: Option<&str>, body: &[u8]) -> Result<(), S3ServiceError> {
    let Some(expected) = content_md5 else {
        return Ok(());
    };

    let expected_digest =
        BASE64_STANDARD
            .decode(expected)
            .map_err(|_| S3ServiceError::InvalidArgument {
                message: "The Content-MD5 you specified is not valid".to_owned(),
            })?;

    let actual_digest = Md5::digest(body);
    if expected_digest != actual_digest.as_slice() {
        return Err(S3ServiceError::InvalidArgument {
            message: "The Content-MD5 you specified did not match what we received".to_owned(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_accept_valid_bucket_names() {
        for name in ["abc", "my-bucket", "bucket.with.dots", "0numeric9"] {
            assert!(validate_bucket_name(name).is_ok(), "{name} should be valid");
        }
        let max_len = "a".repeat(63);
        assert!(validate_bucket_name(&max_len).is_ok());
    }

    #[test]
    fn test_should_reject_bad_lengths() {
        assert!(validate_bucket_name("ab").is_err());
        let too_long = "a".repeat(64);
        assert!(validate_bucket_name(&too_long).is_err());
    }

    #[test]
    fn test_should_reject_bad_characters() {
        assert!(validate_bucket_name("MyBucket").is_err());
        assert!(validate_bucket_name("bucket_underscore").is_err());
        assert!(validate_bucket_name("bucket name").is_err());
    }

    #[test]
    fn test_should_reject_bad_boundaries() {
        assert!(validate_bucket_name("-starts-with-hyphen").is_err());
        assert!(validate_bucket_name("ends-with-hyphen-").is_err());
        assert!(validate_bucket_name(".starts-with-dot").is_err());
    }

    #[test]
    fn test_should_reject_consecutive_dots_and_ip_form() {
        assert!(validate_bucket_name("double..dot").is_err());
        assert!(validate_bucket_name("192.168.0.1").is_err());
    }

    #[test]
    fn test_should_validate_object_keys() {
        assert!(validate_object_key("a").is_ok());
        assert!(validate_object_key("nested/path/to/object.bin").is_ok());
        assert!(validate_object_key("").is_err());
        let too_long = "k".repeat(1025);
        assert!(validate_object_key(&too_long).is_err());
    }

    #[test]
    fn test_should_accept_matching_content_md5() {
        let body = b"hello world";
        let encoded = BASE64_STANDARD.encode(Md5::digest(body));
        assert!(validate_content_md5(Some(&encoded), body).is_ok());
        assert!(validate_content_md5(None, body).is_ok());
    }

    #[test]
    fn test_should_reject_mismatched_content_md5() {
        let encoded = BASE64_STANDARD.encode(Md5::digest(b"other body"));
        let result = validate_content_md5(Some(&encoded), b"hello world");
        assert!(matches!(
            result,
            Err(S3ServiceError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_should_reject_garbage_content_md5() {
        let result = validate_content_md5(Some("!!not-base64!!"), b"body");
        assert!(matches!(
            result,
            Err(S3ServiceError::InvalidArgument { .. })
        ));
    }
}
