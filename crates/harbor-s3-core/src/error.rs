//! Internal service errors and their mapping to S3 error responses.
//!
//! Operation handlers work with [`S3ServiceError`], which carries enough
//! context (bucket, key, upload ID) for logs. At the API boundary each
//! variant is converted into a [`harbor_s3_model::S3Error`] carrying the
//! wire-level code, message, and HTTP status.

use harbor_s3_model::S3Error;
use thiserror::Error;

/// Result alias for service-level operations.
pub type S3ServiceResult<T> = Result<T, S3ServiceError>;

/// Errors produced by the storage core.
#[derive(Debug, Error)]
pub enum S3ServiceError {
    /// The bucket does not exist.
    #[error("bucket not found: {bucket}")]
    NoSuchBucket {
        /// Name of the missing bucket.
        bucket: String,
    },

    /// A bucket with this name already exists.
    #[error("bucket already exists: {bucket}")]
    BucketAlreadyExists {
        /// Name of the conflicting bucket.
        bucket: String,
    },

    /// The bucket still contains objects or in-progress uploads.
    #[error("bucket not empty: {bucket}")]
    BucketNotEmpty {
        /// Name of the non-empty bucket.
        bucket: String,
    },

    /// The object key does not exist in the bucket.
    #[error("key not found: {key}")]
    NoSuchKey {
        /// The missing object key.
        key: String,
    },

    /// The multipart upload ID does not exist.
    #[error("multipart upload not found: {upload_id}")]
    NoSuchUpload {
        /// The missing upload ID.
        upload_id: String,
    },

    /// A part named in a completion manifest was never uploaded, or its
    /// ETag does not match the uploaded part.
    #[error("one or more specified parts could not be found")]
    InvalidPart,

    /// The completion manifest was empty or not in ascending part order.
    #[error("part list was empty or not in ascending order")]
    InvalidPartOrder,

    /// The requested byte range cannot be satisfied.
    #[error("requested range not satisfiable")]
    InvalidRange,

    /// The bucket name violates S3 naming rules.
    #[error("invalid bucket name {name}: {reason}")]
    InvalidBucketName {
        /// The offending name.
        name: String,
        /// Which rule was violated.
        reason: String,
    },

    /// A request parameter was invalid.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// Description of the problem.
        message: String,
    },

    /// Unexpected internal failure (I/O, poisoned state).
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl S3ServiceError {
    /// Convert this internal error into the wire-level [`S3Error`].
    #[must_use]
    pub fn into_s3_error(self) -> S3Error {
        match self {
            Self::NoSuchBucket { bucket } => S3Error::no_such_bucket(bucket),
            Self::BucketAlreadyExists { bucket } => S3Error::bucket_already_exists(bucket),
            Self::BucketNotEmpty { bucket } => S3Error::bucket_not_empty(bucket),
            Self::NoSuchKey { key } => S3Error::no_such_key(key),
            Self::NoSuchUpload { upload_id } => S3Error::no_such_upload(upload_id),
            Self::InvalidPart => {
                S3Error::new(harbor_s3_model::S3ErrorCode::InvalidPart)
            }
            Self::InvalidPartOrder => {
                S3Error::new(harbor_s3_model::S3ErrorCode::InvalidPartOrder)
            }
            Self::InvalidRange => S3Error::new(harbor_s3_model::S3ErrorCode::InvalidRange),
            Self::InvalidBucketName { name, reason } => S3Error::with_message(
                harbor_s3_model::S3ErrorCode::InvalidBucketName,
                format!("{reason}: {name}"),
            ),
            Self::InvalidArgument { message } => S3Error::invalid_argument(message),
            Self::Internal(err) => S3Error::internal_error(err.to_string()),
        }
    }
}

impl From<S3ServiceError> for S3Error {
    fn from(err: S3ServiceError) -> Self {
        err.into_s3_error()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use harbor_s3_model::S3ErrorCode;

    use super::*;

    #[test]
    fn test_should_map_bucket_errors() {
        let err = S3ServiceError::NoSuchBucket {
            bucket: "ghost".to_owned(),
        }
        .into_s3_error();
        assert_eq!(err.code, S3ErrorCode::NoSuchBucket);
        assert_eq!(err.status_code, http::StatusCode::NOT_FOUND);

        let err = S3ServiceError::BucketAlreadyExists {
            bucket: "taken".to_owned(),
        }
        .into_s3_error();
        assert_eq!(err.code, S3ErrorCode::BucketAlreadyExists);
        assert_eq!(err.status_code, http::StatusCode::CONFLICT);

        let err = S3ServiceError::BucketNotEmpty {
            bucket: "full".to_owned(),
        }
        .into_s3_error();
        assert_eq!(err.code, S3ErrorCode::BucketNotEmpty);
        assert_eq!(err.status_code, http::StatusCode::CONFLICT);
    }

    #[test]
    fn test_should_map_multipart_errors() {
        let err = S3ServiceError::InvalidPart.into_s3_error();
        assert_eq!(err.code, S3ErrorCode::InvalidPart);

        let err = S3ServiceError::InvalidPartOrder.into_s3_error();
        assert_eq!(err.code, S3ErrorCode::InvalidPartOrder);

        let err = S3ServiceError::NoSuchUpload {
            upload_id: "abc".to_owned(),
        }
        .into_s3_error();
        assert_eq!(err.code, S3ErrorCode::NoSuchUpload);
        assert_eq!(err.status_code, http::StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_should_include_reason_in_invalid_bucket_name() {
        let err = S3ServiceError::InvalidBucketName {
            name: "AB".to_owned(),
            reason: "too short".to_owned(),
        }
        .into_s3_error();
        assert_eq!(err.code, S3ErrorCode::InvalidBucketName);
        assert!(err.message.contains("too short"));
        assert!(err.message.contains("AB"));
    }

    #[test]
    fn test_should_wrap_internal_errors() {
        let err: S3ServiceError = anyhow::anyhow!("disk on fire").into();
        let s3_err = err.into_s3_error();
        assert_eq!(s3_err.code, S3ErrorCode::InternalError);
        assert!(s3_err.message.contains("disk on fire"));
    }

    #[test]
    fn test_should_display_with_context() {
        let err = S3ServiceError::NoSuchKey {
            key: "photos/cat.jpg".to_owned(),
        };
        assert_eq!(err.to_string(), "key not found: photos/cat.jpg");
    }
}
