//! The S3 operation enum.

use std::fmt;

/// Every REST operation the Harbor S3 surface supports.
///
/// The HTTP layer resolves incoming requests to one of these variants; the
/// server handler dispatches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum S3Operation {
    /// List all buckets (`GET /`).
    ListBuckets,
    /// Create a bucket (`PUT /{bucket}`).
    CreateBucket,
    /// Check bucket existence (`HEAD /{bucket}`).
    HeadBucket,
    /// Delete an empty bucket (`DELETE /{bucket}`).
    DeleteBucket,
    /// Return the bucket's region (`GET /{bucket}?location`).
    GetBucketLocation,
    /// List objects, v1 marker paging (`GET /{bucket}`).
    ListObjects,
    /// List objects, v2 continuation-token paging (`GET /{bucket}?list-type=2`).
    ListObjectsV2,
    /// List in-progress multipart uploads (`GET /{bucket}?uploads`).
    ListMultipartUploads,
    /// Store an object (`PUT /{bucket}/{key}`).
    PutObject,
    /// Fetch an object (`GET /{bucket}/{key}`).
    GetObject,
    /// Fetch object metadata (`HEAD /{bucket}/{key}`).
    HeadObject,
    /// Delete an object (`DELETE /{bucket}/{key}`).
    DeleteObject,
    /// Start a multipart upload (`POST /{bucket}/{key}?uploads`).
    CreateMultipartUpload,
    /// Upload one part (`PUT /{bucket}/{key}?partNumber=N&uploadId=ID`).
    UploadPart,
    /// Assemble the uploaded parts (`POST /{bucket}/{key}?uploadId=ID`).
    CompleteMultipartUpload,
    /// Abort an upload (`DELETE /{bucket}/{key}?uploadId=ID`).
    AbortMultipartUpload,
    /// List the parts of an upload (`GET /{bucket}/{key}?uploadId=ID`).
    ListParts,
}

impl S3Operation {
    /// Returns the canonical operation name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ListBuckets => "ListBuckets",
            Self::CreateBucket => "CreateBucket",
            Self::HeadBucket => "HeadBucket",
            Self::DeleteBucket => "DeleteBucket",
            Self::GetBucketLocation => "GetBucketLocation",
            Self::ListObjects => "ListObjects",
            Self::ListObjectsV2 => "ListObjectsV2",
            Self::ListMultipartUploads => "ListMultipartUploads",
            Self::PutObject => "PutObject",
            Self::GetObject => "GetObject",
            Self::HeadObject => "HeadObject",
            Self::DeleteObject => "DeleteObject",
            Self::CreateMultipartUpload => "CreateMultipartUpload",
            Self::UploadPart => "UploadPart",
            Self::CompleteMultipartUpload => "CompleteMultipartUpload",
            Self::AbortMultipartUpload => "AbortMultipartUpload",
            Self::ListParts => "ListParts",
        }
    }

    /// Parse an operation from its canonical name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ListBuckets" => Some(Self::ListBuckets),
            "CreateBucket" => Some(Self::CreateBucket),
            "HeadBucket" => Some(Self::HeadBucket),
            "DeleteBucket" => Some(Self::DeleteBucket),
            "GetBucketLocation" => Some(Self::GetBucketLocation),
            "ListObjects" => Some(Self::ListObjects),
            "ListObjectsV2" => Some(Self::ListObjectsV2),
            "ListMultipartUploads" => Some(Self::ListMultipartUploads),
            "PutObject" => Some(Self::PutObject),
            "GetObject" => Some(Self::GetObject),
            "HeadObject" => Some(Self::HeadObject),
            "DeleteObject" => Some(Self::DeleteObject),
            "CreateMultipartUpload" => Some(Self::CreateMultipartUpload),
            "UploadPart" => Some(Self::UploadPart),
            "CompleteMultipartUpload" => Some(Self::CompleteMultipartUpload),
            "AbortMultipartUpload" => Some(Self::AbortMultipartUpload),
            "ListParts" => Some(Self::ListParts),
            _ => None,
        }
    }
}

impl fmt::Display for S3Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
