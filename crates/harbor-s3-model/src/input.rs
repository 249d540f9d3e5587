//! Typed input structs for S3 operations.
//!
//! The HTTP layer decodes an incoming request (path, query string, headers,
//! body) into one of these structs before handing it to the service core.
//! Field order matches the alphabetical convention used in [`crate::output`].

use std::collections::HashMap;

use bytes::Bytes;

use crate::types::{CompletedMultipartUpload, CreateBucketConfiguration, StorageClass};

/// Input for the `CreateBucket` operation.
#[derive(Debug, Clone, Default)]
pub struct CreateBucketInput {
    /// The name of the bucket to create.
    pub bucket: String,
    /// Optional configuration carried in the request body.
    pub create_bucket_configuration: Option<CreateBucketConfiguration>,
}

/// Input for the `DeleteBucket` operation.
#[derive(Debug, Clone, Default)]
pub struct DeleteBucketInput {
    /// The name of the bucket to delete.
    pub bucket: String,
}

/// Input for the `HeadBucket` operation.
#[derive(Debug, Clone, Default)]
pub struct HeadBucketInput {
    /// The name of the bucket to check.
    pub bucket: String,
}

/// Input for the `GetBucketLocation` operation.
#[derive(Debug, Clone, Default)]
pub struct GetBucketLocationInput {
    /// The name of the bucket.
    pub bucket: String,
}

/// Input for the `ListBuckets` operation.
#[derive(Debug, Clone, Default)]
pub struct ListBucketsInput {}

/// Input for the `PutObject` operation.
#[derive(Debug, Clone, Default)]
pub struct PutObjectInput {
    /// The object data.
    pub body: Option<Bytes>,
    /// The bucket to write into.
    pub bucket: String,
    /// Base64-encoded MD5 of the body, if the client sent `Content-MD5`.
    pub content_md5: Option<String>,
    /// MIME type of the object.
    pub content_type: Option<String>,
    /// The object key.
    pub key: String,
    /// User-defined metadata from `x-amz-meta-*` headers.
    pub metadata: HashMap<String, String>,
    /// Requested storage class.
    pub storage_class: Option<StorageClass>,
}

/// Input for the `GetObject` operation.
#[derive(Debug, Clone, Default)]
pub struct GetObjectInput {
    /// The bucket containing the object.
    pub bucket: String,
    /// The object key.
    pub key: String,
    /// Raw `Range` header value, if any.
    pub range: Option<String>,
}

/// Input for the `HeadObject` operation.
#[derive(Debug, Clone, Default)]
pub struct HeadObjectInput {
    /// The bucket containing the object.
    pub bucket: String,
    /// The object key.
    pub key: String,
}

/// Input for the `DeleteObject` operation.
#[derive(Debug, Clone, Default)]
pub struct DeleteObjectInput {
    /// The bucket containing the object.
    pub bucket: String,
    /// The object key.
    pub key: String,
}

/// Input for the `ListObjects` (v1) operation.
#[derive(Debug, Clone, Default)]
pub struct ListObjectsInput {
    /// The bucket to list.
    pub bucket: String,
    /// Character used to group keys.
    pub delimiter: Option<String>,
    /// Key to start listing after.
    pub marker: Option<String>,
    /// Maximum number of keys to return.
    pub max_keys: Option<i32>,
    /// Limits the response to keys beginning with this prefix.
    pub prefix: Option<String>,
}

/// Input for the `ListObjectsV2` operation.
#[derive(Debug, Clone, Default)]
pub struct ListObjectsV2Input {
    /// The bucket to list.
    pub bucket: String,
    /// Opaque token from a previous truncated response.
    pub continuation_token: Option<String>,
    /// Character used to group keys.
    pub delimiter: Option<String>,
    /// Whether to include owner information in the response.
    pub fetch_owner: Option<bool>,
    /// Maximum number of keys to return.
    pub max_keys: Option<i32>,
    /// Limits the response to keys beginning with this prefix.
    pub prefix: Option<String>,
    /// Key to start listing after (ignored when a continuation token is set).
    pub start_after: Option<String>,
}

/// Input for the `CreateMultipartUpload` operation.
#[derive(Debug, Clone, Default)]
pub struct CreateMultipartUploadInput {
    /// The bucket the final object will be written into.
    pub bucket: String,
    /// MIME type of the final object.
    pub content_type: Option<String>,
    /// The key of the final object.
    pub key: String,
    /// User-defined metadata from `x-amz-meta-*` headers.
    pub metadata: HashMap<String, String>,
    /// Requested storage class.
    pub storage_class: Option<StorageClass>,
}

/// Input for the `UploadPart` operation.
#[derive(Debug, Clone, Default)]
pub struct UploadPartInput {
    /// The part data.
    pub body: Option<Bytes>,
    /// The bucket of the multipart upload.
    pub bucket: String,
    /// The key of the multipart upload.
    pub key: String,
    /// Part number (1-10000).
    pub part_number: i32,
    /// The upload this part belongs to.
    pub upload_id: String,
}

/// Input for the `CompleteMultipartUpload` operation.
#[derive(Debug, Clone, Default)]
pub struct CompleteMultipartUploadInput {
    /// The bucket of the multipart upload.
    pub bucket: String,
    /// The key of the multipart upload.
    pub key: String,
    /// The part manifest decoded from the request body.
    pub multipart_upload: Option<CompletedMultipartUpload>,
    /// The upload to complete.
    pub upload_id: String,
}

/// Input for the `AbortMultipartUpload` operation.
#[derive(Debug, Clone, Default)]
pub struct AbortMultipartUploadInput {
    /// The bucket of the multipart upload.
    pub bucket: String,
    /// The key of the multipart upload.
    pub key: String,
    /// The upload to abort.
    pub upload_id: String,
}

/// Input for the `ListParts` operation.
#[derive(Debug, Clone, Default)]
pub struct ListPartsInput {
    /// The bucket of the multipart upload.
    pub bucket: String,
    /// The key of the multipart upload.
    pub key: String,
    /// Maximum number of parts to return.
    pub max_parts: Option<i32>,
    /// Part number after which listing begins.
    pub part_number_marker: Option<String>,
    /// The upload whose parts are listed.
    pub upload_id: String,
}

/// Input for the `ListMultipartUploads` operation.
#[derive(Debug, Clone, Default)]
pub struct ListMultipartUploadsInput {
    /// The bucket to list uploads for.
    pub bucket: String,
    /// Character used to group keys.
    pub delimiter: Option<String>,
    /// Key after which listing begins.
    pub key_marker: Option<String>,
    /// Maximum number of uploads to return.
    pub max_uploads: Option<i32>,
    /// Limits the response to uploads for keys beginning with this prefix.
    pub prefix: Option<String>,
    /// Upload ID after which listing begins, for the key equal to `key_marker`.
    pub upload_id_marker: Option<String>,
}
