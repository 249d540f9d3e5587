//! HTTP request to S3 Input struct deserialization.
//!
//! [`FromS3Request`] converts raw HTTP request parts (headers, query
//! parameters, routing labels, body) into the typed Input structs defined in
//! `harbor-s3-model`. Field extraction follows the S3 REST conventions:
//!
//! - `x-amz-*` and standard headers map to header fields
//! - query parameters map to query fields
//! - the routing context supplies the bucket and key labels
//! - the body carries raw object bytes or an XML document

use std::collections::HashMap;
use std::str::FromStr;

use bytes::Bytes;
use harbor_s3_model::error::{S3Error, S3ErrorCode};
use harbor_s3_model::types::StorageClass;
use harbor_s3_xml::from_xml;

/// Trait for extracting an S3 input struct from HTTP request components.
pub trait FromS3Request: Sized {
    /// Extract the input from HTTP request parts.
    ///
    /// # Errors
    ///
    /// Returns an `S3Error` if required fields are missing or field values
    /// cannot be parsed.
    fn from_s3_request(
        parts: &http::request::Parts,
        bucket: Option<&str>,
        key: Option<&str>,
        query_params: &[(String, String)],
        body: Bytes,
    ) -> Result<Self, S3Error>;
}

// ---------------------------------------------------------------------------
// Helpers for extracting typed values from HTTP request parts
// ---------------------------------------------------------------------------

/// Extract a header value as a string.
pub fn header_str(parts: &http::request::Parts, name: &str) -> Option<String> {
    parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToOwned::to_owned)
}

/// Get a query parameter value by name.
#[must_use]
pub fn query_param(params: &[(String, String)], name: &str) -> Option<String> {
    params
        .iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.clone())
}

/// Get a query parameter and parse it into a type implementing `FromStr`.
#[must_use]
pub fn query_param_parse<T: FromStr>(params: &[(String, String)], name: &str) -> Option<T> {
    params
        .iter()
        .find(|(k, _)| k == name)
        .and_then(|(_, v)| v.parse().ok())
}

/// Collect all `x-amz-meta-*` headers into a metadata map.
///
/// Map keys are the portion of the header name after `x-amz-meta-`.
pub fn collect_metadata(parts: &http::request::Parts) -> HashMap<String, String> {
    let prefix = "x-amz-meta-";
    parts
        .headers
        .iter()
        .filter_map(|(name, value)| {
            let meta_key = name.as_str().strip_prefix(prefix)?;
            let meta_value = value.to_str().ok()?;
            Some((meta_key.to_owned(), meta_value.to_owned()))
        })
        .collect()
}

fn require_bucket(bucket: Option<&str>) -> Result<String, S3Error> {
    bucket.map(ToOwned::to_owned).ok_or_else(|| {
        S3Error::with_message(S3ErrorCode::InvalidRequest, "Bucket name is required")
    })
}

fn require_key(key: Option<&str>) -> Result<String, S3Error> {
    key.map(ToOwned::to_owned)
        .ok_or_else(|| S3Error::with_message(S3ErrorCode::InvalidRequest, "Object key is required"))
}

fn require_query_param(params: &[(String, String)], name: &str) -> Result<String, S3Error> {
    query_param(params, name).ok_or_else(|| {
        S3Error::with_message(
            S3ErrorCode::InvalidRequest,
            format!("Missing required query parameter: {name}"),
        )
    })
}

fn header_storage_class(parts: &http::request::Parts) -> Option<StorageClass> {
    parts
        .headers
        .get("x-amz-storage-class")
        .and_then(|v| v.to_str().ok())
        .map(StorageClass::from)
}

/// Parse an XML body into a typed value, returning an `S3Error` on failure.
fn parse_xml_body<T: harbor_s3_xml::S3Deserialize>(body: &Bytes) -> Result<T, S3Error> {
    from_xml(body).map_err(|e| S3Error::malformed_xml(format!("Failed to parse XML body: {e}")))
}

// ---------------------------------------------------------------------------
// Macros to reduce boilerplate for simple inputs
// ---------------------------------------------------------------------------

/// Implement `FromS3Request` for a struct with a single `bucket` field.
macro_rules! impl_bucket_only_input {
    ($ty:ty) => {
        impl FromS3Request for $ty {
            fn from_s3_request(
                _parts: &http::request::Parts,
                bucket: Option<&str>,
                _key: Option<&str>,
                _query_params: &[(String, String)],
                _body: Bytes,
            ) -> Result<Self, S3Error> {
                Ok(Self {
                    bucket: require_bucket(bucket)?,
                })
            }
        }
    };
}

/// Implement `FromS3Request` for a struct with only `bucket` and `key`.
macro_rules! impl_bucket_key_input {
    ($ty:ty) => {
        impl FromS3Request for $ty {
            fn from_s3_request(
                _parts: &http::request::Parts,
                bucket: Option<&str>,
                key: Option<&str>,
                _query_params: &[(String, String)],
                _body: Bytes,
            ) -> Result<Self, S3Error> {
                Ok(Self {
                    bucket: require_bucket(bucket)?,
                    key: require_key(key)?,
                })
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Implementations
// ---------------------------------------------------------------------------

#[allow(clippy::wildcard_imports)] // Every input type is implemented below.
use harbor_s3_model::input::*;

impl_bucket_only_input!(DeleteBucketInput);
impl_bucket_only_input!(HeadBucketInput);
impl_bucket_only_input!(GetBucketLocationInput);

impl_bucket_key_input!(HeadObjectInput);
impl_bucket_key_input!(DeleteObjectInput);

impl FromS3Request for ListBucketsInput {
    fn from_s3_request(
        _parts: &http::request::Parts,
        _bucket: Option<&str>,
        _key: Option<&str>,
        _query_params: &[(String, String)],
        _body: Bytes,
    ) -> Result<Self, S3Error> {
        Ok(Self {})
    }
}

impl FromS3Request for CreateBucketInput {
    fn from_s3_request(
        _parts: &http::request::Parts,
        bucket: Option<&str>,
        _key: Option<&str>,
        _query_params: &[(String, String)],
        body: Bytes,
    ) -> Result<Self, S3Error> {
        // The CreateBucketConfiguration body is optional.
        let create_bucket_configuration = if body.is_empty() {
            None
        } else {
            Some(parse_xml_body(&body)?)
        };
        Ok(Self {
            bucket: require_bucket(bucket)?,
            create_bucket_configuration,
        })
    }
}

impl FromS3Request for PutObjectInput {
    fn from_s3_request(
        parts: &http::request::Parts,
        bucket: Option<&str>,
        key: Option<&str>,
        _query_params: &[(String, String)],
        body: Bytes,
    ) -> Result<Self, S3Error> {
        Ok(Self {
            body: Some(body),
            bucket: require_bucket(bucket)?,
            content_md5: header_str(parts, "content-md5"),
            content_type: header_str(parts, "content-type"),
            key: require_key(key)?,
            metadata: collect_metadata(parts),
            storage_class: header_storage_class(parts),
        })
    }
}

impl FromS3Request for GetObjectInput {
    fn from_s3_request(
        parts: &http::request::Parts,
        bucket: Option<&str>,
        key: Option<&str>,
        _query_params: &[(String, String)],
        _body: Bytes,
    ) -> Result<Self, S3Error> {
        Ok(Self {
            bucket: require_bucket(bucket)?,
            key: require_key(key)?,
            range: header_str(parts, "range"),
        })
    }
}

impl FromS3Request for ListObjectsInput {
    fn from_s3_request(
        _parts: &http::request::Parts,
        bucket: Option<&str>,
        _key: Option<&str>,
        query_params: &[(String, String)],
        _body: Bytes,
    ) -> Result<Self, S3Error> {
        Ok(Self {
            bucket: require_bucket(bucket)?,
            delimiter: query_param(query_params, "delimiter"),
            marker: query_param(query_params, "marker"),
            max_keys: query_param_parse(query_params, "max-keys"),
            prefix: query_param(query_params, "prefix"),
        })
    }
}

impl FromS3Request for ListObjectsV2Input {
    fn from_s3_request(
        _parts: &http::request::Parts,
        bucket: Option<&str>,
        _key: Option<&str>,
        query_params: &[(String, String)],
        _body: Bytes,
    ) -> Result<Self, S3Error> {
        Ok(Self {
            bucket: require_bucket(bucket)?,
            continuation_token: query_param(query_params, "continuation-token"),
            delimiter: query_param(query_params, "delimiter"),
            fetch_owner: query_param_parse(query_params, "fetch-owner"),
            max_keys: query_param_parse(query_params, "max-keys"),
            prefix: query_param(query_params, "prefix"),
            start_after: query_param(query_params, "start-after"),
        })
    }
}

impl FromS3Request for CreateMultipartUploadInput {
    fn from_s3_request(
        parts: &http::request::Parts,
        bucket: Option<&str>,
        key: Option<&str>,
        _query_params: &[(String, String)],
        _body: Bytes,
    ) -> Result<Self, S3Error> {
        Ok(Self {
            bucket: require_bucket(bucket)?,
            content_type: header_str(parts, "content-type"),
            key: require_key(key)?,
            metadata: collect_metadata(parts),
            storage_class: header_storage_class(parts),
        })
    }
}

impl FromS3Request for UploadPartInput {
    fn from_s3_request(
        _parts: &http::request::Parts,
        bucket: Option<&str>,
        key: Option<&str>,
        query_params: &[(String, String)],
        body: Bytes,
    ) -> Result<Self, S3Error> {
        let part_number_raw = require_query_param(query_params, "partNumber")?;
        let part_number = part_number_raw.parse().map_err(|_| {
            S3Error::invalid_argument(format!("Invalid part number: {part_number_raw}"))
        })?;
        Ok(Self {
            body: Some(body),
            bucket: require_bucket(bucket)?,
            key: require_key(key)?,
            part_number,
            upload_id: require_query_param(query_params, "uploadId")?,
        })
    }
}

impl FromS3Request for CompleteMultipartUploadInput {
    fn from_s3_request(
        _parts: &http::request::Parts,
        bucket: Option<&str>,
        key: Option<&str>,
        query_params: &[(String, String)],
        body: Bytes,
    ) -> Result<Self, S3Error> {
        let multipart_upload = if body.is_empty() {
            None
        } else {
            Some(parse_xml_body(&body)?)
        };
        Ok(Self {
            bucket: require_bucket(bucket)?,
            key: require_key(key)?,
            multipart_upload,
            upload_id: require_query_param(query_params, "uploadId")?,
        })
    }
}

impl FromS3Request for AbortMultipartUploadInput {
    fn from_s3_request(
        _parts: &http::request::Parts,
        bucket: Option<&str>,
        key: Option<&str>,
        query_params: &[(String, String)],
        _body: Bytes,
    ) -> Result<Self, S3Error> {
        Ok(Self {
            bucket: require_bucket(bucket)?,
            key: require_key(key)?,
            upload_id: require_query_param(query_params, "uploadId")?,
        })
    }
}

impl FromS3Request for ListPartsInput {
    fn from_s3_request(
        _parts: &http::request::Parts,
        bucket: Option<&str>,
        key: Option<&str>,
        query_params: &[(String, String)],
        _body: Bytes,
    ) -> Result<Self, S3Error> {
        Ok(Self {
            bucket: require_bucket(bucket)?,
            key: require_key(key)?,
            max_parts: query_param_parse(query_params, "max-parts"),
            part_number_marker: query_param(query_params, "part-number-marker"),
            upload_id: require_query_param(query_params, "uploadId")?,
        })
    }
}

impl FromS3Request for ListMultipartUploadsInput {
    fn from_s3_request(
        _parts: &http::request::Parts,
        bucket: Option<&str>,
        _key: Option<&str>,
        query_params: &[(String, String)],
        _body: Bytes,
    ) -> Result<Self, S3Error> {
        Ok(Self {
            bucket: require_bucket(bucket)?,
            delimiter: query_param(query_params, "delimiter"),
            key_marker: query_param(query_params, "key-marker"),
            max_uploads: query_param_parse(query_params, "max-uploads"),
            prefix: query_param(query_params, "prefix"),
            upload_id_marker: query_param(query_params, "upload-id-marker"),
        })
    }
}
