//! S3 Output struct to HTTP response serialization.
//!
//! [`IntoS3Response`] converts the typed Output structs from
//! `harbor-s3-model` into HTTP responses with the right status code, headers,
//! and body. Response categories:
//!
//! - **Header-only**: write operations returning metadata in headers
//!   (`PutObject`, `UploadPart`, `HeadBucket`).
//! - **XML body**: list operations and multipart results, serialized by
//!   `harbor-s3-xml`.
//! - **Object body**: `GetObject` passes the object bytes through.
//! - **Empty**: deletes and aborts answer 204 No Content.

use bytes::Bytes;
use http::header::HeaderValue;
use harbor_s3_model::error::S3Error;
use harbor_s3_xml::{S3Serialize, to_xml};

use crate::body::S3ResponseBody;

/// Trait for converting an S3 output struct into an HTTP response.
pub trait IntoS3Response {
    /// Convert this output into an HTTP response.
    ///
    /// # Errors
    ///
    /// Returns an `S3Error` if the response cannot be constructed.
    fn into_s3_response(self) -> Result<http::Response<S3ResponseBody>, S3Error>;
}

// ---------------------------------------------------------------------------
// Helpers for building responses
// ---------------------------------------------------------------------------

/// Set an optional header on a response builder if the value is `Some`.
fn set_optional_header(
    builder: http::response::Builder,
    name: &str,
    value: Option<&str>,
) -> http::response::Builder {
    if let Some(v) = value {
        if let Ok(hv) = HeaderValue::from_str(v) {
            return builder.header(name, hv);
        }
    }
    builder
}

/// Set an optional integer header.
fn set_optional_int_header(
    builder: http::response::Builder,
    name: &str,
    value: Option<i64>,
) -> http::response::Builder {
    if let Some(v) = value {
        return builder.header(name, v);
    }
    builder
}

/// Set an optional HTTP date header from a `DateTime<Utc>`.
fn set_optional_timestamp_header(
    builder: http::response::Builder,
    name: &str,
    value: Option<&chrono::DateTime<chrono::Utc>>,
) -> http::response::Builder {
    if let Some(v) = value {
        let formatted = v.format("%a, %d %b %Y %H:%M:%S GMT").to_string();
        if let Ok(hv) = HeaderValue::from_str(&formatted) {
            return builder.header(name, hv);
        }
    }
    builder
}

/// Set metadata prefix headers from a map.
fn set_metadata_headers(
    mut builder: http::response::Builder,
    metadata: &std::collections::HashMap<String, String>,
) -> http::response::Builder {
    for (key, value) in metadata {
        let header_name = format!("x-amz-meta-{key}");
        if let Ok(hv) = HeaderValue::from_str(value) {
            builder = builder.header(header_name, hv);
        }
    }
    builder
}

/// Build a response from a builder, converting build errors to `S3Error`.
fn build_response(
    builder: http::response::Builder,
    body: S3ResponseBody,
) -> Result<http::Response<S3ResponseBody>, S3Error> {
    builder
        .body(body)
        .map_err(|e| S3Error::internal_error(format!("failed to build HTTP response: {e}")))
}

/// Build a 200 response with an XML body serialized from `value`.
fn xml_response<T: S3Serialize>(
    root_element: &str,
    value: &T,
) -> Result<http::Response<S3ResponseBody>, S3Error> {
    let xml = to_xml(root_element, value)
        .map_err(|e| S3Error::internal_error(format!("failed to serialize XML: {e}")))?;
    let builder = http::Response::builder()
        .status(http::StatusCode::OK)
        .header("Content-Type", "application/xml");
    build_response(builder, S3ResponseBody::from_xml(xml))
}

/// Produce a 204 No Content response, used by deletes and aborts.
#[must_use]
pub fn no_content_response() -> http::Response<S3ResponseBody> {
    http::Response::builder()
        .status(http::StatusCode::NO_CONTENT)
        .body(S3ResponseBody::empty())
        .unwrap_or_else(|_| http::Response::new(S3ResponseBody::empty()))
}

// ---------------------------------------------------------------------------
// Implementations
// ---------------------------------------------------------------------------

#[allow(clippy::wildcard_imports)] // Every output type is implemented below.
use harbor_s3_model::output::*;

// --- Bucket operations ---

impl IntoS3Response for CreateBucketOutput {
    fn into_s3_response(self) -> Result<http::Response<S3ResponseBody>, S3Error> {
        let mut builder = http::Response::builder().status(http::StatusCode::OK);
        builder = set_optional_header(builder, "Location", self.location.as_deref());
        build_response(builder, S3ResponseBody::empty())
    }
}

impl IntoS3Response for HeadBucketOutput {
    fn into_s3_response(self) -> Result<http::Response<S3ResponseBody>, S3Error> {
        let mut builder = http::Response::builder().status(http::StatusCode::OK);
        builder = set_optional_header(builder, "x-amz-bucket-region", self.bucket_region.as_deref());
        build_response(builder, S3ResponseBody::empty())
    }
}

impl IntoS3Response for GetBucketLocationOutput {
    fn into_s3_response(self) -> Result<http::Response<S3ResponseBody>, S3Error> {
        xml_response("LocationConstraint", &self)
    }
}

impl IntoS3Response for ListBucketsOutput {
    fn into_s3_response(self) -> Result<http::Response<S3ResponseBody>, S3Error> {
        xml_response("ListAllMyBucketsResult", &self)
    }
}

// --- Object operations ---

impl IntoS3Response for PutObjectOutput {
    fn into_s3_response(self) -> Result<http::Response<S3ResponseBody>, S3Error> {
        let mut builder = http::Response::builder().status(http::StatusCode::OK);
        builder = set_optional_header(builder, "ETag", self.e_tag.as_deref());
        build_response(builder, S3ResponseBody::empty())
    }
}

impl IntoS3Response for GetObjectOutput {
    fn into_s3_response(self) -> Result<http::Response<S3ResponseBody>, S3Error> {
        // A Content-Range means a range request was satisfied: 206.
        let status = if self.content_range.is_some() {
            http::StatusCode::PARTIAL_CONTENT
        } else {
            http::StatusCode::OK
        };

        let mut builder = http::Response::builder().status(status);
        builder = set_optional_header(builder, "accept-ranges", self.accept_ranges.as_deref());
        builder = set_optional_int_header(builder, "Content-Length", self.content_length);
        builder = set_optional_header(builder, "Content-Range", self.content_range.as_deref());
        builder = set_optional_header(builder, "Content-Type", self.content_type.as_deref());
        builder = set_optional_header(builder, "ETag", self.e_tag.as_deref());
        builder = set_optional_timestamp_header(builder, "Last-Modified", self.last_modified.as_ref());
        builder = set_metadata_headers(builder, &self.metadata);

        let body = match self.body {
            Some(data) => S3ResponseBody::from_bytes(data),
            None => S3ResponseBody::empty(),
        };
        build_response(builder, body)
    }
}

impl IntoS3Response for HeadObjectOutput {
    fn into_s3_response(self) -> Result<http::Response<S3ResponseBody>, S3Error> {
        let mut builder = http::Response::builder().status(http::StatusCode::OK);
        builder = set_optional_header(builder, "accept-ranges", self.accept_ranges.as_deref());
        builder = set_optional_int_header(builder, "Content-Length", self.content_length);
        builder = set_optional_header(builder, "Content-Type", self.content_type.as_deref());
        builder = set_optional_header(builder, "ETag", self.e_tag.as_deref());
        builder = set_optional_timestamp_header(builder, "Last-Modified", self.last_modified.as_ref());
        builder = set_metadata_headers(builder, &self.metadata);
        build_response(builder, S3ResponseBody::empty())
    }
}

// --- Listing operations ---

impl IntoS3Response for ListObjectsOutput {
    fn into_s3_response(self) -> Result<http::Response<S3ResponseBody>, S3Error> {
        xml_response("ListBucketResult", &self)
    }
}

impl IntoS3Response for ListObjectsV2Output {
    fn into_s3_response(self) -> Result<http::Response<S3ResponseBody>, S3Error> {
        xml_response("ListBucketResult", &self)
    }
}

// --- Multipart operations ---

impl IntoS3Response for CreateMultipartUploadOutput {
    fn into_s3_response(self) -> Result<http::Response<S3ResponseBody>, S3Error> {
        xml_response("InitiateMultipartUploadResult", &self)
    }
}

impl IntoS3Response for UploadPartOutput {
    fn into_s3_response(self) -> Result<http::Response<S3ResponseBody>, S3Error> {
        let mut builder = http::Response::builder().status(http::StatusCode::OK);
        builder = set_optional_header(builder, "ETag", self.e_tag.as_deref());
        build_response(builder, S3ResponseBody::empty())
    }
}

impl IntoS3Response for CompleteMultipartUploadOutput {
    fn into_s3_response(self) -> Result<http::Response<S3ResponseBody>, S3Error> {
        xml_response("CompleteMultipartUploadResult", &self)
    }
}

impl IntoS3Response for ListPartsOutput {
    fn into_s3_response(self) -> Result<http::Response<S3ResponseBody>, S3Error> {
        xml_response("ListPartsResult", &self)
    }
}

impl IntoS3Response for ListMultipartUploadsOutput {
    fn into_s3_response(self) -> Result<http::Response<S3ResponseBody>, S3Error> {
        xml_response("ListMultipartUploadsResult", &self)
    }
}

// ---------------------------------------------------------------------------
// Error responses
// ---------------------------------------------------------------------------

/// Format an `S3Error` as an XML error response.
#[must_use]
pub fn error_to_response(err: &S3Error, request_id: &str) -> http::Response<S3ResponseBody> {
    let xml_bytes = harbor_s3_xml::error_to_xml(
        err.code.as_str(),
        &err.message,
        err.resource.as_deref(),
        request_id,
    );

    let status = err.status_code;
    let body = S3ResponseBody::from_bytes(Bytes::from(xml_bytes));

    http::Response::builder()
        .status(status)
        .header("Content-Type", "application/xml")
        .body(body)
        .unwrap_or_else(|_| {
            http::Response::builder()
                .status(http::StatusCode::INTERNAL_SERVER_ERROR)
                .body(S3ResponseBody::empty())
                .expect("static response should be valid")
        })
}
