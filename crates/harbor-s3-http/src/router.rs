//! S3 request routing: virtual hosting resolution and operation identification.
//!
//! The [`S3Router`] maps incoming HTTP requests to S3 operations by examining:
//!
//! - The HTTP method (GET, PUT, DELETE, POST, HEAD)
//! - Whether a bucket name is present (from the Host header or path)
//! - Whether an object key is present (from the URI path)
//! - Query parameters that identify sub-resources (e.g., `?uploads`, `?location`)
//!
//! Virtual hosting is supported: the bucket name can come from either the `Host`
//! header (e.g., `mybucket.s3.localhost`) or from the first path segment
//! (path-style).

use http::Method;
use percent_encoding::percent_decode_str;
use harbor_s3_model::error::{S3Error, S3ErrorCode};
use harbor_s3_model::operations::S3Operation;

/// Configuration for S3 request routing.
#[derive(Debug, Clone)]
pub struct S3Router {
    /// The base domain for virtual-hosted-style requests (e.g., `s3.localhost`).
    pub domain: String,
    /// Whether to enable virtual-hosted-style bucket addressing.
    pub virtual_hosting: bool,
}

/// The result of routing an HTTP request to an S3 operation.
#[derive(Debug, Clone)]
pub struct RoutingContext {
    /// The resolved bucket name, if any.
    pub bucket: Option<String>,
    /// The resolved object key, if any.
    pub key: Option<String>,
    /// The identified S3 operation.
    pub operation: S3Operation,
    /// Parsed query parameters from the request URI.
    pub query_params: Vec<(String, String)>,
}

impl S3Router {
    /// Create a new router with the given domain and virtual hosting setting.
    #[must_use]
    pub fn new(domain: impl Into<String>, virtual_hosting: bool) -> Self {
        Self {
            domain: domain.into(),
            virtual_hosting,
        }
    }

    /// Resolve an HTTP request to an S3 operation and its routing context.
    ///
    /// Resolution order:
    /// 1. Virtual hosting (bucket from the Host header)
    /// 2. Path parsing (bucket and key from the URI path)
    /// 3. Query parameter parsing
    /// 4. Operation identification from method + path structure + query params
    ///
    /// # Errors
    ///
    /// Returns an `S3Error` if the request cannot be routed to a valid
    /// operation (e.g., unsupported HTTP method).
    pub fn resolve<B>(&self, req: &http::Request<B>) -> Result<RoutingContext, S3Error> {
        let method = req.method();
        let uri = req.uri();
        let headers = req.headers();

        let query_params = parse_query_params(uri.query().unwrap_or(""));

        let virtual_bucket = if self.virtual_hosting {
            extract_virtual_host_bucket(headers, &self.domain)
        } else {
            None
        };

        let path = uri.path();
        let (path_bucket, path_key) = parse_path(path);

        let (bucket, key) = if let Some(vhost_bucket) = virtual_bucket {
            // Virtual hosting: bucket comes from Host, entire path is the key.
            let key = path
                .strip_prefix('/')
                .filter(|raw| !raw.is_empty())
                .map(decode_uri_component);
            (Some(vhost_bucket), key)
        } else {
            // Path-style: bucket is the first path segment, rest is the key.
            (path_bucket, path_key)
        };

        let operation = identify_operation(method, bucket.as_ref(), key.as_ref(), &query_params)?;

        Ok(RoutingContext {
            bucket,
            key,
            operation,
            query_params,
        })
    }
}

/// Extract the bucket name from a virtual-hosted-style Host header.
///
/// With domain `s3.localhost`, a Host of `mybucket.s3.localhost:4566` yields
/// `Some("mybucket")`.
fn extract_virtual_host_bucket(headers: &http::HeaderMap, domain: &str) -> Option<String> {
    let host = headers
        .get(http::header::HOST)
        .and_then(|v| v.to_str().ok())?;

    let host_without_port = host.split(':').next().unwrap_or(host);

    let suffix = format!(".{domain}");
    if host_without_port.ends_with(&suffix) && host_without_port.len() > suffix.len() {
        let bucket = &host_without_port[..host_without_port.len() - suffix.len()];
        if !bucket.is_empty() {
            return Some(bucket.to_owned());
        }
    }

    None
}

/// Parse the URI path into an optional bucket and optional key.
///
/// Path format: `/{bucket}` or `/{bucket}/{key...}`
fn parse_path(path: &str) -> (Option<String>, Option<String>) {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    if trimmed.is_empty() {
        return (None, None);
    }

    if let Some(pos) = trimmed.find('/') {
        let bucket = decode_uri_component(&trimmed[..pos]);
        let key_raw = &trimmed[pos + 1..];
        let key = if key_raw.is_empty() {
            None
        } else {
            Some(decode_uri_component(key_raw))
        };
        (Some(bucket), key)
    } else {
        (Some(decode_uri_component(trimmed)), None)
    }
}

/// Decode a percent-encoded URI component.
fn decode_uri_component(s: &str) -> String {
    percent_decode_str(s).decode_utf8_lossy().into_owned()
}

/// Parse a query string into key-value pairs.
fn parse_query_params(query: &str) -> Vec<(String, String)> {
    if query.is_empty() {
        return Vec::new();
    }

    query
        .split('&')
        .filter(|s| !s.is_empty())
        .map(|pair| {
            if let Some(pos) = pair.find('=') {
                let key = decode_uri_component(&pair[..pos]);
                let value = decode_uri_component(&pair[pos + 1..]);
                (key, value)
            } else {
                (decode_uri_component(pair), String::new())
            }
        })
        .collect()
}

fn query_has_key(params: &[(String, String)], key: &str) -> bool {
    params.iter().any(|(k, _)| k == key)
}

fn query_value<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// Identify the S3 operation from the HTTP method, path structure, and query
/// parameters.
fn identify_operation(
    method: &Method,
    bucket: Option<&String>,
    key: Option<&String>,
    query_params: &[(String, String)],
) -> Result<S3Operation, S3Error> {
    match (method, bucket.is_some(), key.is_some()) {
        // No bucket: only ListBuckets is valid. HEAD gets the same route
        // and the body is dropped at the service layer.
        (&Method::GET | &Method::HEAD, false, false) => Ok(S3Operation::ListBuckets),

        // Bucket-level operations (no key).
        (method, true, false) => identify_bucket_operation(method, query_params),

        // Object-level operations (bucket + key).
        (method, true, true) => identify_object_operation(method, query_params),

        // Key without bucket should not occur.
        (_, false, true) => Err(S3Error::with_message(
            S3ErrorCode::InvalidRequest,
            "Object key specified without bucket",
        )),

        (_, false, false) => Err(S3Error::with_message(
            S3ErrorCode::MethodNotAllowed,
            "Only GET and HEAD are allowed at the service level",
        )),
    }
}

/// Identify a bucket-level operation (bucket present, no key).
fn identify_bucket_operation(
    method: &Method,
    params: &[(String, String)],
) -> Result<S3Operation, S3Error> {
    match *method {
        Method::GET => Ok(identify_bucket_get(params)),
        Method::PUT => Ok(S3Operation::CreateBucket),
        Method::DELETE => Ok(S3Operation::DeleteBucket),
        Method::HEAD => Ok(S3Operation::HeadBucket),
        _ => Err(S3Error::method_not_allowed(method.as_str())),
    }
}

/// Identify a GET operation on a bucket.
fn identify_bucket_get(params: &[(String, String)]) -> S3Operation {
    // Sub-resource query parameters take precedence over plain listing.
    if query_value(params, "list-type") == Some("2") {
        return S3Operation::ListObjectsV2;
    }
    if query_has_key(params, "location") {
        return S3Operation::GetBucketLocation;
    }
    if query_has_key(params, "uploads") {
        return S3Operation::ListMultipartUploads;
    }

    S3Operation::ListObjects
}

/// Identify an object-level operation (bucket + key present).
fn identify_object_operation(
    method: &Method,
    params: &[(String, String)],
) -> Result<S3Operation, S3Error> {
    match *method {
        Method::GET => {
            if query_has_key(params, "uploadId") {
                Ok(S3Operation::ListParts)
            } else {
                Ok(S3Operation::GetObject)
            }
        }
        Method::PUT => {
            // UploadPart must carry both partNumber and uploadId.
            if query_has_key(params, "partNumber") && query_has_key(params, "uploadId") {
                Ok(S3Operation::UploadPart)
            } else {
                Ok(S3Operation::PutObject)
            }
        }
        Method::DELETE => {
            if query_has_key(params, "uploadId") {
                Ok(S3Operation::AbortMultipartUpload)
            } else {
                Ok(S3Operation::DeleteObject)
            }
        }
        Method::HEAD => Ok(S3Operation::HeadObject),
        Method::POST => {
            if query_has_key(params, "uploads") {
                Ok(S3Operation::CreateMultipartUpload)
            } else if query_has_key(params, "uploadId") {
                Ok(S3Operation::CompleteMultipartUpload)
            } else {
                Err(S3Error::with_message(
                    S3ErrorCode::MethodNotAllowed,
                    "The specified method is not allowed against this resource",
                ))
            }
        }
        _ => Err(S3Error::method_not_allowed(method.as_str())),
    }
}
