//! The main S3 HTTP service implementing hyper's `Service` trait.
//!
//! [`S3HttpService`] ties routing, dispatch, and response serialization into
//! a single hyper-compatible service. It handles:
//!
//! 1. Health check interception (`GET /_health`)
//! 2. Request body collection
//! 3. S3 request routing via [`S3Router`]
//! 4. `X-Amz-Content-Sha256` validation
//! 5. Operation dispatch to the [`S3Handler`]
//! 6. Common response headers (`x-amz-request-id`, `Server`)
//! 7. Error response formatting

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::BodyExt;
use hyper::body::Incoming;
use hyper::service::Service;
use sha2::{Digest, Sha256};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use harbor_s3_model::error::{S3Error, S3ErrorCode};

use crate::body::S3ResponseBody;
use crate::dispatch::{S3Handler, dispatch_operation};
use crate::response::error_to_response;
use crate::router::S3Router;

/// Configuration for the S3 HTTP service.
#[derive(Debug, Clone)]
pub struct S3HttpConfig {
    /// The base domain for virtual-hosted-style requests (e.g., `s3.localhost`).
    pub domain: String,
    /// Whether to enable virtual-hosted-style bucket addressing.
    pub virtual_hosting: bool,
    /// The region this service reports.
    pub region: String,
}

impl Default for S3HttpConfig {
    fn default() -> Self {
        Self {
            domain: "s3.localhost".to_owned(),
            virtual_hosting: true,
            region: "us-east-1".to_owned(),
        }
    }
}

/// The S3 HTTP service that implements hyper's `Service` trait.
///
/// Processes requests through the full S3 lifecycle: routing, dispatch to the
/// handler, and response formatting.
#[derive(Debug)]
pub struct S3HttpService<H: S3Handler> {
    handler: Arc<H>,
    router: S3Router,
}

impl<H: S3Handler> S3HttpService<H> {
    /// Create a new S3 HTTP service with the given handler and configuration.
    #[must_use]
    pub fn new(handler: H, config: &S3HttpConfig) -> Self {
        Self::from_shared(Arc::new(handler), config)
    }

    /// Create a new S3 HTTP service from a shared handler.
    #[must_use]
    pub fn from_shared(handler: Arc<H>, config: &S3HttpConfig) -> Self {
        let router = S3Router::new(&config.domain, config.virtual_hosting);
        Self { handler, router }
    }
}

impl<H: S3Handler> Clone for S3HttpService<H> {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
            router: self.router.clone(),
        }
    }
}

impl<H: S3Handler> Service<http::Request<Incoming>> for S3HttpService<H> {
    type Response = http::Response<S3ResponseBody>;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, req: http::Request<Incoming>) -> Self::Future {
        let handler = Arc::clone(&self.handler);
        let router = self.router.clone();

        Box::pin(async move {
            let request_id = Uuid::new_v4().to_string();

            let response = process_request(req, handler.as_ref(), &router, &request_id).await;
            let response = add_common_headers(response, &request_id);

            Ok(response)
        })
    }
}

/// Process an incoming HTTP request through the S3 pipeline.
async fn process_request<H: S3Handler>(
    req: http::Request<Incoming>,
    handler: &H,
    router: &S3Router,
    request_id: &str,
) -> http::Response<S3ResponseBody> {
    let method = req.method().clone();
    let uri = req.uri().clone();
    debug!(%method, %uri, request_id, "processing S3 request");

    if is_health_check(&method, uri.path()) {
        return health_check_response();
    }

    let ctx = match router.resolve(&req) {
        Ok(ctx) => ctx,
        Err(err) => {
            warn!(%method, %uri, error = %err, request_id, "failed to route S3 request");
            return error_to_response(&err, request_id);
        }
    };

    info!(
        operation = %ctx.operation,
        bucket = ?ctx.bucket,
        key = ?ctx.key,
        request_id,
        "routed S3 request"
    );

    let (parts, incoming) = req.into_parts();
    let body = match collect_body(incoming).await {
        Ok(body) => body,
        Err(err) => {
            error!(error = %err, request_id, "failed to collect request body");
            let s3_err = S3Error::internal_error("Failed to read request body");
            return error_to_response(&s3_err, request_id);
        }
    };

    if let Err(s3_err) = validate_content_sha256(&parts, &body) {
        warn!(error = %s3_err.message, request_id, "content SHA256 mismatch");
        return error_to_response(&s3_err, request_id);
    }

    let response = match dispatch_operation(handler, parts, body, ctx).await {
        Ok(response) => response,
        Err(err) => {
            debug!(error = %err, request_id, "S3 operation returned error");
            error_to_response(&err, request_id)
        }
    };

    strip_body_for_head(&method, response)
}

/// Drop the payload from a response to a HEAD request, keeping status and
/// headers. `HEAD /` routes through ListBuckets and must not echo the XML.
fn strip_body_for_head(
    method: &http::Method,
    response: http::Response<S3ResponseBody>,
) -> http::Response<S3ResponseBody> {
    if *method == http::Method::HEAD {
        response.map(|_| S3ResponseBody::empty())
    } else {
        response
    }
}

/// Collect the full body from a hyper `Incoming` stream into `Bytes`.
async fn collect_body(incoming: Incoming) -> Result<Bytes, hyper::Error> {
    let collected = incoming.collect().await?;
    Ok(collected.to_bytes())
}

/// Validate the `X-Amz-Content-Sha256` header against the request body.
///
/// If the header carries a concrete hex hash (not a streaming or unsigned
/// placeholder), it must match the SHA-256 of the actual body.
fn validate_content_sha256(parts: &http::request::Parts, body: &[u8]) -> Result<(), S3Error> {
    let Some(header_value) = parts.headers.get("x-amz-content-sha256") else {
        return Ok(());
    };

    let hash_str = header_value.to_str().map_err(|_| {
        S3Error::with_message(
            S3ErrorCode::XAmzContentSHA256Mismatch,
            "Invalid X-Amz-Content-Sha256 header encoding",
        )
    })?;

    // Streaming and unsigned payload placeholders are not content hashes.
    if matches!(
        hash_str,
        "UNSIGNED-PAYLOAD"
            | "STREAMING-AWS4-HMAC-SHA256-PAYLOAD"
            | "STREAMING-AWS4-HMAC-SHA256-PAYLOAD-TRAILER"
            | "STREAMING-UNSIGNED-PAYLOAD-TRAILER"
    ) {
        return Ok(());
    }

    if hash_str.len() != 64 || !hash_str.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(S3Error::with_message(
            S3ErrorCode::XAmzContentSHA256Mismatch,
            format!("The provided 'x-amz-content-sha256' header is not valid: {hash_str}"),
        ));
    }

    let actual = hex::encode(Sha256::digest(body));
    if actual != hash_str {
        return Err(S3Error::with_message(
            S3ErrorCode::XAmzContentSHA256Mismatch,
            "The provided 'x-amz-content-sha256' header does not match what was computed",
        ));
    }

    Ok(())
}

/// Check if the request is a health check probe.
fn is_health_check(method: &http::Method, path: &str) -> bool {
    *method == http::Method::GET && (path == "/_health" || path == "/health")
}

/// Produce a health check response.
fn health_check_response() -> http::Response<S3ResponseBody> {
    http::Response::builder()
        .status(http::StatusCode::OK)
        .header("Content-Type", "application/json")
        .body(S3ResponseBody::from_string(
            r#"{"status":"running","service":"s3"}"#,
        ))
        .expect("static health response should be valid")
}

/// Add common response headers to every S3 response.
fn add_common_headers(
    mut response: http::Response<S3ResponseBody>,
    request_id: &str,
) -> http::Response<S3ResponseBody> {
    let headers = response.headers_mut();

    if let Ok(hv) = http::header::HeaderValue::from_str(request_id) {
        headers.insert("x-amz-request-id", hv.clone());
        headers.insert("x-amz-id-2", hv);
    }

    headers.insert("Server", http::header::HeaderValue::from_static("HarborS3"));

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_detect_health_check_paths() {
        assert!(is_health_check(&http::Method::GET, "/_health"));
        assert!(is_health_check(&http::Method::GET, "/health"));
        assert!(!is_health_check(&http::Method::POST, "/_health"));
        assert!(!is_health_check(&http::Method::GET, "/mybucket"));
    }

    #[test]
    fn test_should_produce_health_check_response() {
        let resp = health_check_response();
        assert_eq!(resp.status(), http::StatusCode::OK);
        assert_eq!(
            resp.headers()
                .get("Content-Type")
                .and_then(|v| v.to_str().ok()),
            Some("application/json"),
        );
    }

    #[test]
    fn test_should_add_common_headers() {
        let resp = http::Response::builder()
            .status(http::StatusCode::OK)
            .body(S3ResponseBody::empty())
            .expect("valid response");
        let resp = add_common_headers(resp, "test-request-id");
        assert_eq!(
            resp.headers()
                .get("x-amz-request-id")
                .and_then(|v| v.to_str().ok()),
            Some("test-request-id"),
        );
        assert_eq!(
            resp.headers().get("Server").and_then(|v| v.to_str().ok()),
            Some("HarborS3"),
        );
    }

    #[test]
    fn test_should_strip_body_from_head_response() {
        use http_body::Body;

        let resp = http::Response::builder()
            .status(http::StatusCode::OK)
            .header("Content-Type", "application/xml")
            .body(S3ResponseBody::from_string("<ListAllMyBucketsResult/>"))
            .expect("valid response");
        let resp = strip_body_for_head(&http::Method::HEAD, resp);
        assert_eq!(resp.status(), http::StatusCode::OK);
        assert!(resp.body().is_end_stream(), "HEAD body should be empty");
        assert!(
            resp.headers().get("Content-Type").is_some(),
            "headers should survive the strip"
        );
    }

    #[test]
    fn test_should_keep_body_for_get_response() {
        use http_body::Body;

        let resp = http::Response::builder()
            .status(http::StatusCode::OK)
            .body(S3ResponseBody::from_string("<ListAllMyBucketsResult/>"))
            .expect("valid response");
        let resp = strip_body_for_head(&http::Method::GET, resp);
        assert!(!resp.body().is_end_stream());
    }

    #[test]
    fn test_should_create_default_config() {
        let config = S3HttpConfig::default();
        assert_eq!(config.domain, "s3.localhost");
        assert!(config.virtual_hosting);
        assert_eq!(config.region, "us-east-1");
    }

    // -----------------------------------------------------------------------
    // X-Amz-Content-Sha256 validation
    // -----------------------------------------------------------------------

    fn parts_with_sha256(header_value: &str) -> http::request::Parts {
        let (parts, ()) = http::Request::builder()
            .method(http::Method::PUT)
            .uri("/bucket/key")
            .header("x-amz-content-sha256", header_value)
            .body(())
            .expect("valid request")
            .into_parts();
        parts
    }

    #[test]
    fn test_should_accept_absent_content_sha256() {
        let (parts, ()) = http::Request::builder()
            .method(http::Method::PUT)
            .uri("/bucket/key")
            .body(())
            .expect("valid request")
            .into_parts();
        assert!(validate_content_sha256(&parts, b"hello").is_ok());
    }

    #[test]
    fn test_should_accept_unsigned_payload() {
        let parts = parts_with_sha256("UNSIGNED-PAYLOAD");
        assert!(validate_content_sha256(&parts, b"hello").is_ok());
    }

    #[test]
    fn test_should_accept_correct_content_sha256() {
        let body = b"hello";
        let hash = hex::encode(Sha256::digest(body));
        let parts = parts_with_sha256(&hash);
        assert!(validate_content_sha256(&parts, body).is_ok());
    }

    #[test]
    fn test_should_reject_wrong_content_sha256() {
        let wrong_hash = hex::encode(Sha256::digest(b"wrong"));
        let parts = parts_with_sha256(&wrong_hash);
        let result = validate_content_sha256(&parts, b"hello");
        assert_eq!(
            result.expect_err("mismatch should fail").code,
            S3ErrorCode::XAmzContentSHA256Mismatch
        );
    }

    #[test]
    fn test_should_reject_invalid_content_sha256() {
        let parts = parts_with_sha256("invalid-sha256");
        let result = validate_content_sha256(&parts, b"hello");
        assert_eq!(
            result.expect_err("garbage header should fail").code,
            S3ErrorCode::XAmzContentSHA256Mismatch
        );
    }
}
