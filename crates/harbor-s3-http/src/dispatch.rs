//! S3 operation dispatch: routes a resolved operation to the handler.
//!
//! [`dispatch_operation`] bridges the routing layer with the business logic.
//! Given a [`RoutingContext`] plus the HTTP parts and body, it deserializes
//! the typed Input (via [`FromS3Request`](crate::request::FromS3Request)),
//! calls the [`S3Handler`], and serializes the Output into an HTTP response
//! (via [`IntoS3Response`](crate::response::IntoS3Response)). The handler
//! implementation owns that middle step so the HTTP crate stays free of
//! business logic.

use std::future::Future;
use std::pin::Pin;

use bytes::Bytes;
use harbor_s3_model::S3Operation;
use harbor_s3_model::error::S3Error;

use crate::body::S3ResponseBody;
use crate::router::RoutingContext;

/// Trait that the business logic provider must implement.
///
/// This is the boundary between the HTTP layer and the S3 business logic.
/// The server crate implements it by parsing the input, calling the matching
/// provider method, and building the response.
///
/// Uses boxed futures so the service layer can hold an `Arc<dyn S3Handler>`.
pub trait S3Handler: Send + Sync + 'static {
    /// Handle an S3 operation and produce an HTTP response.
    fn handle_operation(
        &self,
        op: S3Operation,
        parts: http::request::Parts,
        body: Bytes,
        ctx: RoutingContext,
    ) -> Pin<Box<dyn Future<Output = Result<http::Response<S3ResponseBody>, S3Error>> + Send>>;
}

/// Dispatch a routed S3 request to the handler.
pub async fn dispatch_operation<H: S3Handler>(
    handler: &H,
    parts: http::request::Parts,
    body: Bytes,
    ctx: RoutingContext,
) -> Result<http::Response<S3ResponseBody>, S3Error> {
    let op = ctx.operation;
    tracing::debug!(operation = %op, bucket = ?ctx.bucket, key = ?ctx.key, "dispatching S3 operation");
    handler.handle_operation(op, parts, body, ctx).await
}

/// A handler that answers `NotImplemented` for every operation.
///
/// Useful for testing the routing and parsing layers in isolation.
#[derive(Debug, Clone, Default)]
pub struct NotImplementedHandler;

impl S3Handler for NotImplementedHandler {
    fn handle_operation(
        &self,
        op: S3Operation,
        _parts: http::request::Parts,
        _body: Bytes,
        _ctx: RoutingContext,
    ) -> Pin<Box<dyn Future<Output = Result<http::Response<S3ResponseBody>, S3Error>> + Send>> {
        Box::pin(async move { Err(S3Error::not_implemented(op.as_str())) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_should_return_not_implemented_for_default_handler() {
        let handler = NotImplementedHandler;
        let req = http::Request::builder()
            .method(http::Method::GET)
            .uri("/mybucket")
            .body(())
            .expect("valid request");
        let (parts, ()) = req.into_parts();
        let ctx = RoutingContext {
            bucket: Some("mybucket".to_owned()),
            key: None,
            operation: S3Operation::ListObjects,
            query_params: vec![],
        };

        let err = dispatch_operation(&handler, parts, Bytes::new(), ctx)
            .await
            .unwrap_err();
        assert_eq!(err.code, harbor_s3_model::S3ErrorCode::NotImplemented);
    }
}
