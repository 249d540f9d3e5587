//! S3 operation handler implementation for [`HarborS3`].
//!
//! Bridges the HTTP layer (`harbor-s3-http`) with the business logic
//! (`harbor-s3-core`) by implementing the [`S3Handler`] trait. Each operation
//! is dispatched to the matching `handle_*` method on [`HarborS3`], with
//! request deserialization via [`FromS3Request`] and response serialization
//! via [`IntoS3Response`].

use std::future::Future;
use std::pin::Pin;

use bytes::Bytes;
use harbor_s3_core::HarborS3;
use harbor_s3_http::body::S3ResponseBody;
use harbor_s3_http::dispatch::S3Handler;
use harbor_s3_http::request::FromS3Request;
use harbor_s3_http::response::IntoS3Response;
use harbor_s3_http::router::RoutingContext;
use harbor_s3_model::S3Operation;
use harbor_s3_model::error::S3Error;

/// Wrapper implementing [`S3Handler`] by delegating to [`HarborS3`] methods.
#[derive(Debug, Clone)]
pub struct HarborHandler(pub HarborS3);

impl S3Handler for HarborHandler {
    fn handle_operation(
        &self,
        op: S3Operation,
        parts: http::request::Parts,
        body: Bytes,
        ctx: RoutingContext,
    ) -> Pin<Box<dyn Future<Output = Result<http::Response<S3ResponseBody>, S3Error>> + Send>> {
        let provider = self.0.clone();
        Box::pin(async move {
            let bucket = ctx.bucket.as_deref();
            let key = ctx.key.as_deref();
            let query_params = &ctx.query_params;

            match op {
                // ---------------------------------------------------------------
                // Bucket operations
                // ---------------------------------------------------------------
                S3Operation::CreateBucket => {
                    dispatch_output(&parts, bucket, key, query_params, body, |input| {
                        provider.handle_create_bucket(input)
                    })
                    .await
                }
                S3Operation::DeleteBucket => {
                    dispatch_void(&parts, bucket, key, query_params, body, |input| {
                        provider.handle_delete_bucket(input)
                    })
                    .await
                }
                S3Operation::HeadBucket => {
                    dispatch_output(&parts, bucket, key, query_params, body, |input| {
                        provider.handle_head_bucket(input)
                    })
                    .await
                }
                S3Operation::ListBuckets => {
                    dispatch_output(&parts, bucket, key, query_params, body, |input| {
                        provider.handle_list_buckets(input)
                    })
                    .await
                }
                S3Operation::GetBucketLocation => {
                    dispatch_output(&parts, bucket, key, query_params, body, |input| {
                        provider.handle_get_bucket_location(input)
                    })
                    .await
                }

                // ---------------------------------------------------------------
                // Object operations
                // ---------------------------------------------------------------
                S3Operation::PutObject => {
                    dispatch_output(&parts, bucket, key, query_params, body, |input| {
                        provider.handle_put_object(input)
                    })
                    .await
                }
                S3Operation::GetObject => {
                    dispatch_output(&parts, bucket, key, query_params, body, |input| {
                        provider.handle_get_object(input)
                    })
                    .await
                }
                S3Operation::HeadObject => {
                    dispatch_output(&parts, bucket, key, query_params, body, |input| {
                        provider.handle_head_object(input)
                    })
                    .await
                }
                S3Operation::DeleteObject => {
                    dispatch_void(&parts, bucket, key, query_params, body, |input| {
                        provider.handle_delete_object(input)
                    })
                    .await
                }

                // ---------------------------------------------------------------
                // Listing
                // ---------------------------------------------------------------
                S3Operation::ListObjects => {
                    dispatch_output(&parts, bucket, key, query_params, body, |input| {
                        provider.handle_list_objects(input)
                    })
                    .await
                }
                S3Operation::ListObjectsV2 => {
                    dispatch_output(&parts, bucket, key, query_params, body, |input| {
                        provider.handle_list_objects_v2(input)
                    })
                    .await
                }

                // ---------------------------------------------------------------
                // Multipart upload
                // ---------------------------------------------------------------
                S3Operation::CreateMultipartUpload => {
                    dispatch_output(&parts, bucket, key, query_params, body, |input| {
                        provider.handle_create_multipart_upload(input)
                    })
                    .await
                }
                S3Operation::UploadPart => {
                    dispatch_output(&parts, bucket, key, query_params, body, |input| {
                        provider.handle_upload_part(input)
                    })
                    .await
                }
                S3Operation::CompleteMultipartUpload => {
                    dispatch_output(&parts, bucket, key, query_params, body, |input| {
                        provider.handle_complete_multipart_upload(input)
                    })
                    .await
                }
                S3Operation::AbortMultipartUpload => {
                    dispatch_void(&parts, bucket, key, query_params, body, |input| {
                        provider.handle_abort_multipart_upload(input)
                    })
                    .await
                }
                S3Operation::ListParts => {
                    dispatch_output(&parts, bucket, key, query_params, body, |input| {
                        provider.handle_list_parts(input)
                    })
                    .await
                }
                S3Operation::ListMultipartUploads => {
                    dispatch_output(&parts, bucket, key, query_params, body, |input| {
                        provider.handle_list_multipart_uploads(input)
                    })
                    .await
                }

                _ => Err(S3Error::not_implemented(op.as_str())),
            }
        })
    }
}

/// Dispatch an operation whose handler returns a typed output.
async fn dispatch_output<I, O, F, Fut>(
    parts: &http::request::Parts,
    bucket: Option<&str>,
    key: Option<&str>,
    query_params: &[(String, String)],
    body: Bytes,
    handler_fn: F,
) -> Result<http::Response<S3ResponseBody>, S3Error>
where
    I: FromS3Request,
    O: IntoS3Response,
    F: FnOnce(I) -> Fut,
    Fut: Future<Output = Result<O, S3Error>>,
{
    let input = I::from_s3_request(parts, bucket, key, query_params, body)?;
    let output = handler_fn(input).await?;
    output.into_s3_response()
}

/// Dispatch an operation that returns `Result<(), S3Error>`.
///
/// Answers 204 No Content on success.
async fn dispatch_void<I, F, Fut>(
    parts: &http::request::Parts,
    bucket: Option<&str>,
    key: Option<&str>,
    query_params: &[(String, String)],
    body: Bytes,
    handler_fn: F,
) -> Result<http::Response<S3ResponseBody>, S3Error>
where
    I: FromS3Request,
    F: FnOnce(I) -> Fut,
    Fut: Future<Output = Result<(), S3Error>>,
{
    let input = I::from_s3_request(parts, bucket, key, query_params, body)?;
    handler_fn(input).await?;
    http::Response::builder()
        .status(http::StatusCode::NO_CONTENT)
        .body(S3ResponseBody::empty())
        .map_err(|e| S3Error::internal_error(e.to_string()))
}
