//! Error taxonomy integration tests.

#[cfg(test)]
mod tests {
    use aws_sdk_s3::primitives::ByteStream;

    use crate::{cleanup_bucket, create_test_bucket, s3_client, test_bucket_name};

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_return_no_such_bucket_on_put() {
        let client = s3_client();
        let bucket = test_bucket_name("ghost");

        let result = client
            .put_object()
            .bucket(&bucket)
            .key("file.txt")
            .body(ByteStream::from_static(b"data"))
            .send()
            .await;

        let err = result.expect_err("put to nonexistent bucket should fail");
        let raw = err.raw_response().map(|r| r.status().as_u16());
        assert_eq!(raw, Some(404), "expected 404, got {raw:?}");
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_return_no_such_key_on_get() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "nokey").await;

        let result = client
            .get_object()
            .bucket(&bucket)
            .key("nonexistent.txt")
            .send()
            .await;

        let err = result.expect_err("get nonexistent key should fail");
        assert!(
            err.into_service_error().is_no_such_key(),
            "expected NoSuchKey"
        );

        cleanup_bucket(&client, &bucket).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_return_no_such_bucket_on_list() {
        let client = s3_client();
        let bucket = test_bucket_name("nolist");

        let result = client.list_objects_v2().bucket(&bucket).send().await;

        let err = result.expect_err("list on nonexistent bucket should fail");
        assert!(
            err.into_service_error().is_no_such_bucket(),
            "expected NoSuchBucket"
        );
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_return_not_found_on_delete_of_missing_bucket() {
        let client = s3_client();
        let bucket = test_bucket_name("nodel");

        let result = client.delete_bucket().bucket(&bucket).send().await;
        let err = result.expect_err("delete of missing bucket should fail");
        let raw = err.raw_response().map(|r| r.status().as_u16());
        assert_eq!(raw, Some(404), "expected 404, got {raw:?}");
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_return_no_such_upload_on_part_upload() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "noupload").await;

        let result = client
            .upload_part()
            .bucket(&bucket)
            .key("file.bin")
            .upload_id("nonexistent-upload-id")
            .part_number(1)
            .body(ByteStream::from_static(b"data"))
            .send()
            .await;

        assert!(result.is_err(), "upload to bogus upload_id should fail");

        cleanup_bucket(&client, &bucket).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_return_no_such_upload_on_complete() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "nocomplete").await;

        let completed = aws_sdk_s3::types::CompletedMultipartUpload::builder()
            .parts(
                aws_sdk_s3::types::CompletedPart::builder()
                    .part_number(1)
                    .e_tag("\"deadbeef\"")
                    .build(),
            )
            .build();

        let result = client
            .complete_multipart_upload()
            .bucket(&bucket)
            .key("file.bin")
            .upload_id("nonexistent-upload-id")
            .multipart_upload(completed)
            .send()
            .await;

        assert!(result.is_err(), "complete with bogus upload_id should fail");

        cleanup_bucket(&client, &bucket).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_reject_empty_completion_manifest() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "emptymanifest").await;

        let create = client
            .create_multipart_upload()
            .bucket(&bucket)
            .key("file.bin")
            .send()
            .await
            .expect("create");
        let upload_id = create.upload_id().expect("upload_id");

        let empty = aws_sdk_s3::types::CompletedMultipartUpload::builder().build();
        let result = client
            .complete_multipart_upload()
            .bucket(&bucket)
            .key("file.bin")
            .upload_id(upload_id)
            .multipart_upload(empty)
            .send()
            .await;
        assert!(result.is_err(), "completion without parts should fail");

        client
            .abort_multipart_upload()
            .bucket(&bucket)
            .key("file.bin")
            .upload_id(upload_id)
            .send()
            .await
            .ok();
        cleanup_bucket(&client, &bucket).await;
    }
}
